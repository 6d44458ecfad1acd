//!
//! Linear and angular unit conversion (spec.md §4.3)
//!

use crate::consts::{D2R, R2D, SEC_TO_RAD};

/// A named linear unit definition; static table searched case-insensitively, same
/// idiom as the teacher's `units.rs`.
#[derive(Debug, Copy, Clone)]
pub struct UnitDefn {
    pub name: &'static str,
    pub to_meter: f64,
}

macro_rules! unit {
    ($name:expr, $to_meter:expr) => {
        UnitDefn {
            name: $name,
            to_meter: $to_meter,
        }
    };
}

const UNITS: &[UnitDefn] = &[
    unit!("m", 1.0),
    unit!("meter", 1.0),
    unit!("km", 1000.0),
    unit!("ft", 0.3048),
    unit!("us-ft", 1200. / 3937.0),
];

pub fn find_unit_to_meter(name: &str) -> Option<f64> {
    UNITS
        .iter()
        .find(|u| u.name.eq_ignore_ascii_case(name))
        .map(|u| u.to_meter)
}

/// The angular units a projection parameter / coordinate can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularUnit {
    Radian,
    Degree,
    ArcSecond,
    Dms,
}

impl AngularUnit {
    /// Convert a value expressed in `self` to radians. DMS values are packed doubles;
    /// see [`crate::dms`] for the packing format.
    pub fn to_radians(self, value: f64) -> crate::errors::Result<f64> {
        match self {
            AngularUnit::Radian => Ok(value),
            AngularUnit::Degree => Ok(value * D2R),
            AngularUnit::ArcSecond => Ok(value * SEC_TO_RAD),
            AngularUnit::Dms => crate::dms::unpack(value).map(|deg| deg * D2R),
        }
    }

    pub fn from_radians(self, value: f64) -> crate::errors::Result<f64> {
        match self {
            AngularUnit::Radian => Ok(value),
            AngularUnit::Degree => Ok(value * R2D),
            AngularUnit::ArcSecond => Ok(value / SEC_TO_RAD),
            AngularUnit::Dms => crate::dms::pack(value * R2D),
        }
    }
}

/// Linear units relevant to projection coordinates: meters and feet, convertible via
/// fixed constants (spec.md §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearUnit {
    Meter,
    Feet,
}

impl LinearUnit {
    pub fn to_meter(self) -> f64 {
        match self {
            LinearUnit::Meter => 1.0,
            LinearUnit::Feet => 0.3048,
        }
    }
}
