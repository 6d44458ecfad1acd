//!
//! Datum identifiers and the static datum table
//!
//! Grounded on the teacher's `datums.rs` table macro idiom, narrowed to the datum
//! universe spec.md §4.2 actually dispatches on: `NoDatum`, the NAD27/NAD83 pair that
//! gets NADCON treatment, and any other named datum that goes through Molodensky.

use crate::ellipsoid::EllipsoidDefn;
use crate::ellipsoids;

/// NAD83's defining ellipsoid parameters (spec.md §4.2).
pub const NAD83_ELLIPSOID: EllipsoidDefn = EllipsoidDefn {
    id: "NAD83",
    a: 6_378_137.0,
    rf: 6_378_137.0 / (6_378_137.0 - 6_356_752.314_14),
};

/// WGS84's ellipsoid, used as the Molodensky hub (spec.md §4.2).
pub const WGS84_ELLIPSOID: EllipsoidDefn = ellipsoids::WGS84;

/// NAD27's defining ellipsoid (Clarke 1866).
pub const NAD27_ELLIPSOID: EllipsoidDefn = ellipsoids::CLRK66;

/// A datum definition: the ellipsoid it is referenced to, plus the 3-parameter shift
/// to WGS-84 used by the Molodensky path. `NoDatum` has no corresponding `DatumDefn` —
/// it is represented at the call site as `Option<DatumDefn>` being `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatumDefn {
    pub id: &'static str,
    pub ellps: EllipsoidDefn,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

pub const WGS84: DatumDefn = DatumDefn {
    id: "WGS84",
    ellps: WGS84_ELLIPSOID,
    dx: 0.,
    dy: 0.,
    dz: 0.,
};

pub const NAD83: DatumDefn = DatumDefn {
    id: "NAD83",
    ellps: NAD83_ELLIPSOID,
    dx: 0.,
    dy: 0.,
    dz: 0.,
};

/// NAD27's mean (non-NADCON) shift to WGS84; used only as a Molodensky fallback when
/// NADCON reports a point out of its grid coverage (spec.md §4.2's NADCON contract).
pub const NAD27: DatumDefn = DatumDefn {
    id: "NAD27",
    ellps: NAD27_ELLIPSOID,
    dx: -8.,
    dy: 160.,
    dz: 176.,
};

const NAMED_DATUMS: &[&DatumDefn] = &[&WGS84, &NAD83, &NAD27];

/// Every other named datum carries an explicit 3-parameter shift and is dispatched
/// through Molodensky only (spec.md §4.2's "both sides are non-NAD datums" case).
pub fn find_datum(name: &str) -> Option<&'static DatumDefn> {
    NAMED_DATUMS
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(name))
        .copied()
}

/// Whether a datum identifier is dispatched via NADCON when paired with the other one.
pub fn is_nad(name: &str) -> Option<NadCode> {
    if name.eq_ignore_ascii_case("NAD27") {
        Some(NadCode::Nad27)
    } else if name.eq_ignore_ascii_case("NAD83") {
        Some(NadCode::Nad83)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NadCode {
    Nad27,
    Nad83,
}
