//!
//! Universal Transverse Mercator (spec.md §4.1, code UTM)
//!
//! A fixed-convention wrapper around [`super::tmerc::TransverseMercator`]: zone number
//! (slot 2, 1-60) and hemisphere (sign of slot 3: >=0 north, <0 south) pick the central
//! meridian and false northing; scale factor and false easting are the UTM constants.
//! A zone of 0 means "derive it": slot 0 then holds a central-meridian longitude
//! (radians, same convention as every other projection's angle slots) and the zone is
//! computed from it via [`Utm::zone_for_longitude`] (spec.md §4.1).

use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, Result};
use crate::parameters::ProjParams;
use crate::projections::tmerc::TransverseMercator;

const UTM_K0: f64 = 0.9996;
const UTM_FE: f64 = 500_000.0;
const UTM_FN_SOUTH: f64 = 10_000_000.0;

#[derive(Debug, Clone, Copy)]
pub struct Utm {
    tm: TransverseMercator,
    pub zone: u8,
    pub north: bool,
}

impl Utm {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let zone = params.get(2).round();
        let zone = if zone == 0.0 {
            Self::zone_for_longitude(params.get(0).to_degrees()) as f64
        } else {
            zone
        };
        if !(1.0..=60.0).contains(&zone) {
            return Err(Error::InvalidParameterValue("UTM zone must be in 1..=60"));
        }
        let north = params.get(3) >= 0.0;
        let zone = zone as u8;
        let lon0 = (zone as f64 * 6.0 - 183.0).to_radians();
        let fn_ = if north { 0.0 } else { UTM_FN_SOUTH };
        let tm = TransverseMercator::with_zone_params(ellps, lon0, 0.0, UTM_FE, fn_, UTM_K0)?;
        Ok(Self { tm, zone, north })
    }

    /// Derive the UTM zone number for a longitude (degrees), per the standard 6°-wide
    /// zone convention (zone 1 starts at -180°).
    pub fn zone_for_longitude(lon_deg: f64) -> u8 {
        let z = ((lon_deg + 180.0) / 6.0).floor() as i64 + 1;
        z.clamp(1, 60) as u8
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        self.tm.forward(lam, phi)
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        self.tm.inverse(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_inverse_round_trip() {
        let ellps = Ellipsoid::from_a_and_shape(6_378_137.0, crate::ellipsoid::Shape::Rf(298.257_223_563)).unwrap();
        let mut p = ProjParams::default();
        p.0[2] = 18.0;
        p.0[3] = 1.0;
        let proj = Utm::new(&ellps, &p).unwrap();

        let (x, y) = proj.forward((-73f64).to_radians(), 40f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, (-73f64).to_radians(), epsilon = 1e-8);
        assert_abs_diff_eq!(phi, 40f64.to_radians(), epsilon = 1e-8);
    }

    #[test]
    fn zone_for_longitude_matches_convention() {
        assert_eq!(Utm::zone_for_longitude(-73.0), 18);
        assert_eq!(Utm::zone_for_longitude(-180.0), 1);
        assert_eq!(Utm::zone_for_longitude(179.9999), 60);
    }

    #[test]
    fn zone_zero_is_derived_from_the_central_meridian() {
        let ellps = Ellipsoid::from_defn(&crate::ellipsoids::WGS84).unwrap();
        let mut p = ProjParams::default();
        p.0[0] = (-105f64).to_radians();
        p.0[3] = 1.0;
        let proj = Utm::new(&ellps, &p).unwrap();
        assert_eq!(proj.zone, 13);
    }

    #[test]
    fn rejects_out_of_range_zone() {
        let ellps = Ellipsoid::from_defn(&crate::ellipsoids::WGS84).unwrap();
        let mut p = ProjParams::default();
        p.0[2] = 61.0;
        assert!(Utm::new(&ellps, &p).is_err());
    }
}
