//!
//! Polar Stereographic, ellipsoidal (spec.md §4.1, code PS)
//!
//! Snyder p. 160-161. The pole (north or south) is fixed by the sign of the latitude
//! of true scale (slot 2); the opposite pole is the projection's designed singularity.

use crate::consts::{EPS_10, FRAC_PI_2};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::math::{msfn, phi2, tsfn};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct PolarStereographic {
    a: f64,
    e: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
    north: bool,
    mc_over_tc: f64,
}

impl PolarStereographic {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        let lat_ts = common.std_parallel_1;
        let north = lat_ts >= 0.0;
        let phi1 = lat_ts.abs();
        let mc = msfn(phi1.sin(), phi1.cos(), ellps.es);
        let tc = tsfn(phi1, phi1.sin(), ellps.e);
        Ok(Self {
            a: ellps.a,
            e: ellps.e,
            lon0: common.lon0,
            fe: common.fe,
            fn_: common.fn_,
            north,
            mc_over_tc: mc / tc,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let signed_phi = if self.north { phi } else { -phi };
        if (FRAC_PI_2 - signed_phi) < EPS_10 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let dlam = if self.north {
            crate::math::adjlon(lam - self.lon0)
        } else {
            crate::math::adjlon(self.lon0 - lam)
        };
        let t = tsfn(signed_phi, signed_phi.sin(), self.e);
        let rho = self.a * self.mc_over_tc * t;
        let x = rho * dlam.sin();
        let y = rho * dlam.cos();
        if self.north {
            Ok((self.fe + x, self.fn_ - y))
        } else {
            Ok((self.fe + x, self.fn_ + y))
        }
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let dx = x - self.fe;
        let dy = if self.north { self.fn_ - y } else { y - self.fn_ };
        let rho = dx.hypot(dy);
        if rho < EPS_10 {
            return Ok((self.lon0, if self.north { FRAC_PI_2 } else { -FRAC_PI_2 }));
        }
        let t = rho / (self.a * self.mc_over_tc);
        let signed_phi = phi2(t, self.e)?;
        let dlam = dx.atan2(dy);
        let (phi, lam) = if self.north {
            (signed_phi, self.lon0 + dlam)
        } else {
            (-signed_phi, self.lon0 - dlam)
        };
        Ok((crate::math::adjlon(lam), phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ps(north: bool) -> PolarStereographic {
        let ellps = Ellipsoid::from_a_and_shape(6_378_137.0, crate::ellipsoid::Shape::Rf(298.257_223_563)).unwrap();
        let mut p = ProjParams::default();
        p.0[2] = if north { 70f64.to_radians() } else { -70f64.to_radians() };
        PolarStereographic::new(&ellps, &p).unwrap()
    }

    #[test]
    fn north_round_trip() {
        let proj = ps(true);
        let (x, y) = proj.forward(45f64.to_radians(), 80f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, 45f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 80f64.to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn south_round_trip() {
        let proj = ps(false);
        let (x, y) = proj.forward(45f64.to_radians(), (-80f64).to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, 45f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, (-80f64).to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn opposite_pole_is_out_of_range() {
        let proj = ps(true);
        assert!(proj.forward(0.0, (-89.999999f64).to_radians()).is_err());
    }
}
