//!
//! Mercator (spec.md §4.1, code MERCAT)
//!
//! Ellipsoidal cylindrical conformal projection; scale factor derived from either an
//! explicit latitude of true scale (standard parallel 1, slot 2) or, if that slot is
//! zero, a direct scale factor in slot 8 (mirrors GCTP's dual convention).

use crate::consts::FRAC_PI_2;
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::math::{msfn, phi2, tsfn};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct Mercator {
    e: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
    k0: f64,
    a: f64,
}

impl Mercator {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        let k0 = if common.std_parallel_1.abs() > crate::consts::EPS_10 {
            msfn(common.std_parallel_1.sin(), common.std_parallel_1.cos(), ellps.es)
        } else {
            let explicit = params.get(8);
            if explicit > 0.0 {
                explicit
            } else {
                1.0
            }
        };
        Ok(Self {
            e: ellps.e,
            lon0: common.lon0,
            fe: common.fe,
            fn_: common.fn_,
            k0,
            a: ellps.a,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        if (FRAC_PI_2 - phi.abs()) < crate::consts::EPS_10 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let dlam = crate::math::adjlon(lam - self.lon0);
        let t = tsfn(phi, phi.sin(), self.e);
        Ok((
            self.fe + self.a * self.k0 * dlam,
            self.fn_ - self.a * self.k0 * t.ln(),
        ))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let t = (-(y - self.fn_) / (self.a * self.k0)).exp();
        let phi = phi2(t, self.e)?;
        let lam = crate::math::adjlon(self.lon0 + (x - self.fe) / (self.a * self.k0));
        Ok((lam, phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_inverse_round_trip() {
        let ellps = Ellipsoid::from_a_and_shape(6_378_137.0, crate::ellipsoid::Shape::Rf(298.257_223_563)).unwrap();
        let params = ProjParams::default();
        let proj = Mercator::new(&ellps, &params).unwrap();

        let (x, y) = proj.forward(5f64.to_radians(), 45f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, 5f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 45f64.to_radians(), epsilon = 1e-9);
    }
}
