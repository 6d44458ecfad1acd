//!
//! Hammer (Hammer-Aitoff) (spec.md §4.1, code HAMMER)
//!
//! Spherical, non-iterative closed form, Snyder p. 182-183.

use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

const SQRT2: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy)]
pub struct Hammer {
    r: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
}

impl Hammer {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        Ok(Self {
            r: ellps.a,
            lon0: common.lon0,
            fe: common.fe,
            fn_: common.fn_,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let dlam = crate::math::adjlon(lam - self.lon0);
        let cos_phi = phi.cos();
        let denom = (1.0 + cos_phi * (dlam / 2.0).cos()).sqrt();
        if denom < crate::consts::EPS_10 {
            // antipodal to the projection center
            return Err(Error::Point(PointError::OutOfRange));
        }
        let x = 2.0 * SQRT2 * self.r * cos_phi * (dlam / 2.0).sin() / denom;
        let y = SQRT2 * self.r * phi.sin() / denom;
        Ok((self.fe + x, self.fn_ + y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let xr = (x - self.fe) / self.r;
        let yr = (y - self.fn_) / self.r;
        let z2 = 1.0 - (xr / 4.0).powi(2) - (yr / 2.0).powi(2);
        if z2 < 0.0 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let z = z2.sqrt();
        let lam = crate::math::adjlon(self.lon0 + 2.0 * (z * xr / 2.0).atan2(2.0 * z * z - 1.0));
        let phi = (z * yr).clamp(-1.0, 1.0).asin();
        Ok((lam, phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoids::SPHERE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_inverse_round_trip() {
        let ellps = Ellipsoid::from_defn(&SPHERE).unwrap();
        let params = ProjParams::default();
        let proj = Hammer::new(&ellps, &params).unwrap();

        let (x, y) = proj.forward(30f64.to_radians(), 20f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, 30f64.to_radians(), epsilon = 1e-7);
        assert_abs_diff_eq!(phi, 20f64.to_radians(), epsilon = 1e-7);
    }

    #[test]
    fn antipode_is_out_of_range() {
        let ellps = Ellipsoid::from_defn(&SPHERE).unwrap();
        let mut params = ProjParams::default();
        params.0[4] = 0.0;
        let proj = Hammer::new(&ellps, &params).unwrap();
        assert!(proj.forward(crate::consts::PI, 0.0).is_err());
    }
}
