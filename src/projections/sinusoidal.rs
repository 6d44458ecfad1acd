//!
//! Sinusoidal (spec.md §4.1, code SIN)
//!
//! Pseudocylindrical equal-area projection on a sphere (the MODIS grid uses the
//! authalic sphere radius 6371007.181 m, spec.md §8 scenario 3). Snyder p. 243.

use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct Sinusoidal {
    pub(crate) r: f64,
    pub(crate) lon0: f64,
    fe: f64,
    fn_: f64,
}

impl Sinusoidal {
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
        Ok((
            self.fe + self.r * dlam * phi.cos(),
            self.fn_ + self.r * phi,
        ))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let phi = (y - self.fn_) / self.r;
        if !(-crate::consts::FRAC_PI_2..=crate::consts::FRAC_PI_2).contains(&phi) {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let cos_phi = phi.cos();
        if cos_phi.abs() < crate::consts::EPS_10 {
            // At the pole every longitude maps to the same point; only x == 0 is valid.
            if (x - self.fe).abs() > crate::consts::EPS_7 {
                return Err(Error::Point(PointError::OutOfRange));
            }
            return Ok((self.lon0, phi));
        }
        let lam = self.lon0 + (x - self.fe) / (self.r * cos_phi);
        Ok((crate::math::adjlon(lam), phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoids::MODIS_SPHERE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_inverse_round_trip() {
        let ellps = Ellipsoid::from_defn(&MODIS_SPHERE).unwrap();
        let params = ProjParams::default();
        let p = Sinusoidal::new(&ellps, &params).unwrap();

        let (x, y) = p.forward(10f64.to_radians(), 20f64.to_radians()).unwrap();
        let (lam, phi) = p.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, 10f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 20f64.to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn pole_requires_zero_x() {
        let ellps = Ellipsoid::from_defn(&MODIS_SPHERE).unwrap();
        let params = ProjParams::default();
        let p = Sinusoidal::new(&ellps, &params).unwrap();
        assert!(p.inverse(1000., ellps.a * crate::consts::FRAC_PI_2).is_err());
    }
}
