//!
//! Mollweide (spec.md §4.1, code MOLL)
//!
//! Pseudocylindrical equal-area projection on a sphere, Snyder p. 249. The forward
//! auxiliary angle `theta` is found by the same Newton-iteration shape as every other
//! iterative solve in the crate, capped at [`crate::consts::MAX_ITER_LAT`].

use crate::consts::{EPS_10, MAX_ITER_LAT, PI};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

const SQRT2: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy)]
pub struct Mollweide {
    r: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
}

impl Mollweide {
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
        if !(-PI / 2.0..=PI / 2.0).contains(&phi) {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let dlam = crate::math::adjlon(lam - self.lon0);
        let mut theta = phi;
        if (PI / 2.0 - phi.abs()) > EPS_10 {
            let mut converged = false;
            for _ in 0..MAX_ITER_LAT {
                let dtheta = -(theta + theta.sin() - PI * phi.sin()) / (1.0 + theta.cos());
                theta += dtheta;
                if dtheta.abs() < EPS_10 {
                    converged = true;
                    break;
                }
            }
            if !converged {
                return Err(Error::IterationDivergence("mollweide_forward"));
            }
        }
        theta /= 2.0;
        Ok((
            self.fe + (2.0 * SQRT2 / PI) * self.r * dlam * theta.cos(),
            self.fn_ + SQRT2 * self.r * theta.sin(),
        ))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let yr = (y - self.fn_) / (SQRT2 * self.r);
        if yr.abs() > 1.0 + EPS_10 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let theta = yr.clamp(-1.0, 1.0).asin();
        let phi = ((2.0 * theta + (2.0 * theta).sin()) / PI).clamp(-1.0, 1.0).asin();
        let cos_theta = theta.cos();
        if cos_theta.abs() < EPS_10 {
            return Ok((self.lon0, phi));
        }
        let lam = self.lon0 + (x - self.fe) / ((2.0 * SQRT2 / PI) * self.r * cos_theta);
        Ok((crate::math::adjlon(lam), phi))
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
        let proj = Mollweide::new(&ellps, &params).unwrap();

        let (x, y) = proj.forward(20f64.to_radians(), 35f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, 20f64.to_radians(), epsilon = 1e-7);
        assert_abs_diff_eq!(phi, 35f64.to_radians(), epsilon = 1e-7);
    }
}
