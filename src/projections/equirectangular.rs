//!
//! Equirectangular / Plate Carrée (spec.md §4.1, code EQRECT)
//!
//! Spherical cylindrical projection scaled by the cosine of a chosen standard
//! parallel (GCTP's `lat1` slot). Snyder, *Map Projections — A Working Manual*, p. 90.

use crate::ellipsoid::Ellipsoid;
use crate::errors::Result;
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct Equirectangular {
    r: f64,
    lon0: f64,
    cos_lat1: f64,
    fe: f64,
    fn_: f64,
}

impl Equirectangular {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        Ok(Self {
            r: ellps.a,
            lon0: common.lon0,
            cos_lat1: common.std_parallel_1.cos(),
            fe: common.fe,
            fn_: common.fn_,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let dlam = crate::math::adjlon(lam - self.lon0);
        Ok((self.fe + self.r * dlam * self.cos_lat1, self.fn_ + self.r * phi))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let lam = self.lon0 + (x - self.fe) / (self.r * self.cos_lat1);
        let phi = (y - self.fn_) / self.r;
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
        let mut params = ProjParams::default();
        params.0[4] = -100f64.to_radians();
        let p = Equirectangular::new(&ellps, &params).unwrap();

        let (x, y) = p.forward(-95f64.to_radians(), 30f64.to_radians()).unwrap();
        let (lam, phi) = p.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, -95f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 30f64.to_radians(), epsilon = 1e-9);
    }
}
