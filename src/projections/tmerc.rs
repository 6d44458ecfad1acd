//!
//! Transverse Mercator, ellipsoidal (spec.md §4.1, code TM)
//!
//! Snyder's series forward formula (p. 61, equations 8-9 to 8-11) plus the footpoint-
//! latitude inverse via [`crate::math::inv_mlfn`] (same Newton cap as every other
//! iterative latitude recovery in the crate). [`super::utm::Utm`] is a thin wrapper
//! around this projection with a zone-derived central meridian and a fixed scale.

use crate::consts::{EPS_10, FRAC_PI_2};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::math::{enfn, inv_mlfn, mlfn, Enfn};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    a: f64,
    es: f64,
    ep2: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
    k0: f64,
    en: Enfn,
    m0: f64,
}

impl TransverseMercator {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        let k0 = if params.get(8) > 0.0 { params.get(8) } else { 0.9996 };
        let en = enfn(ellps.es);
        let m0 = mlfn(common.lat0, common.lat0.sin(), common.lat0.cos(), &en);
        Ok(Self {
            a: ellps.a,
            es: ellps.es,
            ep2: ellps.es / (1.0 - ellps.es),
            lon0: common.lon0,
            fe: common.fe,
            fn_: common.fn_,
            k0,
            en,
            m0,
        })
    }

    pub fn with_zone_params(ellps: &Ellipsoid, lon0: f64, lat0: f64, fe: f64, fn_: f64, k0: f64) -> Result<Self> {
        let en = enfn(ellps.es);
        let m0 = mlfn(lat0, lat0.sin(), lat0.cos(), &en);
        Ok(Self {
            a: ellps.a,
            es: ellps.es,
            ep2: ellps.es / (1.0 - ellps.es),
            lon0,
            fe,
            fn_,
            k0,
            en,
            m0,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        if (FRAC_PI_2 - phi.abs()) < EPS_10 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let dlam = crate::math::adjlon(lam - self.lon0);
        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = sin_phi / cos_phi;

        let t = tan_phi * tan_phi;
        let c = self.ep2 * cos_phi * cos_phi;
        let n = self.a / (1.0 - self.es * sin_phi * sin_phi).sqrt();
        let a1 = dlam * cos_phi;

        let m = mlfn(phi, sin_phi, cos_phi, &self.en);

        let x = self.k0
            * n
            * (a1
                + (1.0 - t + c) * a1.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a1.powi(5) / 120.0);
        let y = self.k0
            * ((m - self.m0)
                + n * tan_phi
                    * (a1.powi(2) / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a1.powi(4) / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a1.powi(6)
                            / 720.0));

        Ok((self.fe + x, self.fn_ + y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let m = self.m0 + (y - self.fn_) / self.k0;
        let phi1 = inv_mlfn(m, self.es, &self.en)?;

        if (FRAC_PI_2 - phi1.abs()) < EPS_10 {
            return Ok((self.lon0, phi1.signum() * FRAC_PI_2));
        }

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = sin_phi1 / cos_phi1;

        let c1 = self.ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let n1 = self.a / (1.0 - self.es * sin_phi1 * sin_phi1).sqrt();
        let r1 = self.a * (1.0 - self.es) / (1.0 - self.es * sin_phi1 * sin_phi1).powf(1.5);
        let d = (x - self.fe) / (n1 * self.k0);

        let phi = phi1
            - (n1 * tan_phi1 / r1)
                * (d.powi(2) / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * self.ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * self.ep2
                        - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);

        let lam = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * self.ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos_phi1;

        Ok((crate::math::adjlon(lam), phi))
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
        p.0[4] = -75f64.to_radians();
        p.0[8] = 0.9996;
        let proj = TransverseMercator::new(&ellps, &p).unwrap();

        let (x, y) = proj.forward((-73f64).to_radians(), 40f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, (-73f64).to_radians(), epsilon = 1e-8);
        assert_abs_diff_eq!(phi, 40f64.to_radians(), epsilon = 1e-8);
    }
}
