//!
//! Lambert Conformal Conic, one or two standard parallels (spec.md §4.1, code LCC)
//!
//! Adapted from the teacher's `lcc.rs` (proj4rs), generalized from a single fixed `n`
//! to the spec's two-standard-parallel slot convention; falls back to the one-parallel
//! tangent case when both standard parallels coincide.

use crate::consts::{EPS_10, FRAC_PI_2};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::math::{msfn, phi2, tsfn};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct Lcc {
    e: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
    n: f64,
    f: f64,
    rho0: f64,
}

impl Lcc {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        let (phi1, phi2_) = (common.std_parallel_1, common.std_parallel_2);
        if (phi1 + phi2_).abs() < EPS_10 {
            return Err(Error::InvalidParameterValue(
                "Lambert Conformal Conic standard parallels cannot be antipodal",
            ));
        }

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let secant = (phi1 - phi2_).abs() > EPS_10;

        let m1 = msfn(sin_phi1, cos_phi1, ellps.es);
        let t1 = tsfn(phi1, sin_phi1, ellps.e);

        let n = if secant {
            let m2 = msfn(phi2_.sin(), phi2_.cos(), ellps.es);
            let t2 = tsfn(phi2_, phi2_.sin(), ellps.e);
            (m1 / m2).ln() / (t1 / t2).ln()
        } else {
            sin_phi1
        };

        let f = m1 / (n * t1.powf(n));
        let t0 = tsfn(common.lat0, common.lat0.sin(), ellps.e);
        let rho0 = ellps.a * f * t0.powf(n);

        Ok(Self {
            e: ellps.e,
            lon0: common.lon0,
            fe: common.fe,
            fn_: common.fn_,
            n,
            f: ellps.a * f,
            rho0,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        if (FRAC_PI_2 - phi.abs()) < EPS_10 && phi * self.n <= 0.0 {
            // at the pole opposite the cone's apex, rho diverges
            return Err(Error::Point(PointError::OutOfRange));
        }
        let t = tsfn(phi, phi.sin(), self.e);
        let rho = self.f * t.powf(self.n);
        let theta = self.n * crate::math::adjlon(lam - self.lon0);
        Ok((
            self.fe + rho * theta.sin(),
            self.fn_ + self.rho0 - rho * theta.cos(),
        ))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let dx = x - self.fe;
        let dy = self.rho0 - (y - self.fn_);
        let mut rho = dx.hypot(dy);
        let sign = if self.n < 0.0 {
            rho = -rho;
            -1.0
        } else {
            1.0
        };
        let theta = (sign * dx).atan2(sign * dy);
        let lam = crate::math::adjlon(theta / self.n + self.lon0);

        if rho.abs() < EPS_10 {
            return Ok((lam, if self.n > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 }));
        }
        let t = (rho / self.f).powf(1.0 / self.n);
        let phi = phi2(t, self.e)?;
        Ok((lam, phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lcc() -> Lcc {
        let ellps = Ellipsoid::from_a_and_shape(6_378_137.0, crate::ellipsoid::Shape::Rf(298.257_223_563)).unwrap();
        let mut p = ProjParams::default();
        p.0[2] = 33f64.to_radians();
        p.0[3] = 45f64.to_radians();
        p.0[4] = -96f64.to_radians();
        p.0[5] = 23f64.to_radians();
        Lcc::new(&ellps, &p).unwrap()
    }

    #[test]
    fn forward_inverse_round_trip() {
        let proj = lcc();
        let (x, y) = proj.forward((-75f64).to_radians(), 35f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, (-75f64).to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 35f64.to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn rejects_antipodal_standard_parallels() {
        let ellps = Ellipsoid::sphere(6_371_000.0).unwrap();
        let mut p = ProjParams::default();
        p.0[2] = 10f64.to_radians();
        p.0[3] = -10f64.to_radians();
        assert!(Lcc::new(&ellps, &p).is_err());
    }

}
