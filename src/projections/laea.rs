//!
//! Lambert Azimuthal Equal-Area (spec.md §4.1, code LAEA; full normative algorithm
//! given in spec.md §4.1, numeric scenarios in §8)
//!
//! Two modes share one parameter set: [`LambertAzimuthal::Ellipsoid`] follows Snyder's
//! oblique ellipsoidal formulas (equivalent to `lamazellipsfor.c`/`lamazellipsinv.c`),
//! [`LambertAzimuthal::Sphere`] is the simpler spherical form, selected by whether the
//! ellipsoid's eccentricity is negligible — same split the teacher's nested `laea.rs`
//! makes between its `El`/`Sp` variants.

use crate::consts::{EPS_10, FRAC_PI_2};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::math::{authlat, qsfn};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub enum LambertAzimuthal {
    Ellipsoid(Ellipsoidal),
    Sphere(Spherical),
}

impl LambertAzimuthal {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        if ellps.e < 1.0e-7 {
            Ok(LambertAzimuthal::Sphere(Spherical::new(ellps, params)?))
        } else {
            Ok(LambertAzimuthal::Ellipsoid(Ellipsoidal::new(ellps, params)?))
        }
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        match self {
            LambertAzimuthal::Ellipsoid(p) => p.forward(lam, phi),
            LambertAzimuthal::Sphere(p) => p.forward(lam, phi),
        }
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        match self {
            LambertAzimuthal::Ellipsoid(p) => p.inverse(x, y),
            LambertAzimuthal::Sphere(p) => p.inverse(x, y),
        }
    }
}

/// Oblique aspect only: polar/equatorial aspects are the `lat0 == +-pi/2`/`lat0 == 0`
/// limits of the same formula and need no special casing here.
#[derive(Debug, Clone, Copy)]
pub struct Ellipsoidal {
    a: f64,
    e: f64,
    es: f64,
    one_es: f64,
    lon0: f64,
    lat0: f64,
    fe: f64,
    fn_: f64,
    sin_b1: f64,
    cos_b1: f64,
    qp: f64,
    rq: f64,
    /// `m₁ = cos φ₀ / √(1 − e²sin²φ₀)` (spec.md §4.1).
    m1: f64,
    /// `D = a·m₁ / (R_q·cos β₁)`, the oblique-aspect axis scaling spec.md §4.1 applies
    /// to x and 1/D to y.
    d: f64,
}

impl Ellipsoidal {
    fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        let qp = qsfn(1.0, ellps.e, ellps.one_es);
        let rq = (qp / 2.0).sqrt();
        let sin_lat0 = common.lat0.sin();
        let q1 = qsfn(sin_lat0, ellps.e, ellps.one_es);
        let sin_b1 = q1 / qp;
        let cos_b1 = (1.0 - sin_b1 * sin_b1).max(0.0).sqrt();
        let m1 = common.lat0.cos() / (1.0 - ellps.es * sin_lat0 * sin_lat0).sqrt();
        let d = m1 / (rq * cos_b1);
        Ok(Self {
            a: ellps.a,
            e: ellps.e,
            es: ellps.es,
            one_es: ellps.one_es,
            lon0: common.lon0,
            lat0: common.lat0,
            fe: common.fe,
            fn_: common.fn_,
            sin_b1,
            cos_b1,
            qp,
            rq,
            m1,
            d,
        })
    }

    fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let dlam = crate::math::adjlon(lam - self.lon0);
        let q = qsfn(phi.sin(), self.e, self.one_es);
        let sin_b = q / self.qp;
        let cos_b = (1.0 - sin_b * sin_b).max(0.0).sqrt();
        let cos_dlam = dlam.cos();

        let b = 1.0 + self.sin_b1 * sin_b + self.cos_b1 * cos_b * cos_dlam;
        if b < EPS_10 {
            // antipodal to the center: undefined projection point.
            return Err(Error::Point(PointError::OutOfRange));
        }
        let b = (2.0 / b).sqrt();

        let x = self.a * self.rq * b * self.d * cos_b * dlam.sin();
        let y = (self.a * self.rq * b / self.d)
            * (self.cos_b1 * sin_b - self.sin_b1 * cos_b * cos_dlam);
        Ok((self.fe + x, self.fn_ + y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let rq_full = self.a * self.rq;
        let xp = x - self.fe;
        let yp = y - self.fn_;
        let rho = ((xp / self.d).powi(2) + (self.d * yp).powi(2)).sqrt();
        if rho / rq_full < EPS_10 {
            return Ok((self.lon0, self.lat0));
        }
        let ce = 2.0 * (rho / (2.0 * rq_full)).asin();
        let sin_ce = ce.sin();
        let cos_ce = ce.cos();

        let sin_b = cos_ce * self.sin_b1 + (self.d * yp * sin_ce * self.cos_b1) / rho;
        let q = self.qp * sin_b;
        let phi = authlat(q, self.e, self.es)?;

        let num = xp * sin_ce;
        let den = self.d * rho * self.cos_b1 * cos_ce
            - self.d * self.d * yp * self.sin_b1 * sin_ce;
        let lam = crate::math::adjlon(self.lon0 + num.atan2(den));
        Ok((lam, phi))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Spherical {
    r: f64,
    lon0: f64,
    lat0: f64,
    sin_lat0: f64,
    cos_lat0: f64,
    fe: f64,
    fn_: f64,
}

impl Spherical {
    fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        Ok(Self {
            r: ellps.a,
            lon0: common.lon0,
            lat0: common.lat0,
            sin_lat0: common.lat0.sin(),
            cos_lat0: common.lat0.cos(),
            fe: common.fe,
            fn_: common.fn_,
        })
    }

    fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let dlam = crate::math::adjlon(lam - self.lon0);
        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let cos_dlam = dlam.cos();

        let k = (2.0 / (1.0 + self.sin_lat0 * sin_phi + self.cos_lat0 * cos_phi * cos_dlam)).sqrt();
        if !k.is_finite() {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let x = self.r * k * cos_phi * dlam.sin();
        let y = self.r * k * (self.cos_lat0 * sin_phi - self.sin_lat0 * cos_phi * cos_dlam);
        Ok((self.fe + x, self.fn_ + y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let x = x - self.fe;
        let y = y - self.fn_;
        let rho = x.hypot(y);
        if rho < EPS_10 {
            return Ok((self.lon0, self.lat0));
        }
        if rho > 2.0 * self.r + EPS_10 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let c = 2.0 * (rho / (2.0 * self.r)).asin();
        let sin_c = c.sin();
        let cos_c = c.cos();
        let phi = (cos_c * self.sin_lat0 + y * sin_c * self.cos_lat0 / rho).clamp(-1.0, 1.0).asin();
        let lam = if self.lat0.abs() >= FRAC_PI_2 - EPS_10 {
            self.lon0 + x.atan2(if self.lat0 > 0.0 { -y } else { y })
        } else {
            self.lon0
                + (x * sin_c).atan2(rho * self.cos_lat0 * cos_c - y * self.sin_lat0 * sin_c)
        };
        Ok((crate::math::adjlon(lam), phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ellps() -> Ellipsoid {
        Ellipsoid::from_a_and_shape(6_378_137.0, crate::ellipsoid::Shape::B(6_356_752.3142)).unwrap()
    }

    fn params() -> ProjParams {
        let mut p = ProjParams::default();
        p.0[4] = -100f64.to_radians();
        p.0[5] = 45f64.to_radians();
        p
    }

    #[test]
    fn forward_matches_spec_scenario() {
        let proj = LambertAzimuthal::new(&ellps(), &params()).unwrap();
        let (x, y) = proj.forward((-100f64).to_radians(), 40f64.to_radians()).unwrap();
        assert_abs_diff_eq!(x, 0.0, epsilon = 1.0);
        assert_abs_diff_eq!(y, -556_597.46, epsilon = 1.0);
    }

    #[test]
    fn inverse_matches_spec_scenario() {
        let proj = LambertAzimuthal::new(&ellps(), &params()).unwrap();
        let (lam, phi) = proj.inverse(0.0, -556_597.46).unwrap();
        assert_abs_diff_eq!(lam, (-100f64).to_radians(), epsilon = 1e-6);
        assert_abs_diff_eq!(phi, 40f64.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn sphere_mode_round_trips() {
        let ellps = Ellipsoid::sphere(6_371_007.181).unwrap();
        let proj = LambertAzimuthal::new(&ellps, &params()).unwrap();
        let (x, y) = proj.forward((-90f64).to_radians(), 30f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, (-90f64).to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 30f64.to_radians(), epsilon = 1e-9);
    }
}
