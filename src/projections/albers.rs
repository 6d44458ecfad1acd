//!
//! Albers Equal-Area Conic, one or two standard parallels (spec.md §4.1, code ALBERS)
//!
//! Snyder p. 98. Shares [`crate::math::authlat`] with the LAEA ellipsoidal inverse —
//! both recover geodetic latitude from the same authalic-latitude Newton iteration.

use crate::consts::EPS_10;
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::{authlat, msfn, qsfn};
use crate::parameters::ProjParams;
use crate::projections::CommonParams;

#[derive(Debug, Clone, Copy)]
pub struct Albers {
    a: f64,
    e: f64,
    es: f64,
    one_es: f64,
    lon0: f64,
    fe: f64,
    fn_: f64,
    n: f64,
    c: f64,
    rho0: f64,
}

impl Albers {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let common = CommonParams::from_slots(params);
        let (phi1, phi2) = (common.std_parallel_1, common.std_parallel_2);
        if (phi1 + phi2).abs() < EPS_10 {
            return Err(Error::InvalidParameterValue(
                "Albers standard parallels cannot be antipodal",
            ));
        }

        let sin_phi1 = phi1.sin();
        let m1 = msfn(sin_phi1, phi1.cos(), ellps.es);
        let q1 = qsfn(sin_phi1, ellps.e, ellps.one_es);

        let n = if (phi1 - phi2).abs() > EPS_10 {
            let m2 = msfn(phi2.sin(), phi2.cos(), ellps.es);
            let q2 = qsfn(phi2.sin(), ellps.e, ellps.one_es);
            (m1 * m1 - m2 * m2) / (q2 - q1)
        } else {
            sin_phi1
        };

        let c = m1 * m1 + n * q1;
        let q0 = qsfn(common.lat0.sin(), ellps.e, ellps.one_es);
        let rho0 = ellps.a * (c - n * q0).max(0.0).sqrt() / n;

        Ok(Self {
            a: ellps.a,
            e: ellps.e,
            es: ellps.es,
            one_es: ellps.one_es,
            lon0: common.lon0,
            fe: common.fe,
            fn_: common.fn_,
            n,
            c,
            rho0,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let q = qsfn(phi.sin(), self.e, self.one_es);
        let arg = self.c - self.n * q;
        if arg < 0.0 {
            return Err(Error::Point(crate::errors::PointError::OutOfRange));
        }
        let rho = self.a * arg.sqrt() / self.n;
        let theta = self.n * crate::math::adjlon(lam - self.lon0);
        Ok((
            self.fe + rho * theta.sin(),
            self.fn_ + self.rho0 - rho * theta.cos(),
        ))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let dx = x - self.fe;
        let dy = self.rho0 - (y - self.fn_);
        let rho = dx.hypot(dy) * self.n.signum();
        let theta = (self.n.signum() * dx).atan2(self.n.signum() * dy);
        let q = (self.c - (rho * self.n / self.a).powi(2)) / self.n;
        let phi = authlat(q, self.e, self.es)?;
        let lam = crate::math::adjlon(theta / self.n + self.lon0);
        Ok((lam, phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn albers() -> Albers {
        let ellps = Ellipsoid::from_a_and_shape(6_378_137.0, crate::ellipsoid::Shape::Rf(298.257_223_563)).unwrap();
        let mut p = ProjParams::default();
        p.0[2] = 29.5f64.to_radians();
        p.0[3] = 45.5f64.to_radians();
        p.0[4] = -96f64.to_radians();
        p.0[5] = 23f64.to_radians();
        Albers::new(&ellps, &p).unwrap()
    }

    #[test]
    fn forward_inverse_round_trip() {
        let proj = albers();
        let (x, y) = proj.forward((-80f64).to_radians(), 40f64.to_radians()).unwrap();
        let (lam, phi) = proj.inverse(x, y).unwrap();
        assert_abs_diff_eq!(lam, (-80f64).to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 40f64.to_radians(), epsilon = 1e-9);
    }
}
