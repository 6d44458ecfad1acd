//!
//! Integerized Sinusoidal, ISIN (spec.md §4.1, code ISIN; glossary: "introduces a
//! per-row integer shift relative to a plain sinusoidal grid")
//!
//! Builds directly on [`super::sinusoidal::Sinusoidal`]: latitude is quantized to one
//! of `nzone` row centers spanning the full ±90°, and each row's longitude span is
//! divided into the nearest integer column count `ncol(row) = round(2·nzone·cos(clat))`
//! rather than the continuous sinusoidal width. That column-count mismatch between
//! adjacent rows is exactly what `isin_shift.rs` (`calc_isin_shift.c`) measures and
//! corrects for during resampling. Slot 8 carries `nzone` (must be even, positive) in
//! place of the scale factor the other cylindrical/conic codes use there.

use crate::consts::{FRAC_PI_2, TAU};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::parameters::ProjParams;
use crate::projections::sinusoidal::Sinusoidal;

#[derive(Debug, Clone, Copy)]
pub struct Isin {
    sin: Sinusoidal,
    nzone: u32,
}

impl Isin {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let sin = Sinusoidal::new(ellps, params)?;
        let raw = params.get(8);
        if raw < 2.0 || raw.round() != raw || (raw.round() as i64) % 2 != 0 {
            return Err(Error::InvalidParameterValue(
                "ISIN slot 8 (nzone) must be a positive even integer",
            ));
        }
        Ok(Self {
            sin,
            nzone: raw.round() as u32,
        })
    }

    /// Row index (0-based) and that row's center latitude and integer column count.
    fn row(&self, phi: f64) -> (i64, f64, f64) {
        let nzone = self.nzone as f64;
        let ang = std::f64::consts::PI / nzone;
        let row = ((FRAC_PI_2 + phi) / ang).floor().clamp(0.0, nzone - 1.0);
        let clat = -FRAC_PI_2 + (row + 0.5) * ang;
        let ncol = (2.0 * nzone * clat.cos()).round().max(1.0);
        (row as i64, clat, ncol)
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&phi) {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let (_, clat, ncol) = self.row(phi);
        let dlam = crate::math::adjlon(lam - self.sin.lon0);
        let col_width = TAU / ncol;
        let col = (dlam / col_width).round();
        let x = self.sin.r * clat.cos() * col_width * col;
        let y = self.sin.r * clat;
        Ok((x, y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let phi_cont = y / self.sin.r;
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&phi_cont) {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let (_, clat, ncol) = self.row(phi_cont);
        let col_width = TAU / ncol;
        if col_width.abs() < crate::consts::EPS_10 {
            return Err(Error::Point(PointError::OutOfRange));
        }
        let col = (x / (self.sin.r * clat.cos() * col_width)).round();
        let dlam = col * col_width;
        Ok((crate::math::adjlon(self.sin.lon0 + dlam), clat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoids::MODIS_SPHERE;
    use approx::assert_abs_diff_eq;

    fn isin() -> Isin {
        let ellps = Ellipsoid::from_defn(&MODIS_SPHERE).unwrap();
        let mut params = ProjParams::default();
        params.0[8] = 86400.0; // matches the 463.3 m MODIS 1 km grid at the equator
        Isin::new(&ellps, &params).unwrap()
    }

    #[test]
    fn forward_inverse_round_trip_on_row_grid() {
        let p = isin();
        let (x, y) = p.forward(10f64.to_radians(), 20f64.to_radians()).unwrap();
        let (lam, phi) = p.inverse(x, y).unwrap();
        let (x2, y2) = p.forward(lam, phi).unwrap();
        assert_abs_diff_eq!(x, x2, epsilon = 1e-6);
        assert_abs_diff_eq!(y, y2, epsilon = 1e-6);
    }

    #[test]
    fn rejects_odd_nzone() {
        let ellps = Ellipsoid::from_defn(&MODIS_SPHERE).unwrap();
        let mut params = ProjParams::default();
        params.0[8] = 3.0;
        assert!(Isin::new(&ellps, &params).is_err());
    }
}
