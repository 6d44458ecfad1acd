//!
//! ISIN shift model (spec.md §4.5)
//!
//! Transcribed field-for-field from `original_source/mrt/resample/calc_isin_shift.c`:
//! same upper-left/pixel-size inputs, same inverse/inverse/forward call sequence, same
//! `(x' - X0)/Delta - s` formula. Computed once per input resolution and reused across
//! bands of that resolution (spec.md §5's ordering rule); lifetime is owned by the
//! caller (the resampling driver), not a crate-level static, per spec.md §9's
//! "static iteration buffers" redesign note.

use crate::errors::{Error, PointError, Result};
use crate::projections::isin::Isin;

/// Per-row `{start_shift, slope}` (spec.md §3's "ISIN shift table").
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowShift {
    pub start_shift: f64,
    pub slope: f64,
}

/// The full per-resolution table: one [`RowShift`] per input row.
#[derive(Debug, Clone)]
pub struct IsinShiftTable {
    rows: Vec<RowShift>,
}

impl IsinShiftTable {
    pub fn row(&self, r: usize) -> RowShift {
        self.rows.get(r).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// δ at (line `l`, sample `s`), spec.md §4.5's δ computation.
fn delta(isin: &Isin, x0: f64, y0: f64, delta_px: f64, l: usize, s: usize) -> Result<f64> {
    let x = x0 + (s as f64 + 0.5) * delta_px;
    let y = y0 - (l as f64 + 0.5) * delta_px;

    let (lam0, _phi0) = isin.inverse(x, y)?;
    let y_next = y + delta_px;
    let (_lam_next, phi_next) = isin.inverse(x, y_next)?;
    let (x_next, _y_double_prime) = isin.forward(lam0, phi_next)?;

    Ok((x_next - x0) / delta_px - s as f64)
}

/// Build the shift table for one input resolution, spec.md §4.5.
pub fn build(isin: &Isin, x0: f64, y0: f64, pixel_size: f64, nrows: usize, ncols: usize) -> IsinShiftTable {
    let mut rows = Vec::with_capacity(nrows);
    for r in 0..nrows {
        let d0 = delta(isin, x0, y0, pixel_size, r, 0);
        let d_last = delta(isin, x0, y0, pixel_size, r, ncols.saturating_sub(1));

        let row = match (d0, d_last) {
            (Ok(d0), Ok(d_last)) if ncols > 1 => RowShift {
                start_shift: d0,
                slope: (d_last - d0) / (ncols - 1) as f64,
            },
            (Ok(d0), _) => RowShift { start_shift: d0, slope: 0.0 },
            _ => RowShift::default(),
        };
        rows.push(row);
    }
    IsinShiftTable { rows }
}

/// Guard used by the resampling driver: whether either end-of-row delta failed, which
/// forces the degenerate zero table entry per spec.md §4.5 rule 3.
pub fn is_recoverable_only(err: &Error) -> bool {
    matches!(err, Error::Point(PointError::OutOfRange) | Error::Point(PointError::Break))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::Ellipsoid;
    use crate::ellipsoids::MODIS_SPHERE;
    use crate::parameters::ProjParams;
    use approx::assert_abs_diff_eq;

    fn isin_1km() -> Isin {
        let ellps = Ellipsoid::from_defn(&MODIS_SPHERE).unwrap();
        let mut params = ProjParams::default();
        params.0[8] = 86400.0;
        Isin::new(&ellps, &params).unwrap()
    }

    #[test]
    fn first_row_first_sample_shift_is_near_zero() {
        let isin = isin_1km();
        let pixel = 463.312_716_527_778;
        let half_width = std::f64::consts::PI * 6_371_007.181;
        let x0 = -half_width;
        let y0 = half_width;
        let table = build(&isin, x0, y0, pixel, 4, 2000);
        assert_abs_diff_eq!(table.row(0).start_shift, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn degenerate_row_is_zeroed_when_inverse_fails() {
        // A single-column row cannot form a slope; it still must produce a finite,
        // zeroed-out entry rather than panicking or dividing by zero.
        let isin = isin_1km();
        let table = build(&isin, 0.0, 0.0, 1.0, 1, 1);
        assert_eq!(table.row(0), RowShift { start_shift: table.row(0).start_shift, slope: 0.0 });
    }
}
