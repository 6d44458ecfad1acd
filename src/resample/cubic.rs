//!
//! Cubic convolution kernel (spec.md §4.6)
//!
//! 4x4 footprint, separable weights precomputed at `SUBPIXEL_STEPS` subpixel offsets
//! per axis. Grounded on `original_source/mrt/resample/cc_res.c`'s precomputed weight
//! table and the Keys cubic convolution kernel it uses with `alpha = -0.5`.

use crate::isin_shift::IsinShiftTable;

pub const SUBPIXEL_STEPS: usize = 256;
pub const DEFAULT_ALPHA: f64 = -0.5;

/// Parametric cubic convolution weight, Keys 1981 (spec.md §4.6's `ccw`).
fn ccw(alpha: f64, t: f64) -> f64 {
    let at = t.abs();
    if at < 1.0 {
        (alpha + 2.0) * at.powi(3) - (alpha + 3.0) * at.powi(2) + 1.0
    } else if at < 2.0 {
        alpha * at.powi(3) - 5.0 * alpha * at.powi(2) + 8.0 * alpha * at - 4.0 * alpha
    } else {
        0.0
    }
}

/// Precomputed separable 1-D weights for the four kernel taps `{-1, 0, 1, 2}` at
/// `SUBPIXEL_STEPS + 1` subpixel offsets.
#[derive(Debug, Clone)]
pub struct CubicWeights {
    table: Vec<[f64; 4]>,
}

impl CubicWeights {
    pub fn new(alpha: f64) -> Self {
        let mut table = Vec::with_capacity(SUBPIXEL_STEPS + 1);
        for step in 0..=SUBPIXEL_STEPS {
            let dx = step as f64 / SUBPIXEL_STEPS as f64;
            let mut w = [0.0; 4];
            for (idx, k) in [-1i32, 0, 1, 2].into_iter().enumerate() {
                w[idx] = ccw(alpha, k as f64 - dx);
            }
            table.push(w);
        }
        Self { table }
    }

    /// Weights for taps `{-1, 0, 1, 2}` given a fractional offset in `[0, 1)`.
    pub fn weights(&self, frac: f64) -> [f64; 4] {
        let step = (frac * SUBPIXEL_STEPS as f64).round() as usize;
        self.table[step.min(SUBPIXEL_STEPS)]
    }
}

impl Default for CubicWeights {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

const TAPS: [i64; 4] = [-1, 0, 1, 2];

/// `fetch(row, col)` resolves any out-of-grid coordinate to the background value;
/// `shift` is `Some` only for an ISIN input, applied cumulatively to every row other
/// than the one `row` truncates into (spec.md §4.5/§4.6).
pub fn sample(
    col: f64,
    row: f64,
    background: f64,
    weights: &CubicWeights,
    shift: Option<&IsinShiftTable>,
    fetch: impl Fn(i64, i64) -> f64,
) -> f64 {
    let x1 = col.floor();
    let y1 = row.floor();
    let dx = col - x1;
    let dy = row - y1;
    let wx = weights.weights(dx);
    let wy = weights.weights(dy);
    let query_row = y1 as i64;

    let mut sum = 0.0f64;
    let mut wsum = 0.0f64;
    let mut bg_count = 0usize;

    // Cumulative δ between `query_row` and `query_row + ky`, one row-step at a time
    // (spec.md §4.5): each step's δ is keyed by its *source* row, same convention
    // `bilinear.rs` uses via `y1` for its single-step case.
    let cum_shift_to = |ky: i64| -> f64 {
        let table = match shift {
            Some(table) => table,
            None => return 0.0,
        };
        let mut total = 0.0;
        if ky > 0 {
            for i in 0..ky {
                let rs = table.row((query_row + i).max(0) as usize);
                total += rs.start_shift + col * rs.slope;
            }
        } else {
            for i in 0..(-ky) {
                let rs = table.row((query_row - 1 - i).max(0) as usize);
                total -= rs.start_shift + col * rs.slope;
            }
        }
        total
    };

    for (ky_idx, ky) in TAPS.into_iter().enumerate() {
        let r = query_row + ky;
        let cum_shift = cum_shift_to(ky);
        for (kx_idx, kx) in TAPS.into_iter().enumerate() {
            let c = (x1 as i64 + kx) as f64 + cum_shift;
            let v = fetch(r, c.round() as i64);
            let w = wx[kx_idx] * wy[ky_idx];
            if background != 0.0 && v == background {
                bg_count += 1;
                continue;
            }
            sum += w * v;
            wsum += w;
        }
    }

    if background != 0.0 {
        if bg_count >= 8 {
            return background;
        }
        if wsum == 0.0 {
            return background;
        }
        sum / wsum
    } else {
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_field_reproduces_constant_value() {
        let weights = CubicWeights::default();
        let v = sample(10.3, 10.7, 0.0, &weights, None, |_, _| 5.0);
        assert!((v - 5.0).abs() < 1e-9);
    }

    #[test]
    fn eight_background_neighbors_yield_background() {
        let weights = CubicWeights::default();
        let fetch = |r: i64, _c: i64| if r <= 10 { -999.0 } else { 1.0 };
        let v = sample(10.3, 10.0, -999.0, &weights, None, fetch);
        assert_eq!(v, -999.0);
    }

    #[test]
    fn weight_table_sums_close_to_one_at_integer_offsets() {
        let weights = CubicWeights::default();
        let w = weights.weights(0.0);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-6);
    }
}
