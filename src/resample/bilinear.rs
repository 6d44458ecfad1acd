//!
//! Bilinear kernel (spec.md §4.6)
//!
//! Grounded on `original_source/mrt/resample/bi_res.c`'s four-neighbor weighting, with
//! the ISIN row-shift correction on the lower row's samples spelled out exactly as
//! spec.md §4.6 gives it.

use crate::isin_shift::IsinShiftTable;

/// `fetch(row, col)` resolves any out-of-grid coordinate to the background value;
/// `shift` is `Some` only when the input projection is ISIN.
pub fn sample(
    col: f64,
    row: f64,
    nrows: usize,
    ncols: usize,
    background: f64,
    shift: Option<&IsinShiftTable>,
    fetch: impl Fn(i64, i64) -> f64,
) -> f64 {
    let x1 = col.floor() as i64;
    let y1 = row.floor() as i64;
    let x2 = (x1 + 1).min(ncols as i64 - 1);
    let y2 = (y1 + 1).min(nrows as i64 - 1);

    let delta = match shift {
        Some(table) if y1 != y2 => {
            let rs = table.row(y1.max(0) as usize);
            rs.start_shift + col * rs.slope
        }
        _ => 0.0,
    };
    let delta_x = col + delta;
    let delta_x1 = delta_x.floor() as i64;
    let delta_x2 = delta_x1 + 1;

    let v1 = fetch(y1, x1);
    let v2 = fetch(y1, x2);
    let v3 = fetch(y2, delta_x1);
    let v4 = fetch(y2, delta_x2);

    let w1 = (1.0 - (col - x1 as f64)) * (1.0 - (row - y1 as f64));
    let w2 = (1.0 - (x2 as f64 - col)) * (1.0 - (row - y1 as f64));
    let w3 = (1.0 - (delta_x - delta_x1 as f64)) * (1.0 - (y2 as f64 - row));
    let w4 = (1.0 - (delta_x2 as f64 - delta_x)) * (1.0 - (y2 as f64 - row));

    if background == 0.0 {
        return w1 * v1 + w2 * v2 + w3 * v3 + w4 * v4;
    }

    let samples = [(w1, v1), (w2, v2), (w3, v3), (w4, v4)];
    let bg_count = samples.iter().filter(|(_, v)| *v == background).count();
    if bg_count >= 2 {
        return background;
    }
    let (wsum, vsum) = samples
        .iter()
        .filter(|(_, v)| *v != background)
        .fold((0.0, 0.0), |(ws, vs), (w, v)| (ws + w, vs + w * v));
    if wsum == 0.0 {
        background
    } else {
        vsum / wsum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_a_flat_field_exactly() {
        let v = sample(2.5, 2.5, 10, 10, 0.0, None, |_, _| 7.0);
        assert!((v - 7.0).abs() < 1e-12);
    }

    #[test]
    fn two_background_neighbors_yield_background() {
        let fetch = |r: i64, c: i64| if r == 2 { -9999.0 } else { 1.0 };
        let v = sample(2.5, 2.5, 10, 10, -9999.0, None, fetch);
        assert_eq!(v, -9999.0);
    }

    #[test]
    fn single_background_neighbor_is_excluded_not_propagated() {
        let fetch = |r: i64, c: i64| if r == 2 && c == 2 { -9999.0 } else { 1.0 };
        let v = sample(2.5, 2.5, 10, 10, -9999.0, None, fetch);
        assert!((v - 1.0).abs() < 1e-9);
    }
}
