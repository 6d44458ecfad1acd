//!
//! Nearest-neighbor kernel (spec.md §4.6)
//!
//! Transcribed directly from the spec's one-line description; grounded on
//! `original_source/mrt/resample/nn_res.c`'s truncate-and-bounds-check shape.

/// `fetch(row, col)` must already resolve to the background value for any coordinate
/// outside the input grid — the explicit bounds check below is the kernel's own rule
/// (spec.md §4.6), independent of whatever `fetch` does.
pub fn sample(col: f64, row: f64, nrows: usize, ncols: usize, background: f64, fetch: impl Fn(i64, i64) -> f64) -> f64 {
    let c = col.floor() as i64;
    let r = row.floor() as i64;
    if c < 0 || r < 0 || c >= ncols as i64 || r >= nrows as i64 {
        return background;
    }
    fetch(r, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_the_covering_pixel() {
        let v = sample(2.9, 1.1, 10, 10, -1.0, |r, c| (r * 10 + c) as f64);
        assert_eq!(v, 12.0);
    }

    #[test]
    fn out_of_grid_yields_background() {
        let v = sample(-0.5, 3.0, 10, 10, -1.0, |_, _| 99.0);
        assert_eq!(v, -1.0);
        let v = sample(10.0, 3.0, 10, 10, -1.0, |_, _| 99.0);
        assert_eq!(v, -1.0);
    }
}
