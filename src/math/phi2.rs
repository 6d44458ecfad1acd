use crate::consts::{EPS_10, FRAC_PI_2, MAX_ITER_LAT};
use crate::errors::{Error, PointError, Result};

/// Inverse of [`super::tsfn`]: recover the conformal latitude from `t = tsfn(phi)` by
/// Newton iteration. Capped at [`MAX_ITER_LAT`] iterations per spec (every Newton-style
/// latitude refinement in this crate shares that bound and `EPS_10` as the convergence
/// tolerance on the angular step).
///
/// A non-finite `ts` is a domain error (`PointError::OutOfRange`, pixel-recoverable); an
/// iteration that runs past the cap without converging is classified as
/// `Error::IterationDivergence` since the spec says this "should not occur in practice"
/// for in-range inputs and is therefore treated as fatal rather than silently filled in.
pub(crate) fn phi2(ts: f64, e: f64) -> Result<f64> {
    if !ts.is_finite() || ts == 0. {
        return Err(Error::Point(PointError::OutOfRange));
    }
    let eccnth = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2. * ts.atan();
    for _ in 0..MAX_ITER_LAT {
        let esinphi = e * phi.sin();
        let dphi =
            FRAC_PI_2 - 2. * (ts * ((1. - esinphi) / (1. + esinphi)).powf(eccnth)).atan() - phi;
        phi += dphi;
        if dphi.abs() < EPS_10 {
            return Ok(phi);
        }
    }
    Err(Error::IterationDivergence("phi2"))
}
