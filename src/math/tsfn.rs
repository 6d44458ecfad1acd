use crate::consts::FRAC_PI_4;

/// Snyder's `t(φ)`, used by conformal projections (LCC, polar stereographic, Mercator) to
/// build the isometric latitude. `phi` and `sinphi` are passed separately since most callers
/// already have `sinphi` on hand.
pub(crate) fn tsfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let esinphi = e * sinphi;
    (FRAC_PI_4 - 0.5 * phi).tan() / ((1. - esinphi) / (1. + esinphi)).powf(0.5 * e)
}
