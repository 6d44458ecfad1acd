use crate::consts::{EPS_10, MAX_ITER_LAT};
use crate::errors::{Error, Result};

/// Recover geodetic latitude from authalic-latitude parameter `q` (as produced by
/// [`super::qsfn`]). Shared by every equal-area projection that needs an inverse
/// (Albers, Lambert Azimuthal Equal-Area ellipsoidal) — both reduce to the same
/// Newton iteration, which is also the one spec.md §4.1 gives verbatim for LAEA.
pub(crate) fn authlat(q: f64, e: f64, es: f64) -> Result<f64> {
    let mut phi = (q / 2.).asin();
    if e < 1.0e-7 {
        return Ok(phi);
    }
    for _ in 0..MAX_ITER_LAT {
        let sinphi = phi.sin();
        let cosphi = phi.cos();
        let con = es * sinphi * sinphi;
        let dphi = (1. - con) * (1. - con) / (2. * cosphi)
            * (q / (1. - es) - sinphi / (1. - con)
                + (1. / (2. * e)) * ((1. - e * sinphi) / (1. + e * sinphi)).ln());
        phi += dphi;
        if dphi.abs() < EPS_10 {
            return Ok(phi);
        }
    }
    Err(Error::IterationDivergence("authlat"))
}
