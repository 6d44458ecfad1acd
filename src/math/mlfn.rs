use crate::consts::{EPS_10, MAX_ITER_LAT};
use crate::errors::{Error, Result};

/// Precomputed series coefficients for meridian-distance (`mlfn`) and its inverse,
/// keyed on the ellipsoid's `es`. Kept separate from `Ellipsoid` since only the handful
/// of projections that need meridian arc length (Transverse Mercator among them) pay
/// for computing it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Enfn {
    e0: f64,
    e1: f64,
    e2: f64,
    e3: f64,
}

pub(crate) fn enfn(es: f64) -> Enfn {
    let e0 = 1. - es * (1. / 4. + es * (3. / 64. + es * 5. / 256.));
    let e1 = es * (3. / 8. + es * (3. / 32. + es * 45. / 1024.));
    let e2 = es * es * (15. / 256. + es * 45. / 1024.);
    let e3 = es * es * es * (35. / 3072.);
    Enfn { e0, e1, e2, e3 }
}

/// Meridian arc length from the equator to latitude `phi`, scaled by the semi-major axis.
pub(crate) fn mlfn(phi: f64, sinphi: f64, cosphi: f64, en: &Enfn) -> f64 {
    let sin2 = sinphi * cosphi;
    let cos2phi = cosphi * cosphi - sinphi * sinphi;
    en.e0 * phi - en.e1 * sin2 * 2.
        + en.e2 * sin2 * 2. * cos2phi
        - en.e3 * sin2 * 2. * (1. - 2. * sinphi * sinphi) * cos2phi
}

/// Inverse of [`mlfn`]: recover `phi` from a meridian arc length `arg`, by Newton
/// iteration, capped per spec at [`MAX_ITER_LAT`] iterations.
pub(crate) fn inv_mlfn(arg: f64, es: f64, en: &Enfn) -> Result<f64> {
    let k = 1. / (1. - es);
    let mut phi = arg;
    for _ in 0..MAX_ITER_LAT {
        let sinphi = phi.sin();
        let cosphi = phi.cos();
        let t = 1. - es * sinphi * sinphi;
        let dphi = (mlfn(phi, sinphi, cosphi, en) - arg) * (t * t.sqrt()) * k;
        phi -= dphi;
        if dphi.abs() < EPS_10 {
            return Ok(phi);
        }
    }
    Err(Error::IterationDivergence("inv_mlfn"))
}
