//!
//! Datum transformation (spec.md §4.2)
//!
//! Molodensky geodetic<->geocentric conversion kept close to the teacher's
//! `datum_transform.rs` (`geodetic_to_geocentric`/`geocentric_to_geodetic`, same
//! `GENAU`/`MAXITER` constants). The dispatch rule chaining NADCON and Molodensky
//! through WGS-84 is new, grounded directly on spec.md §4.2.

use crate::consts::FRAC_PI_2;
use crate::datums::{DatumDefn, NAD27, NAD83, WGS84};
use crate::errors::{Error, Result};
use crate::nadcon::{NadconDirection, NadconService};

const GENAU: f64 = 1.0e-12;
const GENAU2: f64 = GENAU * GENAU;
const MAXITER: usize = 30;
const FRAC_PI_2_EPS: f64 = 1.001 * FRAC_PI_2;

/// Geodetic (lon, lat, h) -> geocentric (X, Y, Z), radians/meters in, meters out.
pub fn geodetic_to_geocentric(lon: f64, lat: f64, h: f64, a: f64, es: f64) -> Result<(f64, f64, f64)> {
    use crate::consts::{PI, TAU};

    let mut lat = lat;
    if lat < -FRAC_PI_2 && lat > -FRAC_PI_2_EPS {
        lat = -FRAC_PI_2;
    } else if lat > FRAC_PI_2 && lat < FRAC_PI_2_EPS {
        lat = FRAC_PI_2;
    } else if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
        return Err(Error::LatitudeOutOfRange);
    }

    let mut lon = lon;
    if lon > PI {
        lon -= TAU;
    }

    let sin_lat = lat.sin();
    let rn = a / (1. - es * sin_lat * sin_lat).sqrt();
    let cos_lat = lat.cos();
    Ok((
        (rn + h) * cos_lat * lon.cos(),
        (rn + h) * cos_lat * lon.sin(),
        ((rn * (1. - es)) + h) * sin_lat,
    ))
}

/// Inverse of [`geodetic_to_geocentric`], an iterative solve per the Institut fur
/// Erdmessung formula the teacher carries over from proj4.
pub fn geocentric_to_geodetic(
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    es: f64,
    b: f64,
) -> Result<(f64, f64, f64)> {
    let d2 = x * x + y * y;
    let p = d2.sqrt();
    let rr = (d2 + z * z).sqrt();

    let lon = if p / a < GENAU {
        if rr / a < GENAU {
            return Ok((0., FRAC_PI_2, -b));
        }
        0.
    } else {
        y.atan2(x)
    };

    let ct = z / rr;
    let st = p / rr;
    let mut rx = 1.0 / (1.0 - es * (2.0 - es) * st * st).sqrt();
    let mut cphi0 = st * (1.0 - es) * rx;
    let mut sphi0 = ct * rx;
    let (mut rk, mut rn, mut cphi, mut sphi, mut sdphi, mut height);

    let mut iter = 0;
    loop {
        iter += 1;
        rn = a / (1.0 - es * sphi0 * sphi0).sqrt();
        height = p * cphi0 + z * sphi0 - rn * (1.0 - es * sphi0 * sphi0);
        rk = es * rn / (rn + height);
        rx = 1.0 / (1.0 - rk * (2.0 - rk) * st * st).sqrt();
        cphi = st * (1.0 - rk) * rx;
        sphi = ct * rx;
        sdphi = sphi * cphi0 - cphi * sphi0;
        cphi0 = cphi;
        sphi0 = sphi;

        if sdphi * sdphi <= GENAU2 || iter >= MAXITER {
            break;
        }
    }

    Ok((lon, (sphi / cphi.abs()).atan(), height))
}

/// Which hub a datum transform goes through.
#[derive(Debug, Clone, Copy)]
pub enum DatumCode {
    /// Use the projection-parameter ellipsoid directly; no shift is applied. Selecting
    /// `NoDatum` on either side of a pipeline forces the GCTP-direct fast path
    /// (`transform.rs`).
    NoDatum,
    Nad27,
    Nad83,
    /// Any other named datum: a fixed 3-parameter shift to WGS-84, dispatched via
    /// Molodensky only.
    Other(DatumDefn),
}

impl DatumCode {
    fn ellipsoid_defn(&self) -> DatumDefn {
        match self {
            DatumCode::NoDatum => WGS84,
            DatumCode::Nad27 => NAD27,
            DatumCode::Nad83 => NAD83,
            DatumCode::Other(d) => *d,
        }
    }
}

/// Molodensky shift between two named datums, both referenced to WGS-84 by a fixed
/// translation (spec.md §4.2).
fn molodensky(src: &DatumDefn, dst: &DatumDefn, lon: f64, lat: f64, h: f64) -> Result<(f64, f64, f64)> {
    if std::ptr::eq(src, dst) || src.id == dst.id {
        return Ok((lon, lat, h));
    }
    let (x, y, z) = geodetic_to_geocentric(lon, lat, h, src.ellps.a, es_of(src))?;
    let (x, y, z) = (x + src.dx - dst.dx, y + src.dy - dst.dy, z + src.dz - dst.dz);
    geocentric_to_geodetic(x, y, z, dst.ellps.a, es_of(dst), b_of(dst))
}

fn es_of(d: &DatumDefn) -> f64 {
    let f = 1. / d.ellps.rf;
    2. * f - f * f
}

fn b_of(d: &DatumDefn) -> f64 {
    d.ellps.a * (1. - 1. / d.ellps.rf)
}

/// Drives the spec.md §4.2 dispatch rule. Generic over the NADCON backend so callers
/// can plug in a real grid service; [`crate::nadcon::NoGridsAvailable`] is the default
/// that always falls back to Molodensky.
pub struct DatumTransform<N: NadconService> {
    src: DatumCode,
    dst: DatumCode,
    nadcon: N,
}

impl<N: NadconService> DatumTransform<N> {
    pub fn new(src: DatumCode, dst: DatumCode, nadcon: N) -> Self {
        Self { src, dst, nadcon }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.src, DatumCode::NoDatum) || matches!(self.dst, DatumCode::NoDatum)
    }

    fn nadcon_or_molodensky(
        &self,
        dir: NadconDirection,
        src: &DatumDefn,
        dst: &DatumDefn,
        lon: f64,
        lat: f64,
        h: f64,
    ) -> Result<(f64, f64, f64)> {
        match self.nadcon.shift(dir, lon.to_degrees(), lat.to_degrees()) {
            Some((lon_deg, lat_deg)) => Ok((lon_deg.to_radians(), lat_deg.to_radians(), h)),
            None => molodensky(src, dst, lon, lat, h),
        }
    }

    /// Transform a geodetic point from the source to the destination datum.
    pub fn transform(&self, lon: f64, lat: f64, h: f64) -> Result<(f64, f64, f64)> {
        use DatumCode::*;
        match (self.src, self.dst) {
            (NoDatum, _) | (_, NoDatum) => Ok((lon, lat, h)),
            (Nad27, Nad27) => Err(Error::Nad27ToNad27),
            (Nad83, Nad83) => Ok((lon, lat, h)),
            (Nad27, Nad83) => {
                self.nadcon_or_molodensky(NadconDirection::Nad27ToNad83, &NAD27, &NAD83, lon, lat, h)
            }
            (Nad83, Nad27) => {
                self.nadcon_or_molodensky(NadconDirection::Nad83ToNad27, &NAD83, &NAD27, lon, lat, h)
            }
            (Nad27, Other(dst)) => {
                let (lon, lat, h) =
                    self.nadcon_or_molodensky(NadconDirection::Nad27ToNad83, &NAD27, &NAD83, lon, lat, h)?;
                molodensky(&NAD83, &dst, lon, lat, h)
            }
            (Other(src), Nad27) => {
                let (lon, lat, h) = molodensky(&src, &NAD83, lon, lat, h)?;
                self.nadcon_or_molodensky(NadconDirection::Nad83ToNad27, &NAD83, &NAD27, lon, lat, h)
            }
            (Nad83, Other(dst)) => molodensky(&NAD83, &dst, lon, lat, h),
            (Other(src), Nad83) => molodensky(&src, &NAD83, lon, lat, h),
            (Other(src), Other(dst)) => molodensky(&src, &dst, lon, lat, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nadcon::NoGridsAvailable;
    use approx::assert_abs_diff_eq;

    #[test]
    fn molodensky_round_trips_within_a_centimeter() {
        let a = DatumCode::Other(crate::datums::DatumDefn {
            id: "A",
            ellps: crate::ellipsoids::WGS84,
            dx: 12.,
            dy: -4.,
            dz: 3.,
        });
        let b = DatumCode::Other(WGS84);

        let (lon, lat, h) = (-100f64.to_radians(), 40f64.to_radians(), 120.);
        let t_ab = DatumTransform::new(a, b, NoGridsAvailable);
        let t_ba = DatumTransform::new(b, a, NoGridsAvailable);

        let (lon2, lat2, h2) = t_ab.transform(lon, lat, h).unwrap();
        let (lon3, lat3, h3) = t_ba.transform(lon2, lat2, h2).unwrap();

        assert_abs_diff_eq!(lon3, lon, epsilon = 1e-9);
        assert_abs_diff_eq!(lat3, lat, epsilon = 1e-9);
        assert_abs_diff_eq!(h3, h, epsilon = 1e-2);
    }

    #[test]
    fn nad27_to_nad27_is_forbidden() {
        let t = DatumTransform::new(DatumCode::Nad27, DatumCode::Nad27, NoGridsAvailable);
        assert!(matches!(
            t.transform(0., 0., 0.),
            Err(Error::Nad27ToNad27)
        ));
    }

    #[test]
    fn nadcon_fallback_reaches_molodensky() {
        // NoGridsAvailable always reports out-of-range, so NAD27->NAD83 must still
        // produce a finite result via the Molodensky fallback.
        let t = DatumTransform::new(DatumCode::Nad27, DatumCode::Nad83, NoGridsAvailable);
        let (lon, lat, _h) = t.transform(-100f64.to_radians(), 40f64.to_radians(), 0.).unwrap();
        assert!(lon.is_finite() && lat.is_finite());
    }
}
