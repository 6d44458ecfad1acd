//!
//! Projection catalog (spec.md §4.1)
//!
//! Every projection is a plain struct built once from an [`Ellipsoid`](crate::ellipsoid::Ellipsoid)
//! and a [`ProjParams`](crate::parameters::ProjParams) slot block, exposing `forward`/`inverse`
//! returning the crate-wide [`Result`](crate::errors::Result). [`Projection`] closes the set over
//! an enum rather than a trait object, same dispatch shape the teacher uses for its own
//! projection catalog (`proj4rs/src/projections/mod.rs`'s `Projection` enum over
//! `ProjectionVariant`): the fixed, spec-enumerated set of fourteen codes never grows at
//! runtime, so static dispatch costs nothing and keeps `forward`/`inverse` monomorphic.
//!
//! Slot layout: slots 0-1 are reserved (GCTP mirrors the ellipsoid's `a`/`b` there; this
//! crate takes the ellipsoid directly from the pipeline's ellipsoid, so these are unused).
//! Slots 2-7 are common to every conic/cylindrical/azimuthal code: standard parallel 1,
//! standard parallel 2, central meridian, latitude of origin, false easting, false
//! northing (radians / meters, already converted by `header.rs`/`transform.rs` at the
//! unit boundary). Slot 8 carries a projection-specific scalar (scale factor for UTM,
//! Transverse Mercator and Polar Stereographic). Each module below documents any
//! deviation from this convention.

pub mod albers;
pub mod equirectangular;
pub mod geographic;
pub mod goode;
pub mod hammer;
pub mod isin;
pub mod laea;
pub mod lcc;
pub mod mercator;
pub mod mollweide;
pub mod sinusoidal;
pub mod stereographic;
pub mod tmerc;
pub mod utm;

use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, Result};
use crate::parameters::ProjParams;

/// The common slot convention: standard parallel(s), central meridian, origin latitude,
/// false easting/northing, shared by every conic/cylindrical/azimuthal projection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CommonParams {
    pub std_parallel_1: f64,
    pub std_parallel_2: f64,
    pub lon0: f64,
    pub lat0: f64,
    pub fe: f64,
    pub fn_: f64,
}

impl CommonParams {
    pub(crate) fn from_slots(p: &crate::parameters::ProjParams) -> Self {
        Self {
            std_parallel_1: p.get(2),
            std_parallel_2: p.get(3),
            lon0: p.get(4),
            lat0: p.get(5),
            fe: p.get(6),
            fn_: p.get(7),
        }
    }
}

/// Dispatch over the fourteen projection codes spec.md §4.1 enumerates. Each variant
/// wraps the projection's own parameter struct, already resolved from ellipsoid + slots.
#[derive(Debug, Clone)]
pub enum Projection {
    Geographic(geographic::Geographic),
    Utm(utm::Utm),
    Sinusoidal(sinusoidal::Sinusoidal),
    Isin(isin::Isin),
    Albers(albers::Albers),
    Lcc(lcc::Lcc),
    LambertAzimuthal(laea::LambertAzimuthal),
    PolarStereographic(stereographic::PolarStereographic),
    Mercator(mercator::Mercator),
    TransverseMercator(tmerc::TransverseMercator),
    Mollweide(mollweide::Mollweide),
    Hammer(hammer::Hammer),
    Goode(goode::Goode),
    Equirectangular(equirectangular::Equirectangular),
}

/// The fourteen symbolic projection names spec.md §3 enumerates in the projection
/// configuration tuple, as read from a header file's `PROJECTION_TYPE` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionCode {
    Geographic,
    Utm,
    Sinusoidal,
    Isin,
    Albers,
    Lcc,
    LambertAzimuthal,
    PolarStereographic,
    Mercator,
    TransverseMercator,
    Mollweide,
    Hammer,
    Goode,
    Equirectangular,
}

impl ProjectionCode {
    pub fn from_name(name: &str) -> Result<Self> {
        let code = match name.to_ascii_uppercase().as_str() {
            "GEO" | "GEOGRAPHIC" => ProjectionCode::Geographic,
            "UTM" => ProjectionCode::Utm,
            "SIN" | "SINUSOIDAL" => ProjectionCode::Sinusoidal,
            "ISIN" | "ISINUS" => ProjectionCode::Isin,
            "ALBERS" => ProjectionCode::Albers,
            "LCC" => ProjectionCode::Lcc,
            "LAEA" => ProjectionCode::LambertAzimuthal,
            "PS" | "POLAR_STEREOGRAPHIC" => ProjectionCode::PolarStereographic,
            "MERCAT" | "MERCATOR" => ProjectionCode::Mercator,
            "TM" | "TRANSVERSE_MERCATOR" => ProjectionCode::TransverseMercator,
            "MOLL" | "MOLLWEIDE" => ProjectionCode::Mollweide,
            "HAMMER" => ProjectionCode::Hammer,
            "GOODE" => ProjectionCode::Goode,
            "EQRECT" | "EQUIRECTANGULAR" => ProjectionCode::Equirectangular,
            other => {
                return Err(Error::InvalidParameter(
                    "PROJECTION_TYPE".to_string(),
                    other.to_string(),
                ))
            }
        };
        Ok(code)
    }
}

impl Projection {
    /// Build the projection named by `code` from an ellipsoid and its 15-slot parameters.
    pub fn build(code: ProjectionCode, ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        Ok(match code {
            ProjectionCode::Geographic => Projection::Geographic(geographic::Geographic::new()),
            ProjectionCode::Utm => Projection::Utm(utm::Utm::new(ellps, params)?),
            ProjectionCode::Sinusoidal => Projection::Sinusoidal(sinusoidal::Sinusoidal::new(ellps, params)?),
            ProjectionCode::Isin => Projection::Isin(isin::Isin::new(ellps, params)?),
            ProjectionCode::Albers => Projection::Albers(albers::Albers::new(ellps, params)?),
            ProjectionCode::Lcc => Projection::Lcc(lcc::Lcc::new(ellps, params)?),
            ProjectionCode::LambertAzimuthal => {
                Projection::LambertAzimuthal(laea::LambertAzimuthal::new(ellps, params)?)
            }
            ProjectionCode::PolarStereographic => {
                Projection::PolarStereographic(stereographic::PolarStereographic::new(ellps, params)?)
            }
            ProjectionCode::Mercator => Projection::Mercator(mercator::Mercator::new(ellps, params)?),
            ProjectionCode::TransverseMercator => {
                Projection::TransverseMercator(tmerc::TransverseMercator::new(ellps, params)?)
            }
            ProjectionCode::Mollweide => Projection::Mollweide(mollweide::Mollweide::new(ellps, params)?),
            ProjectionCode::Hammer => Projection::Hammer(hammer::Hammer::new(ellps, params)?),
            ProjectionCode::Goode => Projection::Goode(goode::Goode::new(ellps, params)?),
            ProjectionCode::Equirectangular => {
                Projection::Equirectangular(equirectangular::Equirectangular::new(ellps, params)?)
            }
        })
    }

    /// Geodetic (lon, lat), radians -> projected (x, y), meters.
    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        match self {
            Projection::Geographic(p) => p.forward(lam, phi),
            Projection::Utm(p) => p.forward(lam, phi),
            Projection::Sinusoidal(p) => p.forward(lam, phi),
            Projection::Isin(p) => p.forward(lam, phi),
            Projection::Albers(p) => p.forward(lam, phi),
            Projection::Lcc(p) => p.forward(lam, phi),
            Projection::LambertAzimuthal(p) => p.forward(lam, phi),
            Projection::PolarStereographic(p) => p.forward(lam, phi),
            Projection::Mercator(p) => p.forward(lam, phi),
            Projection::TransverseMercator(p) => p.forward(lam, phi),
            Projection::Mollweide(p) => p.forward(lam, phi),
            Projection::Hammer(p) => p.forward(lam, phi),
            Projection::Goode(p) => p.forward(lam, phi),
            Projection::Equirectangular(p) => p.forward(lam, phi),
        }
    }

    /// Projected (x, y), meters -> geodetic (lon, lat), radians.
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        match self {
            Projection::Geographic(p) => p.inverse(x, y),
            Projection::Utm(p) => p.inverse(x, y),
            Projection::Sinusoidal(p) => p.inverse(x, y),
            Projection::Isin(p) => p.inverse(x, y),
            Projection::Albers(p) => p.inverse(x, y),
            Projection::Lcc(p) => p.inverse(x, y),
            Projection::LambertAzimuthal(p) => p.inverse(x, y),
            Projection::PolarStereographic(p) => p.inverse(x, y),
            Projection::Mercator(p) => p.inverse(x, y),
            Projection::TransverseMercator(p) => p.inverse(x, y),
            Projection::Mollweide(p) => p.inverse(x, y),
            Projection::Hammer(p) => p.inverse(x, y),
            Projection::Goode(p) => p.inverse(x, y),
            Projection::Equirectangular(p) => p.inverse(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::Ellipsoid;
    use crate::ellipsoids::SPHERE;

    #[test]
    fn from_name_is_case_insensitive_and_accepts_aliases() {
        assert_eq!(ProjectionCode::from_name("sin").unwrap(), ProjectionCode::Sinusoidal);
        assert_eq!(ProjectionCode::from_name("SINUSOIDAL").unwrap(), ProjectionCode::Sinusoidal);
        assert_eq!(ProjectionCode::from_name("isinus").unwrap(), ProjectionCode::Isin);
    }

    #[test]
    fn from_name_rejects_unknown_names() {
        assert!(ProjectionCode::from_name("NOT_A_PROJECTION").is_err());
    }

    #[test]
    fn build_dispatches_to_the_named_projection() {
        let ellps = Ellipsoid::from_defn(&SPHERE).unwrap();
        let params = ProjParams::default();
        let proj = Projection::build(ProjectionCode::Geographic, &ellps, &params).unwrap();
        assert!(matches!(proj, Projection::Geographic(_)));
    }
}
