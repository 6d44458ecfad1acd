//!
//! NADCON grid shift service
//!
//! Spec.md §4.2 treats NADCON as an external service: geodetic degrees in, geodetic
//! degrees out, or an explicit "point is outside grid coverage" signal that the datum
//! dispatcher (`datum_transform.rs`) falls back to Molodensky for. This module only
//! defines the boundary trait the pipeline holds, generalized from the teacher's
//! `NadgridShift` trait (`proj4rs/src/nadgrids/mod.rs`) — actual NTv2 grid-file parsing
//! is out of scope here since the spec does not describe a grid file format, only the
//! in/out-of-range service contract.

/// One direction of a NADCON-style grid lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NadconDirection {
    Nad27ToNad83,
    Nad83ToNad27,
}

/// A pluggable NADCON grid-shift backend.
///
/// `shift` takes geodetic degrees and returns geodetic degrees, or `None` if the point
/// falls outside the grid's coverage — the caller then falls back to Molodensky for
/// that point, per spec.md §4.2.
pub trait NadconService {
    fn shift(&self, dir: NadconDirection, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)>;
}

/// Default backend used when no grid file is configured: every point is reported
/// out-of-range, so the dispatcher always falls back to Molodensky. This keeps the
/// crate usable without shipping or loading NADCON grid binaries while preserving the
/// documented fallback behavior exactly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGridsAvailable;

impl NadconService for NoGridsAvailable {
    fn shift(&self, _dir: NadconDirection, _lon_deg: f64, _lat_deg: f64) -> Option<(f64, f64)> {
        None
    }
}

impl<T: NadconService + ?Sized> NadconService for &T {
    fn shift(&self, dir: NadconDirection, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        (**self).shift(dir, lon_deg, lat_deg)
    }
}
