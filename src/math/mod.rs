//!
//! Shared projection math
//!
//! These are the projection-agnostic numerical kernels every forward/inverse pair in
//! `projections/` builds on: meridian distance, conformal latitude, authalic latitude,
//! isometric latitude, and longitude normalization. Kept close to Snyder's formulas,
//! following the same small-single-purpose-module layout as the teacher crate.

mod adjlon;
mod auth;
mod mlfn;
mod msfn;
mod phi2;
mod qsfn;
mod tsfn;

pub(crate) use adjlon::adjlon;
pub(crate) use auth::authlat;
pub(crate) use mlfn::{enfn, inv_mlfn, mlfn, Enfn};
pub(crate) use msfn::msfn;
pub(crate) use phi2::phi2;
pub(crate) use qsfn::qsfn;
pub(crate) use tsfn::tsfn;

/// `asinh` computed via `hypot` to avoid the overflow the naive libm formula exhibits
/// for arguments approaching `f64::MAX` (mirrors the teacher's rationale verbatim).
#[inline]
pub(crate) fn asinh(x: f64) -> f64 {
    (x.abs() + 1.0f64.hypot(x)).ln().copysign(x)
}
