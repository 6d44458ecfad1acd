//!
//! Shared numeric constants
//!

pub use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Near-zero test tolerance, ε₁ in spec terms.
pub const EPS_10: f64 = 1.0e-10;

/// Iteration-convergence tolerance, ε₂ in spec terms.
pub const EPS_12: f64 = 1.0e-12;

pub const EPS_7: f64 = 1.0e-7;

/// Seconds of arc to radians.
pub const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;

/// Degrees to radians, written out since `f64::to_radians` is a method, not a const fn
/// we can use in a `const` context for table literals.
pub const D2R: f64 = PI / 180.0;
pub const R2D: f64 = 180.0 / PI;

/// Maximum iterations for every Newton-style latitude refinement in the crate
/// (LAEA inverse, `phi2`, Molodensky geocentric inversion uses its own cap, see
/// `datum_transform.rs`). Mandated by spec.md §4.1.
pub const MAX_ITER_LAT: usize = 10;
