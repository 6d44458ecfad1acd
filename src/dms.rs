//!
//! DMS packed-angle pack/unpack (spec.md §4.3, §8 scenario 5)
//!
//! A packed angle is a single `f64` encoding `DDDMMMSSS.SS`: integer degrees times
//! 1e6, plus integer minutes times 1e3, plus fractional seconds, sign preserved on
//! the whole value.

use crate::errors::{Error, Result};

fn validate(deg: f64, min: f64, sec: f64, original: f64) -> Result<()> {
    if deg > 180. {
        return Err(Error::InvalidAngle {
            value: original,
            reason: "degrees exceed 180",
        });
    }
    if min >= 60. {
        return Err(Error::InvalidAngle {
            value: original,
            reason: "minutes must be < 60",
        });
    }
    if sec >= 60. {
        return Err(Error::InvalidAngle {
            value: original,
            reason: "seconds must be < 60",
        });
    }
    Ok(())
}

/// Decimal degrees -> packed `DDDMMMSSS.SS`.
pub fn pack(deg: f64) -> Result<f64> {
    let sign = if deg < 0. { -1. } else { 1. };
    let abs = deg.abs();
    let d = abs.floor();
    let rem_min = (abs - d) * 60.0;
    let m = rem_min.floor();
    let s = (rem_min - m) * 60.0;
    validate(d, m, s, deg)?;
    Ok(sign * (d * 1_000_000.0 + m * 1_000.0 + s))
}

/// Packed `DDDMMMSSS.SS` -> decimal degrees.
pub fn unpack(packed: f64) -> Result<f64> {
    let sign = if packed < 0. { -1. } else { 1. };
    let v = packed.abs();
    let d = (v / 1_000_000.0).floor();
    let m = ((v - d * 1_000_000.0) / 1_000.0).floor();
    let s = v - d * 1_000_000.0 - m * 1_000.0;
    validate(d, m, s, packed)?;
    Ok(sign * (d + m / 60.0 + s / 3600.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pack_unpack_scenario() {
        let packed = pack(45.504_305_555_555_55).unwrap();
        assert_abs_diff_eq!(packed, 45_030_015.5, epsilon = 1e-6);
        let deg = unpack(45_030_015.5).unwrap();
        assert_abs_diff_eq!(deg, 45.504_305_555_555_55, epsilon = 1e-9);
    }

    #[test]
    fn sign_is_preserved_on_negation() {
        let packed = pack(-45.504_305_555_555_55).unwrap();
        assert_abs_diff_eq!(packed, -45_030_015.5, epsilon = 1e-6);
        let deg = unpack(-45_030_015.5).unwrap();
        assert_abs_diff_eq!(deg, -45.504_305_555_555_55, epsilon = 1e-9);
    }

    #[test]
    fn rejects_out_of_range_minutes() {
        assert!(unpack(45_600_000.0).is_err());
    }
}
