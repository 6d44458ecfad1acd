//!
//! Data marshalling (spec.md §4.7)
//!
//! The only place in the crate that knows about integer/float storage types and
//! byte order; the resampling engine (`resample/*.rs`) works exclusively in `f64`.
//! Widening on read never scales; narrowing on write rounds half-away-from-zero and
//! saturates, mirroring `original_source/mrt/shared_src/mrt_dtype.h`'s type table and
//! the teacher's habit of keeping codec concerns out of the math modules entirely
//! (`proj4rs` has no raster I/O, so this module is new, grounded directly on spec.md).

use crate::errors::{Error, Result};

/// The seven storage types spec.md §3's raster band record supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
}

impl DataType {
    pub fn from_header_name(name: &str) -> Result<Self> {
        Ok(match name.to_ascii_uppercase().as_str() {
            "INT8" => DataType::I8,
            "UINT8" => DataType::U8,
            "INT16" => DataType::I16,
            "UINT16" => DataType::U16,
            "INT32" => DataType::I32,
            "UINT32" => DataType::U32,
            "FLOAT32" => DataType::F32,
            other => {
                return Err(Error::InvalidParameter(
                    "DATA_TYPE".to_string(),
                    other.to_string(),
                ))
            }
        })
    }

    pub fn size_bytes(self) -> usize {
        match self {
            DataType::I8 | DataType::U8 => 1,
            DataType::I16 | DataType::U16 => 2,
            DataType::I32 | DataType::U32 | DataType::F32 => 4,
        }
    }

    fn min_max(self) -> (f64, f64) {
        match self {
            DataType::I8 => (i8::MIN as f64, i8::MAX as f64),
            DataType::U8 => (u8::MIN as f64, u8::MAX as f64),
            DataType::I16 => (i16::MIN as f64, i16::MAX as f64),
            DataType::U16 => (u16::MIN as f64, u16::MAX as f64),
            DataType::I32 => (i32::MIN as f64, i32::MAX as f64),
            DataType::U32 => (u32::MIN as f64, u32::MAX as f64),
            // "clamp to [0, type-max] in the source convention" (spec.md §4.7).
            DataType::F32 => (0.0, f32::MAX as f64),
        }
    }
}

/// Byte order of a raw raster file; defaults to native per spec.md §4.8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    pub fn from_header_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "BIG_ENDIAN" => Ok(ByteOrder::Big),
            "LITTLE_ENDIAN" => Ok(ByteOrder::Little),
            other => Err(Error::InvalidParameter(
                "BYTE_ORDER".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// Widen one sample to `f64`, no scaling applied — scale/offset are metadata the
/// header may carry but the resampling engine never consults (spec.md §4.7).
pub fn read_sample(dtype: DataType, bytes: &[u8], order: ByteOrder) -> f64 {
    macro_rules! read {
        ($ty:ty, $n:expr) => {{
            let mut buf = [0u8; $n];
            buf.copy_from_slice(&bytes[..$n]);
            (match order {
                ByteOrder::Big => <$ty>::from_be_bytes(buf),
                ByteOrder::Little => <$ty>::from_le_bytes(buf),
            }) as f64
        }};
    }
    match dtype {
        DataType::I8 => bytes[0] as i8 as f64,
        DataType::U8 => bytes[0] as f64,
        DataType::I16 => read!(i16, 2),
        DataType::U16 => read!(u16, 2),
        DataType::I32 => read!(i32, 4),
        DataType::U32 => read!(u32, 4),
        DataType::F32 => {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&bytes[..4]);
            (match order {
                ByteOrder::Big => f32::from_be_bytes(buf),
                ByteOrder::Little => f32::from_le_bytes(buf),
            }) as f64
        }
    }
}

/// Round half-away-from-zero and saturate into `dtype`'s range, then encode with the
/// given byte order (spec.md §4.7's write path).
pub fn write_sample(dtype: DataType, value: f64, order: ByteOrder, out: &mut [u8]) {
    let (min, max) = dtype.min_max();
    let rounded = if dtype == DataType::F32 {
        value
    } else if value < 0.0 {
        value - 0.5
    } else {
        value + 0.5
    };
    let clamped = rounded.clamp(min, max);

    macro_rules! write {
        ($ty:ty, $n:expr) => {{
            let v = clamped as $ty;
            let bytes = match order {
                ByteOrder::Big => v.to_be_bytes(),
                ByteOrder::Little => v.to_le_bytes(),
            };
            out[..$n].copy_from_slice(&bytes);
        }};
    }
    match dtype {
        DataType::I8 => out[0] = clamped as i8 as u8,
        DataType::U8 => out[0] = clamped as u8,
        DataType::I16 => write!(i16, 2),
        DataType::U16 => write!(u16, 2),
        DataType::I32 => write!(i32, 4),
        DataType::U32 => write!(u32, 4),
        DataType::F32 => {
            let bytes = match order {
                ByteOrder::Big => (clamped as f32).to_be_bytes(),
                ByteOrder::Little => (clamped as f32).to_le_bytes(),
            };
            out[..4].copy_from_slice(&bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_native_byte_order() {
        let order = ByteOrder::native();
        let mut buf = [0u8; 2];
        write_sample(DataType::I16, -12345.0, order, &mut buf);
        assert_eq!(read_sample(DataType::I16, &buf, order), -12345.0);
    }

    #[test]
    fn write_rounds_half_away_from_zero() {
        let order = ByteOrder::native();
        let mut buf = [0u8; 1];
        write_sample(DataType::U8, 200.5, order, &mut buf);
        assert_eq!(read_sample(DataType::U8, &buf, order), 201.0);

        write_sample(DataType::I8, -3.5, order, &mut buf);
        assert_eq!(read_sample(DataType::I8, &buf, order), -4.0);
    }

    #[test]
    fn write_saturates_to_type_range() {
        let order = ByteOrder::native();
        let mut buf = [0u8; 1];
        write_sample(DataType::U8, 5000.0, order, &mut buf);
        assert_eq!(read_sample(DataType::U8, &buf, order), 255.0);

        write_sample(DataType::I8, -5000.0, order, &mut buf);
        assert_eq!(read_sample(DataType::I8, &buf, order), -128.0);
    }

    #[test]
    fn read_widens_without_scaling() {
        let order = ByteOrder::native();
        let mut buf = [0u8; 4];
        write_sample(DataType::F32, 12.25, order, &mut buf);
        assert_eq!(read_sample(DataType::F32, &buf, order), 12.25);
    }
}
