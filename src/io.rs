//!
//! External I/O collaborator interfaces (spec.md §6)
//!
//! The resampling engine (`resample/*.rs`) is generic over these two traits; this
//! crate ships no concrete HDF-EOS/GeoTIFF backend (codecs are an explicit
//! Non-goal) — callers implement [`RasterReader`]/[`RasterWriter`] for whatever
//! container format they need. Shaped after the teacher's own pattern of keeping I/O
//! at the edges behind a small trait (`proj4rs` has no file I/O at all, so this is new,
//! grounded directly on spec.md §6's interface table).

use crate::errors::Result;
use crate::extent::CornerSet;
use crate::header::RasterConfig;
use crate::raster::DataType;

/// Everything `dims()` reports about one open input band.
#[derive(Debug, Clone)]
pub struct RasterDims {
    pub nrows: usize,
    pub ncols: usize,
    pub pixel_size: f64,
    pub data_type: DataType,
    pub background_fill: f64,
    pub corners_latlon: CornerSet,
    pub config: RasterConfig,
}

/// Input grid reader, consumed by the resampling engine. `read_row` assumes O(1)
/// random access; row caching, if any, is the implementor's concern.
pub trait RasterReader {
    fn dims(&self) -> &RasterDims;
    /// Read one input row, already widened to `f64` (spec.md §4.7).
    fn read_row(&mut self, row: usize) -> Result<Vec<f64>>;
    fn close(&mut self) -> Result<()>;
}

/// Output grid writer, consumed by the resampling engine.
pub trait RasterWriter {
    fn write_row(&mut self, row_index: usize, row: &[f64]) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
