//!
//! Thin CLI wrapper around the library: parses an input header file, reports the
//! resolved projection configuration, and exits. Full raster I/O wiring is left to
//! callers embedding the library with their own `RasterReader`/`RasterWriter` (spec.md
//! §6) — this binary exists only to exercise header parsing end-to-end from the
//! command line, same minimal-bin-over-a-library shape as the teacher's `projdbg`,
//! down to parsing `env::args()` directly rather than pulling in `clap` (a
//! dev-dependency here, not a normal one, exactly as in the teacher crate).

use mrtproj::errors::{Error, Result};
use mrtproj::header;
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        println!("Usage: mrt-resample <header-file>");
        return Err(Error::InvalidParameterValue("Missing header file path"));
    }

    let config = header::parse_file(&args[1])?;
    println!("projection: {:?}", config.projection_code);
    println!("datum: {:?}", config.datum);
    println!("bands: {:?}", config.band_names);
    println!(
        "grid: {} band(s), {:?} lines, {:?} samples, pixel size {:?}",
        config.nbands, config.nlines, config.nsamples, config.pixel_sizes
    );
    Ok(())
}
