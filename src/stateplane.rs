//!
//! State-plane zone table reader (spec.md §6)
//!
//! Fixed-record binary layout, transcribed from spec.md §6's byte-for-byte
//! description: a 32-byte zone name, an `i32` zone id, nine `f64` parameters — 108
//! bytes per record, no header, no count prefix. Only the reader is in scope; the tool
//! that produces the table stays out of scope (spec.md §1), matching how
//! `original_source/mrt/shared_src` keeps its own fixed-record readers separate from
//! any table-building utility.

use crate::errors::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const SP_ZONE_NAME_SIZE: usize = 32;
const ZONE_ID_SIZE: usize = 4;
const NUM_PARAMETERS: usize = 9;
const PARAMETER_SIZE: usize = 8;
pub const RECORD_SIZE: usize = SP_ZONE_NAME_SIZE + ZONE_ID_SIZE + NUM_PARAMETERS * PARAMETER_SIZE;

/// One state-plane zone record.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePlaneZone {
    pub name: String,
    pub zone_id: i32,
    pub parameters: [f64; NUM_PARAMETERS],
}

fn parse_record(bytes: &[u8]) -> StatePlaneZone {
    let name_bytes = &bytes[..SP_ZONE_NAME_SIZE];
    let nul = name_bytes.iter().position(|&b| b == 0).unwrap_or(SP_ZONE_NAME_SIZE);
    let name = String::from_utf8_lossy(&name_bytes[..nul]).trim_end().to_string();

    let mut id_buf = [0u8; 4];
    id_buf.copy_from_slice(&bytes[SP_ZONE_NAME_SIZE..SP_ZONE_NAME_SIZE + ZONE_ID_SIZE]);
    let zone_id = i32::from_ne_bytes(id_buf);

    let mut parameters = [0f64; NUM_PARAMETERS];
    let params_start = SP_ZONE_NAME_SIZE + ZONE_ID_SIZE;
    for (i, slot) in parameters.iter_mut().enumerate() {
        let start = params_start + i * PARAMETER_SIZE;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[start..start + PARAMETER_SIZE]);
        *slot = f64::from_ne_bytes(buf);
    }

    StatePlaneZone { name, zone_id, parameters }
}

/// Read every fixed-length record in a state-plane table file.
pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<StatePlaneZone>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).map_err(|e| Error::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    if buf.len() % RECORD_SIZE != 0 {
        return Err(Error::MalformedValue(
            path.display().to_string(),
            format!("file size {} is not a multiple of the {}-byte record length", buf.len(), RECORD_SIZE),
        ));
    }
    Ok(buf.chunks_exact(RECORD_SIZE).map(parse_record).collect())
}

/// Find a zone's record by its numeric id.
pub fn find_zone(zones: &[StatePlaneZone], zone_id: i32) -> Option<&StatePlaneZone> {
    zones.iter().find(|z| z.zone_id == zone_id)
}

/// The state-plane data directory, keyed by `MRT_DATA_DIR` with `MRTDATADIR` fallback
/// (spec.md §6).
pub fn data_dir() -> Result<PathBuf> {
    std::env::var("MRT_DATA_DIR")
        .or_else(|_| std::env::var("MRTDATADIR"))
        .map(PathBuf::from)
        .map_err(|_| Error::EnvUnset("MRT_DATA_DIR".to_string()))
}
