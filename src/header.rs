//!
//! Header glue (spec.md §4.8, §6)
//!
//! Parses the key/value header grammar into the projection configuration graph of
//! spec.md §3: directive name, optional `= value`, parenthesized vectors,
//! `$(NAME)` environment expansion, `#` line comments. Grounded on
//! `original_source/mrt/shared_src/read_hdr.c`'s directive table (same mandatory /
//! optional split) but expressed as a small recursive-descent line parser rather than
//! the source's giant `if/else` chain, in the style of the teacher's own small parsing
//! helpers (`proj4rs/src/parameters.rs`'s `ParamList`, which this module's
//! [`crate::parameters::ParamList`] sibling already generalizes for single key/value
//! pairs — this module handles the outer file grammar that produces that list).

use crate::datum_transform::DatumCode;
use crate::datums;
use crate::ellipsoid::{Ellipsoid, Shape};
use crate::ellipsoids::SPHERE;
use crate::errors::{Error, Result};
use crate::extent::CornerSet;
use crate::parameters::{Parameter, ProjParams};
use crate::projections::{Projection, ProjectionCode};
use crate::raster::{ByteOrder, DataType};
use std::collections::HashMap;
use std::path::Path;

/// The fully parsed configuration for one side of a transform, spec.md §3's
/// "projection configuration" tuple plus the raster-band fields §4.8 mandates.
#[derive(Debug, Clone)]
pub struct RasterConfig {
    pub projection_code: ProjectionCode,
    pub projection_params: ProjParams,
    pub ellipsoid: Ellipsoid,
    pub datum: DatumCode,
    pub utm_zone: Option<i32>,
    pub corners_latlon: CornerSet,
    pub nbands: usize,
    pub band_names: Vec<String>,
    pub data_types: Vec<DataType>,
    pub nlines: Vec<usize>,
    pub nsamples: Vec<usize>,
    pub pixel_sizes: Vec<f64>,
    pub min_value: Option<Vec<f64>>,
    pub max_value: Option<Vec<f64>>,
    pub background_fill: Option<Vec<f64>>,
    pub byte_order: ByteOrder,
}

impl RasterConfig {
    pub fn build_projection(&self) -> Result<Projection> {
        Projection::build(self.projection_code, &self.ellipsoid, &self.projection_params)
    }
}

/// One `NAME = value` directive, or a bare `NAME` (parenthesized vectors are handled
/// by the caller once the raw value string is extracted).
struct Directive {
    name: String,
    value: Option<String>,
}

fn expand_env(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '$' && raw[i..].starts_with("$(") {
            let rest = &raw[i + 2..];
            let end = rest.find(')').ok_or_else(|| {
                Error::MalformedValue("header".to_string(), format!("unterminated $( in '{}'", raw))
            })?;
            let name = &rest[..end];
            let value = std::env::var(name).map_err(|_| Error::EnvUnset(name.to_string()))?;
            out.push_str(&value);
            for _ in 0..(end + 2) {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Normalize path separators in a header-supplied filename based on the first
/// separator character encountered (spec.md §4.8).
pub fn normalize_path_separator(raw: &str) -> String {
    let first_sep = raw.chars().find(|&c| c == '/' || c == '\\');
    match first_sep {
        Some('\\') => raw.replace('/', "\\"),
        Some('/') => raw.replace('\\', "/"),
        _ => raw.to_string(),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn parse_directives(text: &str) -> Result<Vec<Directive>> {
    let mut directives = Vec::new();
    let mut pending: Option<(String, String)> = None;

    for raw_line in text.lines() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() && pending.is_none() {
            continue;
        }

        if let Some((name, mut acc)) = pending.take() {
            acc.push(' ');
            acc.push_str(line);
            if acc.trim_end().ends_with(')') {
                directives.push(Directive { name, value: Some(acc) });
            } else {
                pending = Some((name, acc));
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        let (name, value) = match line.split_once('=') {
            Some((n, v)) => (n.trim().to_string(), Some(v.trim().to_string())),
            None => (line.to_string(), None),
        };

        match &value {
            Some(v) if v.starts_with('(') && !v.trim_end().ends_with(')') => {
                pending = Some((name, v.clone()));
            }
            _ => directives.push(Directive { name, value }),
        }
    }

    if let Some((name, _)) = pending {
        return Err(Error::MalformedValue(name, "unterminated parenthesized vector".to_string()));
    }

    Ok(directives)
}

fn split_vector(value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| Error::MalformedValue("vector".to_string(), value.to_string()))?;
    Ok(inner.split_whitespace().map(|s| s.to_string()).collect())
}

fn parse_f64_vector(value: &str) -> Result<Vec<f64>> {
    split_vector(value)?
        .into_iter()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| Error::MalformedValue("numeric vector".to_string(), tok))
        })
        .collect()
}

fn parse_usize_vector(value: &str) -> Result<Vec<usize>> {
    split_vector(value)?
        .into_iter()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| Error::MalformedValue("integer vector".to_string(), tok))
        })
        .collect()
}

fn parse_latlon_corner(value: &str) -> Result<(f64, f64)> {
    let parts = split_vector(value)?;
    if parts.len() != 2 {
        return Err(Error::MalformedValue("corner".to_string(), value.to_string()));
    }
    let lat: f64 = parts[0]
        .parse()
        .map_err(|_| Error::MalformedValue("corner latitude".to_string(), parts[0].clone()))?;
    let lon: f64 = parts[1]
        .parse()
        .map_err(|_| Error::MalformedValue("corner longitude".to_string(), parts[1].clone()))?;
    Ok((lon.to_radians(), lat.to_radians()))
}

/// Derive the ellipsoid for a projection configuration: a named `DATUM` wins; failing
/// that, a GCTP-style semi-major/semi-minor pair in parameter slots 0/1 (slot 1 of
/// zero means "sphere of radius slot 0"; between 0 and 1 means eccentricity squared;
/// above 1 means an explicit semi-minor axis); failing that, the crate's default
/// sphere, matching the teacher's fallback when no shape is given at all.
fn resolve_ellipsoid(datum: Option<&DatumCode>, params: &ProjParams) -> Result<Ellipsoid> {
    if let Some(datum) = datum {
        if !matches!(datum, DatumCode::NoDatum) {
            let defn = match datum {
                DatumCode::NoDatum => unreachable!(),
                DatumCode::Nad27 => datums::NAD27_ELLIPSOID,
                DatumCode::Nad83 => datums::NAD83_ELLIPSOID,
                DatumCode::Other(d) => d.ellps,
            };
            return Ellipsoid::from_defn(&defn);
        }
    }

    let a = params.get(0);
    let b_or_shape = params.get(1);
    if a > 0.0 {
        return if b_or_shape == 0.0 {
            Ellipsoid::sphere(a)
        } else if b_or_shape < 1.0 {
            Ellipsoid::from_a_and_shape(a, Shape::Es(b_or_shape))
        } else {
            Ellipsoid::from_a_and_shape(a, Shape::B(b_or_shape))
        };
    }

    Ellipsoid::from_defn(&SPHERE)
}

fn resolve_datum(value: Option<&str>) -> Result<DatumCode> {
    match value {
        None => Ok(DatumCode::NoDatum),
        Some(name) if name.eq_ignore_ascii_case("NoDatum") => Ok(DatumCode::NoDatum),
        Some(name) => match datums::is_nad(name) {
            Some(datums::NadCode::Nad27) => Ok(DatumCode::Nad27),
            Some(datums::NadCode::Nad83) => Ok(DatumCode::Nad83),
            None => match datums::find_datum(name) {
                Some(defn) => Ok(DatumCode::Other(*defn)),
                None => Err(Error::InvalidDatum(name.to_string())),
            },
        },
    }
}

/// Parse a header file's text into a [`RasterConfig`].
pub fn parse(text: &str) -> Result<RasterConfig> {
    let expanded = expand_env(text)?;
    let directives = parse_directives(&expanded)?;

    let mut fields: HashMap<String, String> = HashMap::new();
    for d in directives {
        if let Some(v) = d.value {
            fields.insert(d.name.to_ascii_uppercase(), v);
        }
    }

    let mut missing = Vec::new();
    for required in [
        "PROJECTION_TYPE",
        "PROJECTION_PARAMETERS",
        "UL_CORNER_LATLON",
        "UR_CORNER_LATLON",
        "LL_CORNER_LATLON",
        "LR_CORNER_LATLON",
        "NBANDS",
        "BANDNAMES",
        "DATA_TYPE",
        "NLINES",
        "NSAMPLES",
        "PIXEL_SIZE",
    ] {
        if !fields.contains_key(required) {
            missing.push(required.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(Error::MissingField(missing.join(", ")));
    }

    let projection_code = ProjectionCode::from_name(&fields["PROJECTION_TYPE"])?;

    let param_values = parse_f64_vector(&fields["PROJECTION_PARAMETERS"])?;
    if param_values.len() != 15 {
        return Err(Error::MalformedValue(
            "PROJECTION_PARAMETERS".to_string(),
            format!("expected 15 values, found {}", param_values.len()),
        ));
    }
    let mut slots = [0f64; 15];
    slots.copy_from_slice(&param_values);
    let projection_params = ProjParams(slots);

    let ul = parse_latlon_corner(&fields["UL_CORNER_LATLON"])?;
    let ur = parse_latlon_corner(&fields["UR_CORNER_LATLON"])?;
    let ll = parse_latlon_corner(&fields["LL_CORNER_LATLON"])?;
    let lr = parse_latlon_corner(&fields["LR_CORNER_LATLON"])?;
    let corners_latlon = CornerSet { ul, ur, ll, lr };

    let datum = resolve_datum(fields.get("DATUM").map(String::as_str))?;
    let ellipsoid = resolve_ellipsoid(Some(&datum), &projection_params)?;

    let utm_zone = match fields.get("UTM_ZONE") {
        Some(v) => {
            let param = Parameter { name: "UTM_ZONE", value: Some(v.trim()) };
            Some(param.try_convert::<i32>()?)
        }
        None => None,
    };

    let nbands_param = Parameter { name: "NBANDS", value: Some(fields["NBANDS"].trim()) };
    let nbands_declared: usize = nbands_param.try_convert()?;
    let band_names = split_vector(&fields["BANDNAMES"])?;
    let nbands = band_names.len();
    if nbands != nbands_declared {
        return Err(Error::MalformedValue(
            "NBANDS".to_string(),
            format!("declared {} but BANDNAMES has {}", nbands_declared, nbands),
        ));
    }

    let data_types = split_vector(&fields["DATA_TYPE"])?
        .into_iter()
        .map(|s| DataType::from_header_name(&s))
        .collect::<Result<Vec<_>>>()?;

    let nlines = parse_usize_vector(&fields["NLINES"])?;
    let nsamples = parse_usize_vector(&fields["NSAMPLES"])?;
    let pixel_sizes = parse_f64_vector(&fields["PIXEL_SIZE"])?;

    for (label, len) in [
        ("DATA_TYPE", data_types.len()),
        ("NLINES", nlines.len()),
        ("NSAMPLES", nsamples.len()),
        ("PIXEL_SIZE", pixel_sizes.len()),
    ] {
        if len != nbands {
            return Err(Error::MalformedValue(
                label.to_string(),
                format!("expected {} entries (one per band), found {}", nbands, len),
            ));
        }
    }

    let min_value = fields.get("MIN_VALUE").map(|v| parse_f64_vector(v)).transpose()?;
    let max_value = fields.get("MAX_VALUE").map(|v| parse_f64_vector(v)).transpose()?;
    let background_fill = fields
        .get("BACKGROUND_FILL")
        .map(|v| parse_f64_vector(v))
        .transpose()?;

    let byte_order = match fields.get("BYTE_ORDER") {
        Some(v) => ByteOrder::from_header_name(v)?,
        None => ByteOrder::native(),
    };

    Ok(RasterConfig {
        projection_code,
        projection_params,
        ellipsoid,
        datum,
        utm_zone,
        corners_latlon,
        nbands,
        band_names,
        data_types,
        nlines,
        nsamples,
        pixel_sizes,
        min_value,
        max_value,
        background_fill,
        byte_order,
    })
}

/// Parse a header file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<RasterConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> String {
        r#"
            # a comment line
            PROJECTION_TYPE = SIN
            PROJECTION_PARAMETERS = (
                6371007.181 0.0 0.0 0.0
                0.0 0.0 0.0 0.0
                0.0 0.0 0.0 0.0
                0.0 0.0 0.0
            )
            UL_CORNER_LATLON = ( 40.0 -100.0 )
            UR_CORNER_LATLON = ( 40.0 -90.0 )
            LL_CORNER_LATLON = ( 30.0 -100.0 )
            LR_CORNER_LATLON = ( 30.0 -90.0 )
            NBANDS = 1
            BANDNAMES = ( sur_refl_b01 )
            DATA_TYPE = ( INT16 )
            NLINES = ( 1200 )
            NSAMPLES = ( 1200 )
            PIXEL_SIZE = ( 926.625433 )
            BACKGROUND_FILL = ( -28672 )
        "#
        .to_string()
    }

    #[test]
    fn parses_mandatory_fields() {
        let cfg = parse(&sample_header()).unwrap();
        assert_eq!(cfg.projection_code, ProjectionCode::Sinusoidal);
        assert_eq!(cfg.nbands, 1);
        assert_eq!(cfg.band_names, vec!["sur_refl_b01"]);
        assert_eq!(cfg.data_types, vec![DataType::I16]);
        assert_eq!(cfg.nlines, vec![1200]);
        assert_eq!(cfg.background_fill, Some(vec![-28672.0]));
    }

    #[test]
    fn missing_mandatory_field_is_reported() {
        let text = sample_header().replace("NLINES = ( 1200 )", "");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
    }

    #[test]
    fn expands_environment_variables() {
        std::env::set_var("MRTPROJ_TEST_BANDNAME", "sur_refl_b02");
        let text = sample_header().replace("sur_refl_b01", "$(MRTPROJ_TEST_BANDNAME)");
        let cfg = parse(&text).unwrap();
        assert_eq!(cfg.band_names, vec!["sur_refl_b02"]);
        std::env::remove_var("MRTPROJ_TEST_BANDNAME");
    }

    #[test]
    fn missing_environment_variable_aborts_parsing() {
        let text = sample_header().replace("sur_refl_b01", "$(MRTPROJ_DOES_NOT_EXIST)");
        assert!(matches!(parse(&text), Err(Error::EnvUnset(_))));
    }

    #[test]
    fn normalizes_path_separators_by_first_seen() {
        assert_eq!(normalize_path_separator("a/b\\c/d"), "a/b/c/d");
        assert_eq!(normalize_path_separator("a\\b/c\\d"), "a\\b\\c\\d");
    }
}
