//!
//! Crate errors
//!

/// Pixel-level recoverable conditions raised by a projection's `forward`/`inverse`.
///
/// Callers (the resampling engine, the extent solver's discontinuity probe) treat
/// these as local: the corresponding output pixel becomes background fill rather
/// than aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    /// Point inside a projection's designed discontinuity (e.g. a Goode interruption lobe).
    Break,
    /// Mathematical domain error (e.g. opposite-pole singularity, ISIN envelope overflow).
    OutOfRange,
}

pub type PointResult<T> = std::result::Result<T, PointError>;

/// Crate-wide fatal error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InputStringError(&'static str),
    #[error("No value for parameter '{0}'")]
    NoValueParameter(String),
    #[error("Cannot retrieve value for parameter '{name}': {reason}")]
    ParameterValueError { name: String, reason: String },
    #[error("Missing projection name")]
    MissingProjectionError,
    #[error("Unrecognized datum '{0}'")]
    InvalidDatum(String),
    #[error("Unrecognized ellipsoid '{0}'")]
    InvalidEllipsoid(String),
    #[error("{0}")]
    InvalidParameterValue(&'static str),
    #[error("Latitude out of range")]
    LatitudeOutOfRange,
    #[error("Invalid axis")]
    InvalidAxis,
    #[error("Coordinate out of range")]
    CoordinateOutOfRange,
    #[error("Nan value for coordinate")]
    NanCoordinateValue,
    #[error("point is recoverable at pixel level: {0:?}")]
    Point(PointError),
    #[error("datum combination is not supported: {0}")]
    IncompatibleDatums(&'static str),
    #[error("invalid DMS angle {value}: {reason}")]
    InvalidAngle { value: f64, reason: &'static str },
    #[error("invalid parameter '{0}': {1}")]
    InvalidParameter(String, String),
    #[error("missing required field(s): {0}")]
    MissingField(String),
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("environment variable '{0}' is not set")]
    EnvUnset(String),
    #[error("iterative solver for '{0}' failed to converge")]
    IterationDivergence(&'static str),
    #[error("semi-minor axis mismatch between {lhs} and {rhs}")]
    EllipsoidMismatch { lhs: String, rhs: String },
    #[error("NAD27 to NAD27 datum transform is not meaningful")]
    Nad27ToNad27,
    #[error("unrecognized header directive '{0}'")]
    UnrecognizedDirective(String),
    #[error("malformed header value for '{0}': {1}")]
    MalformedValue(String, String),
}

impl From<PointError> for Error {
    fn from(e: PointError) -> Self {
        Error::Point(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
