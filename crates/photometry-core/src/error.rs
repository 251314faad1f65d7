use thiserror::Error;

use crate::table::TimeScale;
use crate::units::Unit;

/// Invalid camera, observatory or profile parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{parameter} must have units (got bare value {value})")]
    MissingUnit { parameter: String, value: f64 },

    #[error("{parameter} must carry a physical unit, not a dimensionless one")]
    DimensionlessQuantity { parameter: String },

    #[error("Could not parse a number from {0:?}")]
    InvalidNumber(String),

    #[error("Latitude {0} deg is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0} deg is outside [-180, 360)")]
    InvalidLongitude(f64),

    #[error("Invalid configuration: {0}")]
    Toml(String),
}

/// Violations of the table schema contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("data['{0}'] is missing from input data")]
    MissingColumn(String),

    #[error("data['{column}'] is of wrong unit (should be {expected} but reported as {})", fmt_unit(.actual))]
    UnitMismatch {
        column: String,
        expected: Unit,
        actual: Option<Unit>,
    },

    #[error(
        "data['{column}'] has inconsistent units with data['{reference}'] (should be {} but it's {})",
        fmt_unit(.expected),
        fmt_unit(.actual)
    )]
    InconsistentUnit {
        column: String,
        reference: String,
        expected: Option<Unit>,
        actual: Option<Unit>,
    },

    #[error("data['{column}'] must have scale 'utc', not '{scale}'")]
    InvalidTimeScale { column: String, scale: TimeScale },

    #[error("data['{0}'] isn't a column of time entries")]
    NotATimeColumn(String),

    #[error("data['{column}'] must hold {expected} values")]
    WrongColumnType {
        column: String,
        expected: &'static str,
    },

    #[error(
        "Computed column '{0}' already exists in data; pass retain_user_computed to keep it"
    )]
    AlreadyComputed(String),

    #[error("Column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),
}

fn fmt_unit(unit: &Option<Unit>) -> String {
    match unit {
        Some(u) => u.to_string(),
        None => "no unit".to_string(),
    }
}

/// Failures of the centroid / profile engine for a single star.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Centroid finding failed, previous was {previous:?}, current is {current:?}")]
    CentroidDiverged {
        previous: (f64, f64),
        current: (f64, f64),
    },

    #[error("Cutout of size {size} at ({x}, {y}) does not fit inside the {width}x{height} image")]
    CutoutOutOfBounds {
        x: f64,
        y: f64,
        size: usize,
        width: usize,
        height: usize,
    },

    #[error("Profile never drops below half maximum within the cutout")]
    EmptyProfile,

    #[error("Profile is already below half maximum at its first bin")]
    PeakOffCenter,

    #[error("No sky pixels left in a {size}x{size} cutout after excluding 2 x FWHM ({fwhm} px)")]
    NoSkyPixels { size: usize, fwhm: usize },
}

/// Time-scale conversion failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Time {0} predates the UTC leap-second era (1972-01-01)")]
    OutOfRange(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotometryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),
}

pub type Result<T> = std::result::Result<T, PhotometryError>;
