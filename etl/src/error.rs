//! Error types for the Seadex conversion pipeline.
//!
//! One error enum per stage, wrapped by [`PipelineError`] at the top:
//!
//! - [`CsvError`] - Delimited file reading and decoding
//! - [`TimestampError`] - Observation date/time canonicalization
//! - [`TransformError`] - Row to record conversion
//! - [`WriteError`] - JSON output
//! - [`PipelineError`] - Driver orchestration, carries the offending path
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a delimited file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {0}")]
    EncodingError(String),

    /// Malformed record.
    #[error("Line {line}: invalid record: {message}")]
    ParseError { line: usize, message: String },

    /// Empty file.
    #[error("File is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found")]
    NoHeaders,
}

// =============================================================================
// Timestamp Errors
// =============================================================================

/// Errors while canonicalizing an observation date and time.
#[derive(Debug, Error, PartialEq)]
pub enum TimestampError {
    /// Date did not split into month/day/year.
    #[error("date '{0}' is not in M/D/YYYY form")]
    MalformedDate(String),

    /// Time did not split into hour:minute:second.
    #[error("time '{0}' is not in H:M:S form")]
    MalformedTime(String),

    /// Components are not a real calendar date or clock time.
    #[error("'{date} {time}' is not a valid date and time")]
    OutOfRange { date: String, time: String },
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while turning raw rows into organism and spotting records.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Required column absent from the row.
    #[error("Line {line}: missing column '{column}'")]
    MissingField { line: usize, column: String },

    /// Column value is not a number.
    #[error("Line {line}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    /// Observation date/time could not be converted.
    #[error("Line {line}: {source}")]
    Timestamp {
        line: usize,
        #[source]
        source: TimestampError,
    },
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing a JSON artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    /// IO error.
    #[error("Cannot write '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Errors raised by one stage while handling a given file.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Top-level driver errors.
///
/// Every variant names the path being processed when the run stopped.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file failed to read, transform or write.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: StageError,
    },

    /// Diversity reference file failed to load.
    #[error("reference {}: {source}", .path.display())]
    Reference {
        path: PathBuf,
        #[source]
        source: StageError,
    },

    /// Input folder could not be listed.
    #[error("cannot list input folder {}: {source}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output folder could not be created.
    #[error("cannot create output folder {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Attach a file path to a stage error.
    pub fn file(path: impl Into<PathBuf>, source: impl Into<StageError>) -> Self {
        Self::File {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Attach the reference file path to a stage error.
    pub fn reference(path: impl Into<PathBuf>, source: impl Into<StageError>) -> Self {
        Self::Reference {
            path: path.into(),
            source: source.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for timestamp conversion.
pub type TimestampResult<T> = Result<T, TimestampError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for JSON output.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_names_path_and_column() {
        let err = TransformError::MissingField {
            line: 7,
            column: "Latitude".into(),
        };
        let pipeline_err = PipelineError::file("input/reef.csv", err);
        let msg = pipeline_err.to_string();
        assert!(msg.contains("input/reef.csv"));
        assert!(msg.contains("Line 7"));
        assert!(msg.contains("Latitude"));
    }

    #[test]
    fn test_invalid_number_format() {
        let err = TransformError::InvalidNumber {
            line: 3,
            column: "DepthInMeters".into(),
            value: "deep".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DepthInMeters"));
        assert!(msg.contains("'deep'"));
    }

    #[test]
    fn test_timestamp_error_keeps_line() {
        let err = TransformError::Timestamp {
            line: 12,
            source: TimestampError::MalformedDate("2021-03-04".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("Line 12"));
        assert!(msg.contains("2021-03-04"));
    }

    #[test]
    fn test_stage_error_conversion_chain() {
        let stage: StageError = CsvError::EmptyFile.into();
        let err = PipelineError::reference("diversity.csv", stage);
        assert!(err.to_string().contains("empty"));
    }
}
