//! # Seadex - marine biodiversity survey conversion
//!
//! Seadex turns survey sheets (CSV/TSV) into two JSON collections: unique
//! organisms and individual spotting events, optionally enriched from a
//! diversity reference sheet keyed by WoRMS AphiaID.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │  CSV / TSV  │────▶│   Parser    │────▶│  Transform  │────▶│ XOrganisms.json  │
//! │   (input/)  │     │ (auto-enc)  │     │ (+ lookup)  │     │ XSpotting.json   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seadex::{run, PipelineConfig};
//!
//! fn main() {
//!     let summary = run(&PipelineConfig::default()).unwrap();
//!     println!("Converted {} files", summary.files.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Run configuration
//! - [`logs`] - Console progress logging
//! - [`models`] - Raw rows and output records
//! - [`parser`] - Delimited reading with encoding detection
//! - [`transform`] - Lookup, row transformer and driver
//! - [`writer`] - Indented JSON output

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PipelineError, StageError, TimestampError, TransformError, WriteError};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{PipelineConfig, TimestampMode, TransformConfig};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Field, OrganismRecord, RawRow, SpottingRecord};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content,
    delimiter_for_extension,
    delimiter_for_path,
    detect_encoding,
    parse_bytes,
    parse_file,
    parse_str,
    ParseResult,
};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    normalize_timestamp,
    transform_rows,
    DiversityEntry,
    DiversityLookup,
    TransformOutput,
    TransformStats,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert_file,
    discover_inputs,
    load_diversity,
    run,
    transform_file,
    FileReport,
    InputFile,
    RunSummary,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use writer::{to_json_string, write_json};
