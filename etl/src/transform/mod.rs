//! Transformation module.
//!
//! This module handles survey sheet to JSON conversion:
//! - Columns: Survey sheet column names
//! - Timestamp: Observation date/time canonicalization
//! - Diversity: Reference lookup by AphiaID
//! - Organisms / Spotting: Per-record builders
//! - Rows: Row transformer producing both record sets
//! - Pipeline: Folder-level driver

pub mod columns;
pub mod diversity;
pub mod organisms;
pub mod pipeline;
pub mod rows;
pub mod spotting;
pub mod timestamp;

pub use diversity::{DiversityEntry, DiversityLookup};
pub use pipeline::*;
pub use rows::{transform_rows, TransformOutput, TransformStats};
pub use timestamp::normalize_timestamp;
