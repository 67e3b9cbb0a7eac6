//! Run configuration.
//!
//! Built once at startup (CLI flags, environment, then defaults) and passed
//! by reference to every stage. Nothing here changes during a run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default folder scanned for `.csv` / `.tsv` sheets.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Default folder receiving the JSON artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default diversity reference sheet (comma-delimited).
pub const DEFAULT_REFERENCE_PATH: &str = "diversity.csv";

/// How observation times are rendered in spotting timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampMode {
    /// Month and day are zero-padded, time parts are copied as written.
    #[default]
    Verbatim,
    /// Date and time are validated and every component is zero-padded.
    Padded,
}

/// Settings for the row transformer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// First element of every taxonomy chain.
    pub root_taxon: String,
    /// Rank columns appended to the chain, in order, until one is missing.
    pub rank_columns: Vec<String>,
    /// Identifier values that mark an unidentified specimen.
    pub identifier_sentinels: Vec<String>,
    /// Placeholder for a missing rank, depth or reference value.
    pub missing_sentinel: String,
    /// Timestamp rendering.
    pub timestamp_mode: TimestampMode,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            root_taxon: "Animalia".to_string(),
            rank_columns: ["Phylum", "Class", "Order", "Family", "Genus"]
                .iter()
                .map(|r| r.to_string())
                .collect(),
            identifier_sentinels: vec!["NA".to_string(), "-999".to_string()],
            missing_sentinel: "NA".to_string(),
            timestamp_mode: TimestampMode::Verbatim,
        }
    }
}

impl TransformConfig {
    /// Sentinel list for identifier columns.
    pub fn identifier_sentinels(&self) -> Vec<&str> {
        self.identifier_sentinels.iter().map(String::as_str).collect()
    }

    /// Sentinel list for rank, depth and reference columns.
    pub fn missing_sentinels(&self) -> [&str; 1] {
        [self.missing_sentinel.as_str()]
    }
}

/// Settings for the file driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Diversity sheet; a missing file yields an empty lookup.
    pub reference_path: PathBuf,
    /// Appended to the input stem for the organism artifact.
    pub organisms_suffix: String,
    /// Appended to the input stem for the spotting artifact.
    pub spotting_suffix: String,
    pub transform: TransformConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            organisms_suffix: "Organisms.json".to_string(),
            spotting_suffix: "Spotting.json".to_string(),
            transform: TransformConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Output path of the organism artifact for an input stem.
    pub fn organisms_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", stem, self.organisms_suffix))
    }

    /// Output path of the spotting artifact for an input stem.
    pub fn spotting_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", stem, self.spotting_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.reference_path, PathBuf::from("diversity.csv"));
    }

    #[test]
    fn test_default_ranks_in_order() {
        let config = TransformConfig::default();
        assert_eq!(
            config.rank_columns,
            vec!["Phylum", "Class", "Order", "Family", "Genus"]
        );
        assert_eq!(config.identifier_sentinels(), vec!["NA", "-999"]);
        assert_eq!(config.timestamp_mode, TimestampMode::Verbatim);
    }

    #[test]
    fn test_artifact_names() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.organisms_path("reef"),
            PathBuf::from("output").join("reefOrganisms.json")
        );
        assert_eq!(
            config.spotting_path("reef"),
            PathBuf::from("output").join("reefSpotting.json")
        );
    }
}
