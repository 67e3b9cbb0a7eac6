//! Domain models for the Seadex conversion pipeline.
//!
//! - [`RawRow`] - One parsed line of a survey or reference sheet
//! - [`Field`] - Three-way classification of a column value
//! - [`OrganismRecord`] - Species-level output record
//! - [`SpottingRecord`] - Single observation output record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{TransformError, TransformResult};

// =============================================================================
// Raw Row
// =============================================================================

/// A parsed data line: header name to trimmed value.
///
/// Trailing columns missing from a short line are absent, and looking them
/// up is an error rather than a default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based line number in the source file.
    #[serde(skip)]
    pub line: usize,
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            values: BTreeMap::new(),
        }
    }

    /// Build a row from header/value pairs.
    pub fn from_pairs<K, V>(line: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new(line);
        for (k, v) in pairs {
            row.insert(k, v);
        }
        row
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a required column.
    pub fn get(&self, column: &str) -> TransformResult<&str> {
        self.values
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| TransformError::MissingField {
                line: self.line,
                column: column.to_string(),
            })
    }

    /// Owned value of a required column.
    pub fn get_string(&self, column: &str) -> TransformResult<String> {
        self.get(column).map(str::to_string)
    }

    /// Classify a required column against a sentinel list.
    pub fn classify(&self, column: &str, sentinels: &[&str]) -> TransformResult<Field<'_>> {
        self.get(column).map(|v| Field::classify(v, sentinels))
    }

    /// Parse a required column as a finite float.
    pub fn parse_f64(&self, column: &str) -> TransformResult<f64> {
        let value: f64 = self.parse(column)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid_number(column))
        }
    }

    /// Parse a required column as an integer.
    pub fn parse_i64(&self, column: &str) -> TransformResult<i64> {
        self.parse(column)
    }

    fn parse<T: FromStr>(&self, column: &str) -> TransformResult<T> {
        let raw = self.get(column)?;
        raw.parse::<T>().map_err(|_| self.invalid_number(column))
    }

    fn invalid_number(&self, column: &str) -> TransformError {
        TransformError::InvalidNumber {
            line: self.line,
            column: column.to_string(),
            value: self.values.get(column).cloned().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Field Classification
// =============================================================================

/// A column value, decided once as usable, empty, or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Non-empty, non-sentinel value.
    Present(&'a str),
    /// Empty after trimming.
    Absent,
    /// One of the sentinel placeholders ("NA", "-999", ...).
    Sentinel,
}

impl<'a> Field<'a> {
    pub fn classify(value: &'a str, sentinels: &[&str]) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Field::Absent
        } else if sentinels.contains(&value) {
            Field::Sentinel
        } else {
            Field::Present(value)
        }
    }
}

// =============================================================================
// Output Records
// =============================================================================

/// One organism (species-level) record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismRecord {
    #[serde(rename = "AphiaID")]
    pub aphia_id: String,
    #[serde(rename = "Common Name")]
    pub common_name: String,
    #[serde(rename = "Scientific Name")]
    pub scientific_name: String,
    /// Root taxon followed by ranks down to the first missing one.
    #[serde(rename = "Taxonomy")]
    pub taxonomy: Vec<String>,
    /// Empty when no usable picture is known.
    #[serde(rename = "Highlight Image")]
    pub highlight_image: String,
    #[serde(rename = "Max Depth")]
    pub max_depth: f64,
    #[serde(rename = "Min Depth")]
    pub min_depth: f64,
}

/// One sighting of an organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpottingRecord {
    /// Zero-based index among the kept rows of the file.
    #[serde(rename = "Name")]
    pub name: usize,
    #[serde(rename = "AphiaID")]
    pub aphia_id: String,
    #[serde(rename = "Repository")]
    pub repository: String,
    #[serde(rename = "Identified By")]
    pub identified_by: String,
    #[serde(rename = "Identification Date")]
    pub identification_date: String,
    #[serde(rename = "Identification Qualifier")]
    pub identification_qualifier: String,
    #[serde(rename = "Identification Verification Status")]
    pub identification_verification_status: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Depth")]
    pub depth: f64,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Individual Count")]
    pub individual_count: i64,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Image")]
    pub image: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_classify() {
        let sentinels = ["NA", "-999"];
        assert_eq!(Field::classify("Chordata", &sentinels), Field::Present("Chordata"));
        assert_eq!(Field::classify("NA", &sentinels), Field::Sentinel);
        assert_eq!(Field::classify("-999", &sentinels), Field::Sentinel);
        assert_eq!(Field::classify("  ", &sentinels), Field::Absent);
        assert_eq!(Field::classify("na", &sentinels), Field::Present("na"));
    }

    #[test]
    fn test_missing_column_is_error() {
        let row = RawRow::from_pairs(4, [("AphiaID", "123")]);
        let err = row.get("Latitude").unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingField { line: 4, ref column } if column == "Latitude"
        ));
    }

    #[test]
    fn test_parse_numbers() {
        let row = RawRow::from_pairs(2, [("Latitude", "-17.5"), ("IndividualCount", "3")]);
        assert_eq!(row.parse_f64("Latitude").unwrap(), -17.5);
        assert_eq!(row.parse_i64("IndividualCount").unwrap(), 3);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let row = RawRow::from_pairs(9, [("IndividualCount", "2.5"), ("Longitude", "")]);
        assert!(matches!(
            row.parse_i64("IndividualCount"),
            Err(TransformError::InvalidNumber { line: 9, .. })
        ));
        assert!(row.parse_f64("Longitude").is_err());
    }

    #[test]
    fn test_parse_f64_rejects_non_finite() {
        let row = RawRow::from_pairs(4, [("Latitude", "NaN"), ("Longitude", "inf"), ("Depth", "-infinity")]);
        for column in ["Latitude", "Longitude", "Depth"] {
            match row.parse_f64(column) {
                Err(TransformError::InvalidNumber { line, column: c, .. }) => {
                    assert_eq!(line, 4);
                    assert_eq!(c, column);
                }
                other => panic!("expected InvalidNumber for {}, got {:?}", column, other),
            }
        }
    }

    #[test]
    fn test_organism_serialization_keys() {
        let record = OrganismRecord {
            aphia_id: "12345".into(),
            common_name: "Clown Fish".into(),
            scientific_name: "Amphiprion ocellaris".into(),
            taxonomy: vec!["Animalia".into(), "Chordata".into()],
            highlight_image: String::new(),
            max_depth: 100.0,
            min_depth: 0.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"Common Name\":\"Clown Fish\""));
        assert!(json.contains("\"Highlight Image\":\"\""));
        assert!(json.contains("\"Max Depth\":100.0"));
    }

    #[test]
    fn test_raw_row_serializes_values_only() {
        let row = RawRow::from_pairs(3, [("b", "2"), ("a", "1")]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }
}
