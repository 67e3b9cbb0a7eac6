//! Organism records: one per distinct scientific name.
//!
//! ```text
//! survey rows ──dedupe by CombinedNameID──▶ first rows ──skip NA/-999──▶
//!     + diversity entry (if any) ──▶ OrganismRecord
//! ```
//!
//! The survey row is never modified. A record is assembled from the row
//! plus the optional reference entry, with the entry's name, picture and
//! depth values taking precedence.

use std::collections::HashSet;

use super::columns;
use super::diversity::{self, DiversityEntry};
use crate::config::TransformConfig;
use crate::error::{TransformError, TransformResult};
use crate::models::{Field, OrganismRecord, RawRow};

/// Keep the first row for each scientific name, in input order.
pub fn dedupe_by_scientific_name(rows: &[RawRow]) -> TransformResult<Vec<&RawRow>> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for row in rows {
        if seen.insert(row.get(columns::COMBINED_NAME_ID)?) {
            kept.push(row);
        }
    }

    Ok(kept)
}

/// Whether a row carries a real AphiaID (not "NA" or "-999").
pub fn has_identifier(row: &RawRow, config: &TransformConfig) -> TransformResult<bool> {
    let field = row.classify(columns::APHIA_ID, &config.identifier_sentinels())?;
    Ok(field != Field::Sentinel)
}

/// Root taxon followed by the configured ranks, stopping at the first one
/// that is empty or "NA". Later ranks are never reached past a gap.
pub fn taxonomy_chain(row: &RawRow, config: &TransformConfig) -> TransformResult<Vec<String>> {
    let sentinels = config.missing_sentinels();
    let mut chain = vec![config.root_taxon.clone()];

    for rank in &config.rank_columns {
        match row.classify(rank, &sentinels)? {
            Field::Present(value) => chain.push(value.to_string()),
            Field::Absent | Field::Sentinel => break,
        }
    }

    Ok(chain)
}

/// Depth in meters; empty or "NA" means 0. NaN and infinities are rejected.
pub fn parse_depth(raw: &str, column: &str, line: usize, config: &TransformConfig) -> TransformResult<f64> {
    match Field::classify(raw, &config.missing_sentinels()) {
        Field::Present(value) => value
            .parse::<f64>()
            .ok()
            .filter(|depth| depth.is_finite())
            .ok_or_else(|| TransformError::InvalidNumber {
                line,
                column: column.to_string(),
                value: value.to_string(),
            }),
        Field::Absent | Field::Sentinel => Ok(0.0),
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A letter starts a word when the character before it is not a letter,
/// so `"clown's fish"` becomes `"Clown'S Fish"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;

    for c in value.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }

    out
}

/// Build one organism record from a survey row and its reference entry.
pub fn build_organism(
    row: &RawRow,
    entry: Option<&DiversityEntry>,
    config: &TransformConfig,
) -> TransformResult<OrganismRecord> {
    let aphia_id = row.get_string(columns::APHIA_ID)?;
    let taxonomy = taxonomy_chain(row, config)?;

    let record = match entry {
        Some(entry) => OrganismRecord {
            aphia_id,
            common_name: title_case(&entry.common_name),
            scientific_name: entry.scientific_name.clone(),
            taxonomy,
            highlight_image: entry.image.clone().unwrap_or_default(),
            max_depth: parse_depth(&entry.max_depth, diversity::columns::MAX_DEPTH, row.line, config)?,
            min_depth: parse_depth(&entry.min_depth, diversity::columns::MIN_DEPTH, row.line, config)?,
        },
        None => OrganismRecord {
            aphia_id,
            common_name: title_case(row.get(columns::VERNACULAR_NAME)?),
            scientific_name: row.get_string(columns::COMBINED_NAME_ID)?,
            taxonomy,
            highlight_image: String::new(),
            max_depth: 0.0,
            min_depth: 0.0,
        },
    };

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_row(line: usize, name: &str, id: &str, ranks: [&str; 5]) -> RawRow {
        RawRow::from_pairs(
            line,
            [
                (columns::COMBINED_NAME_ID, name),
                (columns::APHIA_ID, id),
                (columns::VERNACULAR_NAME, "orange clownfish"),
                ("Phylum", ranks[0]),
                ("Class", ranks[1]),
                ("Order", ranks[2]),
                ("Family", ranks[3]),
                ("Genus", ranks[4]),
            ],
        )
    }

    const FULL: [&str; 5] = ["Chordata", "Actinopteri", "Perciformes", "Pomacentridae", "Amphiprion"];

    #[test]
    fn test_full_chain() {
        let row = survey_row(2, "Amphiprion ocellaris", "1", FULL);
        let chain = taxonomy_chain(&row, &TransformConfig::default()).unwrap();
        assert_eq!(chain.len(), 6);
        assert_eq!(chain[0], "Animalia");
        assert_eq!(chain[5], "Amphiprion");
    }

    #[test]
    fn test_chain_stops_at_first_gap() {
        let row = survey_row(2, "x", "1", ["Chordata", "NA", "Perciformes", "Pomacentridae", "Amphiprion"]);
        let chain = taxonomy_chain(&row, &TransformConfig::default()).unwrap();
        assert_eq!(chain, vec!["Animalia", "Chordata"]);

        let row = survey_row(2, "x", "1", ["", "Actinopteri", "", "", ""]);
        let chain = taxonomy_chain(&row, &TransformConfig::default()).unwrap();
        assert_eq!(chain, vec!["Animalia"]);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let rows = vec![
            survey_row(2, "A", "1", FULL),
            survey_row(3, "B", "2", FULL),
            survey_row(4, "A", "3", FULL),
        ];
        let kept = dedupe_by_scientific_name(&rows).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].line, 2);
        assert_eq!(kept[1].line, 3);
    }

    #[test]
    fn test_has_identifier() {
        let config = TransformConfig::default();
        assert!(has_identifier(&survey_row(2, "A", "123", FULL), &config).unwrap());
        assert!(!has_identifier(&survey_row(2, "A", "NA", FULL), &config).unwrap());
        assert!(!has_identifier(&survey_row(2, "A", "-999", FULL), &config).unwrap());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("orange clownfish"), "Orange Clownfish");
        assert_eq!(title_case("BLUE TANG"), "Blue Tang");
        assert_eq!(title_case("clown's fish"), "Clown'S Fish");
        assert_eq!(title_case("black-tip reef shark"), "Black-Tip Reef Shark");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_depth_defaults() {
        let config = TransformConfig::default();
        assert_eq!(parse_depth("NA", "Max Depth", 1, &config).unwrap(), 0.0);
        assert_eq!(parse_depth("", "Max Depth", 1, &config).unwrap(), 0.0);
        assert_eq!(parse_depth("12.5", "Max Depth", 1, &config).unwrap(), 12.5);
        assert!(parse_depth("deep", "Max Depth", 1, &config).is_err());
    }

    #[test]
    fn test_depth_rejects_non_finite() {
        let config = TransformConfig::default();
        for raw in ["NaN", "nan", "inf", "-Infinity"] {
            assert!(matches!(
                parse_depth(raw, "Max Depth", 6, &config),
                Err(TransformError::InvalidNumber { line: 6, .. })
            ));
        }
    }

    #[test]
    fn test_organism_without_entry() {
        let row = survey_row(2, "Amphiprion ocellaris", "278401", FULL);
        let record = build_organism(&row, None, &TransformConfig::default()).unwrap();
        assert_eq!(record.aphia_id, "278401");
        assert_eq!(record.common_name, "Orange Clownfish");
        assert_eq!(record.scientific_name, "Amphiprion ocellaris");
        assert_eq!(record.highlight_image, "");
        assert_eq!(record.max_depth, 0.0);
        assert_eq!(record.min_depth, 0.0);
    }

    #[test]
    fn test_entry_overrides_row() {
        let row = survey_row(2, "Amphiprion sp.", "12345", FULL);
        let entry = DiversityEntry {
            common_name: "Clown Fish".into(),
            scientific_name: "Amphiprion ocellaris".into(),
            kingdom: "Animalia".into(),
            phylum: "Chordata".into(),
            class: "Actinopteri".into(),
            order: "Perciformes".into(),
            family: "Pomacentridae".into(),
            genus: "Amphiprion".into(),
            species: "ocellaris".into(),
            max_depth: "100".into(),
            min_depth: "10".into(),
            image: Some("pic.jpg".into()),
        };

        let record = build_organism(&row, Some(&entry), &TransformConfig::default()).unwrap();
        assert_eq!(record.common_name, "Clown Fish");
        assert_eq!(record.scientific_name, "Amphiprion ocellaris");
        assert_eq!(record.highlight_image, "pic.jpg");
        assert_eq!(record.max_depth, 100.0);
        assert_eq!(record.min_depth, 10.0);
        // the row itself is untouched
        assert_eq!(row.get(columns::COMBINED_NAME_ID).unwrap(), "Amphiprion sp.");
    }
}
