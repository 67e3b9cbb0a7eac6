//! Row transformer: survey rows to organism and spotting records.
//!
//! Both outputs come from the same rows and the same identifier filter:
//! a row whose AphiaID is "NA" or "-999" appears in neither.
//!
//! - Organisms are built from the first row per `CombinedNameID` (the
//!   dedupe runs before the identifier filter).
//! - Spottings are built from every row, numbered 0.. in emission order.

use serde::Serialize;

use super::diversity::DiversityLookup;
use super::organisms::{build_organism, dedupe_by_scientific_name, has_identifier};
use super::spotting::build_spotting;
use crate::config::TransformConfig;
use crate::error::TransformResult;
use crate::models::{OrganismRecord, RawRow, SpottingRecord};

/// Counters for one transformed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformStats {
    pub rows: usize,
    /// Rows dropped for an "NA" / "-999" AphiaID.
    pub unidentified: usize,
    pub distinct_names: usize,
    pub organisms: usize,
    /// Organisms that took values from the diversity lookup.
    pub enriched: usize,
    pub spottings: usize,
}

impl TransformStats {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} organisms ({} enriched), {} spottings, {} unidentified",
            self.rows, self.organisms, self.enriched, self.spottings, self.unidentified
        )
    }

    /// Add another file's counters.
    pub fn absorb(&mut self, other: &TransformStats) {
        self.rows += other.rows;
        self.unidentified += other.unidentified;
        self.distinct_names += other.distinct_names;
        self.organisms += other.organisms;
        self.enriched += other.enriched;
        self.spottings += other.spottings;
    }
}

/// Records derived from one survey sheet.
#[derive(Debug, Clone, Default)]
pub struct TransformOutput {
    pub organisms: Vec<OrganismRecord>,
    pub spottings: Vec<SpottingRecord>,
    pub stats: TransformStats,
}

/// Transform survey rows, in order, into organism and spotting records.
///
/// Stops at the first row that is missing a column or holds a malformed
/// number or date.
pub fn transform_rows(
    rows: &[RawRow],
    lookup: &DiversityLookup,
    config: &TransformConfig,
) -> TransformResult<TransformOutput> {
    let mut stats = TransformStats {
        rows: rows.len(),
        ..TransformStats::default()
    };

    let firsts = dedupe_by_scientific_name(rows)?;
    stats.distinct_names = firsts.len();

    let mut organisms = Vec::with_capacity(firsts.len());
    for row in firsts {
        if !has_identifier(row, config)? {
            continue;
        }
        let entry = lookup.get(row.get(super::columns::APHIA_ID)?);
        if entry.is_some() {
            stats.enriched += 1;
        }
        organisms.push(build_organism(row, entry, config)?);
    }
    stats.organisms = organisms.len();

    let mut spottings = Vec::with_capacity(rows.len());
    for row in rows {
        if !has_identifier(row, config)? {
            stats.unidentified += 1;
            continue;
        }
        spottings.push(build_spotting(spottings.len(), row, config)?);
    }
    stats.spottings = spottings.len();

    Ok(TransformOutput {
        organisms,
        spottings,
        stats,
    })
}
