//! Diversity reference lookup.
//!
//! The reference sheet holds curated names, depth ranges and pictures per
//! WoRMS AphiaID. Entries found here take precedence over the survey row
//! when organism records are built.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TransformResult;
use crate::models::RawRow;

/// Reference sheet column names.
pub mod columns {
    pub const APHIA_ID: &str = "WoRMS AphiaID";
    pub const COMMON_NAME: &str = "Common Name";
    pub const SCIENTIFIC_NAME: &str = "Scientific Name";
    /// Spelled this way in the reference sheet.
    pub const KINGDOM: &str = "Kindom";
    pub const PHYLUM: &str = "Phylum";
    pub const CLASS: &str = "Class";
    pub const ORDER: &str = "Order";
    pub const FAMILY: &str = "Family";
    pub const GENUS: &str = "Genus";
    pub const SPECIES: &str = "Species";
    pub const MAX_DEPTH: &str = "Max Depth";
    pub const MIN_DEPTH: &str = "Min Depth";
    pub const PIC_1: &str = "Link to Pic 1";
    pub const PIC_2: &str = "Link to Pic 2";
}

/// Picture extensions accepted as a highlight image.
const IMAGE_EXTENSIONS: [&str; 2] = [".png", ".jpg"];

/// Curated data for one AphiaID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiversityEntry {
    pub common_name: String,
    pub scientific_name: String,
    pub kingdom: String,
    pub phylum: String,
    pub class: String,
    pub order: String,
    pub family: String,
    pub genus: String,
    pub species: String,
    /// Raw value; may be numeric, empty, or the "NA" placeholder.
    pub max_depth: String,
    /// Raw value; may be numeric, empty, or the "NA" placeholder.
    pub min_depth: String,
    /// First picture link ending in `.png` or `.jpg`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl DiversityEntry {
    /// Build an entry from one reference row.
    pub fn from_row(row: &RawRow) -> TransformResult<Self> {
        let image = [columns::PIC_1, columns::PIC_2]
            .iter()
            .map(|col| row.get(col))
            .collect::<TransformResult<Vec<_>>>()?
            .into_iter()
            .find(|link| is_image_link(link))
            .map(str::to_string);

        Ok(Self {
            common_name: row.get_string(columns::COMMON_NAME)?,
            scientific_name: row.get_string(columns::SCIENTIFIC_NAME)?,
            kingdom: row.get_string(columns::KINGDOM)?,
            phylum: row.get_string(columns::PHYLUM)?,
            class: row.get_string(columns::CLASS)?,
            order: row.get_string(columns::ORDER)?,
            family: row.get_string(columns::FAMILY)?,
            genus: row.get_string(columns::GENUS)?,
            species: row.get_string(columns::SPECIES)?,
            max_depth: row.get_string(columns::MAX_DEPTH)?,
            min_depth: row.get_string(columns::MIN_DEPTH)?,
            image,
        })
    }
}

/// Whether a link points at a usable picture.
pub fn is_image_link(link: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| link.ends_with(ext))
}

/// AphiaID to curated entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiversityLookup {
    entries: HashMap<String, DiversityEntry>,
}

impl DiversityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup from reference rows.
    ///
    /// A later row with the same AphiaID replaces the earlier one.
    pub fn from_rows(rows: &[RawRow]) -> TransformResult<Self> {
        let mut lookup = Self::new();
        for row in rows {
            let id = row.get_string(columns::APHIA_ID)?;
            lookup.insert(id, DiversityEntry::from_row(row)?);
        }
        Ok(lookup)
    }

    pub fn insert(&mut self, aphia_id: impl Into<String>, entry: DiversityEntry) {
        self.entries.insert(aphia_id.into(), entry);
    }

    pub fn get(&self, aphia_id: &str) -> Option<&DiversityEntry> {
        self.entries.get(aphia_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by AphiaID, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &DiversityEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(id, entry)| (id.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
