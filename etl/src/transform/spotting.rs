//! Spotting records: one per identified survey row, duplicates included.

use super::columns;
use super::timestamp::normalize_timestamp;
use crate::config::TransformConfig;
use crate::error::{TransformError, TransformResult};
use crate::models::{RawRow, SpottingRecord};

/// Build the spotting record for a kept row.
///
/// `index` is the row's position among kept rows. Coordinates, depth and
/// count must be numeric; there is no best-effort fallback.
pub fn build_spotting(index: usize, row: &RawRow, config: &TransformConfig) -> TransformResult<SpottingRecord> {
    let timestamp = normalize_timestamp(
        row.get(columns::OBSERVATION_DATE)?,
        row.get(columns::OBSERVATION_TIME)?,
        config.timestamp_mode,
    )
    .map_err(|source| TransformError::Timestamp { line: row.line, source })?;

    Ok(SpottingRecord {
        name: index,
        aphia_id: row.get_string(columns::APHIA_ID)?,
        repository: row.get_string(columns::REPOSITORY)?,
        identified_by: row.get_string(columns::IDENTIFIED_BY)?,
        identification_date: row.get_string(columns::IDENTIFICATION_DATE)?,
        identification_qualifier: row.get_string(columns::IDENTIFICATION_QUALIFIER)?,
        identification_verification_status: row.get_string(columns::IDENTIFICATION_VERIFICATION_STATUS)?,
        latitude: row.parse_f64(columns::LATITUDE)?,
        longitude: row.parse_f64(columns::LONGITUDE)?,
        depth: row.parse_f64(columns::DEPTH_IN_METERS)?,
        timestamp,
        individual_count: row.parse_i64(columns::INDIVIDUAL_COUNT)?,
        condition: row.get_string(columns::CONDITION)?,
        image: row.get_string(columns::IMAGE_FILE_PATH)?,
    })
}
