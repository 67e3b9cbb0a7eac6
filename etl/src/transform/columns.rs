//! Survey sheet column names.
//!
//! Columns are looked up by name when a row is converted; none is checked
//! up front.

pub const COMBINED_NAME_ID: &str = "CombinedNameID";
pub const APHIA_ID: &str = "AphiaID";
pub const VERNACULAR_NAME: &str = "VernacularName";
pub const REPOSITORY: &str = "Repository";
pub const IDENTIFIED_BY: &str = "IdentifiedBy";
pub const IDENTIFICATION_DATE: &str = "IdentificationDate";
pub const IDENTIFICATION_QUALIFIER: &str = "IdentificationQualifier";
pub const IDENTIFICATION_VERIFICATION_STATUS: &str = "IdentificationVerificationStatus";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const DEPTH_IN_METERS: &str = "DepthInMeters";
pub const OBSERVATION_DATE: &str = "ObservationDate";
pub const OBSERVATION_TIME: &str = "ObservationTime";
pub const INDIVIDUAL_COUNT: &str = "IndividualCount";
pub const CONDITION: &str = "Condition";
pub const IMAGE_FILE_PATH: &str = "ImageFilePath";
