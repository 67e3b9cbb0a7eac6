//! File driver: input folder to JSON artifacts.
//!
//! ```text
//! diversity.csv ──▶ DiversityLookup (once)
//!                          │
//! input/X.csv ──parse──▶ rows ──transform──▶ output/XOrganisms.json
//! input/Y.tsv                               output/XSpotting.json
//! ```
//!
//! Files are handled one at a time in file-name order. The first failure
//! stops the run and names the file, line and column involved.
//!
//! # Example
//!
//! ```rust,ignore
//! use seadex::{run, PipelineConfig};
//!
//! let summary = run(&PipelineConfig::default())?;
//! println!("{}", summary.totals.summary());
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::diversity::DiversityLookup;
use super::rows::{transform_rows, TransformOutput, TransformStats};
use crate::config::{PipelineConfig, TransformConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::parser::{delimiter_for_path, parse_file};
use crate::writer::write_json;

/// A survey sheet selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// File name without extension; prefixes both artifacts.
    pub stem: String,
    pub delimiter: char,
}

/// Outcome of converting one sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub input: PathBuf,
    pub organisms_path: PathBuf,
    pub spotting_path: PathBuf,
    pub encoding: String,
    pub stats: TransformStats,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    /// Entries ignored for their extension or type.
    pub skipped: Vec<PathBuf>,
    pub reference_entries: usize,
    pub totals: TransformStats,
}

/// Load the diversity lookup; a missing reference file gives an empty one.
pub fn load_diversity(path: &Path) -> PipelineResult<DiversityLookup> {
    if !path.is_file() {
        log_warning(format!("No diversity reference at {}, organisms will not be enriched", path.display()));
        return Ok(DiversityLookup::new());
    }

    let parsed = parse_file(path, ',').map_err(|e| PipelineError::reference(path, e))?;
    let lookup = DiversityLookup::from_rows(&parsed.rows).map_err(|e| PipelineError::reference(path, e))?;
    log_success(format!("Loaded {} reference entries from {}", lookup.len(), path.display()));
    Ok(lookup)
}

/// List convertible sheets in a folder, sorted by file name.
///
/// Returns the sheets and the entries that were skipped.
pub fn discover_inputs(dir: &Path) -> PipelineResult<(Vec<InputFile>, Vec<PathBuf>)> {
    let list_err = |source| PipelineError::InputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        paths.push(entry.map_err(list_err)?.path());
    }
    paths.sort();

    let mut inputs = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        let delimiter = if path.is_file() { delimiter_for_path(&path) } else { None };
        let stem = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);

        match (delimiter, stem) {
            (Some(delimiter), Some(stem)) => inputs.push(InputFile { path, stem, delimiter }),
            _ => skipped.push(path),
        }
    }

    Ok((inputs, skipped))
}

/// Parse and transform one sheet without writing anything.
pub fn transform_file(
    input: &InputFile,
    lookup: &DiversityLookup,
    config: &TransformConfig,
) -> PipelineResult<(String, TransformOutput)> {
    let parsed = parse_file(&input.path, input.delimiter).map_err(|e| PipelineError::file(&input.path, e))?;
    let output = transform_rows(&parsed.rows, lookup, config).map_err(|e| PipelineError::file(&input.path, e))?;
    Ok((parsed.encoding, output))
}

/// Convert one sheet and write its two artifacts.
pub fn convert_file(
    input: &InputFile,
    lookup: &DiversityLookup,
    config: &PipelineConfig,
) -> PipelineResult<FileReport> {
    log_info(format!(
        "📄 {} (delimiter '{}')",
        input.path.display(),
        format_delimiter(input.delimiter)
    ));

    let (encoding, output) = transform_file(input, lookup, &config.transform)?;

    let organisms_path = config.organisms_path(&input.stem);
    let spotting_path = config.spotting_path(&input.stem);
    write_json(&organisms_path, &output.organisms).map_err(|e| PipelineError::file(&input.path, e))?;
    write_json(&spotting_path, &output.spottings).map_err(|e| PipelineError::file(&input.path, e))?;

    log_success(output.stats.summary());
    log_info_indent(format!("💾 {}", organisms_path.display()), 1);
    log_info_indent(format!("💾 {}", spotting_path.display()), 1);

    Ok(FileReport {
        input: input.path.clone(),
        organisms_path,
        spotting_path,
        encoding,
        stats: output.stats,
    })
}

/// Run the whole conversion.
///
/// 1. Creates the output folder
/// 2. Builds the diversity lookup
/// 3. Converts every `.csv` / `.tsv` sheet of the input folder in order
pub fn run(config: &PipelineConfig) -> PipelineResult<RunSummary> {
    if !config.output_dir.exists() {
        log_info(format!("Creating output folder {}", config.output_dir.display()));
    }
    fs::create_dir_all(&config.output_dir).map_err(|source| PipelineError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let lookup = load_diversity(&config.reference_path)?;
    let (inputs, skipped) = discover_inputs(&config.input_dir)?;

    for path in &skipped {
        log_info(format!("Skipping {}", path.display()));
    }
    if inputs.is_empty() {
        log_warning(format!("No .csv or .tsv files in {}", config.input_dir.display()));
    }

    let mut summary = RunSummary {
        skipped,
        reference_entries: lookup.len(),
        ..RunSummary::default()
    };

    for input in &inputs {
        let report = convert_file(input, &lookup, config)?;
        summary.totals.absorb(&report.stats);
        summary.files.push(report);
    }

    Ok(summary)
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrganismRecord, SpottingRecord};
    use tempfile::tempdir;

    const HEADER: &str = "CombinedNameID,AphiaID,VernacularName,Phylum,Class,Order,Family,Genus,Repository,IdentifiedBy,IdentificationDate,IdentificationQualifier,IdentificationVerificationStatus,Latitude,Longitude,DepthInMeters,ObservationDate,ObservationTime,IndividualCount,Condition,ImageFilePath";

    fn survey_csv() -> String {
        [
            HEADER,
            "Amphiprion ocellaris,12345,orange clownfish,Chordata,Actinopteri,Perciformes,Pomacentridae,Amphiprion,NOAA,diver,3/5/2021,,verified,-16.9,145.7,8.5,3/4/2021,9:5:1,2,alive,a.jpg",
            "Chromis viridis,NA,green chromis,Chordata,Actinopteri,NA,Pomacentridae,Chromis,NOAA,diver,3/5/2021,,verified,-16.9,145.7,4,3/4/2021,9:6:0,10,alive,b.jpg",
            "Amphiprion ocellaris,12345,clownfish,Chordata,Actinopteri,Perciformes,Pomacentridae,Amphiprion,NOAA,diver,3/5/2021,,verified,-16.8,145.6,9,3/4/2021,9:7:0,1,alive,c.jpg",
        ]
        .join("\n")
    }

    const REFERENCE: &str = "WoRMS AphiaID,Common Name,Scientific Name,Kindom,Phylum,Class,Order,Family,Genus,Species,Max Depth,Min Depth,Link to Pic 1,Link to Pic 2\n\
        12345,clown fish,Amphiprion ocellaris,Animalia,Chordata,Actinopteri,Perciformes,Pomacentridae,Amphiprion,ocellaris,100,10,NA,pic.jpg\n";

    fn setup(reference: Option<&str>) -> (tempfile::TempDir, PipelineConfig) {
        let root = tempdir().unwrap();
        let input_dir = root.path().join("input");
        fs::create_dir(&input_dir).unwrap();
        fs::write(input_dir.join("reef.csv"), survey_csv()).unwrap();
        fs::write(input_dir.join("lagoon.tsv"), survey_csv().replace(',', "\t")).unwrap();
        fs::write(input_dir.join("notes.txt"), "ignored").unwrap();

        let reference_path = root.path().join("diversity.csv");
        if let Some(content) = reference {
            fs::write(&reference_path, content).unwrap();
        }

        let config = PipelineConfig {
            input_dir,
            output_dir: root.path().join("output"),
            reference_path,
            ..PipelineConfig::default()
        };
        (root, config)
    }

    fn read<T: serde::de::DeserializeOwned>(path: &Path) -> T {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_writes_two_artifacts_per_sheet() {
        let (_root, config) = setup(None);
        let summary = run(&config).unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.reference_entries, 0);
        for stem in ["reef", "lagoon"] {
            assert!(config.output_dir.join(format!("{}Organisms.json", stem)).is_file());
            assert!(config.output_dir.join(format!("{}Spotting.json", stem)).is_file());
        }
        assert!(!config.output_dir.join("notesOrganisms.json").exists());

        let spottings: Vec<SpottingRecord> = read(&config.spotting_path("lagoon"));
        assert_eq!(spottings.len(), 2);
        assert_eq!(spottings[1].name, 1);
        assert_eq!(spottings[0].timestamp, "2021-03-04T9:5:1Z");
    }

    #[test]
    fn test_run_enriches_from_reference() {
        let (_root, config) = setup(Some(REFERENCE));
        let summary = run(&config).unwrap();
        assert_eq!(summary.reference_entries, 1);

        let organisms: Vec<OrganismRecord> = read(&config.organisms_path("reef"));
        assert_eq!(organisms.len(), 1);
        assert_eq!(organisms[0].common_name, "Clown Fish");
        assert_eq!(organisms[0].highlight_image, "pic.jpg");
        assert_eq!(organisms[0].max_depth, 100.0);
        assert_eq!(organisms[0].min_depth, 10.0);
        assert_eq!(organisms[0].taxonomy.len(), 6);
    }

    #[test]
    fn test_run_is_byte_stable() {
        let (_root, config) = setup(Some(REFERENCE));
        run(&config).unwrap();
        let first = fs::read(config.organisms_path("reef")).unwrap();
        let first_spot = fs::read(config.spotting_path("reef")).unwrap();

        run(&config).unwrap();
        assert_eq!(first, fs::read(config.organisms_path("reef")).unwrap());
        assert_eq!(first_spot, fs::read(config.spotting_path("reef")).unwrap());
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let (_root, config) = setup(None);
        fs::create_dir(config.input_dir.join("archive.csv")).unwrap();

        let (inputs, skipped) = discover_inputs(&config.input_dir).unwrap();
        let stems: Vec<&str> = inputs.iter().map(|i| i.stem.as_str()).collect();
        assert_eq!(stems, vec!["lagoon", "reef"]);
        assert_eq!(inputs[0].delimiter, '\t');
        assert_eq!(inputs[1].delimiter, ',');
        assert_eq!(skipped.len(), 2);
    }

    #[test]
    fn test_failure_names_file_and_column() {
        let (_root, config) = setup(None);
        fs::write(
            config.input_dir.join("broken.csv"),
            "CombinedNameID,AphiaID\nAmphiprion ocellaris,12345\n",
        )
        .unwrap();

        let err = run(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken.csv"));
        assert!(msg.contains("Line 2"));
        assert!(msg.contains("Phylum"));
    }

    #[test]
    fn test_missing_input_dir() {
        let (_root, mut config) = setup(None);
        config.input_dir = config.input_dir.join("nope");
        assert!(matches!(run(&config), Err(PipelineError::InputDir { .. })));
        // the output folder is created before inputs are listed
        assert!(config.output_dir.is_dir());
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "\\t");
        assert_eq!(format_delimiter(','), ",");
    }
}
