//! Seadex CLI - Convert survey sheets to organism and spotting JSON
//!
//! # Main Command
//!
//! ```bash
//! seadex                            # Convert input/ into output/ using diversity.csv
//! seadex convert --pad-time         # Same, with fully zero-padded timestamps
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! seadex parse input/reef.tsv      # Just parse a sheet to JSON rows
//! seadex lookup diversity.csv      # Show the diversity lookup as JSON
//! ```

use clap::{Args, Parser, Subcommand};
use seadex::logs::{log_error, log_info, log_success, LOGGER};
use seadex::{
    config, delimiter_for_path, load_diversity, parse_file, run, to_json_string, write_json,
    PipelineConfig, TimestampMode,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "seadex")]
#[command(about = "Convert marine biodiversity survey sheets to organism and spotting JSON", long_about = None)]
struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(Args, Clone)]
struct ConvertArgs {
    /// Folder holding .csv / .tsv survey sheets
    #[arg(long, env = "SEADEX_INPUT_DIR", default_value = config::DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Folder receiving the JSON files
    #[arg(long, env = "SEADEX_OUTPUT_DIR", default_value = config::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Diversity reference sheet (optional)
    #[arg(long, env = "SEADEX_REFERENCE", default_value = config::DEFAULT_REFERENCE_PATH)]
    reference: PathBuf,

    /// Zero-pad hour, minute and second in timestamps
    #[arg(long)]
    pad_time: bool,

    /// Also write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every sheet of the input folder (default)
    Convert(ConvertArgs),

    /// Parse one sheet and output its rows as JSON
    Parse {
        /// Input sheet
        input: PathBuf,

        /// Delimiter (default: from the extension)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the diversity lookup and output it as JSON
    Lookup {
        /// Reference sheet
        #[arg(env = "SEADEX_REFERENCE", default_value = config::DEFAULT_REFERENCE_PATH)]
        reference: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOGGER.set_quiet(cli.quiet);

    let result = match cli.command {
        None => cmd_convert(cli.convert),
        Some(Commands::Convert(args)) => cmd_convert(args),
        Some(Commands::Parse {
            input,
            delimiter,
            output,
        }) => cmd_parse(&input, delimiter, output.as_deref()),
        Some(Commands::Lookup { reference, output }) => cmd_lookup(&reference, output.as_deref()),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_convert(args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PipelineConfig {
        input_dir: args.input,
        output_dir: args.output,
        reference_path: args.reference,
        ..PipelineConfig::default()
    };
    if args.pad_time {
        config.transform.timestamp_mode = TimestampMode::Padded;
    }

    log_info(format!(
        "🐠 Converting {} → {}",
        config.input_dir.display(),
        config.output_dir.display()
    ));

    let summary = run(&config)?;

    log_success(format!(
        "{} file(s), {} skipped: {}",
        summary.files.len(),
        summary.skipped.len(),
        summary.totals.summary()
    ));

    if let Some(path) = args.report {
        write_json(&path, &summary)?;
        log_info(format!("💾 Report written to: {}", path.display()));
    }

    log_info("✨ Done!");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let delimiter = delimiter
        .or_else(|| delimiter_for_path(input))
        .ok_or_else(|| format!("Cannot infer delimiter for {}, use --delimiter", input.display()))?;

    log_info(format!("📄 Parsing: {}", input.display()));
    let result = parse_file(input, delimiter)?;

    log_info(format!("Encoding: {}", result.encoding));
    log_info(format!("Columns: {}", result.headers.join(", ")));
    log_success(format!("Parsed {} rows", result.rows.len()));

    emit(&result.rows, output)
}

/// Lookup entry as printed by `seadex lookup`.
#[derive(Serialize)]
struct LookupEntry<'a> {
    #[serde(rename = "aphiaId")]
    aphia_id: &'a str,
    #[serde(flatten)]
    entry: &'a seadex::DiversityEntry,
}

fn cmd_lookup(reference: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let lookup = load_diversity(reference)?;

    let entries: Vec<LookupEntry> = lookup
        .sorted()
        .into_iter()
        .map(|(aphia_id, entry)| LookupEntry { aphia_id, entry })
        .collect();

    emit(&entries, output)
}

fn emit<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, to_json_string(value)?)?;
            log_info(format!("💾 Output written to: {}", p.display()));
        }
        None => {
            println!("{}", to_json_string(value)?);
        }
    }
    Ok(())
}
