//! Insights CLI - Turn a streaming catalogue export into charts and a summary
//!
//! # Main Commands
//!
//! ```bash
//! insights run catalogue.csv            # Charts + summary into out/
//! insights summary catalogue.csv        # Summary JSON to stdout
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! insights parse catalogue.csv          # Just parse CSV to JSON rows
//! insights validate insights.json       # Validate a summary against the schema
//! ```

use clap::{Parser, Subcommand};
use insights::logs::{is_quiet, log_error, set_quiet};
use insights::{
    analyse_catalogue, load_catalogue_with, summarise_catalogue, validate_summary_value,
    write_artifacts, ArtifactWriter, PipelineOptions, YearPolicy, DEFAULT_IMAGE_DIR,
    DEFAULT_SUMMARY_PATH,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// `eprintln!` unless `--quiet`
macro_rules! progress {
    ($($arg:tt)*) => {
        if !is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

#[derive(Parser)]
#[command(name = "insights")]
#[command(about = "Build catalogue charts and an insight summary from a titles CSV", long_about = None)]
struct Cli {
    /// Only print errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: CSV → aggregates → SVG charts + summary JSON
    Run {
        /// Input catalogue CSV
        input: PathBuf,

        /// Chart output directory
        #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
        images: PathBuf,

        /// Summary output file
        #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
        summary: PathBuf,

        #[command(flatten)]
        settings: Settings,
    },

    /// Build the summary only and print it
    Summary {
        /// Input catalogue CSV
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        settings: Settings,
    },

    /// Parse a CSV file and output JSON rows
    Parse {
        /// Input catalogue CSV
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a summary JSON file against the summary schema
    Validate {
        /// Summary JSON file
        input: PathBuf,
    },
}

/// Pipeline settings shared by `run` and `summary`
#[derive(clap::Args)]
struct Settings {
    /// JSON options file (charts, summary, year policy)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Skip rows whose release year cannot be parsed instead of failing
    #[arg(long)]
    skip_invalid_years: bool,

    /// Skip summary schema validation
    #[arg(long)]
    no_validate: bool,
}

impl Settings {
    /// Options file first, then command-line overrides.
    fn into_options(self) -> Result<PipelineOptions, Box<dyn std::error::Error>> {
        let mut options = match self.config {
            Some(path) => {
                progress!("⚙️  Options: {}", path.display());
                PipelineOptions::from_file(&path)?
            }
            None => PipelineOptions::default(),
        };

        if self.delimiter.is_some() {
            options.delimiter = self.delimiter;
        }
        if self.skip_invalid_years {
            options.year_policy = YearPolicy::Skip;
        }
        if self.no_validate {
            options.skip_validation = true;
        }

        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Run {
            input,
            images,
            summary,
            settings,
        } => cmd_run(&input, images, summary, settings),

        Commands::Summary {
            input,
            output,
            settings,
        } => cmd_summary(&input, output.as_deref(), settings),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_run(
    input: &Path,
    images: PathBuf,
    summary: PathBuf,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    progress!("📄 Processing: {}", input.display());

    let options = settings.into_options()?;
    let output = analyse_catalogue(input, &options)?;

    progress!("   Rows: {}", output.csv_info.row_count);
    progress!("   Columns: {}", output.csv_info.headers.join(", "));
    if !output.skipped.is_empty() {
        progress!("   Skipped: {} rows", output.skipped.len());
    }

    let writer = ArtifactWriter::new(images, summary);
    let written = write_artifacts(&output, &writer)?;

    progress!("\n📊 Charts: {}", writer.image_dir().display());
    progress!("📝 Summary: {}", writer.summary_path().display());
    progress!("\n✨ Done! {} files written", written.len());
    Ok(())
}

fn cmd_summary(
    input: &Path,
    output: Option<&Path>,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    progress!("📄 Summarising: {}", input.display());

    let options = settings.into_options()?;
    let summary = summarise_catalogue(input, &options)?;

    let json = serde_json::to_string_pretty(&summary)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    progress!("📄 Parsing CSV: {}", input.display());

    let result = load_catalogue_with(input, delimiter)?;

    progress!("   Encoding: {}", result.encoding);
    progress!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    progress!("   Columns: {}", result.headers.join(", "));
    progress!("✅ Parsed {} rows", result.rows.len());

    let json = serde_json::to_string_pretty(&result.rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    progress!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let summary: Value = serde_json::from_str(&content)?;

    match validate_summary_value(&summary) {
        Ok(()) => {
            progress!("✅ Summary matches schema");
            Ok(())
        }
        Err(errors) => {
            eprintln!("\n❌ {} violations:", errors.len());
            for err in errors.iter().take(10) {
                eprintln!("   - {}", err);
            }
            std::process::exit(1);
        }
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            progress!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
