// src/config.rs
use crate::document::LoaderConfig;
use crate::extractors::ExtractorConfig;
use crate::utils::AppError;
use clap::Parser;
use std::path::PathBuf;

/// Command Line Interface for the wrestling results extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Results document to extract (.pdf is converted with pdftotext, anything else is read as text)
    #[arg(required_unless_present = "from_results")]
    pub input: Option<PathBuf>,

    /// Render the newsletter summary from a previously saved results JSON instead of extracting
    #[arg(long, value_name = "JSON", conflicts_with = "input")]
    pub from_results: Option<PathBuf>,

    /// Output directory for extracted results
    #[arg(short, long, env = "MEET_OUTPUT_DIR", default_value = "./output")]
    pub output_dir: PathBuf,

    /// Lines scanned after each weight class marker
    #[arg(long, default_value_t = crate::extractors::results::DEFAULT_LOOKAHEAD_LINES)]
    pub window: usize,

    /// Leading lines searched for the competition date
    #[arg(long, default_value_t = crate::extractors::results::DEFAULT_DATE_SCAN_LINES)]
    pub date_scan_lines: usize,

    /// Maximum accepted document size in bytes
    #[arg(long, env = "MEET_MAX_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_bytes: u64,

    /// PDF to text converter program
    #[arg(long, env = "MEET_PDFTOTEXT", default_value = "pdftotext")]
    pub pdftotext: String,

    /// Also write a Markdown newsletter summary
    #[arg(short, long)]
    pub summary: bool,

    /// Debug mode - save an annotated HTML view of the pattern matches
    #[arg(short, long)]
    pub debug: bool,

    /// Print the extraction result as JSON to stdout
    #[arg(short, long)]
    pub print: bool,
}

/// What the run does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Load a document, extract and persist the result
    Extract { input: PathBuf },
    /// Re-read a stored result and render its summary
    Summarize { results_path: PathBuf },
}

/// Everything the run needs, built once at startup and passed down explicitly
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: RunMode,
    pub output_dir: PathBuf,
    pub extractor: ExtractorConfig,
    pub loader: LoaderConfig,
    pub write_summary: bool,
    pub debug: bool,
    pub print: bool,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self, AppError> {
        if args.window == 0 {
            return Err(AppError::Config("--window must be at least 1".to_string()));
        }
        if args.max_bytes == 0 {
            return Err(AppError::Config("--max-bytes must be greater than 0".to_string()));
        }
        if args.pdftotext.trim().is_empty() {
            return Err(AppError::Config("--pdftotext must name a program".to_string()));
        }

        let mode = match (args.input, args.from_results) {
            (_, Some(results_path)) => RunMode::Summarize { results_path },
            (Some(input), None) => RunMode::Extract { input },
            (None, None) => {
                return Err(AppError::Config("an input document or --from-results is required".to_string()));
            }
        };

        Ok(Self {
            mode,
            output_dir: args.output_dir,
            extractor: ExtractorConfig {
                lookahead_lines: args.window,
                date_scan_lines: args.date_scan_lines,
                ..ExtractorConfig::default()
            },
            loader: LoaderConfig {
                max_bytes: args.max_bytes,
                pdftotext_program: args.pdftotext,
            },
            write_summary: args.summary,
            debug: args.debug,
            print: args.print,
        })
    }
}
