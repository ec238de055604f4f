use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::record::DEFAULT_MAX_INPUT_BYTES;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Profile CSV datasets: column types, summary statistics, and correlations",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Profile a CSV file: column types, summary statistics, and correlations
    Profile(ProfileArgs),
    /// Print the Pearson correlation matrix for numeric columns
    Correlations(CorrelationsArgs),
    /// Print binned value distributions for numeric columns
    Histogram(HistogramArgs),
    /// Preview the first few rows of a CSV file after type coercion
    Preview(PreviewArgs),
    /// Render a plain-text analysis report
    Report(ReportArgs),
    /// Export summary statistics and correlations as CSV files
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Input CSV file to profile
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum rows to profile (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
    /// Emit the full profile as pretty-printed JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CorrelationsArgs {
    /// Input CSV file to analyze
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum rows to profile (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
}

#[derive(Debug, Args)]
pub struct HistogramArgs {
    /// Input CSV file to analyze
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Numeric columns to bin (defaults to every numeric column)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum rows to profile (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file to preview
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Input CSV file to analyze
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination report file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum rows to profile (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Input CSV file to analyze
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination file for the summary statistics CSV
    #[arg(long = "stats")]
    pub stats: Option<PathBuf>,
    /// Destination file for the correlation matrix CSV
    #[arg(long = "correlations")]
    pub correlations: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum rows to profile (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
