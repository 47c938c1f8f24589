use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{stats::Segment, survey::SizeCategory};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Normalize a salary survey export and report salary statistics",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Map, normalize and write the survey export with canonical column names
    Normalize(NormalizeArgs),
    /// Show how each raw survey header maps to a canonical field
    Mapping(MappingArgs),
    /// Percentile statistics per salary field and company-size segment
    Stats(StatsArgs),
    /// Salary fields ranked by number of respondents
    Top(TopArgs),
    /// Summary table of selected (or the most answered) salary fields
    Summary(SummaryArgs),
    /// Pooled salary ranges for CEO, director, manager and head levels
    Hierarchy(HierarchyArgs),
    /// Distribution of expected raises and rotation
    Outlook(DistributionArgs),
    /// Share of companies granting each benefit
    Benefits(DistributionArgs),
    /// Bonus sizes in monthly salaries
    Bonus(SurveyInputArgs),
    /// Participation overview, most answered positions and salary summary
    Report(ReportArgs),
}

/// Where a query command reads the survey from.
#[derive(Debug, Args)]
pub struct SurveyInputArgs {
    /// Normalized survey file (or a raw export with --raw)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Treat the input as a raw export and normalize it on the fly
    #[arg(long)]
    pub raw: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw survey export
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination for the normalized table
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Optional destination for the JSON mapping record
    #[arg(short = 'm', long = "mapping")]
    pub mapping: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Skip the summary printed after normalizing
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Debug, Args)]
pub struct MappingArgs {
    /// Raw survey export
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Write the mapping record as JSON to this path
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: SurveyInputArgs,
    /// Salary fields to report (defaults to every field with data)
    #[arg(short = 'f', long = "field", value_delimiter = ',')]
    pub fields: Vec<String>,
    /// Only report this segment
    #[arg(long, value_enum)]
    pub segment: Option<Segment>,
    /// YAML file with quality-assured replacement figures
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TopArgs {
    #[command(flatten)]
    pub input: SurveyInputArgs,
    /// Number of fields to list
    #[arg(short = 'n', long = "top", default_value_t = 10)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: SurveyInputArgs,
    /// Salary fields to summarise
    #[arg(short = 'f', long = "field", value_delimiter = ',')]
    pub fields: Vec<String>,
    /// Add every salary field of this functional area (e.g. "IT", "Supply Chain")
    #[arg(long)]
    pub area: Option<String>,
    /// Number of fields summarised when none are selected
    #[arg(short = 'n', long = "top", default_value_t = crate::stats::DEFAULT_SUMMARY_FIELDS)]
    pub top: usize,
    /// YAML file with quality-assured replacement figures
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    /// Also write the summary as CSV
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HierarchyArgs {
    #[command(flatten)]
    pub input: SurveyInputArgs,
    /// Restrict to one company-size category
    #[arg(long, value_enum)]
    pub category: Option<SizeCategory>,
}

#[derive(Debug, Args)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub input: SurveyInputArgs,
    /// Maximum values listed per field (0 lists all)
    #[arg(short = 'n', long = "top", default_value_t = 0)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: SurveyInputArgs,
    /// Number of positions in the most-answered list
    #[arg(short = 'n', long = "top", default_value_t = 10)]
    pub top: usize,
    /// Number of industries listed
    #[arg(long, default_value_t = 10)]
    pub industries: usize,
    /// YAML file with quality-assured replacement figures
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    /// Write the salary summary as CSV
    #[arg(long = "summary-output")]
    pub summary_output: Option<PathBuf>,
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
