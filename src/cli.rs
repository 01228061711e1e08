use crate::config::{CliOverrides, Config};
use crate::error::{ProspectorError, Result};
use crate::taxonomy::OrgCategory;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trialscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prospect clinical trial sponsors from ClinicalTrials.gov")]
#[command(
    long_about = "TrialScout searches the ClinicalTrials.gov registry, classifies the \
                  organizations behind each trial, and exports sponsor rosters and \
                  per-trial data for outreach work."
)]
#[command(before_help = "🔬 TrialScout - Clinical Trial Prospecting Tool")]
#[command(after_help = "EXAMPLES:\n  \
    trialscout \"type 2 diabetes\"\n  \
    trialscout obesity --status RECRUITING --max-results 500\n  \
    trialscout nash --extract sponsors,locations,contacts --spreadsheet\n  \
    trialscout oncology --exclude university,hospital --max-results 0\n  \
    trialscout immunotherapy --config my-config.toml\n\n\
    Run with --list-extractors or --list-categories to see what is available.")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Search keywords (multiple keywords are OR-combined)
    #[arg(value_parser = validate_keyword)]
    pub keywords: Vec<String>,

    /// Trial statuses to include (e.g. RECRUITING, COMPLETED)
    #[arg(short, long, value_delimiter = ',', value_parser = validate_status)]
    pub status: Option<Vec<String>>,

    /// Trial phases to require (e.g. PHASE2, PHASE3)
    #[arg(short, long, value_delimiter = ',')]
    pub phase: Option<Vec<String>>,

    /// Maximum number of trials to fetch (0 = all, capped)
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Extraction options to run (comma-separated keys)
    #[arg(
        short,
        long,
        help = "Extractor keys to apply (e.g. sponsors,locations,contacts)"
    )]
    pub extract: Option<String>,

    /// Keep only these organization categories
    #[arg(long, value_delimiter = ',', value_parser = parse_category)]
    pub include: Option<Vec<OrgCategory>>,

    /// Drop these organization categories
    #[arg(long, value_delimiter = ',', value_parser = parse_category)]
    pub exclude: Option<Vec<OrgCategory>>,

    /// Role stamped into the roster's target-role column
    #[arg(long, help = "Job title to target in the company roster")]
    pub target_role: Option<String>,

    /// Output directory for exported files
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write a styled spreadsheet next to the delimited files
    #[arg(long, help = "Write .xlsx output in addition to delimited text")]
    pub spreadsheet: bool,

    /// Field delimiter for text exports
    #[arg(short, long, value_parser = validate_delimiter)]
    pub delimiter: Option<String>,

    /// Explicit column order for the trials export (comma-separated)
    #[arg(long, help = "Column order for the trials table (e.g. nct_id,title,lead_sponsor)")]
    pub columns: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// List known organization categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// List available extraction options and exit
    #[arg(long)]
    pub list_extractors: bool,

    /// Dry run (show the resolved query without contacting the registry)
    #[arg(long, help = "Show what would be searched without executing")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let output_dir = self.output.as_ref().map(|o| {
            if o.contains('/') || o.contains('\\') {
                PathBuf::from(o)
            } else {
                std::env::current_dir().unwrap_or_default().join(o)
            }
        });

        let keywords = if self.keywords.is_empty() {
            None
        } else {
            Some(self.keywords.clone())
        };

        CliOverrides::new()
            .with_keywords(keywords)
            .with_statuses(self.status.clone())
            .with_phases(self.phase.clone())
            .with_max_results(self.max_results)
            .with_extract(self.extract.clone())
            .with_include(self.include.clone())
            .with_exclude(self.exclude.clone())
            .with_output_dir(output_dir)
            .with_spreadsheet(if self.spreadsheet { Some(true) } else { None })
            .with_delimiter(self.delimiter.clone())
            .with_columns(self.columns.clone())
            .with_target_role(self.target_role.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_keyword(s: &str) -> std::result::Result<String, String> {
    if s.trim().is_empty() {
        return Err("Keywords cannot be empty".to_string());
    }
    if s.len() > 200 {
        return Err("Keywords must be 200 characters or less".to_string());
    }
    Ok(s.to_string())
}

pub fn validate_status(s: &str) -> std::result::Result<String, String> {
    let status = s.trim().to_uppercase();
    if status.is_empty() {
        return Err("Status cannot be empty".to_string());
    }
    // The registry expects SCREAMING_SNAKE_CASE status names.
    if !status.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        return Err(format!(
            "Invalid status {:?}. Expected names like RECRUITING or NOT_YET_RECRUITING.",
            s
        ));
    }
    Ok(status)
}

pub fn validate_delimiter(s: &str) -> std::result::Result<String, String> {
    if s.len() != 1 || !s.is_ascii() {
        return Err(format!(
            "Delimiter must be a single ASCII character, got {:?}",
            s
        ));
    }
    Ok(s.to_string())
}

pub fn parse_category(s: &str) -> std::result::Result<OrgCategory, String> {
    OrgCategory::from_key(s.trim()).ok_or_else(|| {
        let error = ProspectorError::UnknownCategory {
            name: s.to_string(),
        };
        format!("{}. Run with --list-categories to see valid names.", error)
    })
}
