pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod taxonomy;
pub mod trial;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExportConfig, ExtractionConfig, SearchConfig};
pub use error::{ProspectorError, Result, UserFriendlyError};

// Core functionality re-exports
pub use aggregate::{CompanyAggregate, CompanyRoster, SponsorRole};
pub use extract::{ExtractedRecord, ExtractionOption, ExtractionOutcome};
pub use fetcher::{build_query_term, fetch_trials, FetchOutcome, RegistryClient};
pub use taxonomy::{categorize, OrgCategory, OrganizationFilter};
pub use trial::RawTrial;
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use crate::export::{row_from_fields, Row};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Main library interface for a prospecting run
pub struct Prospector {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

/// Everything one run produced, for display and for JSON output.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub query_term: String,
    pub trials_fetched: usize,
    pub pages_fetched: usize,
    pub transport_error: Option<String>,
    pub records_extracted: usize,
    pub records_skipped: usize,
    pub organizations_excluded: usize,
    pub companies_found: usize,
    pub lead_companies: usize,
    pub collaborator_companies: usize,
    pub top_companies: Vec<TopCompany>,
    pub artifacts: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct TopCompany {
    pub name: String,
    pub mentions: usize,
    pub role: String,
}

impl Prospector {
    /// Create a new Prospector instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create a Prospector instance for testing (no signal handler conflicts)
    #[cfg(test)]
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new_for_test();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create Prospector instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
    }

    /// Run the full pipeline: fetch, extract, aggregate, export.
    pub async fn run(&self) -> Result<RunReport> {
        self.shutdown.check_shutdown()?;
        self.config.validate()?;

        if self.config.filters.has_ignored_excludes() {
            self.output_formatter
                .debug("Both include and exclude categories set; include wins, excludes ignored");
        }

        let query_term =
            build_query_term(&self.config.search.keywords, &self.config.search.phases);
        self.output_formatter
            .start_operation(&format!("Searching registry for: {}", query_term));

        // Step 1: Fetch trials page by page
        let fetch_outcome = self.fetch().await?;
        self.shutdown.check_shutdown()?;

        if fetch_outcome.trials.is_empty() {
            self.output_formatter
                .warning("No trials matched the search");
        } else {
            self.output_formatter.info(&format!(
                "Fetched {} trials in {} pages",
                fetch_outcome.trials.len(),
                fetch_outcome.pages_fetched
            ));
        }

        // Step 2: Run the selected extractors
        let selection = extract::resolve_selection(&self.config.extraction.options)?;
        let spinner = self.progress_manager.create_spinner("Extracting trial data");
        let extraction =
            extract::run_extraction(&fetch_outcome.trials, &selection, &self.config.filters);
        spinner.finish_and_clear();
        self.shutdown.check_shutdown()?;

        for warning in &extraction.warnings {
            self.output_formatter.warning(warning);
        }

        // Step 3: Aggregate the company roster
        let roster = CompanyRoster::build(&fetch_outcome.trials, &self.config.filters);

        // Step 4: Export
        let artifacts = if extraction.records.is_empty() && roster.is_empty() {
            self.output_formatter.warning("Nothing to export");
            Vec::new()
        } else {
            self.export_results(&extraction.records, &roster)?
        };

        let report = self.build_report(&query_term, &fetch_outcome, &extraction, &roster, artifacts);
        self.output_formatter.print_run_report(&report);

        Ok(report)
    }

    async fn fetch(&self) -> Result<FetchOutcome> {
        let client = RegistryClient::new(&self.config.search.endpoint)?;
        let target = fetcher::effective_max_results(self.config.search.max_results);
        let progress = self.progress_manager.create_fetch_progress(target as u64);

        let outcome = fetch_trials(
            &client,
            &self.config.search.keywords,
            &self.config.search.statuses,
            &self.config.search.phases,
            self.config.search.max_results,
            |fetched, _target| progress.set_position(fetched as u64),
            || !self.shutdown.is_running(),
        )
        .await?;

        progress.finish_and_clear();

        if let Some(ref message) = outcome.transport_error {
            self.output_formatter.warning(&format!(
                "Fetch stopped early, keeping {} trials: {}",
                outcome.trials.len(),
                message
            ));
        }

        Ok(outcome)
    }

    fn export_results(
        &self,
        records: &[ExtractedRecord],
        roster: &CompanyRoster,
    ) -> Result<Vec<PathBuf>> {
        let mut artifacts = Vec::new();
        let date = chrono::Local::now().format("%Y-%m-%d");
        let output_dir = &self.config.export.output_dir;
        let delimiter = self.config.delimiter_byte();
        let target_role = Some(self.config.export.target_role.as_str())
            .filter(|role| !role.trim().is_empty());

        if !roster.is_empty() {
            let rows: Vec<Row> = roster
                .sorted_by_mentions()
                .iter()
                .map(|company| row_from_fields(company.export_fields(target_role)))
                .collect();
            let columns = aggregate::roster_columns(target_role.is_some());

            let path = output_dir.join(format!("ClinicalTrials_Companies_{}.csv", date));
            export::write_delimited(&path, &rows, &columns, delimiter)?;
            artifacts.push(path);

            if self.config.export.spreadsheet {
                let path = output_dir.join(format!("ClinicalTrials_Companies_{}.xlsx", date));
                export::write_spreadsheet(&path, &rows, &columns)?;
                artifacts.push(path);
            }
        }

        if !records.is_empty() {
            let rows: Vec<Row> = records
                .iter()
                .map(|record| row_from_fields(record.fields()))
                .collect();
            let explicit = Some(self.config.export.columns.as_slice())
                .filter(|columns| !columns.is_empty());
            let columns = export::resolve_columns(&rows, explicit);

            let path = output_dir.join(format!("ClinicalTrials_Trials_{}.csv", date));
            export::write_delimited(&path, &rows, &columns, delimiter)?;
            artifacts.push(path);

            if self.config.export.spreadsheet {
                let path = output_dir.join(format!("ClinicalTrials_Trials_{}.xlsx", date));
                export::write_spreadsheet(&path, &rows, &columns)?;
                artifacts.push(path);
            }
        }

        for artifact in &artifacts {
            self.output_formatter
                .success(&format!("Wrote {}", artifact.display()));
        }

        Ok(artifacts)
    }

    fn build_report(
        &self,
        query_term: &str,
        fetch_outcome: &FetchOutcome,
        extraction: &ExtractionOutcome,
        roster: &CompanyRoster,
        artifacts: Vec<PathBuf>,
    ) -> RunReport {
        let top_companies = roster
            .sorted_by_mentions()
            .into_iter()
            .take(10)
            .map(|company| TopCompany {
                name: company.name.clone(),
                mentions: company.trial_count,
                role: company.role_label().to_string(),
            })
            .collect();

        RunReport {
            query_term: query_term.to_string(),
            trials_fetched: fetch_outcome.trials.len(),
            pages_fetched: fetch_outcome.pages_fetched,
            transport_error: fetch_outcome.transport_error.clone(),
            records_extracted: extraction.records.len(),
            records_skipped: extraction.skipped,
            organizations_excluded: roster.excluded() + extraction.excluded,
            companies_found: roster.len(),
            lead_companies: roster.lead_company_count(),
            collaborator_companies: roster.collaborator_company_count(),
            top_companies,
            artifacts,
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(ProspectorError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ProspectorError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{PageRequest, TrialPage, TrialSource};
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    fn configured(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.search.keywords = vec!["diabetes".to_string()];
        config.export.output_dir = temp_dir.path().to_path_buf();
        config
    }

    struct FixedSource {
        trials: Vec<serde_json::Value>,
    }

    #[async_trait]
    impl TrialSource for FixedSource {
        async fn fetch_page(&self, _request: &PageRequest) -> Result<TrialPage> {
            Ok(TrialPage {
                trials: self.trials.iter().cloned().map(RawTrial::new).collect(),
                next_page_token: None,
            })
        }
    }

    fn trial(nct_id: &str, sponsor: &str) -> serde_json::Value {
        json!({
            "protocolSection": {
                "identificationModule": { "nctId": nct_id, "briefTitle": "Study" },
                "statusModule": { "overallStatus": "RECRUITING" },
                "sponsorCollaboratorsModule": {
                    "leadSponsor": { "name": sponsor }
                }
            }
        })
    }

    #[test]
    fn test_prospector_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = configured(&temp_dir);
        let prospector = Prospector::new_for_test(config, OutputMode::Plain, 0, true);
        assert!(prospector.is_running());
        assert_eq!(prospector.config().search.keywords, vec!["diabetes"]);
    }

    #[test]
    fn test_shutdown_handling() {
        let temp_dir = TempDir::new().unwrap();
        let prospector =
            Prospector::new_for_test(configured(&temp_dir), OutputMode::Plain, 0, true);

        assert!(prospector.is_running());
        prospector.request_shutdown();
        assert!(!prospector.is_running());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        Prospector::generate_sample_config(&config_path).unwrap();
        assert!(config_path.exists());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[search]"));
        assert!(content.contains("[export]"));
    }

    #[tokio::test]
    async fn test_pipeline_from_stub_source_to_files() {
        let temp_dir = TempDir::new().unwrap();
        let prospector =
            Prospector::new_for_test(configured(&temp_dir), OutputMode::Plain, 0, true);

        let source = FixedSource {
            trials: vec![
                trial("NCT00000001", "Acme Therapeutics Inc"),
                trial("NCT00000002", "State University"),
            ],
        };
        let outcome = fetch_trials(
            &source,
            &prospector.config.search.keywords,
            &[],
            &[],
            10,
            |_, _| {},
            || false,
        )
        .await
        .unwrap();

        let selection = extract::resolve_selection(&prospector.config.extraction.options).unwrap();
        let extraction =
            extract::run_extraction(&outcome.trials, &selection, &prospector.config.filters);
        let roster = CompanyRoster::build(&outcome.trials, &prospector.config.filters);

        // Default filter keeps companies only.
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(roster.len(), 1);

        let artifacts = prospector
            .export_results(&extraction.records, &roster)
            .unwrap();
        assert_eq!(artifacts.len(), 2);
        for artifact in &artifacts {
            assert!(artifact.exists());
        }

        let report =
            prospector.build_report("diabetes", &outcome, &extraction, &roster, artifacts);
        assert_eq!(report.trials_fetched, 2);
        assert_eq!(report.companies_found, 1);
        assert_eq!(report.top_companies[0].name, "Acme Therapeutics Inc");
    }
}
