use crate::error::{ProspectorError, Result};
use crate::extract;
use crate::fetcher::DEFAULT_BASE_URL;
use crate::taxonomy::{OrgCategory, OrganizationFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub filters: OrganizationFilter,
    pub extraction: ExtractionConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub keywords: Vec<String>,
    pub statuses: Vec<String>,
    pub phases: Vec<String>,
    /// 0 means "all results", subject to the fetch cap.
    pub max_results: usize,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extractor keys to run. Empty means the default selection.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub delimiter: String,
    pub spreadsheet: bool,
    /// Explicit column order for the trials table. Empty means automatic.
    pub columns: Vec<String>,
    /// Target role column value stamped into the company roster.
    pub target_role: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            statuses: vec!["RECRUITING".to_string(), "NOT_YET_RECRUITING".to_string()],
            phases: Vec::new(),
            max_results: 100,
            endpoint: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            options: vec!["sponsors".to_string()],
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            delimiter: ";".to_string(),
            spreadsheet: false,
            columns: Vec::new(),
            target_role: "VP of Clinical Operations".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ProspectorError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ProspectorError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ProspectorError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                // Try to load from default locations
                let default_paths = ["trialscout.toml", ".trialscout.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                // If no config file found, use defaults
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref keywords) = cli_args.keywords {
            self.search.keywords = keywords.clone();
        }

        if let Some(ref statuses) = cli_args.statuses {
            self.search.statuses = statuses.clone();
        }

        if let Some(ref phases) = cli_args.phases {
            self.search.phases = phases.clone();
        }

        if let Some(max_results) = cli_args.max_results {
            self.search.max_results = max_results;
        }

        if let Some(ref options) = cli_args.extract {
            self.extraction.options = options
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref include) = cli_args.include {
            self.filters.include = include.clone();
        }

        if let Some(ref exclude) = cli_args.exclude {
            self.filters.exclude = exclude.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.export.output_dir = output_dir.clone();
        }

        if let Some(spreadsheet) = cli_args.spreadsheet {
            self.export.spreadsheet = spreadsheet;
        }

        if let Some(ref delimiter) = cli_args.delimiter {
            self.export.delimiter = delimiter.clone();
        }

        if let Some(ref columns) = cli_args.columns {
            self.export.columns = columns
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref target_role) = cli_args.target_role {
            self.export.target_role = target_role.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ProspectorError::Config {
                message: "At least one search keyword must be specified".to_string(),
            });
        }

        if self.export.delimiter.len() != 1 || !self.export.delimiter.is_ascii() {
            return Err(ProspectorError::Config {
                message: format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    self.export.delimiter
                ),
            });
        }

        // Unknown extractor keys fail here rather than mid-run.
        for key in &self.extraction.options {
            if extract::find(key).is_none() {
                return Err(ProspectorError::UnknownExtractor { name: key.clone() });
            }
        }

        if let Some(parent) = self.export.output_dir.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ProspectorError::Config {
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.export.delimiter.as_bytes().first().copied().unwrap_or(b';')
    }

    pub fn create_sample_config() -> String {
        let mut sample_config = Self::default();
        sample_config.search.keywords = vec!["diabetes".to_string()];
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub keywords: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
    pub phases: Option<Vec<String>>,
    pub max_results: Option<usize>,
    pub extract: Option<String>,
    pub include: Option<Vec<OrgCategory>>,
    pub exclude: Option<Vec<OrgCategory>>,
    pub output_dir: Option<PathBuf>,
    pub spreadsheet: Option<bool>,
    pub delimiter: Option<String>,
    pub columns: Option<String>,
    pub target_role: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(mut self, keywords: Option<Vec<String>>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_statuses(mut self, statuses: Option<Vec<String>>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_phases(mut self, phases: Option<Vec<String>>) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_extract(mut self, extract: Option<String>) -> Self {
        self.extract = extract;
        self
    }

    pub fn with_include(mut self, include: Option<Vec<OrgCategory>>) -> Self {
        self.include = include;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<OrgCategory>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_spreadsheet(mut self, spreadsheet: Option<bool>) -> Self {
        self.spreadsheet = spreadsheet;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<String>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_columns(mut self, columns: Option<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_target_role(mut self, target_role: Option<String>) -> Self {
        self.target_role = target_role;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.search.keywords.is_empty());
        assert_eq!(config.search.max_results, 100);
        assert_eq!(config.search.endpoint, DEFAULT_BASE_URL);
        assert_eq!(config.extraction.options, vec!["sponsors"]);
        assert_eq!(config.export.delimiter, ";");
        assert!(!config.export.spreadsheet);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.search.keywords = vec!["oncology".to_string()];
        assert!(config.validate().is_ok());

        config.search.keywords.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_extractor() {
        let mut config = Config::default();
        config.search.keywords = vec!["oncology".to_string()];
        config.extraction.options = vec!["sponsors".to_string(), "biomarkers".to_string()];

        let error = config.validate().unwrap_err();
        assert!(matches!(
            error,
            ProspectorError::UnknownExtractor { ref name } if name == "biomarkers"
        ));
    }

    #[test]
    fn test_validation_rejects_bad_delimiter() {
        let mut config = Config::default();
        config.search.keywords = vec!["oncology".to_string()];

        config.export.delimiter = ";;".to_string();
        assert!(config.validate().is_err());

        config.export.delimiter = "\t".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_loading() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[search]
keywords = ["obesity"]
max_results = 250

[filters]
include = ["company"]

[export]
delimiter = ","
spreadsheet = true
"#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.search.keywords, vec!["obesity"]);
        assert_eq!(config.search.max_results, 250);
        assert_eq!(config.filters.include, vec![OrgCategory::Company]);
        assert_eq!(config.export.delimiter, ",");
        assert!(config.export.spreadsheet);
        // Untouched sections keep their defaults.
        assert_eq!(config.extraction.options, vec!["sponsors"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Config::load_from_file("/nonexistent/trialscout.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_keywords(Some(vec!["nash".to_string()]))
            .with_max_results(Some(50))
            .with_extract(Some("sponsors, locations".to_string()))
            .with_exclude(Some(vec![OrgCategory::University]));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.search.keywords, vec!["nash"]);
        assert_eq!(config.search.max_results, 50);
        assert_eq!(config.extraction.options, vec!["sponsors", "locations"]);
        assert_eq!(config.filters.exclude, vec![OrgCategory::University]);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[search]"));
        assert!(sample.contains("[filters]"));
        assert!(sample.contains("[extraction]"));
        assert!(sample.contains("[export]"));
    }
}
