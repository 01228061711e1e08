use crate::taxonomy::{categorize, OrgCategory};
use serde::{Deserialize, Serialize};

/// Which organization categories pass the sponsor filter.
///
/// Either an include-set (only listed categories pass) or an exclude-set
/// (everything but the listed categories passes). The modes are mutually
/// exclusive: a non-empty include-set takes precedence and the exclude-set is
/// ignored. This is resolved silently, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationFilter {
    #[serde(default)]
    pub include: Vec<OrgCategory>,
    #[serde(default)]
    pub exclude: Vec<OrgCategory>,
}

impl Default for OrganizationFilter {
    fn default() -> Self {
        // Prospecting default: commercial companies only.
        Self {
            include: vec![OrgCategory::Company],
            exclude: Vec::new(),
        }
    }
}

impl OrganizationFilter {
    pub fn include_only(categories: Vec<OrgCategory>) -> Self {
        Self {
            include: categories,
            exclude: Vec::new(),
        }
    }

    pub fn exclude_only(categories: Vec<OrgCategory>) -> Self {
        Self {
            include: Vec::new(),
            exclude: categories,
        }
    }

    /// Passes everything with a non-empty name.
    pub fn permissive() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn is_include_mode(&self) -> bool {
        !self.include.is_empty()
    }

    /// Both sets configured; include wins, worth a debug note to the caller.
    pub fn has_ignored_excludes(&self) -> bool {
        !self.include.is_empty() && !self.exclude.is_empty()
    }

    /// Whether an organization with this name passes the filter.
    ///
    /// Empty names never pass. Otherwise the name is classified and membership
    /// is checked against the active set.
    pub fn should_include(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        let category = categorize(name);
        if self.is_include_mode() {
            self.include.contains(&category)
        } else {
            !self.exclude.contains(&category)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_always_excluded() {
        assert!(!OrganizationFilter::permissive().should_include(""));
        assert!(!OrganizationFilter::permissive().should_include("  "));
    }

    #[test]
    fn test_include_set_membership() {
        let filter = OrganizationFilter::include_only(vec![OrgCategory::Company]);
        assert!(filter.should_include("Acme Therapeutics Inc"));
        assert!(!filter.should_include("State University Hospital"));
    }

    #[test]
    fn test_exclude_set_membership() {
        let filter = OrganizationFilter::exclude_only(vec![
            OrgCategory::University,
            OrgCategory::Hospital,
        ]);
        assert!(filter.should_include("Acme Therapeutics Inc"));
        assert!(filter.should_include("Cancer Research Institute"));
        assert!(!filter.should_include("General Hospital of Vienna"));
    }

    #[test]
    fn test_empty_exclude_set_includes_everything_named() {
        let filter = OrganizationFilter::permissive();
        assert!(filter.should_include("Acme"));
        assert!(filter.should_include("Harvard University"));
    }

    #[test]
    fn test_include_wins_over_exclude() {
        let filter = OrganizationFilter {
            include: vec![OrgCategory::University],
            exclude: vec![OrgCategory::University],
        };
        assert!(filter.has_ignored_excludes());
        // Include mode governs: university passes even though it is also in
        // the (ignored) exclude set.
        assert!(filter.should_include("Harvard University"));
        assert!(!filter.should_include("Acme Therapeutics Inc"));
    }

    #[test]
    fn test_unknown_never_passes_positive_filters() {
        let filter = OrganizationFilter::include_only(vec![
            OrgCategory::Company,
            OrgCategory::University,
        ]);
        assert!(!filter.should_include(""));
    }

    #[test]
    fn test_default_filter_keeps_companies_only() {
        let filter = OrganizationFilter::default();
        assert!(filter.should_include("Acme Therapeutics Inc"));
        assert!(!filter.should_include("National Cancer Institute"));
    }
}
