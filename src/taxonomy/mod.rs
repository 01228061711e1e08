mod filter;

pub use filter::OrganizationFilter;

use serde::{Deserialize, Serialize};

/// One bucket in the organization classification scheme.
///
/// `Company` is the fallback for names matching no keyword list; `Unknown` is
/// reserved for empty names and never passes a positive filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgCategory {
    University,
    Hospital,
    Government,
    Institute,
    Foundation,
    Company,
    Unknown,
}

impl OrgCategory {
    pub fn key(&self) -> &'static str {
        match self {
            OrgCategory::University => "university",
            OrgCategory::Hospital => "hospital",
            OrgCategory::Government => "government",
            OrgCategory::Institute => "institute",
            OrgCategory::Foundation => "foundation",
            OrgCategory::Company => "company",
            OrgCategory::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrgCategory::University => "University / College",
            OrgCategory::Hospital => "Hospital / Health System",
            OrgCategory::Government => "Government Agency",
            OrgCategory::Institute => "Research Institute",
            OrgCategory::Foundation => "Foundation / Charity",
            OrgCategory::Company => "Commercial Company",
            OrgCategory::Unknown => "Unknown",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "university" => Some(OrgCategory::University),
            "hospital" => Some(OrgCategory::Hospital),
            "government" => Some(OrgCategory::Government),
            "institute" => Some(OrgCategory::Institute),
            "foundation" => Some(OrgCategory::Foundation),
            "company" => Some(OrgCategory::Company),
            "unknown" => Some(OrgCategory::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrgCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of the classification table: a category plus the lowercase
/// substrings that place an organization name in it.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyEntry {
    pub category: OrgCategory,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// The ordered taxonomy. Order is the tie-break rule: a name matching several
/// keyword lists takes the first matching category. `company` closes the table
/// with no keywords because it is the fallback, not a match target.
const TAXONOMY: &[TaxonomyEntry] = &[
    TaxonomyEntry {
        category: OrgCategory::University,
        label: "University / College",
        keywords: &[
            "university",
            "universite",
            "universität",
            "universidad",
            "college",
            "school",
            "academy",
            "academie",
        ],
    },
    TaxonomyEntry {
        category: OrgCategory::Hospital,
        label: "Hospital / Health System",
        keywords: &[
            "hospital",
            "medical center",
            "medical centre",
            "health system",
            "clinic",
        ],
    },
    TaxonomyEntry {
        category: OrgCategory::Government,
        label: "Government Agency",
        keywords: &[
            "ministry of",
            "national institutes",
            "veterans affairs",
            "department of health",
            "public health agency",
            "national health service",
        ],
    },
    TaxonomyEntry {
        category: OrgCategory::Institute,
        label: "Research Institute",
        keywords: &[
            "institute",
            "institut",
            "instituto",
            "research center",
            "research centre",
        ],
    },
    TaxonomyEntry {
        category: OrgCategory::Foundation,
        label: "Foundation / Charity",
        keywords: &["foundation", "fundacion", "fondation", "charity"],
    },
    TaxonomyEntry {
        category: OrgCategory::Company,
        label: "Commercial Company",
        keywords: &[],
    },
];

/// The full ordered taxonomy, for building selection UI without duplicating it.
pub fn entries() -> &'static [TaxonomyEntry] {
    TAXONOMY
}

/// Classify an organization name.
///
/// Total and deterministic: empty names are `Unknown`, names matching no
/// keyword list are `Company`, and for everything else the first matching
/// entry in taxonomy order wins.
pub fn categorize(name: &str) -> OrgCategory {
    let name = name.trim();
    if name.is_empty() {
        return OrgCategory::Unknown;
    }

    let name_lower = name.to_lowercase();
    for entry in TAXONOMY {
        if entry
            .keywords
            .iter()
            .any(|keyword| name_lower.contains(keyword))
        {
            return entry.category;
        }
    }

    OrgCategory::Company
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_is_total() {
        for name in ["", "   ", "Acme", "Hôpital Saint-Louis", "株式会社"] {
            // No name may panic or fail to produce a category.
            let _ = categorize(name);
        }
    }

    #[test]
    fn test_empty_name_is_unknown() {
        assert_eq!(categorize(""), OrgCategory::Unknown);
        assert_eq!(categorize("   "), OrgCategory::Unknown);
    }

    #[test]
    fn test_fallback_is_company() {
        assert_eq!(categorize("Acme Therapeutics Inc"), OrgCategory::Company);
        assert_eq!(categorize("Pfizer"), OrgCategory::Company);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(categorize("HARVARD UNIVERSITY"), OrgCategory::University);
        assert_eq!(categorize("st. mary's hospital"), OrgCategory::Hospital);
        assert_eq!(categorize("FONDATION de France"), OrgCategory::Foundation);
    }

    #[test]
    fn test_order_breaks_ties() {
        // Matches both the university and hospital keyword lists; university
        // comes first in the taxonomy, so it wins.
        assert_eq!(
            categorize("University Medical Center Utrecht"),
            OrgCategory::University
        );
        // Matches government ("national institutes") and institute; government
        // is ordered first.
        assert_eq!(
            categorize("National Institutes of Health"),
            OrgCategory::Government
        );
    }

    #[test]
    fn test_entry_keys_are_unique_and_ordered() {
        let keys: Vec<&str> = entries().iter().map(|e| e.category.key()).collect();
        let mut deduped = keys.clone();
        deduped.dedup();
        assert_eq!(keys, deduped);
        assert_eq!(keys.first(), Some(&"university"));
        assert_eq!(keys.last(), Some(&"company"));
    }

    #[test]
    fn test_fallback_entry_has_no_keywords() {
        let company = entries()
            .iter()
            .find(|e| e.category == OrgCategory::Company)
            .unwrap();
        assert!(company.keywords.is_empty());
    }

    #[test]
    fn test_category_key_round_trip() {
        for entry in entries() {
            assert_eq!(OrgCategory::from_key(entry.category.key()), Some(entry.category));
        }
        assert_eq!(OrgCategory::from_key("UNIVERSITY"), Some(OrgCategory::University));
        assert_eq!(OrgCategory::from_key("nonsense"), None);
    }
}
