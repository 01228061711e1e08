use crate::taxonomy::{categorize, OrgCategory, OrganizationFilter};
use crate::trial::RawTrial;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use url::Url;

/// How an organization was mentioned on a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SponsorRole {
    Lead,
    Collaborator,
}

/// Per-organization roll-up across one run.
///
/// `trial_count` counts mentions; `nct_ids` tracks the distinct trials behind
/// them. The two quantities diverge when an organization appears on the same
/// trial in more than one role, and both are kept and exported.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyAggregate {
    pub name: String,
    pub category: OrgCategory,
    pub lead_count: usize,
    pub collab_count: usize,
    pub trial_count: usize,
    pub nct_ids: BTreeSet<String>,
}

impl CompanyAggregate {
    fn new(name: String) -> Self {
        Self {
            category: categorize(&name),
            name,
            lead_count: 0,
            collab_count: 0,
            trial_count: 0,
            nct_ids: BTreeSet::new(),
        }
    }

    fn record_mention(&mut self, role: SponsorRole, nct_id: &str) {
        match role {
            SponsorRole::Lead => self.lead_count += 1,
            SponsorRole::Collaborator => self.collab_count += 1,
        }
        self.trial_count += 1;
        if !nct_id.is_empty() {
            self.nct_ids.insert(nct_id.to_string());
        }
    }

    /// Pure function of the two counters; an aggregate exists only after at
    /// least one mention, so both counters are never zero together.
    pub fn role_label(&self) -> &'static str {
        if self.lead_count > 0 && self.collab_count > 0 {
            "Lead+Collaborator"
        } else if self.lead_count > 0 {
            "Lead Sponsor"
        } else {
            "Collaborator"
        }
    }

    pub fn unique_trials(&self) -> usize {
        self.nct_ids.len()
    }

    /// Flatten to export fields. With a target role the row carries a LinkedIn
    /// people-search URL for that role at the company; otherwise a company
    /// search URL.
    pub fn export_fields(&self, target_role: Option<&str>) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("company", self.name.clone()),
            ("category", self.category.key().to_string()),
            ("role", self.role_label().to_string()),
            ("lead_mentions", self.lead_count.to_string()),
            ("collaborator_mentions", self.collab_count.to_string()),
            ("total_mentions", self.trial_count.to_string()),
            ("unique_trials", self.unique_trials().to_string()),
        ];
        match target_role {
            Some(role) => {
                fields.push(("target_role", role.to_string()));
                fields.push((
                    "linkedin_url",
                    linkedin_people_search(role, &self.name),
                ));
            }
            None => fields.push(("linkedin_url", linkedin_company_search(&self.name))),
        }
        fields
    }
}

/// Export column order for roster tables.
pub fn roster_columns(target_role: bool) -> Vec<String> {
    let mut columns = vec![
        "company",
        "category",
        "role",
        "lead_mentions",
        "collaborator_mentions",
        "total_mentions",
        "unique_trials",
    ];
    if target_role {
        columns.push("target_role");
    }
    columns.push("linkedin_url");
    columns.into_iter().map(String::from).collect()
}

fn linkedin_company_search(company: &str) -> String {
    Url::parse_with_params(
        "https://www.linkedin.com/search/results/companies/",
        &[("keywords", company)],
    )
    .map(String::from)
    .unwrap_or_default()
}

fn linkedin_people_search(role: &str, company: &str) -> String {
    let keywords = format!("{} \"{}\"", role, company);
    Url::parse_with_params(
        "https://www.linkedin.com/search/results/people/",
        &[("keywords", keywords.as_str())],
    )
    .map(String::from)
    .unwrap_or_default()
}

/// The per-run company roster: one aggregate per distinct organization name.
#[derive(Debug, Default)]
pub struct CompanyRoster {
    companies: HashMap<String, CompanyAggregate>,
    excluded: usize,
}

impl CompanyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the roster from raw trials: classify and filter the lead sponsor
    /// and each collaborator independently, upserting on inclusion.
    pub fn build(trials: &[RawTrial], filter: &OrganizationFilter) -> Self {
        let mut roster = Self::new();
        for trial in trials {
            let nct_id = trial.nct_id().to_string();
            roster.record(trial.lead_sponsor_name(), SponsorRole::Lead, &nct_id, filter);
            for collaborator in trial.collaborator_names() {
                roster.record(collaborator, SponsorRole::Collaborator, &nct_id, filter);
            }
        }
        roster
    }

    fn record(&mut self, name: &str, role: SponsorRole, nct_id: &str, filter: &OrganizationFilter) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if !filter.should_include(name) {
            self.excluded += 1;
            return;
        }
        self.upsert(name, role, nct_id);
    }

    /// Create the aggregate on first mention, mutate in place afterwards.
    pub fn upsert(&mut self, name: &str, role: SponsorRole, nct_id: &str) {
        self.companies
            .entry(name.to_string())
            .or_insert_with(|| CompanyAggregate::new(name.to_string()))
            .record_mention(role, nct_id);
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Organization mentions dropped by the filter.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn get(&self, name: &str) -> Option<&CompanyAggregate> {
        self.companies.get(name)
    }

    /// Aggregates ordered by mention count (descending), name as tie-break.
    pub fn sorted_by_mentions(&self) -> Vec<&CompanyAggregate> {
        let mut companies: Vec<&CompanyAggregate> = self.companies.values().collect();
        companies.sort_by(|a, b| {
            b.trial_count
                .cmp(&a.trial_count)
                .then_with(|| a.name.cmp(&b.name))
        });
        companies
    }

    pub fn lead_company_count(&self) -> usize {
        self.companies.values().filter(|c| c.lead_count > 0).count()
    }

    pub fn collaborator_company_count(&self) -> usize {
        self.companies
            .values()
            .filter(|c| c.collab_count > 0)
            .count()
    }
}
