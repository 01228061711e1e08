mod extractors;
mod record;

pub use record::{
    ConditionFields, ContactFields, DesignFields, EligibilityFields, ExtractedRecord,
    InterventionFields, InvestigatorFields, LocationFields, OutcomeFields, SponsorFields,
    TimelineFields, LIST_DELIMITER,
};

use crate::error::{ProspectorError, Result};
use crate::taxonomy::OrganizationFilter;
use crate::trial::RawTrial;

type Applier = fn(&RawTrial, &mut ExtractedRecord);

/// One selectable data category.
///
/// The registry is an ordered table of `(key, metadata, handler)`; adding a
/// category means adding a row, nothing else.
pub struct ExtractionOption {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub is_default: bool,
    apply: Applier,
}

pub const SPONSORS_KEY: &str = "sponsors";

const OPTIONS: &[ExtractionOption] = &[
    ExtractionOption {
        key: SPONSORS_KEY,
        label: "Sponsors",
        description: "Lead sponsor name and category, collaborator list and count",
        is_default: true,
        apply: apply_sponsors,
    },
    ExtractionOption {
        key: "investigators",
        label: "Investigators",
        description: "Principal investigators and study directors with affiliations",
        is_default: false,
        apply: apply_investigators,
    },
    ExtractionOption {
        key: "locations",
        label: "Locations",
        description: "Distinct facilities, cities and countries, plus site count",
        is_default: false,
        apply: apply_locations,
    },
    ExtractionOption {
        key: "interventions",
        label: "Interventions",
        description: "Interventions grouped into drug, device, procedure and other",
        is_default: false,
        apply: apply_interventions,
    },
    ExtractionOption {
        key: "conditions",
        label: "Conditions",
        description: "Studied conditions and registry keywords",
        is_default: false,
        apply: apply_conditions,
    },
    ExtractionOption {
        key: "outcomes",
        label: "Outcomes",
        description: "Primary and secondary outcome measures",
        is_default: false,
        apply: apply_outcomes,
    },
    ExtractionOption {
        key: "design",
        label: "Study Design",
        description: "Study type, phases, allocation, masking and enrollment",
        is_default: false,
        apply: apply_design,
    },
    ExtractionOption {
        key: "eligibility",
        label: "Eligibility",
        description: "Eligibility criteria (truncated), sex and age bounds",
        is_default: false,
        apply: apply_eligibility,
    },
    ExtractionOption {
        key: "contacts",
        label: "Contacts",
        description: "Central contact names, phones and emails",
        is_default: false,
        apply: apply_contacts,
    },
    ExtractionOption {
        key: "timeline",
        label: "Timeline",
        description: "Start, completion and registry posting dates",
        is_default: false,
        apply: apply_timeline,
    },
];

fn apply_sponsors(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.sponsors = Some(extractors::sponsors(trial));
}

fn apply_investigators(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.investigators = Some(extractors::investigators(trial));
}

fn apply_locations(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.locations = Some(extractors::locations(trial));
}

fn apply_interventions(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.interventions = Some(extractors::interventions(trial));
}

fn apply_conditions(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.conditions = Some(extractors::conditions(trial));
}

fn apply_outcomes(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.outcomes = Some(extractors::outcomes(trial));
}

fn apply_design(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.design = Some(extractors::design(trial));
}

fn apply_eligibility(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.eligibility = Some(extractors::eligibility(trial));
}

fn apply_contacts(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.contacts = Some(extractors::contacts(trial));
}

fn apply_timeline(trial: &RawTrial, record: &mut ExtractedRecord) {
    record.timeline = Some(extractors::timeline(trial));
}

/// The full registry, for building selection UI without duplicating it.
pub fn options() -> &'static [ExtractionOption] {
    OPTIONS
}

pub fn find(key: &str) -> Option<&'static ExtractionOption> {
    OPTIONS.iter().find(|option| option.key == key)
}

/// Resolve caller-selected keys to registry entries, deduplicated and kept in
/// selection order. An empty selection resolves to the default set.
pub fn resolve_selection(keys: &[String]) -> Result<Vec<&'static ExtractionOption>> {
    if keys.is_empty() {
        return Ok(OPTIONS.iter().filter(|o| o.is_default).collect());
    }

    let mut resolved: Vec<&'static ExtractionOption> = Vec::new();
    for key in keys {
        let option = find(key.trim()).ok_or_else(|| ProspectorError::UnknownExtractor {
            name: key.clone(),
        })?;
        if !resolved.iter().any(|o| o.key == option.key) {
            resolved.push(option);
        }
    }
    Ok(resolved)
}

/// Result of running the selected extractors over a fetched batch.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub records: Vec<ExtractedRecord>,
    /// Records skipped whole because their shape was unusable.
    pub skipped: usize,
    /// Records dropped by the organization filter (sponsors selected only).
    pub excluded: usize,
    pub warnings: Vec<String>,
}

/// Run the selected extractors over every trial.
///
/// A record without a usable identification module is skipped entirely and
/// surfaced as a warning; the run continues. The organization filter applies
/// only when the sponsors option was selected — pure non-sponsor extractions
/// never invoke the classifier.
pub fn run_extraction(
    trials: &[RawTrial],
    selection: &[&'static ExtractionOption],
    filter: &OrganizationFilter,
) -> ExtractionOutcome {
    let sponsors_selected = selection.iter().any(|o| o.key == SPONSORS_KEY);
    let mut outcome = ExtractionOutcome::default();

    for (index, trial) in trials.iter().enumerate() {
        let nct_id = trial.nct_id();
        if nct_id.is_empty() {
            outcome.skipped += 1;
            outcome
                .warnings
                .push(format!("skipping record #{}: no NCT id", index + 1));
            continue;
        }

        if sponsors_selected && !filter.should_include(trial.lead_sponsor_name()) {
            outcome.excluded += 1;
            continue;
        }

        let mut record = ExtractedRecord::new(
            nct_id.to_string(),
            trial.title().to_string(),
            trial.status().to_string(),
        );
        for option in selection {
            (option.apply)(trial, &mut record);
        }
        outcome.records.push(record);
    }

    outcome
}
