//! The per-category extractors. Each is a pure function from a raw trial to
//! one field group; absence of upstream data produces empty fields, never an
//! error.

use crate::extract::record::{
    ConditionFields, ContactFields, DesignFields, EligibilityFields, InterventionFields,
    InvestigatorFields, LocationFields, OutcomeFields, SponsorFields, TimelineFields,
    LIST_DELIMITER,
};
use crate::taxonomy;
use crate::trial::RawTrial;
use serde_json::Value;
use std::collections::HashSet;

/// Export cells stay bounded: free-text criteria are cut at this many chars.
const CRITERIA_CHAR_BUDGET: usize = 500;

pub fn sponsors(trial: &RawTrial) -> SponsorFields {
    let lead = trial.lead_sponsor_name().trim().to_string();
    let collaborators = trial.collaborator_names();

    SponsorFields {
        lead_sponsor_category: taxonomy::categorize(&lead).key().to_string(),
        lead_sponsor: lead,
        collaborator_count: collaborators.len(),
        collaborators: collaborators.join(LIST_DELIMITER),
    }
}

pub fn investigators(trial: &RawTrial) -> InvestigatorFields {
    let officials = trial.array_at(&["protocolSection", "contactsLocationsModule", "overallOfficials"]);

    // Names and affiliations are kept positionally aligned: name[i] belongs to
    // affiliation[i], with an empty string standing in for a missing side.
    let mut names = Vec::new();
    let mut affiliations = Vec::new();
    for official in officials {
        let role = str_of(official, "role");
        if !matches!(role, "PRINCIPAL_INVESTIGATOR" | "STUDY_DIRECTOR") {
            continue;
        }
        names.push(str_of(official, "name").to_string());
        affiliations.push(str_of(official, "affiliation").to_string());
    }

    InvestigatorFields {
        investigator_count: names.len(),
        investigator_names: names.join(LIST_DELIMITER),
        investigator_affiliations: affiliations.join(LIST_DELIMITER),
    }
}

pub fn locations(trial: &RawTrial) -> LocationFields {
    let entries = trial.array_at(&["protocolSection", "contactsLocationsModule", "locations"]);

    let facilities: Vec<&str> = entries.iter().map(|l| str_of(l, "facility")).collect();
    let cities: Vec<&str> = entries.iter().map(|l| str_of(l, "city")).collect();
    let countries: Vec<&str> = entries.iter().map(|l| str_of(l, "country")).collect();

    LocationFields {
        facilities: join_deduped(&facilities),
        cities: join_deduped(&cities),
        countries: join_deduped(&countries),
        // Deliberately the raw entry count, not the deduplicated one.
        location_count: entries.len(),
    }
}

pub fn interventions(trial: &RawTrial) -> InterventionFields {
    let entries = trial.array_at(&["protocolSection", "armsInterventionsModule", "interventions"]);

    let mut drugs = Vec::new();
    let mut devices = Vec::new();
    let mut procedures = Vec::new();
    let mut other = Vec::new();

    for entry in entries {
        let name = str_of(entry, "name");
        if name.is_empty() {
            continue;
        }
        match str_of(entry, "type").to_uppercase().as_str() {
            "DRUG" => drugs.push(name),
            "DEVICE" => devices.push(name),
            "PROCEDURE" | "SURGERY" => procedures.push(name),
            _ => other.push(name),
        }
    }

    InterventionFields {
        drugs: drugs.join(LIST_DELIMITER),
        devices: devices.join(LIST_DELIMITER),
        procedures: procedures.join(LIST_DELIMITER),
        other_interventions: other.join(LIST_DELIMITER),
        intervention_count: entries.len(),
    }
}

pub fn conditions(trial: &RawTrial) -> ConditionFields {
    ConditionFields {
        conditions: trial
            .strings_at(&["protocolSection", "conditionsModule", "conditions"])
            .join(LIST_DELIMITER),
        condition_keywords: trial
            .strings_at(&["protocolSection", "conditionsModule", "keywords"])
            .join(LIST_DELIMITER),
    }
}

pub fn outcomes(trial: &RawTrial) -> OutcomeFields {
    OutcomeFields {
        primary_outcomes: join_measures(
            trial.array_at(&["protocolSection", "outcomesModule", "primaryOutcomes"]),
        ),
        secondary_outcomes: join_measures(
            trial.array_at(&["protocolSection", "outcomesModule", "secondaryOutcomes"]),
        ),
    }
}

pub fn design(trial: &RawTrial) -> DesignFields {
    let module = &["protocolSection", "designModule"];
    DesignFields {
        study_type: trial.str_at(&[module[0], module[1], "studyType"]).to_string(),
        phases: trial
            .strings_at(&[module[0], module[1], "phases"])
            .join(LIST_DELIMITER),
        allocation: trial
            .str_at(&[module[0], module[1], "designInfo", "allocation"])
            .to_string(),
        intervention_model: trial
            .str_at(&[module[0], module[1], "designInfo", "interventionModel"])
            .to_string(),
        primary_purpose: trial
            .str_at(&[module[0], module[1], "designInfo", "primaryPurpose"])
            .to_string(),
        masking: trial
            .str_at(&[module[0], module[1], "designInfo", "maskingInfo", "masking"])
            .to_string(),
        enrollment: trial.u64_at(&[module[0], module[1], "enrollmentInfo", "count"]),
    }
}

pub fn eligibility(trial: &RawTrial) -> EligibilityFields {
    let module = &["protocolSection", "eligibilityModule"];
    EligibilityFields {
        eligibility_criteria: truncate_chars(
            trial.str_at(&[module[0], module[1], "eligibilityCriteria"]),
            CRITERIA_CHAR_BUDGET,
        ),
        sex: trial.str_at(&[module[0], module[1], "sex"]).to_string(),
        minimum_age: trial.str_at(&[module[0], module[1], "minimumAge"]).to_string(),
        maximum_age: trial.str_at(&[module[0], module[1], "maximumAge"]).to_string(),
        healthy_volunteers: trial.bool_at(&[module[0], module[1], "healthyVolunteers"]),
    }
}

pub fn contacts(trial: &RawTrial) -> ContactFields {
    let entries = trial.array_at(&["protocolSection", "contactsLocationsModule", "centralContacts"]);

    let names: Vec<&str> = entries.iter().map(|c| str_of(c, "name")).collect();
    let phones: Vec<&str> = entries.iter().map(|c| str_of(c, "phone")).collect();
    let emails: Vec<&str> = entries.iter().map(|c| str_of(c, "email")).collect();

    ContactFields {
        central_contacts: names.join(LIST_DELIMITER),
        contact_phones: phones.join(LIST_DELIMITER),
        contact_emails: emails.join(LIST_DELIMITER),
    }
}

pub fn timeline(trial: &RawTrial) -> TimelineFields {
    let module = &["protocolSection", "statusModule"];
    TimelineFields {
        start_date: trial
            .str_at(&[module[0], module[1], "startDateStruct", "date"])
            .to_string(),
        primary_completion_date: trial
            .str_at(&[module[0], module[1], "primaryCompletionDateStruct", "date"])
            .to_string(),
        completion_date: trial
            .str_at(&[module[0], module[1], "completionDateStruct", "date"])
            .to_string(),
        first_posted: trial
            .str_at(&[module[0], module[1], "studyFirstPostDateStruct", "date"])
            .to_string(),
        last_update: trial
            .str_at(&[module[0], module[1], "lastUpdatePostDateStruct", "date"])
            .to_string(),
    }
}

fn str_of<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn join_measures(outcomes: &[Value]) -> String {
    outcomes
        .iter()
        .map(|o| str_of(o, "measure"))
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_DELIMITER)
}

/// Join distinct non-empty values, first occurrence order.
fn join_deduped(values: &[&str]) -> String {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| !v.is_empty() && seen.insert(**v))
        .copied()
        .collect::<Vec<_>>()
        .join(LIST_DELIMITER)
}

fn truncate_chars(text: &str, budget: usize) -> String {
    text.chars().take(budget).collect()
}
