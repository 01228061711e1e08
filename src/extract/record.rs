use serde::Serialize;

/// Joined-list delimiter used across all extracted string fields.
pub const LIST_DELIMITER: &str = "; ";

/// One flattened trial record.
///
/// The base fields are always present; every extraction option contributes one
/// optional group. Records in the same run routinely carry different group
/// sets, which is expected. Each group owns a disjoint field namespace, so
/// flattening is a plain concatenation with no overwrite concerns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedRecord {
    pub nct_id: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsors: Option<SponsorFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigators: Option<InvestigatorFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<LocationFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interventions: Option<InterventionFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<ConditionFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<OutcomeFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<ContactFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineFields>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SponsorFields {
    pub lead_sponsor: String,
    pub lead_sponsor_category: String,
    pub collaborators: String,
    pub collaborator_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestigatorFields {
    pub investigator_names: String,
    pub investigator_affiliations: String,
    pub investigator_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationFields {
    pub facilities: String,
    pub cities: String,
    pub countries: String,
    pub location_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterventionFields {
    pub drugs: String,
    pub devices: String,
    pub procedures: String,
    pub other_interventions: String,
    pub intervention_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConditionFields {
    pub conditions: String,
    pub condition_keywords: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeFields {
    pub primary_outcomes: String,
    pub secondary_outcomes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignFields {
    pub study_type: String,
    pub phases: String,
    pub allocation: String,
    pub intervention_model: String,
    pub primary_purpose: String,
    pub masking: String,
    pub enrollment: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityFields {
    pub eligibility_criteria: String,
    pub sex: String,
    pub minimum_age: String,
    pub maximum_age: String,
    pub healthy_volunteers: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactFields {
    pub central_contacts: String,
    pub contact_phones: String,
    pub contact_emails: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineFields {
    pub start_date: String,
    pub primary_completion_date: String,
    pub completion_date: String,
    pub first_posted: String,
    pub last_update: String,
}

impl ExtractedRecord {
    pub fn new(nct_id: String, title: String, status: String) -> Self {
        Self {
            nct_id,
            title,
            status,
            ..Self::default()
        }
    }

    /// Flatten to ordered `(field, value)` pairs for export.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("nct_id", self.nct_id.clone()),
            ("title", self.title.clone()),
            ("status", self.status.clone()),
        ];

        if let Some(ref s) = self.sponsors {
            fields.push(("lead_sponsor", s.lead_sponsor.clone()));
            fields.push(("lead_sponsor_category", s.lead_sponsor_category.clone()));
            fields.push(("collaborators", s.collaborators.clone()));
            fields.push(("collaborator_count", s.collaborator_count.to_string()));
        }
        if let Some(ref i) = self.investigators {
            fields.push(("investigator_names", i.investigator_names.clone()));
            fields.push(("investigator_affiliations", i.investigator_affiliations.clone()));
            fields.push(("investigator_count", i.investigator_count.to_string()));
        }
        if let Some(ref l) = self.locations {
            fields.push(("facilities", l.facilities.clone()));
            fields.push(("cities", l.cities.clone()));
            fields.push(("countries", l.countries.clone()));
            fields.push(("location_count", l.location_count.to_string()));
        }
        if let Some(ref i) = self.interventions {
            fields.push(("drugs", i.drugs.clone()));
            fields.push(("devices", i.devices.clone()));
            fields.push(("procedures", i.procedures.clone()));
            fields.push(("other_interventions", i.other_interventions.clone()));
            fields.push(("intervention_count", i.intervention_count.to_string()));
        }
        if let Some(ref c) = self.conditions {
            fields.push(("conditions", c.conditions.clone()));
            fields.push(("condition_keywords", c.condition_keywords.clone()));
        }
        if let Some(ref o) = self.outcomes {
            fields.push(("primary_outcomes", o.primary_outcomes.clone()));
            fields.push(("secondary_outcomes", o.secondary_outcomes.clone()));
        }
        if let Some(ref d) = self.design {
            fields.push(("study_type", d.study_type.clone()));
            fields.push(("phases", d.phases.clone()));
            fields.push(("allocation", d.allocation.clone()));
            fields.push(("intervention_model", d.intervention_model.clone()));
            fields.push(("primary_purpose", d.primary_purpose.clone()));
            fields.push(("masking", d.masking.clone()));
            fields.push(("enrollment", d.enrollment.to_string()));
        }
        if let Some(ref e) = self.eligibility {
            fields.push(("eligibility_criteria", e.eligibility_criteria.clone()));
            fields.push(("sex", e.sex.clone()));
            fields.push(("minimum_age", e.minimum_age.clone()));
            fields.push(("maximum_age", e.maximum_age.clone()));
            fields.push((
                "healthy_volunteers",
                if e.healthy_volunteers { "Yes" } else { "No" }.to_string(),
            ));
        }
        if let Some(ref c) = self.contacts {
            fields.push(("central_contacts", c.central_contacts.clone()));
            fields.push(("contact_phones", c.contact_phones.clone()));
            fields.push(("contact_emails", c.contact_emails.clone()));
        }
        if let Some(ref t) = self.timeline {
            fields.push(("start_date", t.start_date.clone()));
            fields.push(("primary_completion_date", t.primary_completion_date.clone()));
            fields.push(("completion_date", t.completion_date.clone()));
            fields.push(("first_posted", t.first_posted.clone()));
            fields.push(("last_update", t.last_update.clone()));
        }

        fields
    }
}
