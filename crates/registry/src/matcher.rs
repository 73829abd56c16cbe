//! Identity Matcher
//!
//! Exact, order-stable matching of a (full name, DOB) query against the
//! registry snapshot. Both sides are compared after trimming surrounding
//! whitespace; equality is case-sensitive and the first record in
//! registry order wins. Every path terminates in a verdict - this
//! boundary never propagates a raw failure.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::patients::{PatientRecord, PatientRegistry};

/// Literal used when no appointment date is on file
pub const NOT_SCHEDULED: &str = "Not scheduled";

/// Canonical projection of a matched registry row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientInfo {
    pub member_id: String,
    pub full_name: String,
    pub dob: String,
    pub phone: String,
    pub pcp_name: String,
    /// `"Not scheduled"` when the underlying date is absent or blank
    pub pcp_appointment: String,
}

impl From<&PatientRecord> for PatientInfo {
    fn from(record: &PatientRecord) -> Self {
        let pcp_appointment = match record.pcp_appointment_date.as_deref() {
            Some(date) if !date.trim().is_empty() => date.to_string(),
            _ => NOT_SCHEDULED.to_string(),
        };
        Self {
            member_id: record.member_id.clone(),
            full_name: record.full_name.clone(),
            dob: record.dob.clone(),
            phone: record.phone_number.clone(),
            pcp_name: record.pcp_name.clone(),
            pcp_appointment,
        }
    }
}

/// Typed matcher result.
///
/// The wire verdict is a projection of this; message strings never act
/// as the discriminant inside the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Exactly one canonical hit (first in registry order)
    Matched(PatientInfo),
    /// No record matched the query
    NotFound,
    /// Query fields missing or blank after trim; registry not consulted
    MissingFields,
    /// Registry snapshot could not be obtained or parsed
    SourceError(String),
}

/// Wire-shaped validation verdict: `{valid, message, patient_info?}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<PatientInfo>,
}

impl ValidationVerdict {
    pub fn valid(info: PatientInfo) -> Self {
        Self {
            valid: true,
            message: "Patient validated successfully".to_string(),
            patient_info: Some(info),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            patient_info: None,
        }
    }
}

impl From<MatchOutcome> for ValidationVerdict {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Matched(info) => ValidationVerdict::valid(info),
            MatchOutcome::NotFound => ValidationVerdict::invalid("Patient not found in records"),
            MatchOutcome::MissingFields => {
                ValidationVerdict::invalid("Both full_name and dob are required")
            }
            MatchOutcome::SourceError(description) => {
                ValidationVerdict::invalid(format!("Error during validation: {}", description))
            }
        }
    }
}

/// Select the first record whose trimmed name and DOB equal the trimmed
/// query values. Later duplicates are ignored.
pub fn match_patient<'a>(
    records: &'a [PatientRecord],
    full_name: &str,
    dob: &str,
) -> Option<&'a PatientRecord> {
    let full_name = full_name.trim();
    let dob = dob.trim();
    records
        .iter()
        .find(|r| r.full_name.trim() == full_name && r.dob.trim() == dob)
}

/// Identity verification against a registry snapshot
pub struct IdentityMatcher {
    registry: Arc<PatientRegistry>,
}

impl IdentityMatcher {
    pub fn new(registry: Arc<PatientRegistry>) -> Self {
        Self { registry }
    }

    /// Run the match and return the typed outcome.
    ///
    /// The missing-field guard fires before any registry access.
    pub fn check(&self, full_name: &str, dob: &str) -> MatchOutcome {
        if full_name.trim().is_empty() || dob.trim().is_empty() {
            return MatchOutcome::MissingFields;
        }

        let records = match self.registry.snapshot() {
            Ok(records) => records,
            Err(e) => return MatchOutcome::SourceError(e.to_string()),
        };

        match match_patient(&records, full_name, dob) {
            Some(record) => MatchOutcome::Matched(PatientInfo::from(record)),
            None => {
                tracing::debug!(full_name, dob, "No registry match");
                MatchOutcome::NotFound
            }
        }
    }

    /// Run the match and project it into the wire verdict
    pub fn validate(&self, full_name: &str, dob: &str) -> ValidationVerdict {
        self.check(full_name, dob).into()
    }
}
