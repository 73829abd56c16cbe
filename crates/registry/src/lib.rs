//! Patient registry and identity matching
//!
//! The registry is a read-only snapshot of patient rows loaded from a
//! JSON file. The matcher performs exact, order-stable matching of a
//! (full name, DOB) query against that snapshot and projects the first
//! hit into the canonical patient-info shape.

pub mod matcher;
pub mod patients;

pub use matcher::{IdentityMatcher, MatchOutcome, PatientInfo, ValidationVerdict};
pub use patients::{
    default_data_paths, load_patients_from_file, PatientRecord, PatientRegistry,
};

use thiserror::Error;

/// Registry access errors
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    #[error("Registry file not found: {0}")]
    FileNotFound(String),

    #[error("Malformed registry data: {0}")]
    Malformed(String),

    #[error("No registry source configured")]
    NoSource,

    #[error("I/O error: {0}")]
    Io(String),
}
