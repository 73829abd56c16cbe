//! Patient Data Management
//!
//! Handles loading and caching the patient registry snapshot. The file
//! format belongs to the registry side: a JSON object with a `patients`
//! array whose rows use the upstream column labels. Missing cells
//! deserialize to empty strings.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::RegistryError;

/// One row of the patient registry
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PatientRecord {
    #[serde(rename = "Member ID", alias = "member_id", default)]
    pub member_id: String,

    #[serde(rename = "Full Name", alias = "full_name", default)]
    pub full_name: String,

    #[serde(rename = "DOB", alias = "dob", default)]
    pub dob: String,

    #[serde(rename = "Phone Number", alias = "phone_number", default)]
    pub phone_number: String,

    #[serde(rename = "PCP Name", alias = "pcp_name", default)]
    pub pcp_name: String,

    /// Nullable: absent when no appointment has been scheduled
    #[serde(
        rename = "PCP Appointment Date",
        alias = "pcp_appointment_date",
        default
    )]
    pub pcp_appointment_date: Option<String>,
}

/// Registry snapshot file structure
#[derive(Debug, Deserialize)]
struct PatientDataFile {
    patients: Vec<PatientRecord>,
}

/// Get default paths for the registry snapshot file.
/// Checks environment variables first, then falls back to common relative paths.
pub fn default_data_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Environment variable override (highest priority)
    if let Ok(data_dir) = std::env::var("OUTREACH_DATA_DIR") {
        paths.push(PathBuf::from(&data_dir).join("patients.json"));
    }

    // Config directory from environment
    if let Ok(config_dir) = std::env::var("OUTREACH_CONFIG_DIR") {
        paths.push(PathBuf::from(&config_dir).join("data/patients.json"));
    }

    // Executable-relative path
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("data/patients.json"));
        }
    }

    // Common relative paths (fallback)
    paths.extend([
        PathBuf::from("data/patients.json"),
        PathBuf::from("../data/patients.json"),
        PathBuf::from("../../data/patients.json"),
    ]);

    paths
}

/// Load patient rows from a JSON snapshot file
pub fn load_patients_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PatientRecord>, RegistryError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RegistryError::FileNotFound(path.display().to_string()),
        _ => RegistryError::Io(e.to_string()),
    })?;
    let file: PatientDataFile =
        serde_json::from_str(&content).map_err(|e| RegistryError::Malformed(e.to_string()))?;
    Ok(file.patients)
}

/// In-process registry snapshot with explicit reload.
///
/// Insertion order of the source file is preserved; the matcher relies
/// on it for first-match stability. Staleness is this component's
/// responsibility, not the matcher's.
pub struct PatientRegistry {
    path: Option<PathBuf>,
    records: RwLock<Option<Vec<PatientRecord>>>,
}

impl PatientRegistry {
    /// Create a registry backed by a snapshot file. No I/O happens
    /// until the first `snapshot` or `load` call.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            records: RwLock::new(None),
        }
    }

    /// Create a registry from in-memory rows (tests, seeded deployments)
    pub fn with_records(records: Vec<PatientRecord>) -> Self {
        Self {
            path: None,
            records: RwLock::new(Some(records)),
        }
    }

    /// Resolve a registry from the configured path, falling back to the
    /// default search paths when the configured file is absent.
    pub fn discover(configured: Option<&str>) -> Self {
        if let Some(p) = configured {
            if Path::new(p).exists() {
                return Self::new(p);
            }
            tracing::warn!(path = %p, "Configured registry snapshot not found, searching default paths");
        }
        for path in default_data_paths() {
            if path.exists() {
                tracing::info!(path = %path.display(), "Using registry snapshot");
                return Self::new(path);
            }
        }
        // Keep the configured path so per-call errors name it
        match configured {
            Some(p) => Self::new(p),
            None => Self {
                path: None,
                records: RwLock::new(None),
            },
        }
    }

    /// Force a (re)load from the snapshot file
    pub fn load(&self) -> Result<usize, RegistryError> {
        let path = self.path.as_ref().ok_or(RegistryError::NoSource)?;
        let records = load_patients_from_file(path)?;
        let count = records.len();
        *self.records.write() = Some(records);
        tracing::info!(count, path = %path.display(), "Loaded patient registry");
        Ok(count)
    }

    /// Current snapshot, loading lazily on first access.
    ///
    /// Load failures are returned, not cached; a later call retries.
    pub fn snapshot(&self) -> Result<Vec<PatientRecord>, RegistryError> {
        if let Some(records) = self.records.read().as_ref() {
            return Ok(records.clone());
        }
        self.load()?;
        Ok(self
            .records
            .read()
            .as_ref()
            .cloned()
            .unwrap_or_default())
    }

    /// Number of cached rows, if a snapshot has been loaded
    pub fn len(&self) -> usize {
        self.records.read().as_ref().map_or(0, |r| r.len())
    }

    /// Whether no snapshot is cached yet (or it is empty)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
