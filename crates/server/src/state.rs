//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use outreach_config::Settings;
use outreach_registry::PatientRegistry;
use outreach_tools::{create_gateway_registry, ToolRegistry};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<Settings>,
    /// Patient registry snapshot
    pub patients: Arc<PatientRegistry>,
    /// Tool registry
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    /// Create application state with an explicit patient registry
    pub fn new(config: Settings, patients: Arc<PatientRegistry>) -> Self {
        let tools = Arc::new(create_gateway_registry(patients.clone()));
        Self {
            config: Arc::new(config),
            patients,
            tools,
        }
    }

    /// Create application state from settings alone.
    ///
    /// Resolves the registry snapshot from the configured path (with
    /// default-path fallback). When `registry.required_on_start` is set
    /// the snapshot must load here; otherwise load failures are left to
    /// surface per validation call.
    pub fn from_settings(config: Settings) -> Result<Self, ServerError> {
        let patients = Arc::new(PatientRegistry::discover(Some(&config.registry.data_path)));

        match patients.load() {
            Ok(count) => {
                tracing::info!(count, "Patient registry ready");
            }
            Err(e) if config.registry.required_on_start => {
                return Err(ServerError::Registry(e.to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Patient registry not loaded at startup; validation will report source errors");
            }
        }

        Ok(Self::new(config, patients))
    }

    /// Reload the patient registry snapshot from its source file
    pub fn reload_registry(&self) -> Result<usize, ServerError> {
        let count = self
            .patients
            .load()
            .map_err(|e| ServerError::Registry(e.to_string()))?;
        tracing::info!(count, "Patient registry reloaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_registry::PatientRecord;
    use std::io::Write;

    fn snapshot_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn settings_for(path: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.registry.data_path = path.display().to_string();
        settings
    }

    #[test]
    fn test_state_exposes_full_catalog() {
        let patients = Arc::new(PatientRegistry::with_records(vec![
            PatientRecord::default(),
        ]));
        let state = AppState::new(Settings::default(), patients);
        assert_eq!(state.tools.len(), outreach_tools::TOOL_NAMES.len());
    }

    #[test]
    fn test_from_settings_loads_snapshot() {
        let file = snapshot_file(r#"{"patients": [{"Member ID": "M1"}]}"#);
        let state = AppState::from_settings(settings_for(file.path())).unwrap();
        assert_eq!(state.patients.len(), 1);
    }

    #[test]
    fn test_from_settings_tolerates_broken_snapshot() {
        let file = snapshot_file("not json");
        let state = AppState::from_settings(settings_for(file.path())).unwrap();
        assert!(state.patients.is_empty());
    }

    #[test]
    fn test_from_settings_required_snapshot_fails_fast() {
        let file = snapshot_file("not json");
        let mut settings = settings_for(file.path());
        settings.registry.required_on_start = true;
        assert!(AppState::from_settings(settings).is_err());
    }

    #[test]
    fn test_reload_registry_counts_rows() {
        let file = snapshot_file(r#"{"patients": [{"Member ID": "M1"}, {"Member ID": "M2"}]}"#);
        let state = AppState::from_settings(settings_for(file.path())).unwrap();
        assert_eq!(state.reload_registry().unwrap(), 2);
    }
}
