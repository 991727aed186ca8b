use crate::error::{CleanerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration for the cleaning pipeline. Loaded from a TOML file;
/// every field has a default matching the standard deployment layout, so a
/// missing file or a partial file both work.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory watched for raw exports
    pub input_dir: PathBuf,
    /// The single cleaned artifact, fully replaced on each run
    pub output_file: PathBuf,
    pub log_dir: PathBuf,
    /// Encodings tried in order when reading a raw export
    pub encodings: Vec<String>,
    pub columns: ColumnNames,
    /// Case-insensitive substrings marking date columns
    pub date_keywords: Vec<String>,
    /// Directory poll cadence for `watch` mode
    pub poll_interval_secs: u64,
    /// Optional viewer launched with the output path after a successful run
    pub dashboard_command: Option<String>,
}

/// Exact header names of the raw export and of the derived output columns.
/// The ticketing tool exports localized headers, so these must be
/// configurable but match exactly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub id: String,
    pub title: String,
    pub technicians: String,
    pub requester: String,
    pub technician_out: String,
    pub requester_out: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            title: "Titre".to_string(),
            technicians: "Attribué à - Technicien".to_string(),
            requester: "Demandeur - Demandeur".to_string(),
            technician_out: "Technicien".to_string(),
            requester_out: "Demandeur".to_string(),
        }
    }
}

impl ColumnNames {
    /// Headers the Validator requires before anything else runs.
    pub fn required(&self) -> [&str; 4] {
        [
            self.id.as_str(),
            self.title.as_str(),
            self.technicians.as_str(),
            self.requester.as_str(),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("raw"),
            output_file: PathBuf::from("processed/cleaned_latest.csv"),
            log_dir: PathBuf::from("logs"),
            encodings: vec![
                "utf-8".to_string(),
                "latin1".to_string(),
                "cp1252".to_string(),
            ],
            columns: ColumnNames::default(),
            // "cré" catches the localized created/creation headers
            date_keywords: vec!["date".to_string(), "cré".to_string()],
            poll_interval_secs: 60,
            dashboard_command: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
