use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("no configured encoding decodes {path} (tried: {tried})")]
    Encoding { path: String, tried: String },

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("failed to persist cleaned output to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("cleaning {path} failed: {source}")]
    Pipeline {
        path: String,
        #[source]
        source: Box<CleanerError>,
    },
}

pub type Result<T> = std::result::Result<T, CleanerError>;
