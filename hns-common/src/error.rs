//! Holds error types for configuration loading.

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Figment failed to extract the layered configuration.
    #[error("Configuration loading failed: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// The effective chain parameters are unusable.
    #[error("Invalid chain parameters: {0}")]
    InvalidParams(String),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        ConfigError::Figment(Box::new(value))
    }
}
