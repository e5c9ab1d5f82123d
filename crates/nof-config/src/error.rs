use thiserror::Error;

/// Error returned when a network profile cannot be resolved or is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown network '{name}' (known networks: {})", .known.join(", "))]
    UnknownNetwork { name: String, known: Vec<String> },
    #[error("network '{network}' requires credential env var {env_var} to be set")]
    MissingCredential {
        network: String,
        env_var: &'static str,
    },
    #[error("network '{network}' credential is invalid: {reason}")]
    InvalidCredential { network: String, reason: String },
    #[error("invalid {env_var} value '{value}': expected a port in 1..=65535")]
    InvalidHostPort { env_var: &'static str, value: String },
    #[error("network '{network}' user fee percentage {value} must be in range 0..=100")]
    InvalidUserFeePercentage { network: String, value: u8 },
    #[error("network '{network}' fee limit must be greater than 0")]
    InvalidFeeLimit { network: String },
    #[error("network '{network}' is missing required field '{field}'")]
    MissingField {
        network: String,
        field: &'static str,
    },
    #[error("invalid compiler options: {0}")]
    InvalidCompilerOptions(String),
}
