use serde::Serialize;

use crate::credential::{CredentialSource, PrivateKey};
use crate::error::ConfigError;

/// How a profile's node endpoint is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSpec {
    Fixed(&'static str),
    /// `http://127.0.0.1:<port>` where the port comes from `HOST_PORT`.
    LocalHostPort,
}

/// Static registry entry, resolved into a [`NetworkProfile`] per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfileSpec {
    pub name: &'static str,
    pub credential: CredentialSource,
    pub endpoint: EndpointSpec,
    pub user_fee_percentage: u8,
    pub fee_limit: u64,
    pub chain_id: &'static str,
}

impl NetworkProfileSpec {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                network: self.name.to_string(),
                field: "name",
            });
        }
        if self.chain_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                network: self.name.to_string(),
                field: "chain_id",
            });
        }
        if let EndpointSpec::Fixed(url) = self.endpoint {
            if url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    network: self.name.to_string(),
                    field: "endpoint",
                });
            }
        }
        validate_fee_fields(self.name, self.user_fee_percentage, self.fee_limit)
    }
}

/// Connection and fee parameters for one deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub name: String,
    #[serde(skip)]
    pub credential: Option<PrivateKey>,
    pub credential_source: String,
    pub endpoint: String,
    pub user_fee_percentage: u8,
    pub fee_limit: u64,
    pub chain_id: String,
}

impl NetworkProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField {
                network: self.name.clone(),
                field: "endpoint",
            });
        }
        if self.chain_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                network: self.name.clone(),
                field: "chain_id",
            });
        }
        validate_fee_fields(&self.name, self.user_fee_percentage, self.fee_limit)
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Endpoint without trailing slashes, ready for path joins.
    pub fn api_base(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

fn validate_fee_fields(
    network: &str,
    user_fee_percentage: u8,
    fee_limit: u64,
) -> Result<(), ConfigError> {
    if user_fee_percentage > 100 {
        return Err(ConfigError::InvalidUserFeePercentage {
            network: network.to_string(),
            value: user_fee_percentage,
        });
    }
    if fee_limit == 0 {
        return Err(ConfigError::InvalidFeeLimit {
            network: network.to_string(),
        });
    }
    Ok(())
}
