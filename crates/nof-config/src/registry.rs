use tracing::debug;

use crate::credential::{CredentialPolicy, CredentialSource};
use crate::env_source::EnvSource;
use crate::error::ConfigError;
use crate::network_profile::{EndpointSpec, NetworkProfile, NetworkProfileSpec};

pub const HOST_PORT_ENV: &str = "HOST_PORT";
pub const DEFAULT_HOST_PORT: u16 = 9090;

// Key baked into the tronbox/tre docker image. Not a secret.
const DEVELOPMENT_PRIVATE_KEY: &str =
    "eaced1c6a6d2bb39afa2ce07ef2d0ecbd934fa0fcbd5266e91ea06359f4cd26e";

const BUILTIN_PROFILES: [NetworkProfileSpec; 4] = [
    NetworkProfileSpec {
        name: "mainnet",
        credential: CredentialSource::Env("PRIVATE_KEY_MAINNET"),
        endpoint: EndpointSpec::Fixed("https://api.trongrid.io"),
        user_fee_percentage: 0,
        fee_limit: 1_000_000_000,
        chain_id: "1",
    },
    NetworkProfileSpec {
        name: "shasta",
        credential: CredentialSource::Env("PRIVATE_KEY_SHASTA"),
        endpoint: EndpointSpec::Fixed("https://api.shasta.trongrid.io"),
        user_fee_percentage: 0,
        fee_limit: 15_000_000_000,
        chain_id: "2",
    },
    NetworkProfileSpec {
        name: "nile",
        credential: CredentialSource::Env("PRIVATE_KEY_NILE"),
        endpoint: EndpointSpec::Fixed("https://nile.trongrid.io"),
        user_fee_percentage: 100,
        fee_limit: 1_000 * 1_000_000,
        chain_id: "3",
    },
    NetworkProfileSpec {
        name: "development",
        credential: CredentialSource::DevelopmentLiteral(DEVELOPMENT_PRIVATE_KEY),
        endpoint: EndpointSpec::LocalHostPort,
        user_fee_percentage: 0,
        fee_limit: 1_000_000_000,
        chain_id: "9",
    },
];

/// Immutable name-to-profile table.
#[derive(Debug, Clone, Copy)]
pub struct NetworkRegistry {
    profiles: &'static [NetworkProfileSpec],
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NetworkRegistry {
    pub fn builtin() -> Self {
        Self {
            profiles: &BUILTIN_PROFILES,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.profiles.iter().map(|profile| profile.name).collect()
    }

    pub fn spec(&self, name: &str) -> Result<&'static NetworkProfileSpec, ConfigError> {
        let needle = name.trim();
        self.profiles
            .iter()
            .find(|profile| profile.name == needle)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: needle.to_string(),
                known: self.names().into_iter().map(str::to_string).collect(),
            })
    }

    /// Checks the invariants of every registered profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profiles
            .iter()
            .try_for_each(NetworkProfileSpec::validate)
    }

    /// Resolves `name` against the environment: endpoint port and credential
    /// are read at call time, never cached.
    pub fn resolve(
        &self,
        name: &str,
        env: &dyn EnvSource,
        policy: CredentialPolicy,
    ) -> Result<NetworkProfile, ConfigError> {
        let spec = self.spec(name)?;
        spec.validate()?;
        let endpoint = match spec.endpoint {
            EndpointSpec::Fixed(url) => url.to_string(),
            EndpointSpec::LocalHostPort => {
                format!("http://127.0.0.1:{}", resolve_host_port(env)?)
            }
        };
        let credential = spec.credential.resolve(spec.name, env, policy)?;
        debug!(
            network = spec.name,
            endpoint = %endpoint,
            credential_configured = credential.is_some(),
            "resolved network profile"
        );
        let profile = NetworkProfile {
            name: spec.name.to_string(),
            credential,
            credential_source: spec.credential.describe(),
            endpoint,
            user_fee_percentage: spec.user_fee_percentage,
            fee_limit: spec.fee_limit,
            chain_id: spec.chain_id.to_string(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// `HOST_PORT` when set and non-empty, otherwise 9090.
pub fn resolve_host_port(env: &dyn EnvSource) -> Result<u16, ConfigError> {
    let Some(raw) = env.non_empty_var(HOST_PORT_ENV) else {
        return Ok(DEFAULT_HOST_PORT);
    };
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidHostPort {
            env_var: HOST_PORT_ENV,
            value: raw,
        }),
    }
}
