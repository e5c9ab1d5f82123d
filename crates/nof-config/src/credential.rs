use std::fmt;

use crate::env_source::EnvSource;
use crate::error::ConfigError;

const PRIVATE_KEY_HEX_LEN: usize = 64;

/// Where a network profile obtains its deployer private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read from the named environment variable at invocation time.
    Env(&'static str),
    /// Fixed, publicly known key for local development nodes only.
    DevelopmentLiteral(&'static str),
}

impl CredentialSource {
    pub fn env_var(self) -> Option<&'static str> {
        match self {
            Self::Env(name) => Some(name),
            Self::DevelopmentLiteral(_) => None,
        }
    }

    pub fn describe(self) -> String {
        match self {
            Self::Env(name) => format!("env:{name}"),
            Self::DevelopmentLiteral(_) => "literal:development".to_string(),
        }
    }

    /// Resolves the key for `network`. Under [`CredentialPolicy::Permissive`]
    /// an unset variable yields `Ok(None)` instead of an error.
    pub fn resolve(
        self,
        network: &str,
        env: &dyn EnvSource,
        policy: CredentialPolicy,
    ) -> Result<Option<PrivateKey>, ConfigError> {
        let raw = match self {
            Self::DevelopmentLiteral(key) => key.to_string(),
            Self::Env(env_var) => match env.non_empty_var(env_var) {
                Some(value) => value,
                None if policy == CredentialPolicy::Permissive => return Ok(None),
                None => {
                    return Err(ConfigError::MissingCredential {
                        network: network.to_string(),
                        env_var,
                    })
                }
            },
        };
        PrivateKey::parse(&raw)
            .map(Some)
            .map_err(|reason| ConfigError::InvalidCredential {
                network: network.to_string(),
                reason,
            })
    }
}

/// How strictly missing credentials are treated during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    #[default]
    Strict,
    Permissive,
}

/// secp256k1 private key parsed from hex. Formatting never reveals the key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let candidate = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if candidate.len() != PRIVATE_KEY_HEX_LEN {
            return Err(format!(
                "expected {PRIVATE_KEY_HEX_LEN} hex characters, got {}",
                candidate.len()
            ));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(candidate, &mut bytes)
            .map_err(|_| "private key must be hex encoded".to_string())?;
        Ok(Self(bytes))
    }

    pub fn expose_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialPolicy, CredentialSource, PrivateKey};
    use crate::env_source::MapEnv;
    use crate::error::ConfigError;

    const SAMPLE_KEY: &str = "eaced1c6a6d2bb39afa2ce07ef2d0ecbd934fa0fcbd5266e91ea06359f4cd26e";

    #[test]
    fn unit_private_key_parse_accepts_prefixed_and_uppercase_hex() {
        let key = PrivateKey::parse(&format!("0x{}", SAMPLE_KEY.to_ascii_uppercase()))
            .expect("prefixed key should parse");
        assert_eq!(key.expose_hex(), SAMPLE_KEY);
        assert_eq!(key.as_bytes()[0], 0xea);
    }

    #[test]
    fn unit_private_key_parse_rejects_short_and_non_hex_values() {
        assert!(PrivateKey::parse("abc").is_err());
        assert!(PrivateKey::parse(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn unit_private_key_formatting_is_redacted() {
        let key = PrivateKey::parse(SAMPLE_KEY).expect("key");
        assert!(!format!("{key:?}").contains("eaced1"));
        assert_eq!(key.to_string(), "<redacted>");
    }

    #[test]
    fn functional_env_credential_strict_policy_fails_when_unset() {
        let error = CredentialSource::Env("PRIVATE_KEY_SHASTA")
            .resolve("shasta", &MapEnv::new(), CredentialPolicy::Strict)
            .expect_err("missing env var should fail");
        assert_eq!(
            error,
            ConfigError::MissingCredential {
                network: "shasta".to_string(),
                env_var: "PRIVATE_KEY_SHASTA",
            }
        );
    }

    #[test]
    fn functional_env_credential_permissive_policy_yields_none_when_unset() {
        let resolved = CredentialSource::Env("PRIVATE_KEY_SHASTA")
            .resolve("shasta", &MapEnv::new(), CredentialPolicy::Permissive)
            .expect("permissive resolution");
        assert!(resolved.is_none());
    }

    #[test]
    fn regression_malformed_env_credential_fails_even_when_permissive() {
        let env = MapEnv::from([("PRIVATE_KEY_NILE", "not-a-key")]);
        let error = CredentialSource::Env("PRIVATE_KEY_NILE")
            .resolve("nile", &env, CredentialPolicy::Permissive)
            .expect_err("malformed key should fail");
        assert!(matches!(error, ConfigError::InvalidCredential { .. }));
        assert!(!error.to_string().contains("not-a-key"));
    }
}
