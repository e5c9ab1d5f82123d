use clap::ValueEnum;

use nof_config::CredentialPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliCredentialPolicy {
    Strict,
    Permissive,
}

impl From<CliCredentialPolicy> for CredentialPolicy {
    fn from(value: CliCredentialPolicy) -> Self {
        match value {
            CliCredentialPolicy::Strict => CredentialPolicy::Strict,
            CliCredentialPolicy::Permissive => CredentialPolicy::Permissive,
        }
    }
}
