use serde::{Serialize, Serializer};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptimizerOptions {
    pub enabled: bool,
    pub runs: u32,
}

/// solc settings shared by every network. There is no per-network override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub version: &'static str,
    pub optimizer: OptimizerOptions,
    pub evm_version: &'static str,
    pub via_ir: bool,
}

/// `settings` object of a solc standard-json input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolcSettings {
    pub optimizer: OptimizerOptions,
    pub evm_version: &'static str,
    #[serde(rename = "viaIR")]
    pub via_ir: bool,
}

#[derive(Serialize)]
struct CompilerOptionsView {
    version: &'static str,
    #[serde(flatten)]
    settings: SolcSettings,
}

impl Serialize for CompilerOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CompilerOptionsView {
            version: self.version,
            settings: self.solc_settings(),
        }
        .serialize(serializer)
    }
}

static COMPILER_OPTIONS: CompilerOptions = CompilerOptions {
    version: "0.8.20",
    optimizer: OptimizerOptions {
        enabled: true,
        runs: 100,
    },
    evm_version: "istanbul",
    via_ir: true,
};

/// Returns the process-wide compiler configuration.
pub fn compiler_options() -> &'static CompilerOptions {
    &COMPILER_OPTIONS
}

impl CompilerOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::InvalidCompilerOptions(
                "compiler version must not be empty".to_string(),
            ));
        }
        if self.optimizer.runs == 0 {
            return Err(ConfigError::InvalidCompilerOptions(
                "optimizer runs must be at least 1".to_string(),
            ));
        }
        if self.evm_version.trim().is_empty() {
            return Err(ConfigError::InvalidCompilerOptions(
                "evm version must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn solc_settings(&self) -> SolcSettings {
        SolcSettings {
            optimizer: self.optimizer,
            evm_version: self.evm_version,
            via_ir: self.via_ir,
        }
    }

    /// True when an artifact's recorded compiler version was produced by this
    /// configuration, e.g. `0.8.20+commit.a1b79de6`.
    pub fn matches_compiler_version(&self, recorded: &str) -> bool {
        let recorded = recorded.trim().trim_start_matches('v');
        recorded == self.version
            || recorded
                .strip_prefix(self.version)
                .is_some_and(|rest| rest.starts_with('+'))
    }
}
