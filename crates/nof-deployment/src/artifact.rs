use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BUILD_DIR: &str = "build/contracts";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("unknown artifact '{name}': {} does not exist (compile the contracts first)", .path.display())]
    UnknownArtifact { name: String, path: PathBuf },
    #[error("invalid artifact name '{0}'")]
    InvalidName(String),
    #[error("failed to read artifact {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("artifact '{name}' has no deployable bytecode")]
    EmptyBytecode { name: String },
    #[error("artifact '{name}' bytecode is not valid hex")]
    InvalidBytecode { name: String },
    #[error("artifact file for '{requested}' declares contract '{declared}'")]
    NameMismatch { requested: String, declared: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCompiler {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Compiled contract as emitted into the build directory (`<Name>.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: Value,
    pub bytecode: String,
    #[serde(default)]
    pub compiler: Option<ArtifactCompiler>,
}

impl ContractArtifact {
    pub fn from_json_str(raw: &str) -> Result<Self, ArtifactError> {
        let mut artifact = serde_json::from_str::<ContractArtifact>(raw)?;
        artifact.bytecode = normalize_bytecode(&artifact.bytecode);
        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode {
                name: artifact.contract_name,
            });
        }
        if artifact.bytecode.len() % 2 != 0
            || !artifact.bytecode.chars().all(|ch| ch.is_ascii_hexdigit())
        {
            return Err(ArtifactError::InvalidBytecode {
                name: artifact.contract_name,
            });
        }
        if artifact.abi.is_null() {
            artifact.abi = Value::Array(Vec::new());
        }
        Ok(artifact)
    }

    /// Bytecode as lowercase hex without `0x`.
    pub fn bytecode_hex(&self) -> &str {
        &self.bytecode
    }

    pub fn bytecode_size_bytes(&self) -> usize {
        self.bytecode.len() / 2
    }

    pub fn bytecode_sha256(&self) -> String {
        let bytes = hex::decode(&self.bytecode).unwrap_or_default();
        hex::encode(Sha256::digest(bytes))
    }

    pub fn compiler_version(&self) -> Option<&str> {
        self.compiler
            .as_ref()
            .map(|compiler| compiler.version.as_str())
            .filter(|version| !version.trim().is_empty())
    }
}

fn normalize_bytecode(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("0x")
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}

/// Build directory lookup, the equivalent of `artifacts.require(name)`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    build_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn artifact_path(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$');
        if !valid {
            return Err(ArtifactError::InvalidName(name.to_string()));
        }
        Ok(self.build_dir.join(format!("{name}.json")))
    }

    pub fn require(&self, name: &str) -> Result<ContractArtifact, ArtifactError> {
        let path = self.artifact_path(name)?;
        if !path.is_file() {
            return Err(ArtifactError::UnknownArtifact {
                name: name.to_string(),
                path,
            });
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ArtifactError::Read {
            path: path.clone(),
            source,
        })?;
        let artifact = ContractArtifact::from_json_str(&raw)?;
        if artifact.contract_name != name {
            return Err(ArtifactError::NameMismatch {
                requested: name.to_string(),
                declared: artifact.contract_name,
            });
        }
        debug!(
            artifact = name,
            path = %path.display(),
            bytecode_size_bytes = artifact.bytecode_size_bytes(),
            "loaded contract artifact"
        );
        Ok(artifact)
    }
}
