use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::atomic_io::write_text_atomic;

pub const DEFAULT_STATE_DIR: &str = ".nof/deployments";
const DEPLOYMENT_RECORD_SCHEMA_VERSION: u32 = 1;

fn deployment_record_schema_version() -> u32 {
    DEPLOYMENT_RECORD_SCHEMA_VERSION
}

/// One successful deployment on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: String,
    pub chain_id: String,
    pub artifact: String,
    pub contract_address: String,
    pub txid: String,
    #[serde(default)]
    pub owner_address: String,
    pub consume_user_resource_percent: u8,
    pub origin_energy_limit: u64,
    pub fee_limit: u64,
    pub user_fee_percentage: u8,
    pub compiler_version: String,
    #[serde(default)]
    pub bytecode_sha256: String,
    pub deployed_at: String,
}

/// Per-network record file; the newest deployment is `latest`, older ones move to `history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecordFile {
    #[serde(default = "deployment_record_schema_version")]
    pub schema_version: u32,
    pub network: String,
    #[serde(default)]
    pub latest: Option<DeploymentRecord>,
    #[serde(default)]
    pub history: Vec<DeploymentRecord>,
}

impl DeploymentRecordFile {
    fn empty(network: &str) -> Self {
        Self {
            schema_version: DEPLOYMENT_RECORD_SCHEMA_VERSION,
            network: network.to_string(),
            latest: None,
            history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentRecordStore {
    state_dir: PathBuf,
}

impl DeploymentRecordStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn record_path(&self, network: &str) -> PathBuf {
        self.state_dir.join(format!("{network}.json"))
    }

    pub fn load(&self, network: &str) -> Result<DeploymentRecordFile> {
        let path = self.record_path(network);
        if !path.exists() {
            return Ok(DeploymentRecordFile::empty(network));
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read deployment record {}", path.display()))?;
        let file = serde_json::from_str::<DeploymentRecordFile>(&raw)
            .with_context(|| format!("failed to parse deployment record {}", path.display()))?;
        if file.schema_version != DEPLOYMENT_RECORD_SCHEMA_VERSION {
            bail!(
                "unsupported deployment record schema_version {} in {} (expected {})",
                file.schema_version,
                path.display(),
                DEPLOYMENT_RECORD_SCHEMA_VERSION
            );
        }
        if file.network != network {
            bail!(
                "deployment record {} belongs to network '{}'",
                path.display(),
                file.network
            );
        }
        Ok(file)
    }

    /// Makes `record` the latest deployment for its network and returns the record path.
    pub fn append(&self, record: DeploymentRecord) -> Result<PathBuf> {
        let mut file = self.load(&record.network)?;
        if let Some(previous) = file.latest.take() {
            file.history.push(previous);
        }
        let network = record.network.clone();
        let contract_address = record.contract_address.clone();
        file.latest = Some(record);

        let path = self.record_path(&network);
        let mut payload = serde_json::to_string_pretty(&file)
            .context("failed to serialize deployment record")?;
        payload.push('\n');
        write_text_atomic(&path, &payload)?;
        info!(
            network = %network,
            contract_address = %contract_address,
            path = %path.display(),
            "deployment recorded"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{DeploymentRecord, DeploymentRecordStore};
    use tempfile::tempdir;

    fn sample_record(network: &str, address: &str) -> DeploymentRecord {
        DeploymentRecord {
            network: network.to_string(),
            chain_id: "3".to_string(),
            artifact: "NOFToken".to_string(),
            contract_address: address.to_string(),
            txid: "ab".repeat(32),
            owner_address: "415f8ab8bf8bf786c1673882174f895b4dc1e06ae1".to_string(),
            consume_user_resource_percent: 0,
            origin_energy_limit: 10_000_000,
            fee_limit: 1_000_000_000,
            user_fee_percentage: 0,
            compiler_version: "0.8.20".to_string(),
            bytecode_sha256: String::new(),
            deployed_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn unit_load_returns_empty_file_for_unknown_network() {
        let temp = tempdir().expect("tempdir");
        let file = DeploymentRecordStore::new(temp.path())
            .load("nile")
            .expect("load");
        assert_eq!(file.network, "nile");
        assert!(file.latest.is_none());
        assert!(file.history.is_empty());
    }

    #[test]
    fn functional_append_moves_previous_latest_into_history() {
        let temp = tempdir().expect("tempdir");
        let store = DeploymentRecordStore::new(temp.path().join("deployments"));
        store
            .append(sample_record("nile", "41aa"))
            .expect("first append");
        let path = store
            .append(sample_record("nile", "41bb"))
            .expect("second append");

        assert_eq!(path, store.record_path("nile"));
        let file = store.load("nile").expect("load");
        assert_eq!(
            file.latest.as_ref().map(|record| record.contract_address.as_str()),
            Some("41bb")
        );
        assert_eq!(file.history.len(), 1);
        assert_eq!(file.history[0].contract_address, "41aa");
    }

    #[test]
    fn regression_load_rejects_unsupported_schema_version() {
        let temp = tempdir().expect("tempdir");
        let store = DeploymentRecordStore::new(temp.path());
        std::fs::write(
            store.record_path("nile"),
            r#"{"schema_version": 99, "network": "nile"}"#,
        )
        .expect("write record");
        let error = store.load("nile").expect_err("schema mismatch");
        assert!(error
            .to_string()
            .contains("unsupported deployment record schema_version 99"));
    }
}
