use anyhow::Result;
use nof_config::{CompilerOptions, NetworkProfile};
use serde::Serialize;

use crate::artifact::ContractArtifact;
use crate::descriptor::DeployArgs;
use crate::tron_signing::TronSigner;

/// Everything a deployer needs to create one contract on one network.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
    pub network: NetworkProfile,
    pub artifact: ContractArtifact,
    pub args: DeployArgs,
    pub compiler: CompilerOptions,
}

impl DeployRequest {
    /// Owner address derived from the network credential, when one is configured.
    pub fn owner_address(&self) -> Result<Option<String>> {
        let Some(key) = self.network.credential.as_ref() else {
            return Ok(None);
        };
        let signer = TronSigner::from_private_key(key)?;
        Ok(Some(signer.owner_address_hex()))
    }

    pub fn plan(&self) -> Result<DeployPlan> {
        Ok(DeployPlan {
            network: self.network.name.clone(),
            endpoint: self.network.endpoint.clone(),
            chain_id: self.network.chain_id.clone(),
            network_fee_limit: self.network.fee_limit,
            network_user_fee_percentage: self.network.user_fee_percentage,
            credential_source: self.network.credential_source.clone(),
            owner_address: self.owner_address()?,
            artifact: self.artifact.contract_name.clone(),
            bytecode_size_bytes: self.artifact.bytecode_size_bytes(),
            bytecode_sha256: self.artifact.bytecode_sha256(),
            args: self.args,
            compiler_version: self.compiler.version.to_string(),
            artifact_compiler_version: self.artifact.compiler_version().map(str::to_string),
        })
    }
}

/// Serializable summary of a deploy request. Never contains key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployPlan {
    pub network: String,
    pub endpoint: String,
    pub chain_id: String,
    pub network_fee_limit: u64,
    pub network_user_fee_percentage: u8,
    pub credential_source: String,
    pub owner_address: Option<String>,
    pub artifact: String,
    pub bytecode_size_bytes: usize,
    pub bytecode_sha256: String,
    pub args: DeployArgs,
    pub compiler_version: String,
    pub artifact_compiler_version: Option<String>,
}

/// Result of a deploy. Address and txid are absent when nothing was broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedContract {
    pub contract_address: Option<String>,
    pub txid: Option<String>,
    pub owner_address: Option<String>,
    pub broadcast: bool,
}

/// Capability injected into the migration; issues the deploy transaction.
pub trait Deployer {
    fn deploy(&mut self, request: &DeployRequest) -> Result<DeployedContract>;
}

/// Records requests and reports what would be deployed without contacting a node.
#[derive(Debug, Default)]
pub struct DryRunDeployer {
    requests: Vec<DeployRequest>,
}

impl DryRunDeployer {
    pub fn requests(&self) -> &[DeployRequest] {
        &self.requests
    }
}

impl Deployer for DryRunDeployer {
    fn deploy(&mut self, request: &DeployRequest) -> Result<DeployedContract> {
        let owner_address = request.owner_address()?;
        self.requests.push(request.clone());
        Ok(DeployedContract {
            contract_address: None,
            txid: None,
            owner_address,
            broadcast: false,
        })
    }
}
