use anyhow::Result;
use nof_config::{compiler_options, NetworkProfile};
use serde::Serialize;
use tracing::{info, warn};

use crate::artifact::ArtifactStore;
use crate::deployer::{DeployPlan, DeployRequest, DeployedContract, Deployer};

pub const NOF_TOKEN_ARTIFACT: &str = "NOFToken";

/// Deploy options passed with the contract creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeployArgs {
    pub consume_user_resource_percent: u8,
    #[serde(rename = "originEnergyLimit")]
    pub origin_energy_limit: u64,
    pub fee_limit: u64,
    #[serde(rename = "userFeePercentage")]
    pub user_fee_percentage: u8,
}

impl DeployArgs {
    /// Arguments in declaration order, keyed by their migration names.
    pub fn ordered(&self) -> [(&'static str, u64); 4] {
        [
            (
                "consume_user_resource_percent",
                u64::from(self.consume_user_resource_percent),
            ),
            ("originEnergyLimit", self.origin_energy_limit),
            ("fee_limit", self.fee_limit),
            ("userFeePercentage", u64::from(self.user_fee_percentage)),
        ]
    }
}

/// One artifact plus the literal arguments it is deployed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeploymentDescriptor {
    pub artifact: &'static str,
    pub args: DeployArgs,
}

/// The NOFToken migration. Arguments do not vary by network.
pub fn nof_token_descriptor() -> DeploymentDescriptor {
    DeploymentDescriptor {
        artifact: NOF_TOKEN_ARTIFACT,
        args: DeployArgs {
            consume_user_resource_percent: 0,
            origin_energy_limit: 10_000_000,
            fee_limit: 1_000_000_000,
            user_fee_percentage: 0,
        },
    }
}

/// Deploy plan and outcome of one migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    pub plan: DeployPlan,
    pub deployed: DeployedContract,
}

/// Runs the migration: requires the NOFToken artifact and issues exactly one
/// deploy through `deployer`.
pub fn migrate(
    deployer: &mut dyn Deployer,
    network: &NetworkProfile,
    artifacts: &ArtifactStore,
) -> Result<MigrationOutcome> {
    let descriptor = nof_token_descriptor();
    let artifact = artifacts.require(descriptor.artifact)?;
    let compiler = compiler_options();
    if let Some(recorded) = artifact.compiler_version() {
        if !compiler.matches_compiler_version(recorded) {
            warn!(
                artifact = descriptor.artifact,
                artifact_compiler = recorded,
                configured_compiler = compiler.version,
                "artifact was built with a different compiler version"
            );
        }
    }
    if descriptor.args.fee_limit > network.fee_limit {
        warn!(
            network = %network.name,
            deploy_fee_limit = descriptor.args.fee_limit,
            network_fee_limit = network.fee_limit,
            "deploy fee limit exceeds network default"
        );
    }
    let request = DeployRequest {
        network: network.clone(),
        artifact,
        args: descriptor.args,
        compiler: compiler.clone(),
    };
    let plan = request.plan()?;
    info!(
        network = %network.name,
        artifact = descriptor.artifact,
        "issuing deploy"
    );
    let deployed = deployer.deploy(&request)?;
    Ok(MigrationOutcome { plan, deployed })
}
