//! Deployment descriptor and runtime tooling for the NOFToken contract.
//!
//! Loads compiled artifacts, turns the migration descriptor into a deploy
//! request for a resolved network profile, and hands it to a [`Deployer`]:
//! either the dry-run planner or the TRON full-node HTTP deployer. Successful
//! deployments are recorded per network under the state directory.

pub mod artifact;
pub mod atomic_io;
pub mod deployer;
pub mod deployment_record;
pub mod deployment_runtime;
pub mod descriptor;
pub mod node_deployer;
pub mod tron_signing;

pub use artifact::{ArtifactError, ArtifactStore, ContractArtifact, DEFAULT_BUILD_DIR};
pub use deployer::{DeployPlan, DeployRequest, DeployedContract, Deployer, DryRunDeployer};
pub use deployment_record::{
    DeploymentRecord, DeploymentRecordFile, DeploymentRecordStore, DEFAULT_STATE_DIR,
};
pub use deployment_runtime::{
    execute_deployment, render_deployment_report, run_deployment, DeploymentReport,
    DeploymentRuntimeConfig,
};
pub use descriptor::{
    migrate, nof_token_descriptor, DeployArgs, DeploymentDescriptor, MigrationOutcome,
    NOF_TOKEN_ARTIFACT,
};
pub use node_deployer::{TronNodeDeployer, TronNodeDeployerConfig, DEFAULT_REQUEST_TIMEOUT_MS};
pub use tron_signing::{SigningError, TronSigner};
