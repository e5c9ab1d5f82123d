use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use nof_config::{compiler_options, CredentialPolicy, EnvSource, NetworkProfile, NetworkRegistry};
use serde::Serialize;
use tracing::info;

use crate::artifact::ArtifactStore;
use crate::deployer::{DeployPlan, DeployedContract, Deployer, DryRunDeployer};
use crate::deployment_record::{DeploymentRecord, DeploymentRecordStore};
use crate::descriptor::migrate;
use crate::node_deployer::{TronNodeDeployer, TronNodeDeployerConfig};

const DEPLOYMENT_REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct DeploymentRuntimeConfig {
    pub network: String,
    pub build_dir: PathBuf,
    pub state_dir: PathBuf,
    pub dry_run: bool,
    pub credential_policy: CredentialPolicy,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentReport {
    pub schema_version: u32,
    pub mode: String,
    pub plan: DeployPlan,
    pub deployed: DeployedContract,
    pub record_path: Option<String>,
}

/// Resolves the network, runs the migration against a dry-run or node-backed
/// deployer, and records broadcast deployments.
pub fn run_deployment(
    config: &DeploymentRuntimeConfig,
    env: &dyn EnvSource,
) -> Result<DeploymentReport> {
    compiler_options().validate()?;
    let profile = NetworkRegistry::builtin().resolve(
        &config.network,
        env,
        config.credential_policy,
    )?;
    info!(
        network = %profile.name,
        endpoint = %profile.endpoint,
        chain_id = %profile.chain_id,
        dry_run = config.dry_run,
        "deployment starting"
    );
    let artifacts = ArtifactStore::new(&config.build_dir);

    if config.dry_run {
        let mut deployer = DryRunDeployer::default();
        return execute_deployment(&mut deployer, &profile, &artifacts, None);
    }
    let mut deployer = TronNodeDeployer::new(TronNodeDeployerConfig {
        request_timeout_ms: config.request_timeout_ms,
    })?;
    let records = DeploymentRecordStore::new(&config.state_dir);
    execute_deployment(&mut deployer, &profile, &artifacts, Some(&records))
}

/// Runs the migration through `deployer`. A broadcast deployment is appended
/// to `records` when a store is given.
pub fn execute_deployment(
    deployer: &mut dyn Deployer,
    profile: &NetworkProfile,
    artifacts: &ArtifactStore,
    records: Option<&DeploymentRecordStore>,
) -> Result<DeploymentReport> {
    // The record file must be usable before anything is broadcast.
    if let Some(records) = records {
        records.load(&profile.name)?;
    }
    let outcome = migrate(deployer, profile, artifacts)?;
    let mut record_path = None;
    if let (true, Some(records)) = (outcome.deployed.broadcast, records) {
        let path = build_record(&outcome.plan, &outcome.deployed)
            .and_then(|record| records.append(record))
            .with_context(|| {
                format!(
                    "contract {} was deployed in transaction {} but recording it failed",
                    display_optional(outcome.deployed.contract_address.as_deref()),
                    display_optional(outcome.deployed.txid.as_deref())
                )
            })?;
        record_path = Some(path.display().to_string());
    }
    Ok(DeploymentReport {
        schema_version: DEPLOYMENT_REPORT_SCHEMA_VERSION,
        mode: if outcome.deployed.broadcast {
            "broadcast".to_string()
        } else {
            "dry-run".to_string()
        },
        plan: outcome.plan,
        deployed: outcome.deployed,
        record_path,
    })
}

fn build_record(plan: &DeployPlan, deployed: &DeployedContract) -> Result<DeploymentRecord> {
    let contract_address = deployed
        .contract_address
        .clone()
        .ok_or_else(|| anyhow!("broadcast deployment returned no contract address"))?;
    let txid = deployed
        .txid
        .clone()
        .ok_or_else(|| anyhow!("broadcast deployment returned no transaction id"))?;
    Ok(DeploymentRecord {
        network: plan.network.clone(),
        chain_id: plan.chain_id.clone(),
        artifact: plan.artifact.clone(),
        contract_address,
        txid,
        owner_address: deployed.owner_address.clone().unwrap_or_default(),
        consume_user_resource_percent: plan.args.consume_user_resource_percent,
        origin_energy_limit: plan.args.origin_energy_limit,
        fee_limit: plan.args.fee_limit,
        user_fee_percentage: plan.args.user_fee_percentage,
        compiler_version: plan.compiler_version.clone(),
        bytecode_sha256: plan.bytecode_sha256.clone(),
        deployed_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn display_optional(value: Option<&str>) -> &str {
    value.unwrap_or("none")
}

pub fn render_deployment_report(report: &DeploymentReport) -> String {
    let plan = &report.plan;
    let args = plan
        .args
        .ordered()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut lines = vec![
        format!(
            "deployment: mode={} network={} chain_id={} endpoint={}",
            report.mode, plan.network, plan.chain_id, plan.endpoint
        ),
        format!(
            "artifact: name={} bytecode_bytes={} bytecode_sha256={} compiler={}",
            plan.artifact, plan.bytecode_size_bytes, plan.bytecode_sha256, plan.compiler_version
        ),
        format!("deploy args: {args}"),
        format!(
            "network defaults: fee_limit={} user_fee_percentage={} credential={}",
            plan.network_fee_limit, plan.network_user_fee_percentage, plan.credential_source
        ),
        format!(
            "owner: address={}",
            display_optional(report.deployed.owner_address.as_deref())
        ),
    ];
    if report.deployed.broadcast {
        lines.push(format!(
            "contract: address={} txid={}",
            display_optional(report.deployed.contract_address.as_deref()),
            display_optional(report.deployed.txid.as_deref())
        ));
    }
    if let Some(path) = report.record_path.as_deref() {
        lines.push(format!("record: path={path}"));
    }
    lines.join("\n")
}
