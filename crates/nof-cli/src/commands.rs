use anyhow::{bail, Context, Result};
use nof_config::{
    compiler_options, CompilerOptions, CredentialPolicy, EnvSource, NetworkProfile,
    NetworkRegistry,
};
use nof_deployment::{render_deployment_report, run_deployment, DeploymentRuntimeConfig};
use serde::Serialize;
use serde_json::json;

use crate::Cli;

#[derive(Debug, Clone, Serialize)]
struct NetworkListing {
    #[serde(flatten)]
    profile: NetworkProfile,
    credential_configured: bool,
}

pub fn validate_cli(cli: &Cli) -> Result<()> {
    let policy = CredentialPolicy::from(cli.credential_policy);
    if policy == CredentialPolicy::Permissive && !cli.dry_run && !cli.list_networks {
        bail!("--credential-policy permissive requires --dry-run");
    }
    if cli.network.trim().is_empty() {
        bail!("--network cannot be empty");
    }
    Ok(())
}

pub fn runtime_config_from_cli(cli: &Cli) -> DeploymentRuntimeConfig {
    DeploymentRuntimeConfig {
        network: cli.network.trim().to_string(),
        build_dir: cli.build_dir.clone(),
        state_dir: cli.state_dir.clone(),
        dry_run: cli.dry_run,
        credential_policy: cli.credential_policy.into(),
        request_timeout_ms: cli.request_timeout_ms,
    }
}

/// Resolves every registered network without requiring credentials.
fn list_network_profiles(env: &dyn EnvSource) -> Result<Vec<NetworkListing>> {
    let registry = NetworkRegistry::builtin();
    registry
        .names()
        .into_iter()
        .map(|name| {
            let profile = registry
                .resolve(name, env, CredentialPolicy::Permissive)
                .with_context(|| format!("failed to resolve network '{name}'"))?;
            Ok(NetworkListing {
                credential_configured: profile.has_credential(),
                profile,
            })
        })
        .collect()
}

fn render_network_listings(listings: &[NetworkListing]) -> String {
    listings
        .iter()
        .map(|listing| {
            let profile = &listing.profile;
            format!(
                "network={} chain_id={} endpoint={} fee_limit={} user_fee_percentage={} credential={} configured={}",
                profile.name,
                profile.chain_id,
                profile.endpoint,
                profile.fee_limit,
                profile.user_fee_percentage,
                profile.credential_source,
                listing.credential_configured
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_compiler_options(options: &CompilerOptions) -> String {
    format!(
        "compiler: solc version={} optimizer_enabled={} optimizer_runs={} evm_version={} via_ir={}",
        options.version,
        options.optimizer.enabled,
        options.optimizer.runs,
        options.evm_version,
        options.via_ir
    )
}

fn render_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("failed to render {what} json"))
}

/// Runs one invocation and returns what should be printed on stdout.
pub fn render_cli_output(cli: &Cli, env: &dyn EnvSource) -> Result<String> {
    validate_cli(cli)?;

    if cli.list_networks {
        let listings = list_network_profiles(env)?;
        return if cli.json {
            render_json(&listings, "network list")
        } else {
            Ok(render_network_listings(&listings))
        };
    }

    if cli.show_compiler {
        let options = compiler_options();
        options.validate()?;
        return if cli.json {
            render_json(
                &json!({
                    "compiler": options,
                    "solc_settings": options.solc_settings(),
                }),
                "compiler options",
            )
        } else {
            Ok(render_compiler_options(options))
        };
    }

    let report = run_deployment(&runtime_config_from_cli(cli), env)?;
    if cli.json {
        render_json(&report, "deployment report")
    } else {
        Ok(render_deployment_report(&report))
    }
}

pub fn execute_cli(cli: &Cli, env: &dyn EnvSource) -> Result<()> {
    let output = render_cli_output(cli, env)?;
    println!("{output}");
    Ok(())
}
