use std::path::PathBuf;

use clap::{ArgAction, Parser};
use nof_deployment::{DEFAULT_BUILD_DIR, DEFAULT_STATE_DIR};

use crate::CliCredentialPolicy;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "nof-deploy",
    about = "Deploy the NOFToken contract to TRON networks",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "NOF_NETWORK",
        default_value = "development",
        help = "Target network: mainnet, shasta, nile or development."
    )]
    pub network: String,

    #[arg(
        long = "build-dir",
        env = "NOF_BUILD_DIR",
        default_value = DEFAULT_BUILD_DIR,
        help = "Directory holding compiled artifacts (<ContractName>.json)."
    )]
    pub build_dir: PathBuf,

    #[arg(
        long = "state-dir",
        env = "NOF_STATE_DIR",
        default_value = DEFAULT_STATE_DIR,
        help = "Directory where broadcast deployments are recorded per network."
    )]
    pub state_dir: PathBuf,

    #[arg(
        long = "dry-run",
        action = ArgAction::SetTrue,
        help = "Resolve the network and artifact and print the deploy plan without contacting a node."
    )]
    pub dry_run: bool,

    #[arg(
        long = "credential-policy",
        value_enum,
        default_value = "strict",
        help = "strict fails when the network's PRIVATE_KEY_* variable is unset; permissive is only accepted with --dry-run."
    )]
    pub credential_policy: CliCredentialPolicy,

    #[arg(
        long = "request-timeout-ms",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each node HTTP request in milliseconds."
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "list-networks",
        action = ArgAction::SetTrue,
        conflicts_with = "show_compiler",
        help = "Print the registered networks and exit."
    )]
    pub list_networks: bool,

    #[arg(
        long = "show-compiler",
        action = ArgAction::SetTrue,
        help = "Print the solc settings used for every network and exit."
    )]
    pub show_compiler: bool,

    #[arg(long, action = ArgAction::SetTrue, help = "Emit JSON instead of text.")]
    pub json: bool,
}
