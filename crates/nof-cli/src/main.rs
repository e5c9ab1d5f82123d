use anyhow::Result;
use clap::Parser;
use nof_cli::bootstrap_helpers::init_tracing;
use nof_cli::{execute_cli, Cli};
use nof_config::ProcessEnv;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    execute_cli(&cli, &ProcessEnv)
}
