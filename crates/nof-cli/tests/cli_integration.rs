use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn binary_command() -> Command {
    let mut command = Command::new(assert_cmd::cargo::cargo_bin!("nof-deploy"));
    command
        .env_remove("NOF_NETWORK")
        .env_remove("NOF_BUILD_DIR")
        .env_remove("NOF_STATE_DIR")
        .env_remove("HOST_PORT")
        .env_remove("PRIVATE_KEY_MAINNET")
        .env_remove("PRIVATE_KEY_SHASTA")
        .env_remove("PRIVATE_KEY_NILE");
    command
}

fn write_artifact(build_dir: &Path) {
    fs::create_dir_all(build_dir).expect("create build dir");
    fs::write(
        build_dir.join("NOFToken.json"),
        r#"{
  "contractName": "NOFToken",
  "abi": [],
  "bytecode": "0x6080604052",
  "compiler": {"name": "solc", "version": "0.8.20+commit.a1b79de6"}
}"#,
    )
    .expect("write artifact");
}

#[test]
fn help_lists_deployment_flags() {
    binary_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--network"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--credential-policy"));
}

#[test]
fn dry_run_json_reports_development_plan_on_custom_port() {
    let temp = tempdir().expect("tempdir");
    let build_dir = temp.path().join("build/contracts");
    write_artifact(&build_dir);

    let output = binary_command()
        .env("HOST_PORT", "8080")
        .args(["--network", "development", "--dry-run", "--json", "--build-dir"])
        .arg(&build_dir)
        .arg("--state-dir")
        .arg(temp.path().join("state"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report = serde_json::from_slice::<Value>(&output).expect("report json");
    assert_eq!(report["mode"], "dry-run");
    assert_eq!(report["plan"]["endpoint"], "http://127.0.0.1:8080");
    assert_eq!(report["plan"]["chain_id"], "9");
    assert_eq!(report["plan"]["args"]["originEnergyLimit"], 10_000_000);
    assert_eq!(report["plan"]["bytecode_size_bytes"], 5);
    assert_eq!(report["deployed"]["broadcast"], false);
    assert!(!temp.path().join("state").exists());
}

#[test]
fn permissive_dry_run_plans_testnet_without_private_key() {
    let temp = tempdir().expect("tempdir");
    let build_dir = temp.path().join("build/contracts");
    write_artifact(&build_dir);

    binary_command()
        .args([
            "--network",
            "nile",
            "--dry-run",
            "--credential-policy",
            "permissive",
            "--build-dir",
        ])
        .arg(&build_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "mode=dry-run network=nile chain_id=3 endpoint=https://nile.trongrid.io",
        ))
        .stdout(predicate::str::contains("owner: address=none"));
}

#[test]
fn unknown_network_fails_with_configuration_error() {
    binary_command()
        .args(["--network", "testnet2", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown network 'testnet2'"));
}

#[test]
fn missing_mainnet_key_fails_fast() {
    let temp = tempdir().expect("tempdir");
    let build_dir = temp.path().join("build/contracts");
    write_artifact(&build_dir);

    binary_command()
        .args(["--network", "mainnet", "--dry-run", "--build-dir"])
        .arg(&build_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PRIVATE_KEY_MAINNET"));
}

#[test]
fn missing_artifact_fails_with_unknown_artifact_error() {
    let temp = tempdir().expect("tempdir");
    binary_command()
        .args(["--dry-run", "--build-dir"])
        .arg(temp.path().join("empty"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown artifact 'NOFToken'"));
}

#[test]
fn list_networks_does_not_print_private_keys() {
    binary_command()
        .env(
            "PRIVATE_KEY_SHASTA",
            "3333333333333333333333333333333333333333333333333333333333333333",
        )
        .arg("--list-networks")
        .assert()
        .success()
        .stdout(predicate::str::contains("network=shasta"))
        .stdout(predicate::str::contains("eaced1c6").not())
        .stdout(predicate::str::contains("3333333333").not());
}
