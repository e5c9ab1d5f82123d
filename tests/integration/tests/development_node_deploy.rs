use std::{fs, path::Path};

use httpmock::prelude::*;
use nof_config::{CredentialPolicy, MapEnv};
use nof_deployment::{run_deployment, DeploymentRecordStore, DeploymentRuntimeConfig};
use serde_json::json;
use sha2::{Digest, Sha256};
use tempfile::tempdir;

const RAW_DATA_HEX: &str = "0a02a1b222083c5e0c7d14f1a9e140f0b8a5f6bb2c5a";
const CONTRACT_ADDRESS: &str = "41b3f0c4a7a2d5e8c2a9f61f8e4bb6a0d51c9e2a11";

fn write_artifact(build_dir: &Path) {
    fs::create_dir_all(build_dir).expect("create build dir");
    fs::write(
        build_dir.join("NOFToken.json"),
        r#"{"contractName":"NOFToken","abi":[{"type":"constructor","inputs":[]}],"bytecode":"0x608060405234801561001057600080fd5b50"}"#,
    )
    .expect("write artifact");
}

fn mock_node(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let txid = hex::encode(Sha256::digest(hex::decode(RAW_DATA_HEX).expect("raw hex")));
    let deploy = server.mock(|when, then| {
        when.method(POST)
            .path("/wallet/deploycontract")
            .json_body_includes(
                json!({
                    "fee_limit": 1_000_000_000u64,
                    "origin_energy_limit": 10_000_000u64,
                    "consume_user_resource_percent": 0,
                })
                .to_string(),
            );
        then.status(200).json_body(json!({
            "txID": txid,
            "contract_address": CONTRACT_ADDRESS,
            "raw_data": {},
            "raw_data_hex": RAW_DATA_HEX,
        }));
    });
    let broadcast = server.mock(|when, then| {
        when.method(POST).path("/wallet/broadcasttransaction");
        then.status(200).json_body(json!({ "result": true, "txid": txid }));
    });
    (deploy, broadcast)
}

#[test]
fn integration_development_deploy_resolves_host_port_broadcasts_and_records_history() {
    let server = MockServer::start();
    let (deploy, broadcast) = mock_node(&server);
    let temp = tempdir().expect("tempdir");
    let build_dir = temp.path().join("build/contracts");
    let state_dir = temp.path().join(".nof/deployments");
    write_artifact(&build_dir);

    let env = MapEnv::new().with("HOST_PORT", &server.port().to_string());
    let config = DeploymentRuntimeConfig {
        network: "development".to_string(),
        build_dir,
        state_dir: state_dir.clone(),
        dry_run: false,
        credential_policy: CredentialPolicy::Strict,
        request_timeout_ms: 5_000,
    };

    let first = run_deployment(&config, &env).expect("first deploy");
    let second = run_deployment(&config, &env).expect("second deploy");

    assert_eq!(deploy.hits(), 2);
    assert_eq!(broadcast.hits(), 2);
    assert_eq!(first.mode, "broadcast");
    assert_eq!(first.plan.endpoint, format!("http://127.0.0.1:{}", server.port()));
    assert_eq!(first.deployed.contract_address.as_deref(), Some(CONTRACT_ADDRESS));
    assert_eq!(
        second.record_path.as_deref(),
        Some(state_dir.join("development.json").display().to_string().as_str())
    );

    let file = DeploymentRecordStore::new(&state_dir)
        .load("development")
        .expect("load records");
    assert_eq!(file.history.len(), 1);
    let latest = file.latest.expect("latest record");
    assert_eq!(latest.network, "development");
    assert_eq!(latest.chain_id, "9");
    assert_eq!(latest.fee_limit, 1_000_000_000);
    assert_eq!(latest.compiler_version, "0.8.20");
}

#[test]
fn regression_testnet_deploy_without_key_never_reaches_the_node() {
    let server = MockServer::start();
    let (deploy, broadcast) = mock_node(&server);
    let temp = tempdir().expect("tempdir");
    let build_dir = temp.path().join("build/contracts");
    write_artifact(&build_dir);

    let config = DeploymentRuntimeConfig {
        network: "shasta".to_string(),
        build_dir,
        state_dir: temp.path().join("state"),
        dry_run: false,
        credential_policy: CredentialPolicy::Strict,
        request_timeout_ms: 5_000,
    };
    let error = run_deployment(&config, &MapEnv::new()).expect_err("missing key");

    assert!(error.to_string().contains("PRIVATE_KEY_SHASTA"));
    assert_eq!(deploy.hits(), 0);
    assert_eq!(broadcast.hits(), 0);
    assert!(!temp.path().join("state").exists());
}

#[test]
fn regression_corrupt_record_file_fails_before_node_is_contacted() {
    let server = MockServer::start();
    let (deploy, broadcast) = mock_node(&server);
    let temp = tempdir().expect("tempdir");
    let build_dir = temp.path().join("build/contracts");
    let state_dir = temp.path().join("state");
    write_artifact(&build_dir);
    fs::create_dir_all(&state_dir).expect("create state dir");
    fs::write(state_dir.join("development.json"), "{ not json").expect("seed record");

    let config = DeploymentRuntimeConfig {
        network: "development".to_string(),
        build_dir,
        state_dir: state_dir.clone(),
        dry_run: false,
        credential_policy: CredentialPolicy::Strict,
        request_timeout_ms: 5_000,
    };
    let env = MapEnv::new().with("HOST_PORT", &server.port().to_string());
    let error = run_deployment(&config, &env).expect_err("corrupt record file");

    assert!(error.to_string().contains("failed to parse deployment record"));
    assert_eq!(deploy.hits(), 0);
    assert_eq!(broadcast.hits(), 0);
    assert_eq!(
        fs::read_to_string(state_dir.join("development.json")).expect("read record"),
        "{ not json"
    );
}
