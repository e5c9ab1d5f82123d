use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::deployer::{DeployRequest, DeployedContract, Deployer};
use crate::tron_signing::TronSigner;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEPLOY_CONTRACT_PATH: &str = "/wallet/deploycontract";
const BROADCAST_TRANSACTION_PATH: &str = "/wallet/broadcasttransaction";
const ERROR_BODY_PREVIEW_CHARS: usize = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TronNodeDeployerConfig {
    pub request_timeout_ms: u64,
}

impl Default for TronNodeDeployerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

/// Deploys through a TRON full node's HTTP API: build the unsigned
/// transaction, sign it locally, broadcast it.
pub struct TronNodeDeployer {
    client: Client,
}

impl TronNodeDeployer {
    pub fn new(config: TronNodeDeployerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .context("failed to build node http client")?;
        Ok(Self { client })
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!(
                "request to {url} failed with status {}: {}",
                status.as_u16(),
                body.chars()
                    .take(ERROR_BODY_PREVIEW_CHARS)
                    .collect::<String>()
            );
        }
        response
            .json::<Value>()
            .with_context(|| format!("failed to parse response json from {url}"))
    }
}

impl Deployer for TronNodeDeployer {
    fn deploy(&mut self, request: &DeployRequest) -> Result<DeployedContract> {
        let network = &request.network;
        let key = network.credential.as_ref().ok_or_else(|| {
            anyhow!(
                "network '{}' has no deployer credential ({}); refusing to broadcast",
                network.name,
                network.credential_source
            )
        })?;
        let signer = TronSigner::from_private_key(key)?;
        let owner_address = signer.owner_address_hex();
        let api_base = network.api_base();

        let abi = serde_json::to_string(&request.artifact.abi)
            .context("failed to serialize contract abi")?;
        // userFeePercentage is the canonical name for the node's
        // consume_user_resource_percent field.
        let payload = json!({
            "owner_address": owner_address,
            "name": request.artifact.contract_name,
            "abi": abi,
            "bytecode": request.artifact.bytecode_hex(),
            "fee_limit": request.args.fee_limit,
            "call_value": 0,
            "consume_user_resource_percent": request.args.user_fee_percentage,
            "origin_energy_limit": request.args.origin_energy_limit,
            "visible": false,
        });
        let deploy_url = format!("{api_base}{DEPLOY_CONTRACT_PATH}");
        let mut transaction = self.post_json(&deploy_url, &payload)?;
        ensure_no_node_error(&transaction, "deploycontract")?;

        let txid = transaction
            .get("txID")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("deploycontract response missing txID"))?;
        if let Some(raw_data_hex) = transaction.get("raw_data_hex").and_then(Value::as_str) {
            verify_txid(raw_data_hex, &txid)?;
        }
        let contract_address = transaction
            .get("contract_address")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("deploycontract response missing contract_address"))?;
        debug!(network = %network.name, txid = %txid, "built unsigned deploy transaction");

        let signature = signer.sign_txid(&txid)?;
        transaction
            .as_object_mut()
            .ok_or_else(|| anyhow!("deploycontract response is not a json object"))?
            .insert("signature".to_string(), json!([signature]));

        let broadcast_url = format!("{api_base}{BROADCAST_TRANSACTION_PATH}");
        let broadcast = self.post_json(&broadcast_url, &transaction)?;
        if broadcast.get("result").and_then(Value::as_bool) != Some(true) {
            let code = broadcast
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("UNKNOWN");
            let message = broadcast
                .get("message")
                .and_then(Value::as_str)
                .map(decode_node_message)
                .unwrap_or_default();
            bail!("broadcast of {txid} rejected: code={code} message={message}");
        }
        info!(
            network = %network.name,
            txid = %txid,
            contract_address = %contract_address,
            "deploy transaction broadcast"
        );

        Ok(DeployedContract {
            contract_address: Some(contract_address),
            txid: Some(txid),
            owner_address: Some(owner_address),
            broadcast: true,
        })
    }
}

fn ensure_no_node_error(response: &Value, operation: &str) -> Result<()> {
    let Some(error) = response.get("Error") else {
        return Ok(());
    };
    let message = error
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    bail!("{operation} rejected by node: {message}");
}

fn verify_txid(raw_data_hex: &str, txid: &str) -> Result<()> {
    let raw = hex::decode(raw_data_hex).context("deploycontract raw_data_hex is not hex")?;
    let computed = hex::encode(Sha256::digest(raw));
    if !computed.eq_ignore_ascii_case(txid) {
        bail!("deploycontract txID {txid} does not match raw_data_hash {computed}");
    }
    Ok(())
}

/// Node messages are hex-encoded UTF-8; fall back to the raw text.
fn decode_node_message(raw: &str) -> String {
    hex::decode(raw)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| raw.to_string())
}
