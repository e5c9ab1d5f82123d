use k256::ecdsa::SigningKey;
use nof_config::PrivateKey;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Prefix byte of TRON mainnet-format addresses.
pub const TRON_ADDRESS_PREFIX: u8 = 0x41;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidPrivateKey,
    #[error("transaction id must be 32 bytes of hex, got '{0}'")]
    InvalidTxid(String),
    #[error("failed to sign transaction: {0}")]
    Signature(String),
}

/// Signs TRON transactions with a secp256k1 key.
pub struct TronSigner {
    signing_key: SigningKey,
}

impl TronSigner {
    pub fn from_private_key(key: &PrivateKey) -> Result<Self, SigningError> {
        let signing_key =
            SigningKey::from_slice(key.as_bytes()).map_err(|_| SigningError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// 21-byte address: `0x41 || keccak256(uncompressed_pubkey[1..])[12..]`.
    pub fn owner_address(&self) -> [u8; 21] {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        let digest = Keccak256::digest(&point.as_bytes()[1..]);
        let mut address = [0u8; 21];
        address[0] = TRON_ADDRESS_PREFIX;
        address[1..].copy_from_slice(&digest[12..]);
        address
    }

    pub fn owner_address_hex(&self) -> String {
        hex::encode(self.owner_address())
    }

    /// Signs the transaction id (already a sha256 of `raw_data`) and returns
    /// the 65-byte `r || s || recovery_id` signature as hex.
    pub fn sign_txid(&self, txid_hex: &str) -> Result<String, SigningError> {
        let mut digest = [0u8; 32];
        hex::decode_to_slice(txid_hex.trim(), &mut digest)
            .map_err(|_| SigningError::InvalidTxid(txid_hex.to_string()))?;
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|error| SigningError::Signature(error.to_string()))?;
        let mut bytes = Vec::with_capacity(65);
        bytes.extend_from_slice(&signature.to_bytes());
        bytes.push(recovery_id.to_byte());
        Ok(hex::encode(bytes))
    }
}
