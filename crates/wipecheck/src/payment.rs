use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::constants::ChainConfig;

/// A single entry in the `accepts` array of a 402 challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub scheme: String,
    pub token: String,
    pub network: String,
    pub recipient_address: Address,
    /// Required amount in base units (wei), decimal string.
    pub amount: String,
}

impl PaymentMethod {
    pub fn from_config(config: &ChainConfig) -> Self {
        Self {
            scheme: config.scheme_name.clone(),
            token: config.token_symbol.clone(),
            network: config.network.clone(),
            recipient_address: config.recipient,
            amount: config.amount_wei.to_string(),
        }
    }
}

/// The 402 Payment Required body returned for an unpaid check.
///
/// Derived from configuration on every request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentChallenge {
    pub x402_version: u32,
    pub accepts: Vec<PaymentMethod>,
    pub check_id: String,
}

impl PaymentChallenge {
    pub fn new(config: &ChainConfig, check_id: impl Into<String>) -> Self {
        Self {
            x402_version: 1,
            accepts: vec![PaymentMethod::from_config(config)],
            check_id: check_id.into(),
        }
    }
}
