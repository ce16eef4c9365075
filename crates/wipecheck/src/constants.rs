use alloy::primitives::{address, Address, U256};

/// Sepolia chain ID.
pub const CHAIN_ID: u64 = 11_155_111;

/// CAIP-2 network identifier for Sepolia.
pub const NETWORK: &str = "eip155:11155111";

/// Payment scheme identifier: a plain native-token transfer.
pub const SCHEME_NAME: &str = "eth-native";

/// Native token symbol shown in challenges.
pub const TOKEN_SYMBOL: &str = "ETH";

/// Default recipient for check payments (demo treasury address).
pub const DEFAULT_RECIPIENT: Address = address!("0xa9d1e08c7793af67e9d92fe308d5697fb81d3e43");

/// Default price of one check: 0.0001 ETH in wei.
pub const DEFAULT_AMOUNT_WEI: u128 = 100_000_000_000_000;

/// Default RPC endpoint.
pub const RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

/// Runtime chain configuration. Decouples the gate and verifier from
/// compile-time constants so network, recipient and price stay overridable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub network: String,
    pub scheme_name: String,
    pub token_symbol: String,
    pub recipient: Address,
    pub amount_wei: U256,
    pub rpc_url: String,
}

impl Default for ChainConfig {
    /// Defaults to Sepolia with the demo treasury recipient.
    fn default() -> Self {
        Self {
            chain_id: CHAIN_ID,
            network: NETWORK.to_string(),
            scheme_name: SCHEME_NAME.to_string(),
            token_symbol: TOKEN_SYMBOL.to_string(),
            recipient: DEFAULT_RECIPIENT,
            amount_wei: U256::from(DEFAULT_AMOUNT_WEI),
            rpc_url: RPC_URL.to_string(),
        }
    }
}
