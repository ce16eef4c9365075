use alloy::providers::RootProvider;
use wipecheck::{PaywallGate, RpcChainVerifier};

use crate::lookup::ProfileLookup;

/// Shared application state for the check server.
pub struct AppState {
    pub gate: PaywallGate<RpcChainVerifier<RootProvider>>,
    /// Provider clone for the health probe.
    pub provider: RootProvider,
    pub lookup: ProfileLookup,
    /// Bearer token for the /metrics endpoint.
    pub metrics_token: Option<Vec<u8>>,
    /// Serve /metrics without a token when explicitly opted in.
    pub public_metrics: bool,
}
