use std::time::Duration;

use alloy::primitives::{Address, U256};
use wipecheck::ChainConfig;

/// Server configuration, assembled from the environment at startup.
/// Malformed values are a startup failure, not something to limp past.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub rate_limit_rpm: u64,
    pub allowed_origins: Vec<String>,
    pub metrics_token: Option<Vec<u8>>,
    pub public_metrics: bool,
    pub tavily_api_key: Option<String>,
    pub verify_timeout: Duration,
    pub chain: ChainConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut chain = ChainConfig::default();

        if let Ok(url) = std::env::var("RPC_URL") {
            chain.rpc_url = url;
        }

        if let Ok(raw) = std::env::var("RECIPIENT_ADDRESS") {
            match raw.parse::<Address>() {
                Ok(addr) => chain.recipient = addr,
                Err(e) => {
                    tracing::error!(error = %e, "invalid RECIPIENT_ADDRESS");
                    std::process::exit(1);
                }
            }
        }

        if let Ok(raw) = std::env::var("CHECK_AMOUNT_WEI") {
            match raw.parse::<U256>() {
                Ok(amount) if !amount.is_zero() => chain.amount_wei = amount,
                Ok(_) => {
                    tracing::error!("CHECK_AMOUNT_WEI must be non-zero");
                    std::process::exit(1);
                }
                Err(e) => {
                    tracing::error!(error = %e, "invalid CHECK_AMOUNT_WEI");
                    std::process::exit(1);
                }
            }
        }

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4030);

        let rate_limit_rpm: u64 = std::env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|r| r.parse().ok())
            .unwrap_or(120);

        let allowed_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let metrics_token = std::env::var("METRICS_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.into_bytes());

        let public_metrics = std::env::var("WIPECHECK_PUBLIC_METRICS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        if metrics_token.is_none() && !public_metrics {
            tracing::warn!("METRICS_TOKEN not set — /metrics requires WIPECHECK_PUBLIC_METRICS=true");
        }

        let tavily_api_key = std::env::var("TAVILY_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let verify_timeout = Duration::from_secs(
            std::env::var("VERIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
        );

        Self {
            port,
            rate_limit_rpm,
            allowed_origins,
            metrics_token,
            public_metrics,
            tavily_api_key,
            verify_timeout,
            chain,
        }
    }
}
