use std::time::Duration;

use alloy::consensus::Transaction as _;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;

use crate::payment::PaymentMethod;

/// Outcome of verifying a transaction reference against a payment method.
///
/// Deliberately a three-valued enum rather than a `Result`, so callers must
/// handle every arm. For gating purposes `Failed` must be treated exactly
/// like `NotConfirmed`: content is never unlocked on a verifier failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The transaction is mined, executed without error, and transfers at
    /// least the required amount to the required recipient.
    Confirmed { payer: Option<Address> },
    /// The transaction is absent, still pending, reverted, or does not match
    /// the challenge.
    NotConfirmed { reason: String },
    /// The verification itself could not be completed (malformed reference,
    /// RPC failure, timeout). Logged by callers, never fatal.
    Failed { error: String },
}

/// Pluggable on-chain payment check.
pub trait ChainVerifier: Send + Sync {
    /// Verify that `tx_ref` pays for the given method. Side-effect-free;
    /// verifying the same reference twice is always safe.
    fn verify(
        &self,
        tx_ref: &str,
        method: &PaymentMethod,
    ) -> impl std::future::Future<Output = Verification> + Send;
}

/// Default verification timeout per RPC call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chain verifier backed by an EVM JSON-RPC provider.
///
/// A transaction reference is a tx hash; "confirmed" means a receipt exists
/// and reports successful execution. Recipient and amount come from the
/// transaction itself and are checked against the issued challenge.
pub struct RpcChainVerifier<P> {
    provider: P,
    timeout: Duration,
}

impl<P> RpcChainVerifier<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-call RPC timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<P> ChainVerifier for RpcChainVerifier<P>
where
    P: Provider + Send + Sync,
{
    async fn verify(&self, tx_ref: &str, method: &PaymentMethod) -> Verification {
        let hash: TxHash = match tx_ref.parse() {
            Ok(h) => h,
            Err(e) => {
                return Verification::Failed {
                    error: format!("malformed transaction reference: {e}"),
                }
            }
        };

        let required: U256 = match method.amount.parse() {
            Ok(v) => v,
            Err(e) => {
                return Verification::Failed {
                    error: format!("invalid required amount in challenge: {e}"),
                }
            }
        };

        // Receipt first: existence means mined, status is the execution
        // outcome. No shared state is touched while these calls are in
        // flight.
        let receipt = match tokio::time::timeout(
            self.timeout,
            self.provider.get_transaction_receipt(hash),
        )
        .await
        {
            Err(_) => {
                return Verification::Failed {
                    error: "receipt lookup timed out".to_string(),
                }
            }
            Ok(Err(e)) => {
                return Verification::Failed {
                    error: format!("receipt lookup failed: {e}"),
                }
            }
            Ok(Ok(None)) => {
                return Verification::NotConfirmed {
                    reason: "transaction not found or not yet confirmed".to_string(),
                }
            }
            Ok(Ok(Some(r))) => r,
        };

        if !receipt.status() {
            return Verification::NotConfirmed {
                reason: "transaction reverted".to_string(),
            };
        }

        // Fetch the transaction body for recipient and value. The receipt
        // alone does not carry the transferred amount.
        let tx = match tokio::time::timeout(
            self.timeout,
            self.provider.get_transaction_by_hash(hash),
        )
        .await
        {
            Err(_) => {
                return Verification::Failed {
                    error: "transaction lookup timed out".to_string(),
                }
            }
            Ok(Err(e)) => {
                return Verification::Failed {
                    error: format!("transaction lookup failed: {e}"),
                }
            }
            Ok(Ok(None)) => {
                return Verification::NotConfirmed {
                    reason: "transaction not found or not yet confirmed".to_string(),
                }
            }
            Ok(Ok(Some(t))) => t,
        };

        match tx.to() {
            Some(to) if to == method.recipient_address => {}
            _ => {
                tracing::warn!(
                    tx = %hash,
                    expected = %method.recipient_address,
                    "payment rejected: recipient mismatch"
                );
                return Verification::NotConfirmed {
                    reason: "transaction does not pay the challenged recipient".to_string(),
                };
            }
        }

        if tx.value() < required {
            tracing::warn!(
                tx = %hash,
                value = %tx.value(),
                required = %required,
                "payment rejected: amount below required"
            );
            return Verification::NotConfirmed {
                reason: "transaction amount is below the challenged amount".to_string(),
            };
        }

        tracing::info!(tx = %hash, payer = %receipt.from, "payment confirmed on-chain");

        Verification::Confirmed {
            payer: Some(receipt.from),
        }
    }
}
