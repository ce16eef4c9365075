use thiserror::Error;

/// Errors surfaced by the paywall gate.
///
/// "Payment required" is deliberately not here: it is a normal outcome
/// ([`crate::ReportOutcome::PaymentRequired`]), not a failure. Verifier
/// failures are absorbed inside the gate and degrade to unpaid.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("check not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}
