//! Payment-gated profile checks.
//!
//! A submitted profile is held behind an HTTP 402-style paywall: submission
//! returns a [`PaymentChallenge`] describing the required on-chain transfer,
//! and the risk [`Report`] is released only after a [`ChainVerifier`] confirms
//! a matching transaction.
//!
//! # Flow
//!
//! - [`PaywallGate::submit_profile`] — store the profile, issue a challenge
//! - client pays out-of-band and calls back with the transaction hash
//! - [`PaywallGate::get_report`] — verify, mark paid, compute the report
//!
//! Verification outcomes are a three-valued [`Verification`] rather than
//! errors, so the gate must handle every arm explicitly and always fails
//! closed: content is never unlocked on an ambiguous or failed verifier call.

pub mod constants;
pub mod error;
pub mod gate;
pub mod payment;
pub mod profile;
pub mod report;
pub mod security;
pub mod store;
pub mod verifier;

pub use constants::ChainConfig;
pub use error::GateError;
pub use gate::{PaywallGate, ReportOutcome};
pub use payment::{PaymentChallenge, PaymentMethod};
pub use profile::{ProfileRecord, ProfileSubmission};
pub use report::{Report, Risk};
pub use store::{InMemoryLedger, InMemoryProfileStore, PaymentLedger, ProfileStore};
pub use verifier::{ChainVerifier, RpcChainVerifier, Verification};
