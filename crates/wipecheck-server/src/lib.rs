//! HTTP surface for payment-gated profile checks.
//!
//! Routes:
//! - `POST /api/check` — submit a profile, receive a 402 payment challenge
//! - `GET /api/check` — fetch the report (verifies `sig` when supplied)
//! - `POST /api/search` — best-effort public profile lookup
//! - `GET /health`, `GET /metrics`

pub mod config;
pub mod error;
pub mod lookup;
pub mod metrics;
pub mod routes;
pub mod state;
