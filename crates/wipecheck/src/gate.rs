use std::sync::Arc;

use crate::constants::ChainConfig;
use crate::error::GateError;
use crate::payment::{PaymentChallenge, PaymentMethod};
use crate::profile::{ProfileRecord, ProfileSubmission};
use crate::report::{self, Report};
use crate::store::{PaymentLedger, ProfileStore};
use crate::verifier::{ChainVerifier, Verification};

/// Result of an authorized or not-yet-authorized report request.
///
/// `PaymentRequired` is a normal state the caller retries out of, not an
/// error. It carries a fresh challenge for the same check id.
#[derive(Debug, Clone)]
pub enum ReportOutcome {
    Ready(Report),
    PaymentRequired(PaymentChallenge),
}

/// Orchestrates challenge issuance and release of paid reports.
///
/// An id transitions to paid in exactly one place: after the verifier
/// returns [`Verification::Confirmed`] for a transaction reference that has
/// not been consumed by another check. There is no other path into the paid
/// set.
pub struct PaywallGate<V> {
    profiles: Arc<dyn ProfileStore>,
    ledger: Arc<dyn PaymentLedger>,
    verifier: V,
    config: ChainConfig,
}

impl<V: ChainVerifier> PaywallGate<V> {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        ledger: Arc<dyn PaymentLedger>,
        verifier: V,
        config: ChainConfig,
    ) -> Self {
        Self {
            profiles,
            ledger,
            verifier,
            config,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Store a submitted profile and issue a payment challenge for it.
    ///
    /// The record is stored before the challenge referencing it exists, so a
    /// challenge never points at a missing profile.
    pub fn submit_profile(
        &self,
        submission: ProfileSubmission,
    ) -> Result<(String, PaymentChallenge), GateError> {
        if submission.is_anonymous() {
            return Err(GateError::InvalidRequest(
                "a name or handle is required".to_string(),
            ));
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        self.profiles.insert(ProfileRecord::new(&id, submission));

        tracing::info!(check_id = %id, "profile submitted, payment challenge issued");
        Ok((id.clone(), PaymentChallenge::new(&self.config, id)))
    }

    /// Fetch the report for `id`, verifying `tx_ref` first if supplied and
    /// the check is not already paid.
    ///
    /// Every verifier outcome other than a confirmed, unconsumed reference
    /// leaves the check unpaid; ambiguous results never unlock content.
    pub async fn get_report(
        &self,
        id: &str,
        tx_ref: Option<&str>,
    ) -> Result<ReportOutcome, GateError> {
        let profile = self
            .profiles
            .get(id)
            .ok_or_else(|| GateError::NotFound(id.to_string()))?;

        if !self.ledger.is_paid(id) {
            if let Some(sig) = tx_ref {
                self.verify_and_mark(id, sig).await;
            }
        }

        if self.ledger.is_paid(id) {
            Ok(ReportOutcome::Ready(report::generate(&profile)))
        } else {
            Ok(ReportOutcome::PaymentRequired(PaymentChallenge::new(
                &self.config,
                id,
            )))
        }
    }

    /// Run the verifier for one reference and, on success, consume it and
    /// mark the check paid. No ledger or store lock is held across the
    /// verifier await.
    async fn verify_and_mark(&self, id: &str, tx_ref: &str) {
        let method = PaymentMethod::from_config(&self.config);

        match self.verifier.verify(tx_ref, &method).await {
            Verification::Confirmed { payer } => {
                if self.ledger.try_consume(tx_ref, id) {
                    self.ledger.mark_paid(id);
                    tracing::info!(check_id = %id, tx = %tx_ref, payer = ?payer, "payment confirmed");
                } else {
                    tracing::warn!(
                        check_id = %id,
                        tx = %tx_ref,
                        "transaction reference already consumed by another check"
                    );
                }
            }
            Verification::NotConfirmed { reason } => {
                tracing::info!(check_id = %id, tx = %tx_ref, %reason, "payment not confirmed");
            }
            Verification::Failed { error } => {
                // Fail closed: a verifier failure is logged and treated as
                // not yet paid.
                tracing::warn!(check_id = %id, tx = %tx_ref, %error, "payment verification failed");
            }
        }
    }
}
