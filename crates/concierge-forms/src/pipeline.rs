//! The shared submission gate.
//!
//! Validation runs first and short-circuits; the anti-abuse check only
//! sees submissions whose fields are clean; a submission without a
//! usable token is accepted under manual review rather than blocked.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::outcome::{FormOutcome, Review};
use crate::recaptcha::CaptchaVerifier;

/// Run the field-validation and verification stages.
///
/// Returns `Err(outcome)` when the submission is rejected, `Ok(review)`
/// when it should proceed to the side effect.
pub(crate) async fn gate(
    errors: BTreeMap<String, String>,
    verifier: &dyn CaptchaVerifier,
    expected_action: &str,
    min_score: f64,
    token: Option<&str>,
    client_error: bool,
) -> Result<Review, FormOutcome> {
    if !errors.is_empty() {
        return Err(FormOutcome::field_errors(errors));
    }

    match token {
        Some(token) if !client_error => {
            let verification = verifier.verify(token).await;
            if !verification.passes(expected_action, min_score) {
                info!(
                    action = expected_action,
                    score = verification.score,
                    "reCAPTCHA verification failed"
                );
                return Err(FormOutcome::verification_failed());
            }
            debug!(
                action = expected_action,
                score = verification.score,
                "reCAPTCHA verification passed"
            );
            Ok(Review::Verified)
        }
        _ => {
            // Challenge service unreachable on the client, or no token at
            // all: availability wins, the submission is flagged instead.
            info!(action = expected_action, "No usable token; accepting for manual review");
            Ok(Review::Manual)
        }
    }
}
