//! reCAPTCHA v3 verification.
//!
//! The live client calls the siteverify endpoint with the server secret
//! and the one-time token. Any transport or parse failure comes back as
//! a zero-score non-success — verification problems are never allowed to
//! crash a submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use concierge_core::config::RecaptchaConfig;

/// Raw verification result from the challenge service.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub success: bool,
    /// Action name the token was minted for.
    pub action: String,
    /// Trust score, 0.0 to 1.0.
    pub score: f64,
}

impl Verification {
    /// The acceptance rule: success flag, matching action, and a score at
    /// or above the threshold.
    pub fn passes(&self, expected_action: &str, min_score: f64) -> bool {
        self.success && self.action == expected_action && self.score >= min_score
    }

    fn failed() -> Self {
        Self {
            success: false,
            action: String::new(),
            score: 0.0,
        }
    }
}

/// Verifies anti-abuse challenge tokens.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Verification;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    action: String,
    #[serde(default)]
    score: f64,
}

/// Live client for the Google siteverify endpoint.
pub struct RecaptchaClient {
    client: Client,
    config: RecaptchaConfig,
}

impl RecaptchaClient {
    pub fn new(config: RecaptchaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaClient {
    async fn verify(&self, token: &str) -> Verification {
        let params = [
            ("secret", self.config.secret.as_str()),
            ("response", token),
        ];

        let response = match self
            .client
            .post(&self.config.verify_url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .form(&params)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "reCAPTCHA verification request failed");
                return Verification::failed();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "reCAPTCHA endpoint returned non-success");
            return Verification::failed();
        }

        match response.json::<SiteVerifyBody>().await {
            Ok(body) => Verification {
                success: body.success,
                action: body.action,
                score: body.score,
            },
            Err(e) => {
                warn!(error = %e, "reCAPTCHA response unreadable");
                Verification::failed()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_requires_all_three() {
        let v = Verification {
            success: true,
            action: "contact_form".to_string(),
            score: 0.9,
        };
        assert!(v.passes("contact_form", 0.5));
    }

    #[test]
    fn test_low_score_fails() {
        let v = Verification {
            success: true,
            action: "contact_form".to_string(),
            score: 0.3,
        };
        assert!(!v.passes("contact_form", 0.5));
    }

    #[test]
    fn test_score_at_threshold_passes() {
        let v = Verification {
            success: true,
            action: "contact_form".to_string(),
            score: 0.5,
        };
        assert!(v.passes("contact_form", 0.5));
    }

    #[test]
    fn test_action_mismatch_fails() {
        let v = Verification {
            success: true,
            action: "student_application".to_string(),
            score: 0.9,
        };
        assert!(!v.passes("contact_form", 0.5));
    }

    #[test]
    fn test_unsuccessful_token_fails() {
        let v = Verification {
            success: false,
            action: "contact_form".to_string(),
            score: 0.9,
        };
        assert!(!v.passes("contact_form", 0.5));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_zero_score() {
        let client = RecaptchaClient::new(RecaptchaConfig {
            secret: "secret".to_string(),
            verify_url: "http://127.0.0.1:9/siteverify".to_string(),
            timeout_secs: 1,
            ..RecaptchaConfig::default()
        });
        let v = client.verify("some-token").await;
        assert!(!v.success);
        assert_eq!(v.score, 0.0);
    }
}
