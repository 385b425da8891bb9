//! Remote generation client with local fallback.
//!
//! `GatewayClient` talks to an OpenAI-compatible chat-completions
//! endpoint. Transport failures, timeouts, non-2xx statuses, and
//! malformed bodies all degrade to the [`FallbackResponder`] — the
//! caller never observes an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use concierge_core::config::AssistantConfig;

use crate::context::RollingContext;
use crate::fallback::FallbackResponder;
use crate::options::suggest_options;

/// A reply produced for one user utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub text: String,
    /// Curated follow-up options; never `Some` with an empty list.
    pub quick_replies: Option<Vec<String>>,
}

/// Source of assistant replies.
///
/// Implementations are infallible by signature: whatever goes wrong
/// internally, a well-formed reply comes back.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn reply(&self, utterance: &str, ctx: &RollingContext) -> AssistantReply;
}

/// Client for the remote generation endpoint.
pub struct GatewayClient {
    client: Client,
    config: AssistantConfig,
    fallback: FallbackResponder,
}

impl GatewayClient {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            fallback: FallbackResponder::new(),
        }
    }

    /// Whether the remote path is usable at all.
    fn remote_enabled(&self) -> bool {
        self.config.enabled && !self.config.api_key.is_empty() && !self.config.endpoint.is_empty()
    }

    /// One attempt against the remote endpoint. Any failure is reported
    /// as `None` and absorbed by the caller.
    async fn try_remote(&self, utterance: &str, ctx: &RollingContext) -> Option<String> {
        let mut system = if ctx.system_prompt.is_empty() {
            self.config.system_prompt.clone()
        } else {
            ctx.system_prompt.clone()
        };
        if let Some(recent) = ctx.render_recent() {
            system.push_str("\n\n");
            system.push_str(&recent);
        }

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": utterance },
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = match self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Generation request failed; using fallback");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Generation endpoint returned non-success; using fallback");
            return None;
        }

        let parsed: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Generation response unreadable; using fallback");
                return None;
            }
        };

        match parsed["choices"][0]["message"]["content"].as_str() {
            Some(text) if !text.trim().is_empty() => Some(text.to_string()),
            _ => {
                warn!("Generation response missing content; using fallback");
                None
            }
        }
    }
}

#[async_trait]
impl ReplyProvider for GatewayClient {
    async fn reply(&self, utterance: &str, ctx: &RollingContext) -> AssistantReply {
        if !self.remote_enabled() {
            debug!("Remote generation disabled; answering from fallback table");
            return self.fallback.respond(utterance);
        }

        match self.try_remote(utterance, ctx).await {
            Some(text) => {
                // Options are always curated locally, never model-produced.
                let quick_replies = suggest_options(utterance, &text);
                AssistantReply {
                    text,
                    quick_replies: Some(quick_replies),
                }
            }
            None => self.fallback.respond(utterance),
        }
    }
}

#[async_trait]
impl ReplyProvider for FallbackResponder {
    async fn reply(&self, utterance: &str, _ctx: &RollingContext) -> AssistantReply {
        self.respond(utterance)
    }
}

// =============================================================================
// Tests
// =============================================================================
