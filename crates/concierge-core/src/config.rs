use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ConciergeError, Result};

/// Top-level configuration for the Concierge application.
///
/// Loaded from `~/.concierge/config.toml` by default. Each section
/// corresponds to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub recaptcha: RecaptchaConfig,
}

impl ConciergeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConciergeConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConciergeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the SQLite session store.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.concierge/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the API listens on (localhost only).
    pub port: u16,
    /// Origins allowed by CORS (the site's own hosts).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3030,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Remote text-generation endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// When false, skip the remote call entirely and answer from the
    /// local fallback table.
    pub enabled: bool,
    /// OpenAI-compatible chat-completions URL.
    pub endpoint: String,
    /// Bearer token for the generation endpoint. Empty disables the
    /// remote path just like `enabled = false`.
    pub api_key: String,
    /// Model identifier sent upstream.
    pub model: String,
    /// Generation cap per reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// System prompt framing every upstream request.
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.x.ai/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "grok-beta".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 10,
            system_prompt: "You are an AI assistant for a web development agency called \
                            Ctrl+Tech. We offer web design & development, e-commerce \
                            solutions, web applications, mobile app development (iOS & \
                            Android), and a student mentorship program. Provide helpful, \
                            professional responses about our services. Keep responses \
                            concise and offer relevant follow-up options."
                .to_string(),
        }
    }
}

/// Conversational session policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Completed user->assistant round trips allowed per session.
    pub exchange_limit: u32,
    /// Recent transcript entries included in the rolling context.
    pub context_turns: usize,
    /// Fixed "thinking" pause before a reply is appended, in milliseconds.
    pub thinking_delay_ms: u64,
    /// Maximum user message length in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            exchange_limit: 5,
            context_turns: 3,
            thinking_delay_ms: 1000,
            max_message_length: 2000,
        }
    }
}

/// reCAPTCHA v3 verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecaptchaConfig {
    /// Server-side secret for the siteverify call.
    pub secret: String,
    /// Verification endpoint.
    pub verify_url: String,
    /// Minimum trust score accepted (0.0 to 1.0).
    pub min_score: f64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            verify_url: "https://www.google.com/recaptcha/api/siteverify".to_string(),
            min_score: 0.5,
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ConciergeConfig::default();
        assert_eq!(config.server.port, 3030);
        assert_eq!(config.chat.exchange_limit, 5);
        assert_eq!(config.chat.max_message_length, 2000);
        assert_eq!(config.chat.thinking_delay_ms, 1000);
        assert!((config.recaptcha.min_score - 0.5).abs() < f64::EPSILON);
        assert!(config.assistant.system_prompt.contains("Ctrl+Tech"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ConciergeConfig::default();
        config.server.port = 4040;
        config.chat.exchange_limit = 3;
        config.save(&path).unwrap();

        let loaded = ConciergeConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 4040);
        assert_eq!(loaded.chat.exchange_limit, 3);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(ConciergeConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = ConciergeConfig::load_or_default(&path);
        assert_eq!(config.server.port, 3030);
    }

    #[test]
    fn test_load_or_default_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not [ toml").unwrap();
        let config = ConciergeConfig::load_or_default(&path);
        assert_eq!(config.chat.exchange_limit, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();
        let config = ConciergeConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        // Untouched sections keep their defaults.
        assert_eq!(config.chat.exchange_limit, 5);
        assert_eq!(config.general.log_level, "info");
    }
}
