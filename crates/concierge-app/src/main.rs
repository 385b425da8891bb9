//! Concierge application binary - composition root.
//!
//! Ties together all Concierge crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Open the SQLite session store
//! 3. Build the assistant gateway and reCAPTCHA verifier from config
//! 4. Start the axum REST API server

mod cli;

use std::path::PathBuf;

use clap::Parser;

use concierge_api::{routes, AppState};
use concierge_core::config::ConciergeConfig;
use concierge_storage::Database;

use crate::cli::CliArgs;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if let Some(rest) = data_dir.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first; the log level may come from it.
    let config_file = args.resolve_config_path();
    let mut config = ConciergeConfig::load_or_default(&config_file);
    config.server.port = args.resolve_port(config.server.port);
    if let Some(ref dir) = args.data_dir {
        config.general.data_dir = dir.display().to_string();
    }
    let log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Concierge v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("concierge.db");
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "SQLite session store opened");

    if config.assistant.api_key.is_empty() {
        tracing::warn!("No assistant API key configured — replies come from the fallback table");
    }
    if config.recaptcha.secret.is_empty() {
        tracing::warn!("No reCAPTCHA secret configured — verification will fail closed");
    }

    // API server.
    let state = AppState::new(config, db);
    routes::start_server(state).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_plain_path() {
        assert_eq!(resolve_data_dir("/var/lib/concierge"), PathBuf::from("/var/lib/concierge"));
    }

    #[test]
    fn test_resolve_data_dir_expands_tilde() {
        let resolved = resolve_data_dir("~/x");
        assert!(!resolved.display().to_string().starts_with('~'));
        assert!(resolved.display().to_string().ends_with("/x"));
    }
}
