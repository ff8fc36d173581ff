//! Config commands
//!
//! Commands for inspecting the effective configuration and stored session.

use anyhow::{bail, Result};
use clap::Subcommand;
use regapp_core::token::{decode_claims, mask_token};
use regapp_core::ActionContext;
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{print_info, print_output};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

/// Config row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub async fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(ctx),
        ConfigAction::Get { key } => get_config(ctx, key),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let rows = get_all_config(ctx)?;
    print_output(&rows, ctx.format)?;
    Ok(())
}

fn get_config(ctx: &Context, key: String) -> Result<()> {
    let rows = get_all_config(ctx)?;

    let Some(row) = rows.iter().find(|r| r.key.eq_ignore_ascii_case(&key)) else {
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        bail!(
            "Config key not found: {} (available keys: {})",
            key,
            keys.join(", ")
        );
    };

    print_info(&format!("{} = {}", row.key, row.value), ctx.quiet);
    Ok(())
}

fn get_all_config(ctx: &Context) -> Result<Vec<ConfigRow>> {
    let config = &ctx.config;
    let mut rows = vec![
        ConfigRow {
            key: "api_base_url".to_string(),
            value: config.api_base_url.clone(),
            source: config.api_base_url_source.as_str().to_string(),
        },
        ConfigRow {
            key: "data_dir".to_string(),
            value: config.data_dir.to_string_lossy().to_string(),
            source: config.data_dir_source.as_str().to_string(),
        },
        ConfigRow {
            key: "storage_file".to_string(),
            value: config.storage_path().to_string_lossy().to_string(),
            source: "derived".to_string(),
        },
        ConfigRow {
            key: "timeout".to_string(),
            value: config
                .timeout
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "-".to_string()),
            source: if config.timeout.is_some() { "env" } else { "default" }.to_string(),
        },
    ];

    let token = ctx.store.token()?;
    rows.push(ConfigRow {
        key: "token".to_string(),
        value: mask_token(token.as_deref()),
        source: "storage".to_string(),
    });

    // Claims are informational only; an opaque token simply shows "-"
    let claims = token
        .as_deref()
        .filter(|t| !t.is_empty())
        .and_then(|t| match decode_claims(t) {
            Ok(claims) => Some(claims),
            Err(e) => {
                log::debug!("Stored token is not a readable JWT: {}", e);
                None
            }
        });

    rows.push(ConfigRow {
        key: "token_user".to_string(),
        value: claims
            .as_ref()
            .map(|c| c.username.clone())
            .unwrap_or_else(|| "-".to_string()),
        source: "token".to_string(),
    });
    rows.push(ConfigRow {
        key: "token_expires".to_string(),
        value: claims
            .as_ref()
            .and_then(|c| c.expires_at())
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string()),
        source: "token".to_string(),
    });

    Ok(rows)
}
