//! Profile command
//!
//! Fetches the profile for the stored token and prints it.

use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use regapp_core::{ActionContext, UserProfile, UserSession};
use serde::Serialize;
use tabled::Tabled;

use super::{Context, Reported};
use crate::output::{print_info, print_output, print_single, print_success, OutputFormat};

#[derive(Args)]
pub struct ProfileArgs {
    /// Write the profile thumbnail (PNG) to this path
    #[arg(long)]
    pub save_thumbnail: Option<PathBuf>,
}

/// User basics row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct BasicsRow {
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "First")]
    pub first: String,
    #[tabled(rename = "Last")]
    pub last: String,
}

/// Session row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct SessionRow {
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "IP")]
    pub ip: String,
    #[tabled(rename = "Browser")]
    pub browser: String,
    #[tabled(rename = "Country")]
    pub country: String,
}

impl From<&UserSession> for SessionRow {
    fn from(session: &UserSession) -> Self {
        Self {
            time: format_session_time(session),
            ip: session.ip.clone(),
            browser: session.browser.clone(),
            country: session.country.clone(),
        }
    }
}

pub async fn execute(ctx: &Context, args: ProfileArgs) -> Result<()> {
    ctx.store.fetch_profile().await.map_err(Reported)?;

    let profile = ctx
        .store
        .profile()
        .ok_or_else(|| anyhow!("Profile missing after a successful fetch"))?;

    print_profile(ctx, &profile)?;

    if let Some(path) = args.save_thumbnail {
        let bytes = profile.user_basics.decode_thumbnail()?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write thumbnail to {}", path.display()))?;
        print_success(&format!("Saved thumbnail to {}", path.display()), ctx.quiet);
    }

    Ok(())
}

fn print_profile(ctx: &Context, profile: &UserProfile) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(profile)?);
        }
        OutputFormat::Table => {
            let basics = &profile.user_basics;
            print_single(
                &BasicsRow {
                    username: basics.username.clone(),
                    first: basics.first.clone(),
                    last: basics.last.clone(),
                },
                ctx.format,
            )?;

            print_info("", ctx.quiet);
            print_info(
                &format!("Sessions ({})", profile.user_sessions.len()),
                ctx.quiet,
            );
            let rows: Vec<SessionRow> = profile.user_sessions.iter().map(SessionRow::from).collect();
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

fn format_session_time(session: &UserSession) -> String {
    session
        .parsed_time()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| session.time.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(time: &str) -> UserSession {
        UserSession {
            ip: "10.0.0.1".to_string(),
            browser: "Chrome".to_string(),
            time: time.to_string(),
            country: "US".to_string(),
        }
    }

    #[test]
    fn test_format_session_time_normalizes_iso() {
        assert_eq!(
            format_session_time(&session("2024-03-01T08:15:30.5")),
            "2024-03-01 08:15:30"
        );
    }

    #[test]
    fn test_format_session_time_keeps_unparseable() {
        assert_eq!(format_session_time(&session("last tuesday")), "last tuesday");
    }

    #[test]
    fn test_session_row_from_session() {
        let row = SessionRow::from(&session("2024-03-01T08:15:30"));
        assert_eq!(row.ip, "10.0.0.1");
        assert_eq!(row.browser, "Chrome");
        assert_eq!(row.country, "US");
    }
}
