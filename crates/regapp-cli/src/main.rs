//! regapp CLI - register, log in and view your profile
//!
//! A command-line front end for the registration service. The login,
//! registration and profile pages are the `login`, `register` and `profile`
//! commands.

mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "regapp")]
#[command(author, version, about = "Registration service client", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Override API base URL (or set REGAPP_API_BASE_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override data directory (or set REGAPP_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login(commands::auth::LoginArgs),

    /// Create an account and store the access token
    Register(commands::auth::RegisterArgs),

    /// Show the profile of the logged-in user
    Profile(commands::profile::ProfileArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Flags override the environment
    let mut config = regapp_core::Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    log::debug!("API base URL: {}", config.api_base_url);

    let store = regapp_core::open_session(config.clone(), output::ConsoleNotifier)?;

    // Create context for commands
    let ctx = commands::Context {
        store,
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Login(args) => commands::auth::login(&ctx, args).await,
        Commands::Register(args) => commands::auth::register(&ctx, args).await,
        Commands::Profile(args) => commands::profile::execute(&ctx, args).await,
        Commands::Config { action } => commands::config::execute(&ctx, action).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Store failures were already shown by the notifier
            if err.downcast_ref::<commands::Reported>().is_none() {
                output::print_error(&format!("Error: {:#}", err));
            }
            ExitCode::FAILURE
        }
    }
}
