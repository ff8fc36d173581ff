//! Login and registration commands

use anyhow::Result;
use clap::Args;
use regapp_core::{LoginUserData, RegisterUserData};

use super::{form_error, Context, Reported};
use crate::output::print_success;

const PASSWORD_MISMATCH: &str = "Passwords do not match.";
const CREDENTIALS_REQUIRED: &str = "Username and password are required.";

#[derive(Args)]
pub struct RegisterArgs {
    /// First name
    #[arg(long)]
    pub first: String,

    /// Last name
    #[arg(long)]
    pub last: String,

    /// Username to register
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password (or set REGAPP_PASSWORD)
    #[arg(long, env = "REGAPP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Repeat the password; registration is refused when it differs
    #[arg(long)]
    pub confirm_password: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Username
    #[arg(long)]
    pub username: String,

    /// Password (or set REGAPP_PASSWORD)
    #[arg(long, env = "REGAPP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    if let Some(confirm) = &args.confirm_password {
        if *confirm != args.password {
            return Err(form_error(ctx, PASSWORD_MISMATCH));
        }
    }

    let data = RegisterUserData {
        first: args.first,
        last: args.last,
        username: args.username,
        email: args.email,
        password: args.password,
    };

    ctx.store.register_user(&data).await.map_err(Reported)?;
    print_success(&format!("Registered and logged in as {}", data.username), ctx.quiet);
    Ok(())
}

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    if args.username.trim().is_empty() || args.password.is_empty() {
        return Err(form_error(ctx, CREDENTIALS_REQUIRED));
    }

    let data = LoginUserData {
        username: args.username,
        password: args.password,
    };

    ctx.store.login_user(&data).await.map_err(Reported)?;
    print_success(&format!("Logged in as {}", data.username), ctx.quiet);
    Ok(())
}
