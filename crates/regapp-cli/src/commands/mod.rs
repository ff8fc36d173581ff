//! CLI commands module
//!
//! Each page of the app maps to a command: `/` is `login`, `/register` is
//! `register` and `/profile` is `profile`.

pub mod auth;
pub mod config;
pub mod profile;

use std::fmt;

use crate::output::{ConsoleNotifier, OutputFormat};
use regapp_core::{Config, HttpSessionStore};

/// Shared context for all commands
pub struct Context {
    pub store: HttpSessionStore<ConsoleNotifier>,
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// A failure the store has already shown to the user
#[derive(Debug)]
pub struct Reported(pub regapp_core::Error);

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reported {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Show a form error through the store and fail the command
pub fn form_error(ctx: &Context, message: &str) -> anyhow::Error {
    use regapp_core::{ActionContext, Report};

    ctx.store.dispatch(Report::Form(message));
    Reported(regapp_core::Error::validation(message)).into()
}
