//! Session store
//!
//! Mediates all network interaction with the backend, persists the access
//! token, holds the fetched profile and reports failures.
//!
//! ## Structure
//! - [`Mutation`] - synchronous state changes (`SetToken`, `SetProfile`)
//! - [`Report`] - synchronous reporting actions (form and HTTP errors)
//! - [`ActionContext`] - the typed surface actions run against
//! - [`SessionStore`] - async actions wrapping [`AuthApi`] calls
//!
//! Every network-calling action follows report-then-propagate: a failure is
//! sent to the [`Notifier`] exactly once and then returned to the caller.

use std::sync::RwLock;

use crate::api::AuthApi;
use crate::error::{Error, Result};
use crate::models::{LoginUserData, RegisterUserData, StoreState, UserProfile};
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// State changes committed by actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Overwrite the persisted access token
    SetToken(String),
    /// Replace the in-memory profile
    SetProfile(UserProfile),
}

/// Reporting actions that can be dispatched
#[derive(Debug)]
pub enum Report<'a> {
    /// Client-side form problem, shown verbatim
    Form(&'a str),
    /// Failure of a network-calling action
    Http(&'a Error),
}

/// Typed context exposed to actions
pub trait ActionContext {
    fn commit(&self, mutation: Mutation) -> Result<()>;

    fn dispatch(&self, report: Report<'_>);

    /// Token currently held in durable storage
    fn token(&self) -> Result<Option<String>>;

    /// Snapshot of the current profile
    fn profile(&self) -> Option<UserProfile>;
}

pub struct SessionStore<A, S, N> {
    api: A,
    storage: S,
    notifier: N,
    state: RwLock<StoreState>,
}

impl<A, S, N> SessionStore<A, S, N>
where
    A: AuthApi,
    S: KeyValueStore,
    N: Notifier,
{
    pub fn new(api: A, storage: S, notifier: N) -> Self {
        Self {
            api,
            storage,
            notifier,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Snapshot of the whole state
    pub fn state(&self) -> StoreState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    // ------------------------------------------------------------------
    // Async actions
    // ------------------------------------------------------------------

    /// Register a new account and persist the issued token
    pub async fn register_user(&self, data: &RegisterUserData) -> Result<()> {
        let result: Result<()> = async {
            let token = self.api.register(data).await?;
            self.commit(Mutation::SetToken(token.access_token))
        }
        .await;

        self.report_failure(result)
    }

    /// Log in and persist the issued token
    pub async fn login_user(&self, data: &LoginUserData) -> Result<()> {
        let result: Result<()> = async {
            let token = self.api.login(data).await?;
            self.commit(Mutation::SetToken(token.access_token))
        }
        .await;

        self.report_failure(result)
    }

    /// Fetch the profile for the stored token and replace the current one
    pub async fn fetch_profile(&self) -> Result<()> {
        let result: Result<()> = async {
            let token = self.token()?.filter(|t| !t.is_empty());
            let profile = self.api.profile(token.as_deref()).await?;
            self.commit(Mutation::SetProfile(profile))
        }
        .await;

        self.report_failure(result)
    }

    // ------------------------------------------------------------------
    // Reporting actions
    // ------------------------------------------------------------------

    /// Show a client-side form error
    pub fn form_error(&self, message: &str) {
        self.notifier.error(message);
    }

    /// Show a notification for a failed request
    pub fn http_error(&self, error: &Error) {
        match error.response() {
            Some((status, _)) => log::debug!("[store] request failed with HTTP {}", status),
            None => log::debug!("[store] request failed without a response: {}", error),
        }
        self.notifier.error(&error.notification_message());
    }

    fn report_failure(&self, result: Result<()>) -> Result<()> {
        if let Err(ref err) = result {
            self.dispatch(Report::Http(err));
        }
        result
    }
}

impl<A, S, N> ActionContext for SessionStore<A, S, N>
where
    A: AuthApi,
    S: KeyValueStore,
    N: Notifier,
{
    fn commit(&self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::SetToken(token) => {
                log::info!("[store] SET_TOKEN");
                self.storage.set(TOKEN_KEY, &token)
            }
            Mutation::SetProfile(profile) => {
                log::info!(
                    "[store] SET_PROFILE {} ({} sessions)",
                    profile.user_basics.username,
                    profile.user_sessions.len()
                );
                let mut state = self
                    .state
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                state.profile = Some(profile);
                Ok(())
            }
        }
    }

    fn dispatch(&self, report: Report<'_>) {
        match report {
            Report::Form(message) => self.form_error(message),
            Report::Http(error) => self.http_error(error),
        }
    }

    fn token(&self) -> Result<Option<String>> {
        self.storage.get(TOKEN_KEY)
    }

    fn profile(&self) -> Option<UserProfile> {
        self.state().profile
    }
}
