//! # regapp-core
//!
//! Core session logic for regapp - shared by every front end.
//!
//! This crate provides:
//! - The session store and its actions (`store` module)
//! - The registration API client (`api` module)
//! - Durable key-value storage for the access token (`storage` module)
//! - Notification sinks (`notify` module)
//! - Data models (`models` module)
//! - Configuration and unified error handling (`config`, `error` modules)

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod storage;
pub mod store;
pub mod token;

// Re-exports for convenience
pub use api::{AuthApi, HttpApi};
pub use config::Config;
pub use error::{Error, Result};
pub use notify::{LogNotifier, MemoryNotifier, Notifier, GENERIC_ERROR_MESSAGE};
pub use storage::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY};
pub use store::{ActionContext, Mutation, Report, SessionStore};

// Re-export commonly used types from models
pub use models::{
    LoginUserData, RegisterUserData, StoreState, TokenResponse, TokenType, UserBasics,
    UserProfile, UserSession,
};

/// Store wired to the real backend and on-disk storage
pub type HttpSessionStore<N> = SessionStore<HttpApi, FileStore, N>;

/// Build a store for `config` using the HTTP client and the file-backed token storage
pub fn open_session<N: Notifier>(config: Config, notifier: N) -> Result<HttpSessionStore<N>> {
    let storage = FileStore::new(config.storage_path());
    let api = HttpApi::new(config)?;
    Ok(SessionStore::new(api, storage, notifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use std::path::PathBuf;

    fn config_in(data_dir: &str) -> Config {
        Config {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            api_base_url_source: ConfigSource::Default,
            data_dir: PathBuf::from(data_dir),
            data_dir_source: ConfigSource::Flag,
            timeout: None,
        }
    }

    #[test]
    fn test_open_session_uses_configured_storage_file() {
        let config = config_in("/tmp/regapp-open-session");
        let expected = config.storage_path();

        let store = open_session(config, MemoryNotifier::new()).unwrap();

        assert_eq!(store.storage().path(), expected.as_path());
        assert_eq!(store.api().config().api_base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_open_session_starts_without_profile() {
        let store = open_session(config_in("/tmp/regapp-open-session"), MemoryNotifier::new()).unwrap();
        assert!(store.state().profile.is_none());
    }
}
