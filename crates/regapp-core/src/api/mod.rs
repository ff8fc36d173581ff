//! Registration API client
//!
//! [`AuthApi`] is the seam between the session store and the network. The
//! store only ever talks to this trait; [`HttpApi`] is the reqwest-backed
//! implementation used in production.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{LoginUserData, RegisterUserData, TokenResponse, UserProfile};

pub const REGISTER_PATH: &str = "/user_register";
pub const LOGIN_PATH: &str = "/user_login";
pub const PROFILE_PATH: &str = "/user_profile";

/// Backend operations the session store depends on
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// POST the registration form as `{ "user": data }`
    async fn register(&self, user: &RegisterUserData) -> Result<TokenResponse>;

    /// POST the login form, form-encoded
    async fn login(&self, credentials: &LoginUserData) -> Result<TokenResponse>;

    /// GET the profile, with `Authorization: Bearer <token>` when a token is given
    async fn profile(&self, token: Option<&str>) -> Result<UserProfile>;
}

/// HTTP implementation of [`AuthApi`]
pub struct HttpApi {
    config: Config,
    client: Client,
}

impl HttpApi {
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn register(&self, user: &RegisterUserData) -> Result<TokenResponse> {
        let url = self.config.endpoint(REGISTER_PATH);
        log::debug!("[api] POST {} (username={})", url, user.username);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "user": user }))
            .send()
            .await?;

        read_json(response).await
    }

    async fn login(&self, credentials: &LoginUserData) -> Result<TokenResponse> {
        let url = self.config.endpoint(LOGIN_PATH);
        log::debug!("[api] POST {} (username={})", url, credentials.username);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        read_json(response).await
    }

    async fn profile(&self, token: Option<&str>) -> Result<UserProfile> {
        let url = self.config.endpoint(PROFILE_PATH);
        log::debug!("[api] GET {} (authenticated={})", url, token.is_some());

        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        read_json(request.send().await?).await
    }
}

/// Decode a 2xx body as `T`; anything else becomes [`Error::Http`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        log::debug!("[api] HTTP {} ({} bytes)", status.as_u16(), text.len());
        return Err(Error::Http {
            status: status.as_u16(),
            body: parse_body(&text),
        });
    }

    Ok(serde_json::from_str(&text)?)
}

/// JSON bodies are kept as parsed; other text, including an empty body, is
/// kept as a JSON string.
pub fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::String(String::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_json() {
        assert_eq!(
            parse_body(r#"{"detail":"Unauthorized"}"#),
            json!({"detail": "Unauthorized"})
        );
    }

    #[test]
    fn test_parse_body_text() {
        assert_eq!(parse_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn test_parse_body_empty() {
        assert_eq!(parse_body("  "), json!(""));
    }

    #[test]
    fn test_parse_body_keeps_key_order() {
        let body = parse_body(r#"{"type":"missing","loc":["body","user"],"msg":"Field required"}"#);
        assert_eq!(
            body.to_string(),
            r#"{"type":"missing","loc":["body","user"],"msg":"Field required"}"#
        );
    }
}
