//! Data models exchanged with the registration API

use base64::Engine;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Registration form contents, sent as `{ "user": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserData {
    pub first: String,
    pub last: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login form contents, sent form-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUserData {
    pub username: String,
    pub password: String,
}

/// Token type issued by the server. Always `bearer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    #[default]
    Bearer,
}

/// Response to a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: TokenType,
}

/// Identity block of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBasics {
    pub username: String,
    pub first: String,
    pub last: String,
    /// Base64-encoded PNG
    pub thumbnail: String,
}

impl UserBasics {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }

    /// Decode the thumbnail into raw PNG bytes
    pub fn decode_thumbnail(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.thumbnail.trim())
            .map_err(|e| crate::Error::validation(format!("Invalid thumbnail encoding: {}", e)))
    }
}

/// One recorded login session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub ip: String,
    pub browser: String,
    pub time: String,
    pub country: String,
}

impl UserSession {
    /// Parse `time`, accepting RFC 3339 and the naive ISO forms the server emits.
    pub fn parsed_time(&self) -> Option<NaiveDateTime> {
        let s = self.time.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    }
}

/// Full profile as returned by `/user_profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_basics: UserBasics,
    pub user_sessions: Vec<UserSession>,
}

/// In-memory store state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub profile: Option<UserProfile>,
}
