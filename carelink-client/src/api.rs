//! HTTP client for the carelink backend
//!
//! One request per call, no retries, no timeout beyond the client default.
//! Every endpoint's success body is deserialized against an explicit schema;
//! error bodies are read leniently for their `error` text.

use crate::credentials::Credentials;
use crate::error::{ApiError, ApiResult};
use carelink_core::config::ApiConfig;
use carelink_core::utils::truncate;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

pub const LOGIN_ENDPOINT: &str = "/api/users/login";
pub const LOGOUT_ENDPOINT: &str = "/api/users/logout";
pub const REGISTER_ENDPOINT: &str = "/api/create_user";

/// Header carrying the session token on authenticated calls
pub const AUTH_TOKEN_HEADER: &str = "Authentication-Token";

/// Backend user identifier; the backend sends either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => UserId(n.to_string()),
            Raw::Str(s) => UserId(s),
        })
    }
}

/// `POST /api/users/login` success body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: LoginUser,
    /// Some backends return the token beside `user` instead of inside it
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The session token issued by this login, if any
    pub fn auth_token(&self) -> Option<&str> {
        self.user
            .auth_token
            .as_deref()
            .or(self.token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// The `user` object of a login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub user_id: UserId,
    pub user_name: String,
    pub role: String,
    pub email: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Success body of logout and create-user
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Thin wrapper over `reqwest` bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (trailing slashes are ignored)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.post(LOGIN_ENDPOINT, Some(credentials), None).await
    }

    /// Log out; the token header is omitted when there is no token
    pub async fn logout(&self, token: Option<&str>) -> ApiResult<MessageResponse> {
        self.post(LOGOUT_ENDPOINT, None, token).await
    }

    pub async fn register(&self, credentials: &Credentials) -> ApiResult<MessageResponse> {
        self.post(REGISTER_ENDPOINT, Some(credentials), None).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Credentials>,
        token: Option<&str>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "Sending request");

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Schema {
            endpoint: endpoint.to_string(),
            reason: format!("{} (body: {})", e, truncate(&text, 200)),
        })
    }
}
