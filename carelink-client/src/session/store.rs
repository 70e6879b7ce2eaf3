//! Authentication session store

use super::record::{import_legacy, SessionRecord, UserProfile, SESSION_KEY};
use crate::api::ApiClient;
use crate::credentials::Credentials;
use crate::error::ApiError;
use carelink_core::storage::KeyValueStore;
use carelink_core::Error;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Message returned for any failure the backend did not describe
pub const GENERIC_FAILURE: &str = "Oops! Something Went Wrong";

/// Why an auth operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend answered with an error status
    Rejected,
    /// No usable response arrived
    Transport,
    /// A success response did not match the endpoint's schema
    Schema,
    /// The backend succeeded but local storage could not be updated
    Storage,
}

/// Uniform result of login, logout and register
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl AuthOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            username: None,
            role: None,
            failure: None,
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            username: None,
            role: None,
            failure: Some(kind),
        }
    }

    fn with_user(mut self, profile: &UserProfile) -> Self {
        self.username = Some(profile.username.clone());
        self.role = Some(profile.role.clone());
        self
    }

    /// Convert a failed call into an outcome, logging it on the way
    fn from_error(operation: &str, err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, message } => {
                warn!(operation, status, %message, "Backend rejected request");
                Self::failure(FailureKind::Rejected, message)
            }
            ApiError::Transport(e) => {
                error!(operation, error = %e, "Request failed");
                Self::failure(FailureKind::Transport, GENERIC_FAILURE)
            }
            ApiError::Schema { endpoint, reason } => {
                error!(operation, %endpoint, %reason, "Unexpected response shape");
                Self::failure(FailureKind::Schema, GENERIC_FAILURE)
            }
            ApiError::Core(e) => {
                error!(operation, error = %e, "Local session update failed");
                Self::failure(FailureKind::Storage, GENERIC_FAILURE)
            }
        }
    }
}

/// In-memory mirror of the stored profile
#[derive(Debug, Clone)]
enum ProfileSlot {
    Absent,
    Present(UserProfile),
    Malformed(String),
}

#[derive(Debug, Clone)]
struct SessionState {
    token: Option<String>,
    profile: ProfileSlot,
}

impl SessionState {
    fn empty() -> Self {
        Self {
            token: None,
            profile: ProfileSlot::Absent,
        }
    }

    fn from_record(record: SessionRecord) -> Self {
        Self {
            token: record.token,
            profile: record
                .profile
                .map_or(ProfileSlot::Absent, ProfileSlot::Present),
        }
    }
}

/// Owns the authentication token and profile snapshot
///
/// State is loaded from storage on construction and re-read after every
/// successful login or logout. `is_authenticated` holds exactly when a token
/// is present.
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create a store over `storage`, importing legacy keys if needed
    pub fn new(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> carelink_core::Result<Self> {
        import_legacy(storage.as_ref())?;
        let store = Self {
            api,
            storage,
            state: RwLock::new(SessionState::empty()),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the session record from storage
    ///
    /// An unparseable record leaves the store unauthenticated; profile reads
    /// then report the parse error.
    pub fn reload(&self) -> carelink_core::Result<()> {
        let state = match self.storage.get(SESSION_KEY)? {
            None => SessionState::empty(),
            Some(raw) => match SessionRecord::parse(&raw) {
                Ok(record) => SessionState::from_record(record),
                Err(e) => {
                    warn!(error = %e, "Stored session record is malformed");
                    SessionState {
                        token: None,
                        profile: ProfileSlot::Malformed(e.to_string()),
                    }
                }
            },
        };
        *self.state.write() = state;
        Ok(())
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    /// The stored profile
    ///
    /// Fails with `NotFound` when nobody is logged in and with
    /// `Serialization` when the stored record cannot be parsed.
    pub fn profile(&self) -> carelink_core::Result<UserProfile> {
        match &self.state.read().profile {
            ProfileSlot::Present(profile) => Ok(profile.clone()),
            ProfileSlot::Absent => Err(Error::NotFound("no user profile stored".to_string())),
            ProfileSlot::Malformed(reason) => Err(Error::Serialization(reason.clone())),
        }
    }

    pub fn username(&self) -> carelink_core::Result<String> {
        self.profile().map(|p| p.username)
    }

    pub fn email(&self) -> carelink_core::Result<String> {
        self.profile().map(|p| p.email)
    }

    pub fn role(&self) -> carelink_core::Result<String> {
        self.profile().map(|p| p.role)
    }

    /// Log in and persist the returned profile and token
    ///
    /// Failures leave storage and in-memory state untouched. A success
    /// replaces the whole record: a token from an earlier session is never
    /// carried over to the new profile.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        debug!("Sending login request");
        let response = match self.api.login(credentials).await {
            Ok(response) => response,
            Err(e) => return AuthOutcome::from_error("login", e),
        };

        let profile = UserProfile::from(&response.user);
        let token = response.auth_token().map(str::to_string);
        if token.is_none() {
            warn!(
                username = %profile.username,
                "Login response carried no auth token; session stays unauthenticated"
            );
        }

        let record = SessionRecord::new(token, Some(profile.clone()));
        if let Err(e) = self.commit(|storage| record.save(storage)) {
            return AuthOutcome::from_error("login", e.into());
        }

        info!(username = %profile.username, role = %profile.role, "Logged in");
        AuthOutcome::success(response.message).with_user(&profile)
    }

    /// Log out on the backend, then drop the local session
    ///
    /// If the backend refuses, the local session is kept.
    pub async fn logout(&self) -> AuthOutcome {
        let token = self.token();
        debug!(has_token = token.is_some(), "Sending logout request");
        let response = match self.api.logout(token.as_deref()).await {
            Ok(response) => response,
            Err(e) => return AuthOutcome::from_error("logout", e),
        };

        if let Err(e) = self.commit(SessionRecord::clear) {
            return AuthOutcome::from_error("logout", e.into());
        }

        info!("Logged out");
        AuthOutcome::success(response.message)
    }

    /// Create an account; never touches the session
    pub async fn register(&self, credentials: &Credentials) -> AuthOutcome {
        debug!("Sending registration request");
        match self.api.register(credentials).await {
            Ok(response) => {
                info!("Registered new user");
                AuthOutcome::success(response.message)
            }
            Err(e) => AuthOutcome::from_error("register", e),
        }
    }

    /// Apply a storage mutation and refresh the in-memory mirror
    fn commit<F>(&self, mutate: F) -> carelink_core::Result<()>
    where
        F: FnOnce(&dyn KeyValueStore) -> carelink_core::Result<()>,
    {
        mutate(self.storage.as_ref())?;
        self.reload()
    }
}
