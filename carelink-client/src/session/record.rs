//! Persisted session record
//!
//! The token and profile are written together as one JSON value under a
//! single storage key, so readers never see a profile from one login paired
//! with a token from another.

use crate::api::{LoginUser, UserId};
use carelink_core::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Storage key holding the serialized [`SessionRecord`]
pub const SESSION_KEY: &str = "session";

/// Keys written by earlier releases, one value each
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const LEGACY_PROFILE_KEY: &str = "user_details";
pub const LEGACY_USERNAME_KEY: &str = "userName";

pub const LEGACY_KEYS: [&str; 3] = [LEGACY_TOKEN_KEY, LEGACY_PROFILE_KEY, LEGACY_USERNAME_KEY];

/// Snapshot of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Absent in profiles written before ids were recorded
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub username: String,
    pub role: String,
    pub email: String,
}

impl From<&LoginUser> for UserProfile {
    fn from(user: &LoginUser) -> Self {
        Self {
            user_id: Some(user.user_id.clone()),
            username: user.user_name.clone(),
            role: user.role.clone(),
            email: user.email.clone(),
        }
    }
}

/// Everything the session store persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(token: Option<String>, profile: Option<UserProfile>) -> Self {
        Self {
            token,
            profile,
            updated_at: Utc::now(),
        }
    }

    /// Parse a stored record
    pub fn parse(raw: &str) -> carelink_core::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Write the record under [`SESSION_KEY`] in one storage call
    pub fn save(&self, storage: &dyn KeyValueStore) -> carelink_core::Result<()> {
        let raw = serde_json::to_string(self)?;
        storage.set(SESSION_KEY, &raw)
    }

    /// Remove the record and any legacy keys
    pub fn clear(storage: &dyn KeyValueStore) -> carelink_core::Result<()> {
        storage.remove(SESSION_KEY)?;
        for key in LEGACY_KEYS {
            storage.remove(key)?;
        }
        Ok(())
    }
}

/// Fold legacy per-field keys into a single record
///
/// Runs only when no record exists yet. Returns the imported record, or
/// `None` when there was nothing to import. A legacy profile that does not
/// parse is dropped with a warning; the token is still imported.
pub fn import_legacy(storage: &dyn KeyValueStore) -> carelink_core::Result<Option<SessionRecord>> {
    if storage.contains(SESSION_KEY)? {
        return Ok(None);
    }

    let token = storage.get(LEGACY_TOKEN_KEY)?;
    let details = storage.get(LEGACY_PROFILE_KEY)?;
    if token.is_none() && details.is_none() {
        if storage.contains(LEGACY_USERNAME_KEY)? {
            storage.remove(LEGACY_USERNAME_KEY)?;
            info!("Removed orphan legacy username key");
        }
        return Ok(None);
    }

    let profile = match details.as_deref() {
        None => None,
        Some(raw) => match serde_json::from_str::<UserProfile>(raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Dropping unreadable legacy user profile");
                None
            }
        },
    };

    let record = SessionRecord::new(token, profile);
    record.save(storage)?;
    for key in LEGACY_KEYS {
        storage.remove(key)?;
    }
    info!(
        has_token = record.token.is_some(),
        has_profile = record.profile.is_some(),
        "Imported legacy session keys"
    );
    Ok(Some(record))
}
