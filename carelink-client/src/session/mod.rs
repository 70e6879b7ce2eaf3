//! Authentication session state
//!
//! The session is a token plus a profile snapshot, persisted as a single
//! record in durable storage and mirrored in memory.

pub mod record;
pub mod store;

pub use record::{SessionRecord, UserProfile, SESSION_KEY};
pub use store::{AuthOutcome, FailureKind, SessionStore, GENERIC_FAILURE};
