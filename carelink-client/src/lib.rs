//! Backend client and session state for carelink
//!
//! [`SessionStore`] talks to the backend's user endpoints and persists the
//! resulting session; [`AppContext`] ties it together with the conversation
//! store and the router for the lifetime of the application.

pub mod api;
pub mod context;
pub mod credentials;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use context::AppContext;
pub use credentials::Credentials;
pub use error::{ApiError, ApiResult};
pub use session::{AuthOutcome, FailureKind, SessionStore, UserProfile};
