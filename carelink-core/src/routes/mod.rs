//! Route table and navigation
//!
//! Maps URL paths to views that are loaded on first visit. Routes flagged
//! `requires_auth` are only entered when the caller reports an authenticated
//! session; otherwise navigation is redirected to the login route.

pub mod defaults;
pub mod router;
pub mod table;

pub use defaults::{default_routes, LOGIN_PATH};
pub use router::{Navigation, Router, ViewLoader};
pub use table::{Route, RouteTable, ViewId};
