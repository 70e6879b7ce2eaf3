//! Core types and state containers for carelink
//!
//! This crate provides the durable key/value storage abstraction, the
//! conversation store, the route table with its navigation guard, and the
//! configuration and logging plumbing shared by the other carelink crates.

pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod routes;
pub mod storage;
pub mod utils;

pub use error::{Error, Result};
