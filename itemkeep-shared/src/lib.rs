//! # ItemKeep Shared Library
//!
//! This crate contains the domain types, persistence and authentication
//! primitives used by the ItemKeep API server.
//!
//! ## Module Organization
//!
//! - `models`: Users and the items they own, with their database operations
//! - `auth`: Password hashing, API token handling and the token auth gate
//! - `db`: Connection pool and schema bootstrap

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the ItemKeep shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
