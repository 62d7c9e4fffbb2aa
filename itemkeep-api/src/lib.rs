//! # ItemKeep API Server Library
//!
//! HTTP layer for ItemKeep: users who own items, authenticated by a static
//! per-user `X-API-TOKEN`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Extractors that reject with `ApiError`
//! - `middleware`: API token gate
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
