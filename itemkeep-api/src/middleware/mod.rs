/// Middleware for the API server
///
/// - `auth`: `X-API-TOKEN` gate for protected routes

pub mod auth;
