/// API route handlers, one module per resource
///
/// - `health`: Liveness and database probe
/// - `users`: Signup, fetch and soft delete
/// - `items`: Item creation and listings

pub mod health;
pub mod items;
pub mod users;
