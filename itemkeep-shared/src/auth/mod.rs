/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
/// - [`api_token`]: Static per-user API token generation and hashing
/// - [`context`]: Resolves the caller from the `X-API-TOKEN` header
///
/// # Example
///
/// ```
/// use itemkeep_shared::auth::api_token::{generate_api_token, hash_api_token};
/// use itemkeep_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("chimichangas4life")?;
/// assert!(verify_password("chimichangas4life", &hash)?);
///
/// let token = generate_api_token();
/// assert_eq!(hash_api_token(&token.plaintext), token.hash);
/// # Ok(())
/// # }
/// ```

pub mod api_token;
pub mod context;
pub mod password;
