/// API token utilities
///
/// Every user receives one static API token at signup. The plaintext token is
/// shown once, in the signup response; the database keeps only its SHA-256
/// hash and a short prefix for display and logs.
///
/// # Token Format
///
/// `ik_` followed by 32 base62 characters (35 chars total).
///
/// # Example
///
/// ```
/// use itemkeep_shared::auth::api_token::{generate_api_token, hash_api_token, validate_api_token_format};
///
/// let token = generate_api_token();
/// assert!(token.plaintext.starts_with("ik_"));
/// assert!(validate_api_token_format(&token.plaintext));
/// assert_eq!(hash_api_token(&token.plaintext), token.hash);
/// ```

use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Token prefix identifying ItemKeep tokens
pub const TOKEN_PREFIX: &str = "ik_";

/// Length of the random part of a token
const TOKEN_RANDOM_LENGTH: usize = 32;

/// Total length of a token
pub const API_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Characters of the token kept for display (`ik_` plus five random chars)
const DISPLAY_PREFIX_LENGTH: usize = 8;

/// A freshly generated token with its derived values
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    /// Returned to the user once, never stored
    pub plaintext: String,

    /// Hex-encoded SHA-256 of the plaintext, stored and used for lookup
    pub hash: String,

    /// Leading characters, safe to show and log
    pub prefix: String,
}

/// Generates a new random API token
pub fn generate_api_token() -> GeneratedToken {
    let random_part: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LENGTH)
        .map(char::from)
        .collect();

    let plaintext = format!("{}{}", TOKEN_PREFIX, random_part);

    GeneratedToken {
        hash: hash_api_token(&plaintext),
        prefix: display_prefix(&plaintext),
        plaintext,
    }
}

/// Hex-encoded SHA-256 of a token (64 chars)
pub fn hash_api_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Returns the display prefix of a token
pub fn display_prefix(token: &str) -> String {
    token.chars().take(DISPLAY_PREFIX_LENGTH).collect()
}

/// Checks the shape of a presented token before any database lookup
///
/// ```
/// use itemkeep_shared::auth::api_token::validate_api_token_format;
///
/// assert!(validate_api_token_format("ik_abcdefghijklmnopqrstuvwxyz123456"));
/// assert!(!validate_api_token_format("ik_short"));
/// assert!(!validate_api_token_format("xx_abcdefghijklmnopqrstuvwxyz123456"));
/// ```
pub fn validate_api_token_format(token: &str) -> bool {
    token.len() == API_TOKEN_LENGTH
        && token
            .strip_prefix(TOKEN_PREFIX)
            .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_alphanumeric()))
}
