//! Short key generation and unique allocation.
//!
//! Keys are 6 characters drawn uniformly from `[a-zA-Z0-9]`, which gives
//! 62^6 (about 5.7×10^10) possible keys. Collisions are rare but handled:
//! [`allocate_unique`] keeps drawing until the store reports a free key.

use rand::Rng;
use serde_json::json;
use std::future::Future;

use crate::error::AppError;

/// Number of characters in every generated key.
pub const SHORT_KEY_LENGTH: usize = 6;

/// The 62-symbol alphabet keys are drawn from.
pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random short key.
///
/// Uses the thread-local CSPRNG from `rand`, seeded from the OS.
pub fn generate_key() -> String {
    let mut rng = rand::rng();

    (0..SHORT_KEY_LENGTH)
        .map(|_| KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `key` has the shape of a generated key.
pub fn is_well_formed(key: &str) -> bool {
    key.len() == SHORT_KEY_LENGTH && key.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Draws keys until `exists` reports one as unused.
///
/// Returns the free key together with the number of keys drawn, so callers
/// retrying after a failed insert can charge every draw to one budget.
///
/// # Errors
///
/// Returns [`AppError::Internal`] when `max_attempts` keys in a row were taken,
/// and propagates any error from `exists`.
pub async fn allocate_unique<F, Fut>(
    max_attempts: u32,
    mut exists: F,
) -> Result<(String, u32), AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    for attempt in 1..=max_attempts {
        let key = generate_key();

        if !exists(key.clone()).await? {
            return Ok((key, attempt));
        }

        metrics::counter!("short_key_collisions_total").increment(1);
        tracing::debug!(attempt, "Short key collision, regenerating");
    }

    tracing::error!(max_attempts, "Exhausted short key allocation attempts");

    Err(AppError::internal(
        "Failed to generate unique short key",
        json!({ "reason": "Too many collisions", "attempts": max_attempts }),
    ))
}
