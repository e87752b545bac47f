//! Config key validation

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{PatchError, PatchResult};
use crate::request::PatchRequest;

/// Pattern every config key must match
pub const KEY_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_]{0,1000}$";

fn key_regex() -> &'static Regex {
    static KEY_RE: OnceLock<Regex> = OnceLock::new();
    KEY_RE.get_or_init(|| Regex::new(KEY_PATTERN).expect("config key pattern compiles"))
}

/// Check a candidate config key
///
/// Keys must:
/// - Start with an ASCII letter
/// - Continue with ASCII letters, digits or underscores
/// - Be at most 1001 characters long
///
/// Matching is case-sensitive and the key is not normalized.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    key_regex().is_match(key)
}

/// Validate every key in a request, failing on the first bad one in key order
pub fn validate_keys(request: &PatchRequest) -> PatchResult<()> {
    match request.keys().find(|key| !is_valid_key(key)) {
        Some(key) => Err(PatchError::InvalidKey {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}
