//! Patch request assembly
//!
//! A [`PatchRequest`] is the tri-state batch sent to the remote config
//! endpoint: `Some(value)` sets a key, `None` removes it. Keys are unique by
//! construction; a later duplicate in the input overwrites an earlier one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PatchError, PatchResult};

/// Set/unset batch keyed by config key, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchRequest {
    entries: BTreeMap<String, Option<String>>,
}

impl PatchRequest {
    /// Build a request from `KEY=VALUE` tokens
    ///
    /// Each token is split on its first `=`; the value may be empty or contain
    /// further `=` characters. Fails on the first token without `=`.
    pub fn from_set_tokens<I, S>(tokens: I) -> PatchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::default();
        for token in tokens {
            let (key, value) = token
                .as_ref()
                .split_once('=')
                .ok_or_else(PatchError::malformed_assignment)?;
            request.set(key, value);
        }
        Ok(request)
    }

    /// Build a request that removes each of the given keys
    pub fn from_unset_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut request = Self::default();
        for key in keys {
            request.unset(key);
        }
        request
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    pub fn unset(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), None);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Option<String>> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys being set
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// Number of keys being removed
    #[must_use]
    pub fn unset_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_none()).count()
    }
}
