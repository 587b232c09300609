//! Options Module
//!
//! Per-call and store-level options for `set` and `invalidate`.
//!
//! Per-call options replace the store defaults wholesale. They are never
//! merged field by field.

use std::time::Duration;

use crate::cache::expiry::{deadline, NEVER};

// == Zero TTL Policy ==
/// How a zero expiration duration is interpreted on `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroTtlPolicy {
    /// Store no expiration; an existing one on the key is kept.
    #[default]
    NeverExpire,
    /// Store the current second as the expiration. The entry stays readable
    /// until that second has passed.
    ExpireAtNow,
    /// Store the previous second as the expiration, so any later read misses.
    ExpireImmediately,
}

impl ZeroTtlPolicy {
    /// Parses `never`, `now` or `immediate` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "never" => Some(ZeroTtlPolicy::NeverExpire),
            "now" => Some(ZeroTtlPolicy::ExpireAtNow),
            "immediate" => Some(ZeroTtlPolicy::ExpireImmediately),
            _ => None,
        }
    }

    /// Absolute expiration instant for `ttl` relative to `now`.
    pub fn expires_at(self, now: i64, ttl: Duration) -> i64 {
        if !ttl.is_zero() {
            return deadline(now, ttl);
        }
        match self {
            ZeroTtlPolicy::NeverExpire => NEVER,
            ZeroTtlPolicy::ExpireAtNow => now,
            ZeroTtlPolicy::ExpireImmediately => now - 1,
        }
    }
}

// == Set Options ==
/// Expiration and tags applied by `set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Time-to-live; zero is resolved through `ZeroTtlPolicy`
    pub expiration: Duration,
    /// Tags the key is associated with
    pub tags: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

// == Invalidate Options ==
/// Tags whose members `invalidate` removes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidateOptions {
    pub tags: Vec<String>,
}

impl InvalidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
