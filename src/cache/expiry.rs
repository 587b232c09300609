//! Expiry Module
//!
//! Whole-second clock helpers shared by the document and the store.

use std::time::Duration;

use chrono::Utc;

/// Stored expiration meaning "never expires".
pub const NEVER: i64 = 0;

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Checks whether an absolute expiration instant lies in the past.
///
/// `NEVER` is never past. Otherwise the instant is past once `now` is
/// strictly greater, so an entry stays readable through its expiry second.
pub fn is_past(expires_at: i64, now: i64) -> bool {
    expires_at != NEVER && expires_at < now
}

/// Remaining lifetime of an entry, or `None` if it never expires.
///
/// Saturates at zero for instants already reached.
pub fn remaining(expires_at: i64, now: i64) -> Option<Duration> {
    if expires_at == NEVER {
        return None;
    }
    let secs = expires_at.saturating_sub(now).max(0);
    Some(Duration::from_secs(secs as u64))
}

/// Absolute expiration instant `ttl` seconds after `now`.
pub fn deadline(now: i64, ttl: Duration) -> i64 {
    let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    now.saturating_add(secs)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_is_not_past() {
        assert!(!is_past(NEVER, now_unix()));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = 1_700_000_000;
        assert!(!is_past(now, now), "an entry is readable during its expiry second");
        assert!(is_past(now - 1, now));
        assert!(!is_past(now + 1, now));
    }

    #[test]
    fn test_remaining() {
        let now = 1_700_000_000;
        assert_eq!(remaining(NEVER, now), None);
        assert_eq!(remaining(now + 10, now), Some(Duration::from_secs(10)));
        assert_eq!(remaining(now - 10, now), Some(Duration::ZERO));
    }

    #[test]
    fn test_deadline() {
        assert_eq!(deadline(100, Duration::from_secs(5)), 105);
        assert_eq!(deadline(100, Duration::from_millis(999)), 100);
        assert_eq!(deadline(100, Duration::MAX), i64::MAX);
    }
}
