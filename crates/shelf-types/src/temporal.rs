use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation timestamp in milliseconds since the UNIX epoch.
///
/// Timestamps are assigned by the document store on insert (the "server
/// clock") and establish the canonical ordering of genres and books. The
/// session layer never fabricates its own creation times; it blocks on the
/// store-assigned value returned by the insert receipt.
///
/// Serializes as a bare integer so it can live in document fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from explicit epoch milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let ms = Utc::now().timestamp_millis().max(0) as u64;
        Self(ms)
    }

    /// The zero timestamp (epoch).
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Epoch milliseconds.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns `true` if this timestamp is strictly after `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0 as i64) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_by_millis() {
        let a = Timestamp::from_millis(100);
        let b = Timestamp::from_millis(200);
        assert!(a < b);
        assert!(b.is_after(&a));
        assert!(!a.is_after(&b));
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        let ts = Timestamp::now();
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(ts.as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn zero_is_smallest() {
        assert!(Timestamp::zero() < Timestamp::from_millis(1));
    }

    #[test]
    fn serde_roundtrip_as_integer() {
        let ts = Timestamp::from_millis(1_700_000_000_000);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1700000000000");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn display_formats_utc() {
        let ts = Timestamp::from_millis(0);
        assert_eq!(format!("{ts}"), "1970-01-01 00:00:00");
    }
}
