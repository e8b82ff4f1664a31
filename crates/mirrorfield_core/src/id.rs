//! Control id generation
//!
//! Ids come from a process-wide counter. They are unique within one
//! process lifetime only; nothing is persisted across restarts.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of every generated control id
pub const CONTROL_ID_PREFIX: &str = "mirrorfield";

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(0);

/// Take the next id, e.g. `mirrorfield-3`
pub fn next_control_id() -> String {
    let n = NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed);
    format!("{CONTROL_ID_PREFIX}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(id: &str) -> u64 {
        id.rsplit('-')
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(u64::MAX)
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = next_control_id();
        let b = next_control_id();
        assert_ne!(a, b);
        assert!(a.starts_with("mirrorfield-"));
        assert!(suffix(&b) > suffix(&a));
    }
}
