//! System-wide constants for the Pulse workspace.
//!
//! Single source of truth for channel naming and lock retry policy.
//! Imported by all crates — no duplication permitted.

use std::time::Duration;

/// Number of samples in one shared record.
pub const SAMPLE_COUNT: usize = 10;

/// Size of one shared record in bytes (10 × f32 + i64, no padding).
pub const RECORD_SIZE: usize = 48;

/// Directory holding the named segment and lock files.
pub const SHM_DIR: &str = "/dev/shm";

/// Prefix applied to every OS-visible name this workspace creates.
pub const SEGMENT_PREFIX: &str = "pulse";

/// Role suffix for the producer-side lock name.
pub const PRODUCER_SUFFIX: &str = "sender";

/// Role suffix for the consumer-side lock name.
pub const CONSUMER_SUFFIX: &str = "receiver";

/// Maximum non-blocking acquisition attempts before a lock acquire fails.
pub const LOCK_MAX_ATTEMPTS: u32 = 10;

/// Pause between acquisition attempts (worst case ≈ 200 ms total).
pub const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(20);

/// Default channel name used by the demonstration loops.
pub const DEFAULT_CHANNEL_NAME: &str = "samples";

/// Default producer cycle period in milliseconds.
pub const DEFAULT_PRODUCER_PERIOD_MS: u64 = 100;

/// Default consumer cycle period in milliseconds.
pub const DEFAULT_CONSUMER_PERIOD_MS: u64 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(SAMPLE_COUNT > 0);
        assert_eq!(RECORD_SIZE, SAMPLE_COUNT * 4 + 8);
        assert!(LOCK_MAX_ATTEMPTS > 0);
        assert!(!LOCK_RETRY_INTERVAL.is_zero());
    }

    #[test]
    fn retry_bound_stays_under_quarter_second() {
        let worst = LOCK_RETRY_INTERVAL * LOCK_MAX_ATTEMPTS;
        assert!(worst <= Duration::from_millis(250));
    }

    #[test]
    fn role_suffixes_differ() {
        assert_ne!(PRODUCER_SUFFIX, CONSUMER_SUFFIX);
    }
}
