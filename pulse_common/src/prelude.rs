//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types so
//! that consumers can do `use pulse_common::prelude::*;` and get the most
//! important types without listing individual paths.

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ChannelConfig, ConfigError, ConfigLoader, LogLevel};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{LOCK_MAX_ATTEMPTS, LOCK_RETRY_INTERVAL, RECORD_SIZE, SAMPLE_COUNT};

// ─── Record ─────────────────────────────────────────────────────────
pub use crate::record::SampleRecord;
