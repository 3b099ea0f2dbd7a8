//! Platform-specific mapping and naming helpers.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::{attach_segment_mmap, create_segment_mmap, lock_path, segment_path};
