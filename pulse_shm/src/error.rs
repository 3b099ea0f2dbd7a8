//! Error types for channel operations

use thiserror::Error;

/// Errors that can occur while operating the sample channel
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Named region could not be created
    #[error("Failed to allocate segment '{name}': {source}")]
    Allocation {
        /// Segment name
        name: String,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Named region could not be opened or mapped
    #[error("Failed to attach segment '{name}': {source}")]
    Attach {
        /// Segment name
        name: String,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Existing region does not match the expected record layout
    #[error("Segment '{name}' size mismatch: expected {expected} bytes, found {found}")]
    SizeMismatch {
        /// Segment name
        name: String,
        /// Size of the record type being overlaid
        expected: usize,
        /// Size of the backing region on disk
        found: u64,
    },

    /// Mapped region is not aligned for the record type
    #[error("Segment '{name}' mapping at {address:#x} not aligned to {alignment}")]
    Alignment {
        /// Segment name
        name: String,
        /// Mapping address
        address: usize,
        /// Required alignment
        alignment: usize,
    },

    /// Bounded lock acquisition retries exhausted
    #[error("Lock '{name}' not acquired after {attempts} attempts")]
    LockAcquire {
        /// OS-visible lock name
        name: String,
        /// Number of attempts made before giving up
        attempts: u32,
    },

    /// Lock release failed at the OS level
    #[error("Failed to release lock '{name}': {source}")]
    LockRelease {
        /// OS-visible lock name
        name: String,
        /// Source errno
        source: nix::Error,
    },

    /// IO error
    #[error("IO error: {source}")]
    Io {
        /// Source IO error
        #[from]
        source: std::io::Error,
    },
}

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;
