//! # Pulse Shared Memory Channel
//!
//! A cross-process data channel: a producer process and a consumer process
//! exchange one fixed-size sample record through a named memory-mapped
//! segment, coordinated by per-role advisory file locks instead of a
//! socket or pipe.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────┐      ┌──────────────────────┐      ┌─────────────────┐
//! │   Producer      │      │   Mapped Segment     │      │   Consumer      │
//! │                 │      │  /dev/shm/pulse_<n>  │      │                 │
//! │ SampleChannel   ├─────►│                      ├─────►│ SampleChannel   │
//! │   ::create      │      │   [SampleRecord]     │      │   ::attach      │
//! └───────┬─────────┘      │   48 bytes, in place │      └───────┬─────────┘
//!         │                └──────────────────────┘              │
//!         ▼                                                      ▼
//!  <n>_sender.lock                                        <n>_receiver.lock
//! ```
//!
//! The channel holds exactly one mutable record overwritten in place —
//! there is no history, backpressure, or multi-consumer fan-out. Each role
//! brackets its access with its own lock; a role lock serializes same-role
//! handles only (see [`lock`] for the cross-role caveat).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pulse_shm::SampleChannel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Producer (first process up — the creator)
//! let mut producer = SampleChannel::create("samples")?;
//! producer.publish([1.0; 10], 1_700_000_000_000)?;
//!
//! // Consumer (second process — an attacher)
//! let mut consumer = SampleChannel::attach("samples")?;
//! let record = consumer.snapshot()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ChannelError>`:
//!
//! ```rust,no_run
//! use pulse_shm::{ChannelError, SampleChannel};
//!
//! match SampleChannel::attach("samples") {
//!     Ok(channel) => { /* use channel */ }
//!     Err(ChannelError::Attach { name, .. }) => {
//!         eprintln!("Channel '{}' not found - check the producer is running", name);
//!     }
//!     Err(e) => eprintln!("Unexpected error: {}", e),
//! }
//! ```
//!
//! Lock acquisition is bounded (10 attempts, 20 ms apart) and exhausting
//! the bound is a hard [`ChannelError::LockAcquire`] — a caller never
//! silently proceeds without its lock.
//!
//! ## Lifecycle
//!
//! - The creator allocates the segment (zeroed) and both lock names, and
//!   removes all three in its teardown.
//! - Attachers map the existing region; their teardown releases only the
//!   local mapping and descriptors.
//! - A crashed holder's lock is released by the kernel when its descriptor
//!   closes; nothing is emulated in user space.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod error;
pub mod lock;
pub mod platform;
pub mod segment;

pub use channel::SampleChannel;
pub use error::{ChannelError, ChannelResult};
pub use lock::{LockGuard, Role, RoleLock};
pub use segment::SharedSegment;

/// Initialize tracing for the channel binaries
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
