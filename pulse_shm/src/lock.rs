//! Role-scoped interprocess locks
//!
//! Each channel carries two named advisory file locks, one per role
//! (producer and consumer). A role lock serializes handles of the *same*
//! role only: the two lock files are independent resources, so producer
//! and consumer do not exclude each other while touching the record.
//! Callers needing cross-role exclusion must route both sides through a
//! single role.
//!
//! Acquisition is bounded: up to [`LOCK_MAX_ATTEMPTS`] non-blocking
//! attempts, [`LOCK_RETRY_INTERVAL`] apart. Exhausting the bound is an
//! explicit [`ChannelError::LockAcquire`] — callers never proceed
//! unlocked. Held locks are released by the returned [`LockGuard`]; if
//! the owning process dies instead, the kernel drops the `flock` when
//! the descriptor closes.

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use pulse::consts::{
    CONSUMER_SUFFIX, LOCK_MAX_ATTEMPTS, LOCK_RETRY_INTERVAL, PRODUCER_SUFFIX, SEGMENT_PREFIX,
};

use crate::error::{ChannelError, ChannelResult};
use crate::platform::lock_path;

/// Channel participant role, selecting which named lock a handle uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Writes the record in place.
    Producer,
    /// Reads the record in place.
    Consumer,
}

impl Role {
    /// OS-name suffix for this role's lock.
    pub fn suffix(self) -> &'static str {
        match self {
            Role::Producer => PRODUCER_SUFFIX,
            Role::Consumer => CONSUMER_SUFFIX,
        }
    }
}

/// One named role lock backed by an advisory-locked file.
///
/// The lock file is created by whichever process arrives first and
/// removed only by the channel creator's teardown. Every handle keeps
/// its descriptor open for its lifetime; the held/free state lives
/// entirely in the kernel, never cached locally.
pub struct RoleLock {
    /// OS-visible lock name, e.g. `pulse_samples_sender`.
    name: String,
    path: PathBuf,
    role: Role,
    /// Creator removes the lock file on drop; attachers only close.
    unlink_on_drop: bool,
    /// Descriptor while free; moved into the guard while held.
    file: Option<File>,
}

fn open_lock_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .mode(0o600)
        .open(path)
}

impl RoleLock {
    /// Create or open the named lock for `role` on channel `channel`.
    pub fn open(channel: &str, role: Role, is_creator: bool) -> ChannelResult<Self> {
        let path = lock_path(channel, role.suffix());
        let name = format!("{}_{}_{}", SEGMENT_PREFIX, channel, role.suffix());

        let file = open_lock_file(&path).map_err(|source| {
            if is_creator {
                ChannelError::Allocation {
                    name: name.clone(),
                    source,
                }
            } else {
                ChannelError::Attach {
                    name: name.clone(),
                    source,
                }
            }
        })?;

        debug!(lock = %name, ?role, is_creator, "role lock opened");

        Ok(Self {
            name,
            path,
            role,
            unlink_on_drop: is_creator,
            file: Some(file),
        })
    }

    /// Acquire the lock, retrying up to the bounded policy.
    ///
    /// Returns a [`LockGuard`] that releases on drop. After
    /// [`LOCK_MAX_ATTEMPTS`] contended attempts the call fails with
    /// [`ChannelError::LockAcquire`]; any other OS failure surfaces
    /// immediately.
    pub fn acquire(&mut self) -> ChannelResult<LockGuard<'_>> {
        // The descriptor is only absent after a failed release dropped it;
        // reopening restores the handle without affecting lock state.
        let mut file = match self.file.take() {
            Some(f) => f,
            None => open_lock_file(&self.path)?,
        };

        for attempt in 1..=LOCK_MAX_ATTEMPTS {
            match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(held) => {
                    trace!(lock = %self.name, attempt, "lock acquired");
                    return Ok(LockGuard {
                        held: Some(held),
                        owner: self,
                    });
                }
                Err((returned, errno)) if errno == Errno::EWOULDBLOCK => {
                    file = returned;
                    debug!(lock = %self.name, attempt, "lock contended, retrying");
                    if attempt < LOCK_MAX_ATTEMPTS {
                        std::thread::sleep(LOCK_RETRY_INTERVAL);
                    }
                }
                Err((returned, errno)) => {
                    self.file = Some(returned);
                    return Err(ChannelError::Io {
                        source: std::io::Error::from_raw_os_error(errno as i32),
                    });
                }
            }
        }

        self.file = Some(file);
        Err(ChannelError::LockAcquire {
            name: self.name.clone(),
            attempts: LOCK_MAX_ATTEMPTS,
        })
    }

    /// OS-visible lock name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role this lock guards.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Drop for RoleLock {
    fn drop(&mut self) {
        // Closing the descriptor is implicit. Only the creator removes
        // the name; a failure here must not disturb remaining teardown.
        if self.unlink_on_drop {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(lock = %self.name, error = %e, "failed to unlink lock file");
            }
        }
    }
}

/// Scoped holder of an acquired role lock.
///
/// Dropping the guard releases the lock (best effort, logged on failure);
/// [`release`](LockGuard::release) does the same but surfaces OS errors.
pub struct LockGuard<'a> {
    held: Option<Flock<File>>,
    owner: &'a mut RoleLock,
}

impl LockGuard<'_> {
    /// Release the lock, reporting any OS-level failure.
    pub fn release(mut self) -> ChannelResult<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> ChannelResult<()> {
        let Some(held) = self.held.take() else {
            return Ok(());
        };

        match held.unlock() {
            Ok(file) => {
                trace!(lock = %self.owner.name, "lock released");
                self.owner.file = Some(file);
                Ok(())
            }
            Err((still_held, errno)) => {
                // Dropping the descriptor closes it, which makes the
                // kernel release the lock even though unlock() failed.
                drop(still_held);
                Err(ChannelError::LockRelease {
                    name: self.owner.name.clone(),
                    source: errno,
                })
            }
        }
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if self.held.is_some() {
            if let Err(e) = self.release_inner() {
                warn!(error = %e, "lock release failed during drop");
            }
        }
    }
}
