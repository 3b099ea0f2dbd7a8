//! Named shared memory segment with create-or-attach semantics
//!
//! A [`SharedSegment<T>`] owns one mapped region holding exactly one `T`.
//! Exactly one process constructs it with [`SharedSegment::create`] (the
//! creator — owns allocation and final unlink); every other process uses
//! [`SharedSegment::attach`] (attachers map the existing region and never
//! remove it). The typed overlay in [`view`](SharedSegment::view) /
//! [`view_mut`](SharedSegment::view_mut) is the single unsafe boundary of
//! the crate.

use memmap2::MmapMut;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{ChannelError, ChannelResult};
use crate::platform::{attach_segment_mmap, create_segment_mmap, segment_path};

/// One named, fixed-size mapped region holding a single record of type `T`.
///
/// # Layout contract
///
/// `T` must be `#[repr(C)]` and composed of fixed-size numeric fields only
/// — the mapped bytes are overlaid as `T` with no further checking, so the
/// layout must be identical in every attached process. Size and alignment
/// are validated when the handle is constructed; nothing is re-checked per
/// access.
pub struct SharedSegment<T: Copy> {
    /// Logical segment name (without prefix or directory).
    name: String,
    /// Backing file path under `/dev/shm`.
    path: PathBuf,
    /// Creator owns the final unlink; attachers only unmap.
    is_creator: bool,
    /// Memory mapping, exactly `size_of::<T>()` bytes.
    mmap: MmapMut,
    _marker: PhantomData<T>,
}

impl<T: Copy> SharedSegment<T> {
    /// Create a new named segment sized for one `T`, zero-initialized.
    ///
    /// Creation is exclusive: a second creator with the same name fails
    /// with [`ChannelError::Allocation`] instead of aliasing the region.
    pub fn create(name: &str) -> ChannelResult<Self> {
        let path = segment_path(name);
        let size = core::mem::size_of::<T>();

        let mmap =
            create_segment_mmap(&path, size).map_err(|source| ChannelError::Allocation {
                name: name.to_string(),
                source,
            })?;

        match Self::from_mapping(name, path.clone(), true, mmap) {
            Ok(segment) => {
                debug!(name, size, "segment created");
                Ok(segment)
            }
            Err(e) => {
                // Partial construction: the file exists but the handle was
                // never built, so remove the name before reporting.
                if let Err(unlink) = std::fs::remove_file(&path) {
                    warn!(name, error = %unlink, "failed to remove segment after partial creation");
                }
                Err(e)
            }
        }
    }

    /// Attach to an existing named segment.
    ///
    /// Fails with [`ChannelError::Attach`] if the region does not exist or
    /// cannot be mapped, and with [`ChannelError::SizeMismatch`] if the
    /// region on disk disagrees with `size_of::<T>()` — a mismatched
    /// record layout must never be overlaid.
    pub fn attach(name: &str) -> ChannelResult<Self> {
        let path = segment_path(name);

        let mmap = attach_segment_mmap(&path).map_err(|source| ChannelError::Attach {
            name: name.to_string(),
            source,
        })?;

        let segment = Self::from_mapping(name, path, false, mmap)?;
        debug!(name, "segment attached");
        Ok(segment)
    }

    /// Validate the mapping against the layout of `T` and build the handle.
    fn from_mapping(
        name: &str,
        path: PathBuf,
        is_creator: bool,
        mmap: MmapMut,
    ) -> ChannelResult<Self> {
        let expected = core::mem::size_of::<T>();
        if mmap.len() != expected {
            return Err(ChannelError::SizeMismatch {
                name: name.to_string(),
                expected,
                found: mmap.len() as u64,
            });
        }

        let address = mmap.as_ptr() as usize;
        let alignment = core::mem::align_of::<T>();
        if address % alignment != 0 {
            return Err(ChannelError::Alignment {
                name: name.to_string(),
                address,
                alignment,
            });
        }

        Ok(Self {
            name: name.to_string(),
            path,
            is_creator,
            mmap,
            _marker: PhantomData,
        })
    }

    /// Shared view of the record overlaying the mapped bytes.
    ///
    /// Valid only while this handle is alive, and only under the channel's
    /// lock discipline — the segment itself performs no synchronization.
    pub fn view(&self) -> &T {
        // SAFETY: the mapping is exactly size_of::<T>() bytes, aligned for
        // T (validated in from_mapping), and lives as long as &self.
        unsafe { &*(self.mmap.as_ptr() as *const T) }
    }

    /// Mutable view of the record overlaying the mapped bytes.
    pub fn view_mut(&mut self) -> &mut T {
        // SAFETY: as in view(), plus &mut self guarantees this handle
        // holds the only in-process reference.
        unsafe { &mut *(self.mmap.as_mut_ptr() as *mut T) }
    }

    /// Logical segment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mapped size in bytes.
    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    /// Whether this handle created the region and owns its removal.
    pub fn is_creator(&self) -> bool {
        self.is_creator
    }
}

impl<T: Copy> Drop for SharedSegment<T> {
    fn drop(&mut self) {
        // The mapping itself is released by MmapMut. Only the creator
        // removes the name; attachers must leave the region usable.
        if self.is_creator {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(name = %self.name, error = %e, "failed to unlink segment");
            } else {
                debug!(name = %self.name, "segment unlinked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse::record::SampleRecord;

    fn unique(name: &str) -> String {
        format!("{}_{}", name, std::process::id())
    }

    #[test]
    fn create_yields_zeroed_record() {
        let name = unique("seg_zero");
        let segment = SharedSegment::<SampleRecord>::create(&name).unwrap();

        assert_eq!(*segment.view(), SampleRecord::default());
        assert_eq!(segment.size(), core::mem::size_of::<SampleRecord>());
        assert!(segment.is_creator());
    }

    #[test]
    fn attacher_sees_creator_writes() {
        let name = unique("seg_share");
        let mut creator = SharedSegment::<SampleRecord>::create(&name).unwrap();

        creator.view_mut().values[3] = 7.5;
        creator.view_mut().timestamp_ms = 99;

        let attacher = SharedSegment::<SampleRecord>::attach(&name).unwrap();
        assert!(!attacher.is_creator());
        assert_eq!(attacher.view().values[3], 7.5);
        assert_eq!(attacher.view().timestamp_ms, 99);
    }

    #[test]
    fn second_creator_fails() {
        let name = unique("seg_excl");
        let _first = SharedSegment::<SampleRecord>::create(&name).unwrap();

        let second = SharedSegment::<SampleRecord>::create(&name);
        assert!(matches!(second, Err(ChannelError::Allocation { .. })));
    }

    #[test]
    fn attach_missing_fails() {
        let result = SharedSegment::<SampleRecord>::attach("seg_never_created");
        assert!(matches!(result, Err(ChannelError::Attach { .. })));
    }

    #[test]
    fn attach_rejects_wrong_size() {
        let name = unique("seg_sizemix");
        let _creator = SharedSegment::<SampleRecord>::create(&name).unwrap();

        // A differently-sized overlay type must be refused.
        #[derive(Clone, Copy)]
        #[repr(C)]
        struct Wider {
            _values: [f32; 16],
            _timestamp_ms: i64,
        }

        let result = SharedSegment::<Wider>::attach(&name);
        assert!(matches!(result, Err(ChannelError::SizeMismatch { .. })));
    }

    #[test]
    fn creator_drop_unlinks_region() {
        let name = unique("seg_unlink");
        {
            let _creator = SharedSegment::<SampleRecord>::create(&name).unwrap();
        }
        let result = SharedSegment::<SampleRecord>::attach(&name);
        assert!(matches!(result, Err(ChannelError::Attach { .. })));
    }

    #[test]
    fn attacher_drop_keeps_region() {
        let name = unique("seg_keep");
        let _creator = SharedSegment::<SampleRecord>::create(&name).unwrap();
        {
            let _attacher = SharedSegment::<SampleRecord>::attach(&name).unwrap();
        }
        // Region still there for the next attacher.
        let again = SharedSegment::<SampleRecord>::attach(&name);
        assert!(again.is_ok());
    }
}
