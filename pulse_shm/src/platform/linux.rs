//! Linux-specific shared memory operations
//!
//! Segments are plain files under `/dev/shm` (tmpfs), mapped with
//! `memmap2`. Lock files live next to their segment with a role suffix
//! and a `.lock` extension.

use memmap2::{MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use pulse::consts::{SEGMENT_PREFIX, SHM_DIR};

/// Backing file path for a named segment.
pub fn segment_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}_{}", SHM_DIR, SEGMENT_PREFIX, name))
}

/// Lock file path for a named segment and role suffix.
pub fn lock_path(name: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/{}_{}_{}.lock",
        SHM_DIR, SEGMENT_PREFIX, name, suffix
    ))
}

/// Create a new memory-mapped segment.
///
/// Creation is exclusive: if the backing file already exists the call
/// fails with `AlreadyExists` rather than silently aliasing a second
/// creator onto the same region. The kernel zero-fills the file when it
/// is extended, so a fresh segment always reads as zeroed bytes.
pub fn create_segment_mmap(path: &Path, size: usize) -> io::Result<MmapMut> {
    let file = OpenOptions::new()
        .create_new(true) // Fail if already exists
        .read(true)
        .write(true)
        .mode(0o600) // Owner read/write only
        .open(path)?;

    file.set_len(size as u64)?;

    let mmap = unsafe { MmapOptions::new().map_mut(&file)? };

    Ok(mmap)
}

/// Attach to an existing segment.
///
/// The file is opened without `O_CREAT`: a missing region is an error,
/// never an implicit creation. The whole file is mapped, so the caller
/// can validate the region length through `MmapMut::len`.
pub fn attach_segment_mmap(path: &Path) -> io::Result<MmapMut> {
    let file = OpenOptions::new().read(true).write(true).open(path)?;

    let mmap = unsafe { MmapOptions::new().map_mut(&file)? };
    Ok(mmap)
}
