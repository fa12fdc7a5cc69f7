//! Static file service.
//!
//! Files are mapped read-only into memory instead of being read into a
//! buffer. The file handle is closed as soon as the mapping exists; the
//! mapping itself lives inside [`MappedContent`] and is unmapped when that
//! value is dropped.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::FileError;

/// Read-only view over a file's bytes.
#[derive(Debug)]
pub struct MappedContent {
    // None for empty files, which cannot be mapped.
    map: Option<Mmap>,
}

impl MappedContent {
    pub fn len(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Deref for MappedContent {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.map {
            Some(map) => map,
            None => &[],
        }
    }
}

/// Opens `path` read-only and maps the whole file.
///
/// `ENOENT` becomes [`FileError::NotFound`], `EACCES` becomes
/// [`FileError::Forbidden`]; anything else is [`FileError::Other`].
pub fn serve(path: &Path) -> Result<MappedContent, FileError> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    if !metadata.is_file() {
        return Err(FileError::Other(std::io::Error::other("not a regular file")));
    }
    let len = metadata.len();

    if len == 0 {
        return Ok(MappedContent { map: None });
    }

    // SAFETY: the mapping is read-only and private to this process. A file
    // truncated by another process while mapped would fault on access; the
    // server accepts that like any mmap-based reader.
    let map = unsafe { Mmap::map(&file)? };
    drop(file);

    tracing::debug!(path = %path.display(), bytes = map.len(), "File mapped");
    Ok(MappedContent { map: Some(map) })
}
