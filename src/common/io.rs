use std::fs::{File, OpenOptions};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use memmap2::{MmapMut, MmapOptions};

use crate::bsort::BsortError;

/// Backing store of a [`MappedFile`]: a shared writable mapping, or nothing
/// for an empty file (zero-length mappings are rejected by the kernel).
enum FileData {
    Mmap(MmapMut),
    Empty,
}

/// A whole file mapped read-write. Writes through the mapping land in the
/// file; [`MappedFile::flush`] makes sure they have by the time it returns.
pub struct MappedFile {
    path: PathBuf,
    data: FileData,
    _file: File,
}

impl MappedFile {
    /// Open `path` for read-write and map its full length.
    pub fn open_rw(path: &Path) -> Result<MappedFile, BsortError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| BsortError::storage(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| BsortError::storage(path, e))?
            .len();

        let data = if len == 0 {
            FileData::Empty
        } else {
            // SAFETY: the mapping is shared with the file on disk. The sort
            // owns the file for its whole run; concurrent writers from other
            // processes are not supported.
            let mmap = unsafe { MmapOptions::new().len(len as usize).map_mut(&file) }
                .map_err(|e| BsortError::storage(path, e))?;
            #[cfg(unix)]
            {
                // Advisory only; a refused hint changes nothing.
                let _ = mmap.advise(memmap2::Advice::Sequential);
                let _ = mmap.advise(memmap2::Advice::WillNeed);
            }
            FileData::Mmap(mmap)
        };

        Ok(MappedFile {
            path: path.to_path_buf(),
            data,
            _file: file,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write dirty pages back to the file.
    pub fn flush(&self) -> Result<(), BsortError> {
        match &self.data {
            FileData::Mmap(m) => m.flush().map_err(|e| BsortError::storage(&self.path, e)),
            FileData::Empty => Ok(()),
        }
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.data {
            FileData::Mmap(m) => m,
            FileData::Empty => &[],
        }
    }
}

impl DerefMut for MappedFile {
    fn deref_mut(&mut self) -> &mut [u8] {
        match &mut self.data {
            FileData::Mmap(m) => m,
            FileData::Empty => &mut [],
        }
    }
}
