//! Chunked file source
//!
//!     Large documents (embedded pictures easily weigh megabytes) do not need to live in
//!     memory. The file source keeps one window of `chunk_size` bytes and moves it whenever a
//!     byte outside of it is requested. Slices are read straight from the file so that they can
//!     span window boundaries.

use super::{Source, SourceError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::trace;

pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// A source reading a file through a movable window
#[derive(Debug)]
pub struct FileSource {
    file: File,
    length: usize,
    chunk_size: usize,
    window: Vec<u8>,
    window_start: usize,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref())?;
        let length = file.metadata()?.len() as usize;
        Ok(FileSource {
            file,
            length,
            chunk_size: chunk_size.max(1),
            window: Vec::new(),
            window_start: 0,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn in_window(&self, index: usize) -> bool {
        index >= self.window_start && index < self.window_start + self.window.len()
    }

    /// Move the window so that it covers `index`. The caller guarantees `index < length`.
    fn refill(&mut self, index: usize) -> Result<(), SourceError> {
        let start = index - index % self.chunk_size;
        let len = self.chunk_size.min(self.length - start);
        trace!(start, len, "refilling file window");
        self.window = self.read_exact_at(start, len)?;
        self.window_start = start;
        Ok(())
    }

    fn read_exact_at(&mut self, start: usize, len: usize) -> Result<Vec<u8>, SourceError> {
        let mut buffer = vec![0u8; len];
        self.file.seek(SeekFrom::Start(start as u64))?;
        self.file.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

impl Source for FileSource {
    fn len(&self) -> usize {
        self.length
    }

    fn at(&mut self, index: usize) -> Result<Option<u8>, SourceError> {
        if index >= self.length {
            return Ok(None);
        }
        if !self.in_window(index) {
            self.refill(index)?;
        }
        self.window
            .get(index - self.window_start)
            .copied()
            .map(Some)
            .ok_or(SourceError::OutOfRange {
                offset: index,
                length: self.length,
            })
    }

    fn slice(&mut self, start: usize, len: usize) -> Result<Vec<u8>, SourceError> {
        let start = start.min(self.length);
        let end = start.saturating_add(len).min(self.length);
        if self.in_window(start) && end <= self.window_start + self.window.len() {
            let from = start - self.window_start;
            return Ok(self.window[from..from + (end - start)].to_vec());
        }
        self.read_exact_at(start, end - start)
    }
}
