//! Byte sources
//!
//!     The tokenizer never touches the input directly. It talks to a [Source], a random access
//!     view over the document bytes with a handful of scanning primitives. Two implementations
//!     ship with the crate:
//!
//!         - [StringSource]: the whole document in memory.
//!         - [FileSource]: a chunked window over a file, refilled lazily with blocking reads.
//!
//!     Every query past the end of the content answers "absent" instead of failing, so the
//!     tokenizer can look ahead freely at stream boundaries. Failures are reserved for the
//!     source itself (I/O errors), and they abort the current `next_token` call.

pub mod file;
pub mod string;

pub use file::FileSource;
pub use string::StringSource;

use thiserror::Error;

/// Errors raised by a source while serving a query
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("offset {offset} is out of range for content of length {length}")]
    OutOfRange { offset: usize, length: usize },
}

/// Random access view over the bytes of an RTF document.
pub trait Source {
    /// Total content length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `index`, `None` past the end
    fn at(&mut self, index: usize) -> Result<Option<u8>, SourceError>;

    /// Up to `len` bytes starting at `start`, clamped to the end of the content
    fn slice(&mut self, start: usize, len: usize) -> Result<Vec<u8>, SourceError>;

    /// Index of the first byte at or after `from` that is contained in `set`
    fn find_first_of(&mut self, set: &[u8], from: usize) -> Result<Option<usize>, SourceError> {
        let mut index = from;
        while let Some(byte) = self.at(index)? {
            if set.contains(&byte) {
                return Ok(Some(index));
            }
            index += 1;
        }
        Ok(None)
    }

    /// Index of the `}` closing the compound that is open at `from`.
    ///
    /// Scanning starts one level deep. Any byte following a backslash is skipped, so escaped
    /// braces never count.
    fn find_matching_close_delimiter(&mut self, from: usize) -> Result<Option<usize>, SourceError> {
        let mut depth = 1usize;
        let mut index = from;
        while let Some(byte) = self.at(index)? {
            match byte {
                b'\\' => index += 1,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Some(index));
                    }
                }
                _ => {}
            }
            index += 1;
        }
        Ok(None)
    }
}

/// Shared scanning helper for sources that expose a contiguous buffer
pub(crate) fn matching_close_in(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut index = from;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
        index += 1;
    }
    None
}
