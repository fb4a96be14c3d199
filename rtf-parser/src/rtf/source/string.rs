//! In-memory source

use super::{matching_close_in, Source, SourceError};

/// A source holding the whole document in memory
#[derive(Debug, Clone, Default)]
pub struct StringSource {
    bytes: Vec<u8>,
}

impl StringSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        StringSource {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for StringSource {
    fn from(text: &str) -> Self {
        StringSource::new(text.as_bytes())
    }
}

impl From<String> for StringSource {
    fn from(text: String) -> Self {
        StringSource::new(text.into_bytes())
    }
}

impl Source for StringSource {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn at(&mut self, index: usize) -> Result<Option<u8>, SourceError> {
        Ok(self.bytes.get(index).copied())
    }

    fn slice(&mut self, start: usize, len: usize) -> Result<Vec<u8>, SourceError> {
        let start = start.min(self.bytes.len());
        let end = start.saturating_add(len).min(self.bytes.len());
        Ok(self.bytes[start..end].to_vec())
    }

    fn find_first_of(&mut self, set: &[u8], from: usize) -> Result<Option<usize>, SourceError> {
        let Some(rest) = self.bytes.get(from..) else {
            return Ok(None);
        };
        Ok(rest
            .iter()
            .position(|byte| set.contains(byte))
            .map(|position| from + position))
    }

    fn find_matching_close_delimiter(&mut self, from: usize) -> Result<Option<usize>, SourceError> {
        Ok(matching_close_in(&self.bytes, from))
    }
}
