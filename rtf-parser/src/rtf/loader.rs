//! Document loading utilities
//!
//! This module provides `RtfLoader` - a utility for loading RTF source from files or strings
//! and tokenizing it with a given set of options. It is used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust
//! use rtf_parser::rtf::loader::RtfLoader;
//! use rtf_parser::TokenizerOptions;
//!
//! let options = TokenizerOptions::new().ignore("fonttbl");
//! let tokens = RtfLoader::from_path("letter.rtf")?.tokenize(&options)?;
//! ```

use crate::rtf::lexing::{Tokenizer, TokenizerError, TokenizerOptions};
use crate::rtf::source::{FileSource, SourceError, StringSource};
use crate::rtf::token::Token;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error that can occur when loading documents
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: SourceError,
    },
    #[error("tokenization failed: {0}")]
    Tokenizer(#[from] TokenizerError),
}

enum Input {
    Memory(Vec<u8>),
    File(PathBuf),
}

/// Loads RTF from memory or from disk and tokenizes it.
///
/// Files are not read eagerly; they are streamed through a [FileSource] window when
/// tokenized.
pub struct RtfLoader {
    input: Input,
}

impl RtfLoader {
    /// Load from a file path. The file must exist.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref().to_path_buf();
        if let Err(err) = std::fs::metadata(&path) {
            return Err(LoaderError::Open {
                path,
                source: SourceError::Io(err),
            });
        }
        Ok(RtfLoader {
            input: Input::File(path),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        RtfLoader {
            input: Input::Memory(source.into().into_bytes()),
        }
    }

    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Self {
        RtfLoader {
            input: Input::Memory(bytes.into()),
        }
    }

    /// Tokenize the whole document with `options` applied
    pub fn tokenize(&self, options: &TokenizerOptions) -> Result<Vec<Token>, LoaderError> {
        match &self.input {
            Input::Memory(bytes) => {
                let mut tokenizer = Tokenizer::new(StringSource::new(bytes.clone()));
                tokenizer.configure(options);
                Ok(tokenizer.tokenize_all()?)
            }
            Input::File(path) => {
                let source = FileSource::open(path).map_err(|source| LoaderError::Open {
                    path: path.clone(),
                    source,
                })?;
                let mut tokenizer = Tokenizer::new(source);
                tokenizer.configure(options);
                Ok(tokenizer.tokenize_all()?)
            }
        }
    }
}
