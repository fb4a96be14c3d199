//! Lexing
//!
//! This module holds the tokenizer and the two pieces of state it drives.
//!
//! Structure:
//!     - [position]: offset, line, column and nesting level bookkeeping
//!     - [tracking]: brace scoped values of caller registered control words
//!     - [tokenizer]: the state machine producing one token per call
//!     - [options]: serializable tokenizer setup
//!
//! Control flow:
//!     The caller pulls tokens one at a time. For each call the tokenizer reads through the
//!     [Source](crate::rtf::source::Source), moves the position, enters control words into the
//!     tracking table and closes their scopes on `}`. When a data run starts, the tracking
//!     table decides whether it is read as plain text, hex digits or a fixed number of raw bytes.

pub mod options;
pub mod position;
pub mod tokenizer;
pub mod tracking;

pub use options::{OptionParseError, TokenizerOptions, TrackedWordOption};
pub use position::Position;
pub use tokenizer::{Tokenizer, TokenizerError, BINARY_WORD, PICTURE_WORD};
pub use tracking::{ScopedValue, TrackedControlWord, TrackingTable};
