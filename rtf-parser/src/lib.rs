//! # rtf-parser
//!
//! A tokenizer for the Rich Text Format.
//!
//! File Layout
//!
//!     The crate is a lexing core meant to be driven by higher level document processors
//!     (renderers, converters, text extractors). It knows nothing about fonts, colors or
//!     styles: every control word is just a name and an optional parameter, plus a generic
//!     "tracking" mechanism callers configure to get brace-scoped parameter values.
//!
//!     src/rtf
//!       ├── token      Token model and the detokenizer
//!       ├── source     Random access byte sources (in-memory, chunked file)
//!       ├── lexing     Position tracker, tracking table and the tokenizer state machine
//!       └── loader     Shortcut for loading a document and tokenizing it in one go
//!
//!     The tokenizer is pull based: call [next_token](rtf::lexing::Tokenizer::next_token) until it
//!     returns `Ok(None)`, or iterate over the tokenizer directly.

#![allow(rustdoc::invalid_html_tags)]

pub mod rtf;

pub use rtf::lexing::{Tokenizer, TokenizerError, TokenizerOptions};
pub use rtf::token::{Token, TokenKind};
