//! Core token types and helpers shared across the tokenizer and tooling.
//!
//!     RTF is a flat stream of braces, backslash escapes and data. The tokenizer turns it into
//!     one typed token per lexical unit, each anchored at a byte offset, line and column, and
//!     each remembering the exact byte range it consumed from the source.
//!
//! Token Kinds
//!
//!     Structural Tokens:
//!         LeftBrace, RightBrace. They open and close compounds (groups). A single space right
//!         after a brace is swallowed and recorded on the token.
//!
//!     Escape Tokens:
//!         ControlWord, ControlSymbol, EscapedExpression, EscapedCharacter. Everything that
//!         starts with a backslash. Control words carry their raw text parsed into a name and
//!         an optional signed parameter, see [control_word].
//!
//!     Data Tokens:
//!         PCData (plain text), SData (hex digits of a picture), BData (raw binary bytes).
//!         Which one is produced depends on the control word that is active at the current
//!         nesting level, not on the bytes themselves.
//!
//!     Other:
//!         Newline and Invalid. Malformed escapes are never errors, they come back as
//!         Invalid tokens and the caller decides what to do with them.
//!
//! Related Control Word
//!
//!     Every token carries a snapshot of the tracked control word that was active when it was
//!     produced, see [ActiveControlWord]. This lets consumers correlate a run of hex digits or
//!     binary bytes with the `\pict` or `\bin` that switched the extraction mode.

pub mod control_word;
pub mod core;
pub mod formatting;

pub use control_word::{ActiveControlWord, ControlWord};
pub use self::core::{Token, TokenKind};
pub use formatting::{detokenize, ToRtfString};
