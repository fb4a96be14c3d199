//! Token and token kind definitions

use super::control_word::{ActiveControlWord, ControlWord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Lexical category and payload of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    LeftBrace { trailing_space: bool },
    RightBrace { trailing_space: bool },
    ControlWord(ControlWord),
    /// `\~`, `\-`, `\_`, `\:`, `\|` and the bare `\*`
    ControlSymbol(char),
    /// `\,`, `\{`, `\}`, `\\`
    EscapedExpression(char),
    /// `\'hh`, holds the two hex digits
    EscapedCharacter(String),
    Newline(String),
    /// Plain text run
    PcData(String),
    /// Hex digit run inside an active picture block
    SData(String),
    /// Raw bytes inside an active binary block
    BData(Vec<u8>),
    /// Malformed lexical fragment
    Invalid(String),
}

/// A token with its position information.
///
/// `offset`, `line` and `column` describe where the tokenizer reported the token; `span` is the
/// byte range it actually consumed from the source. The two only disagree for a `\*\` that is
/// cut off by the end of the input, whose symbol is anchored two bytes in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub span: Range<usize>,
    pub related_control_word: Option<ActiveControlWord>,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, line: usize, column: usize, span: Range<usize>) -> Self {
        Token {
            kind,
            offset,
            line,
            column,
            span,
            related_control_word: None,
        }
    }

    /// Attach the tracked control word active when this token was produced
    pub fn with_related(mut self, related: Option<ActiveControlWord>) -> Self {
        self.related_control_word = related;
        self
    }

    pub fn control_word(&self) -> Option<&ControlWord> {
        match &self.kind {
            TokenKind::ControlWord(word) => Some(word),
            _ => None,
        }
    }

    /// Name of the control word, if this token is one
    pub fn control_word_name(&self) -> Option<&str> {
        self.control_word().map(|word| word.name.as_str())
    }

    pub fn is_left_brace(&self) -> bool {
        matches!(self.kind, TokenKind::LeftBrace { .. })
    }

    pub fn is_right_brace(&self) -> bool {
        matches!(self.kind, TokenKind::RightBrace { .. })
    }

    /// Check if this token carries document data (plain, hex or binary)
    pub fn is_data(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::PcData(_) | TokenKind::SData(_) | TokenKind::BData(_)
        )
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, TokenKind::Invalid(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftBrace { .. } => write!(f, "LeftBrace"),
            TokenKind::RightBrace { .. } => write!(f, "RightBrace"),
            TokenKind::ControlWord(word) if word.is_special => {
                write!(f, "ControlWord(*{})", word.raw_text)
            }
            TokenKind::ControlWord(word) => write!(f, "ControlWord({})", word.raw_text),
            TokenKind::ControlSymbol(symbol) => write!(f, "ControlSymbol({})", symbol),
            TokenKind::EscapedExpression(c) => write!(f, "EscapedExpression({})", c),
            TokenKind::EscapedCharacter(hex) => write!(f, "EscapedCharacter({})", hex),
            TokenKind::Newline(raw) => write!(f, "Newline({:?})", raw),
            TokenKind::PcData(text) => write!(f, "PCData({:?})", text),
            TokenKind::SData(hex) => write!(f, "SData({:?})", hex),
            TokenKind::BData(bytes) => write!(f, "BData({} bytes)", bytes.len()),
            TokenKind::Invalid(raw) => write!(f, "Invalid({:?})", raw),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} @{} {}", self.line, self.column, self.offset, self.kind)
    }
}
