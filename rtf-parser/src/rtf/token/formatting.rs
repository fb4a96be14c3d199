//! Detokenizer for the rtf format
//!
//! This module converts a stream of tokens back into RTF source text. It is useful for
//! round-trip testing (source -> tokens -> source) and for token level filters that want to
//! write out what they kept.
//!
//! Compounds dropped through the ignore list never become tokens, so they are absent from the
//! output. Newline tokens render their normalized text (`\r\n` or `\n`). Binary payloads that
//! are not valid UTF-8 are rendered lossily.

use super::core::{Token, TokenKind};

/// Trait for converting a token to its RTF source representation
pub trait ToRtfString {
    fn to_rtf_string(&self) -> String;
}

impl ToRtfString for TokenKind {
    fn to_rtf_string(&self) -> String {
        match self {
            TokenKind::LeftBrace { trailing_space } => brace('{', *trailing_space),
            TokenKind::RightBrace { trailing_space } => brace('}', *trailing_space),
            TokenKind::ControlWord(word) => {
                let prefix = if word.is_special { "\\*\\" } else { "\\" };
                let suffix = if word.trailing_space { " " } else { "" };
                format!("{}{}{}", prefix, word.raw_text, suffix)
            }
            TokenKind::ControlSymbol(c) | TokenKind::EscapedExpression(c) => format!("\\{}", c),
            TokenKind::EscapedCharacter(hex) => format!("\\'{}", hex),
            TokenKind::Newline(raw) => raw.clone(),
            TokenKind::PcData(text) | TokenKind::SData(text) => text.clone(),
            TokenKind::BData(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            TokenKind::Invalid(raw) => raw.clone(),
        }
    }
}

impl ToRtfString for Token {
    fn to_rtf_string(&self) -> String {
        self.kind.to_rtf_string()
    }
}

fn brace(c: char, trailing_space: bool) -> String {
    if trailing_space {
        format!("{} ", c)
    } else {
        c.to_string()
    }
}

/// Detokenize a stream of tokens into a string
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(ToRtfString::to_rtf_string).collect()
}
