//! Control word payloads
//!
//!     A control word is a backslash followed by an alphabetic name and an optional signed
//!     integer parameter: `\uc2`, `\li-720`, `\pard`. The tokenizer only delimits the raw
//!     text; splitting it into name and parameter is done here with a tiny logos lexer.

use logos::Logos;
use serde::{Deserialize, Serialize};

/// Pieces of a control word's raw text
#[derive(Logos, Debug, PartialEq, Clone)]
enum RawPart {
    #[regex(r"[A-Za-z]+")]
    Name,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Parameter(i32),
}

/// A backslash directive with its parsed name and parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlWord {
    /// Name and parameter exactly as they appear in the source, without the backslash
    pub raw_text: String,
    pub name: String,
    pub parameter: Option<i32>,
    /// A single space delimiter was consumed after the word
    pub trailing_space: bool,
    /// The word was introduced by `\*\`, marking an ignorable destination
    pub is_special: bool,
}

impl ControlWord {
    /// Build a control word from its raw text.
    ///
    /// The name is the leading run of ASCII letters. The parameter is only set when the rest
    /// of the raw text is exactly one signed integer that fits an `i32`; anything else after
    /// the name leaves it as `None`.
    pub fn parse(raw_text: impl Into<String>, trailing_space: bool, is_special: bool) -> Self {
        let raw_text = raw_text.into();
        let (name, parameter) = split_raw_text(&raw_text);
        ControlWord {
            raw_text,
            name,
            parameter,
            trailing_space,
            is_special,
        }
    }
}

fn split_raw_text(raw_text: &str) -> (String, Option<i32>) {
    let mut lexer = RawPart::lexer(raw_text);

    let name = match lexer.next() {
        Some(Ok(RawPart::Name)) => lexer.slice().to_string(),
        _ => return (String::new(), None),
    };

    let parameter = match (lexer.next(), lexer.next()) {
        (Some(Ok(RawPart::Parameter(value))), None) => Some(value),
        _ => None,
    };

    (name, parameter)
}

/// Snapshot of the tracked control word governing a token.
///
/// Taken from the tracking table when the token is produced, so it stays valid after the
/// scope that introduced it has been closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveControlWord {
    pub word: String,
    pub stackable: bool,
    /// Nesting level the value was set at
    pub nesting_level: usize,
    pub value: Option<i32>,
    /// The control word that introduced the value (synthetic for registered defaults)
    pub control_word: ControlWord,
    pub offset: usize,
}
