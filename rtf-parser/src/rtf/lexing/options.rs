//! Tokenizer options
//!
//! Serializable description of the tracked control words and ignored compounds, so that the
//! setup of a tokenizer can live in a configuration file instead of code.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Registration of one tracked control word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedWordOption {
    pub word: String,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default)]
    pub default: Option<i32>,
}

/// Setup applied to a tokenizer through [configure](super::Tokenizer::configure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    pub tracked: Vec<TrackedWordOption>,
    pub ignored_compounds: Vec<String>,
}

impl TokenizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(mut self, word: &str, stackable: bool, default: Option<i32>) -> Self {
        self.tracked.push(TrackedWordOption {
            word: word.to_string(),
            stackable,
            default,
        });
        self
    }

    pub fn ignore(mut self, word: &str) -> Self {
        self.ignored_compounds.push(word.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionParseError {
    #[error("empty control word in '{0}'")]
    EmptyWord(String),
    #[error("unknown modifier '{modifier}' in '{input}', expected 'stackable'")]
    UnknownModifier { input: String, modifier: String },
    #[error("invalid default value in '{0}'")]
    InvalidDefault(String),
}

/// Parses `word[:stackable][=default]`, e.g. `uc:stackable=1` or `bin`.
impl FromStr for TrackedWordOption {
    type Err = OptionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (head, default) = match input.split_once('=') {
            Some((head, value)) => {
                let value = value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| OptionParseError::InvalidDefault(input.to_string()))?;
                (head, Some(value))
            }
            None => (input, None),
        };

        let (word, stackable) = match head.split_once(':') {
            Some((word, "stackable")) => (word, true),
            Some((_, modifier)) => {
                return Err(OptionParseError::UnknownModifier {
                    input: input.to_string(),
                    modifier: modifier.to_string(),
                })
            }
            None => (head, false),
        };

        let word = word.trim();
        if word.is_empty() {
            return Err(OptionParseError::EmptyWord(input.to_string()));
        }

        Ok(TrackedWordOption {
            word: word.to_string(),
            stackable,
            default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_word() {
        let option: TrackedWordOption = "bin".parse().unwrap();
        assert_eq!(option.word, "bin");
        assert!(!option.stackable);
        assert_eq!(option.default, None);
    }

    #[test]
    fn test_parse_stackable_with_default() {
        let option: TrackedWordOption = "uc:stackable=1".parse().unwrap();
        assert_eq!(option.word, "uc");
        assert!(option.stackable);
        assert_eq!(option.default, Some(1));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "=3".parse::<TrackedWordOption>(),
            Err(OptionParseError::EmptyWord("=3".to_string()))
        );
        assert!(matches!(
            "uc:sticky".parse::<TrackedWordOption>(),
            Err(OptionParseError::UnknownModifier { .. })
        ));
        assert_eq!(
            "uc=x".parse::<TrackedWordOption>(),
            Err(OptionParseError::InvalidDefault("uc=x".to_string()))
        );
    }

    #[test]
    fn test_builder() {
        let options = TokenizerOptions::new()
            .track("uc", true, Some(1))
            .ignore("fonttbl");
        assert_eq!(options.tracked.len(), 1);
        assert_eq!(options.ignored_compounds, vec!["fonttbl".to_string()]);
    }
}
