//! Tokenizer state machine
//!
//!     The tokenizer reads one lexical unit per call. Most of RTF is delimiter driven: braces,
//!     backslash escapes and newlines are recognized by their first byte, and everything else
//!     is a data run that stops at the next brace or backslash.
//!
//!     Data runs are the context sensitive part. Which kind of data follows depends on the
//!     tracked control word active at the current nesting level:
//!
//!         - no active word, or any word other than `pict`/`bin`: plain text (PCData)
//!         - `pict`: hex digits (SData), delimited like plain text
//!         - `bin`: exactly N raw bytes (BData), N being the value of `\binN`. Braces and
//!           backslashes inside are data, and line/column are left untouched.
//!
//!     Compounds whose opening control word is on the ignore list are skipped in one go. The
//!     caller never sees the control word nor anything up to the matching closing brace.

use super::options::TokenizerOptions;
use super::position::Position;
use super::tracking::TrackingTable;
use crate::rtf::source::{FileSource, Source, SourceError, StringSource};
use crate::rtf::token::{ControlWord, Token, TokenKind};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Tracked by default; switches data runs to hex mode
pub const PICTURE_WORD: &str = "pict";
/// Tracked by default; switches data runs to binary mode
pub const BINARY_WORD: &str = "bin";

const CONTROL_WORD_DELIMITERS: &[u8] = b"{}\\ \r\n;";
const DATA_DELIMITERS: &[u8] = b"{}\\";

/// Errors aborting a `next_token` call. They all originate in the source.
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Outcome of a single raw read
enum Step {
    Token(Token),
    /// An ignored compound was consumed, nothing to report
    Skip,
    End,
}

/// How a data run is extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataMode {
    Plain,
    Hex,
    Binary(usize),
}

/// Pull based RTF tokenizer over any [Source].
///
/// Not meant to be shared between threads while tokenizing: the cursor, nesting level and
/// tracking table are all mutated by every call.
#[derive(Debug)]
pub struct Tokenizer<S: Source> {
    source: S,
    position: Position,
    table: TrackingTable,
    ignored_compounds: HashSet<String>,
    halted: bool,
}

impl Tokenizer<StringSource> {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Tokenizer::new(StringSource::new(bytes))
    }

    pub fn from_string(text: impl Into<String>) -> Self {
        Tokenizer::new(StringSource::from(text.into()))
    }
}

impl Tokenizer<FileSource> {
    /// Tokenize a file through a chunked window
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TokenizerError> {
        Ok(Tokenizer::new(FileSource::open(path)?))
    }
}

impl<S: Source> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        let mut tokenizer = Tokenizer {
            source,
            position: Position::default(),
            table: TrackingTable::new(),
            ignored_compounds: HashSet::new(),
            halted: false,
        };
        tokenizer.reset();
        tokenizer
    }

    /// Rewind to the start of the content.
    ///
    /// The tracking table is cleared and only the picture and binary markers are registered
    /// again, without defaults. The ignore list is kept.
    pub fn reset(&mut self) {
        self.position = Position::default();
        self.halted = false;
        self.table.clear();
        self.table.track(PICTURE_WORD, false, None, (0, 1, 0), 0);
        self.table.track(BINARY_WORD, false, None, (0, 1, 0), 0);
        debug!(length = self.source.len(), "tokenizer reset");
    }

    /// Register a tracked control word, replacing any previous registration.
    ///
    /// A default seeds the value at the current nesting level.
    pub fn track_control_word(&mut self, word: &str, stackable: bool, default: Option<i32>) {
        let anchor = (self.position.offset, self.position.line, self.position.column);
        self.table
            .track(word, stackable, default, anchor, self.position.nesting_level);
    }

    /// Replace the set of control words whose compounds are skipped entirely
    pub fn ignore_compounds<I, W>(&mut self, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.ignored_compounds = words.into_iter().map(Into::into).collect();
        debug!(count = self.ignored_compounds.len(), "ignored compounds replaced");
    }

    /// Apply tracked words and the ignore list from options
    pub fn configure(&mut self, options: &TokenizerOptions) {
        for tracked in &options.tracked {
            self.track_control_word(&tracked.word, tracked.stackable, tracked.default);
        }
        self.ignore_compounds(options.ignored_compounds.iter().cloned());
    }

    /// Value of a tracked word at the current nesting level, `default` if there is none
    pub fn control_word_value(&self, word: &str, default: i32) -> i32 {
        self.table
            .value_of(word, default, self.position.nesting_level)
    }

    pub fn offset(&self) -> usize {
        self.position.offset
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn nesting_level(&self) -> usize {
        self.position.nesting_level
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn content_length(&self) -> usize {
        self.source.len()
    }

    pub fn tracking_table(&self) -> &TrackingTable {
        &self.table
    }

    pub fn ignored_compounds(&self) -> &HashSet<String> {
        &self.ignored_compounds
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Next token, `Ok(None)` at the end of the content.
    ///
    /// A source error leaves the tokenizer in an undefined state; call [reset](Self::reset)
    /// before using it again.
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizerError> {
        loop {
            match self.raw_next()? {
                Step::Token(token) => {
                    trace!(token = %token, "token");
                    return Ok(Some(token));
                }
                Step::Skip => continue,
                Step::End => return Ok(None),
            }
        }
    }

    /// Collect every remaining token
    pub fn tokenize_all(&mut self) -> Result<Vec<Token>, TokenizerError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Discard the rest of the compound that is currently open.
    ///
    /// Precondition: called once per compound, right after its opening control word has been
    /// read and before anything inside it has been tokenized. The nesting level is decremented
    /// by exactly one and no scope of the tracking table is closed. If the compound never
    /// closes, everything up to the end of the content is skipped.
    pub fn skip_compound(&mut self) -> Result<(), TokenizerError> {
        let from = self.position.offset;
        let end = match self.source.find_matching_close_delimiter(from)? {
            Some(close) => close + 1,
            None => self.source.len(),
        };
        let skipped = self.source.slice(from, end.saturating_sub(from))?;
        self.position.advance_by_literal(&skipped);
        self.position.offset = end;
        self.position.leave_brace();
        debug!(from, end, "skipped compound");
        Ok(())
    }

    fn raw_next(&mut self) -> Result<Step, TokenizerError> {
        let start = self.position.offset;
        if start >= self.source.len() {
            return Ok(Step::End);
        }
        let Some(byte) = self.source.at(start)? else {
            return Ok(Step::End);
        };
        self.position.offset = start + 1;
        let (line, column) = (self.position.line, self.position.column);

        let token = match byte {
            b'{' => {
                self.position.enter_brace();
                let trailing_space = self.consume_space()?;
                self.literal_token(TokenKind::LeftBrace { trailing_space }, start, line, column)?
            }
            b'}' => {
                self.table.leave(self.position.nesting_level);
                self.position.leave_brace();
                let trailing_space = self.consume_space()?;
                self.literal_token(TokenKind::RightBrace { trailing_space }, start, line, column)?
            }
            b'\\' => match self.escape(start, line, column)? {
                Some(token) => token,
                None => return Ok(Step::Skip),
            },
            b'\r' => {
                // assumed to be followed by \n, which is swallowed unchecked
                let end = (start + 2).min(self.source.len());
                self.position.offset = end;
                self.position.newline();
                Token::new(TokenKind::Newline("\r\n".into()), start, line, column, start..end)
            }
            b'\n' => {
                self.position.newline();
                Token::new(TokenKind::Newline("\n".into()), start, line, column, start..start + 1)
            }
            _ => self.data(start, line, column)?,
        };

        let related = self.table.current_snapshot(self.position.nesting_level);
        Ok(Step::Token(token.with_related(related)))
    }

    /// Dispatch on the byte after a backslash. `None` means an ignored compound was skipped.
    fn escape(
        &mut self,
        start: usize,
        line: usize,
        column: usize,
    ) -> Result<Option<Token>, TokenizerError> {
        let Some(next) = self.source.at(start + 1)? else {
            return self
                .literal_token(TokenKind::Invalid("\\".into()), start, line, column)
                .map(Some);
        };

        let kind = match next {
            b'~' | b'-' | b'_' | b':' | b'|' => {
                self.position.offset = start + 2;
                TokenKind::ControlSymbol(next as char)
            }
            b',' | b'{' | b'}' | b'\\' => {
                self.position.offset = start + 2;
                TokenKind::EscapedExpression(next as char)
            }
            b'\'' => {
                self.position.offset = start + 2;
                if self.source.len().saturating_sub(start + 2) >= 2 {
                    let hex = self.source.slice(start + 2, 2)?;
                    self.position.offset = start + 4;
                    TokenKind::EscapedCharacter(String::from_utf8_lossy(&hex).into_owned())
                } else {
                    TokenKind::Invalid("\\'".into())
                }
            }
            b'*' => {
                self.position.offset = start + 2;
                if self.source.at(start + 2)? == Some(b'\\') {
                    if self.source.at(start + 3)?.is_none() {
                        // nothing after `\*\`: the symbol is anchored past the star
                        let mut token = self.literal_token(
                            TokenKind::ControlSymbol('*'),
                            start,
                            line,
                            column,
                        )?;
                        token.offset = start + 2;
                        return Ok(Some(token));
                    }
                    self.position.offset = start + 3;
                    return self.control_word(start, line, column, true);
                }
                TokenKind::ControlSymbol('*')
            }
            c if c.is_ascii_alphabetic() => {
                self.position.offset = start + 1;
                return self.control_word(start, line, column, false);
            }
            other => {
                self.position.offset = start + 2;
                TokenKind::Invalid(format!("\\{}", other as char))
            }
        };

        self.literal_token(kind, start, line, column).map(Some)
    }

    /// Read a control word whose name starts at the current offset.
    fn control_word(
        &mut self,
        start: usize,
        line: usize,
        column: usize,
        is_special: bool,
    ) -> Result<Option<Token>, TokenizerError> {
        let word_start = self.position.offset;
        let delimiter = self
            .source
            .find_first_of(CONTROL_WORD_DELIMITERS, word_start)?
            .unwrap_or(self.source.len());
        let trailing_space = self.source.at(delimiter)? == Some(b' ');
        let raw = self.source.slice(word_start, delimiter - word_start)?;

        let word = ControlWord::parse(
            String::from_utf8_lossy(&raw).into_owned(),
            trailing_space,
            is_special,
        );

        // the column only moves over the word itself, never over the trailing space
        let literal = self.source.slice(start, delimiter - start)?;
        self.position.advance_by_literal(&literal);
        self.position.offset = if trailing_space {
            delimiter + 1
        } else {
            delimiter
        };

        let name = word.name.clone();
        let token = Token::new(
            TokenKind::ControlWord(word),
            start,
            line,
            column,
            start..self.position.offset,
        );

        if self.ignored_compounds.contains(&name) {
            debug!(word = %name, offset = start, "skipping ignored compound");
            self.skip_compound()?;
            return Ok(None);
        }
        if self.table.is_tracked(&name) {
            self.table.enter(&token, self.position.nesting_level);
        }
        Ok(Some(token))
    }

    /// Read a data run starting at `start` in the mode the active tracked word asks for.
    fn data(&mut self, start: usize, line: usize, column: usize) -> Result<Token, TokenizerError> {
        match self.data_mode() {
            DataMode::Binary(length) => {
                let bytes = self.source.slice(start, length)?;
                self.position.offset = start + bytes.len();
                debug!(offset = start, length = bytes.len(), "binary payload");
                Ok(Token::new(
                    TokenKind::BData(bytes),
                    start,
                    line,
                    column,
                    start..self.position.offset,
                ))
            }
            mode => {
                let end = self
                    .source
                    .find_first_of(DATA_DELIMITERS, start)?
                    .unwrap_or(self.source.len());
                let text = self.source.slice(start, end - start)?;
                self.position.offset = end;
                self.position.advance_by_literal(&text);
                let text = String::from_utf8_lossy(&text).into_owned();
                let kind = if mode == DataMode::Hex {
                    TokenKind::SData(text)
                } else {
                    TokenKind::PcData(text)
                };
                Ok(Token::new(kind, start, line, column, start..end))
            }
        }
    }

    fn data_mode(&self) -> DataMode {
        let level = self.position.nesting_level;
        match self.table.current(level).map(|entry| entry.word.as_str()) {
            Some(PICTURE_WORD) => DataMode::Hex,
            Some(BINARY_WORD) => {
                let length = usize::try_from(self.table.value_of(BINARY_WORD, 0, level)).unwrap_or(0);
                // an empty payload would never move the cursor
                if length == 0 {
                    DataMode::Plain
                } else {
                    DataMode::Binary(length)
                }
            }
            _ => DataMode::Plain,
        }
    }

    /// Swallow a single space after a brace
    fn consume_space(&mut self) -> Result<bool, TokenizerError> {
        if self.source.at(self.position.offset)? == Some(b' ') {
            self.position.offset += 1;
            return Ok(true);
        }
        Ok(false)
    }

    /// Build a token spanning `start..offset` and move line/column over it
    fn literal_token(
        &mut self,
        kind: TokenKind,
        start: usize,
        line: usize,
        column: usize,
    ) -> Result<Token, TokenizerError> {
        let end = self.position.offset.min(self.source.len());
        let literal = self.source.slice(start, end - start)?;
        self.position.advance_by_literal(&literal);
        Ok(Token::new(kind, start, line, column, start..end))
    }
}

impl<S: Source> Iterator for Tokenizer<S> {
    type Item = Result<Token, TokenizerError>;

    /// Stops after the first error until the tokenizer is reset
    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let result = self.next_token().transpose();
        if matches!(result, Some(Err(_))) {
            self.halted = true;
        }
        result
    }
}
