//! Control word tracking table
//!
//!     Some control words only make sense together with the brace they appear in. `\uc2` says
//!     "two fallback bytes follow each Unicode escape" until the enclosing group closes, and
//!     `\pict` or `\bin` switch the way raw data is read for the rest of their group. The
//!     tokenizer knows nothing about these semantics; callers register words here and the
//!     tokenizer keeps their values scoped to brace depth.
//!
//! Stackable vs Non-Stackable
//!
//!     Stackable words keep one value per nesting level. A value set at level 2 shadows
//!     nothing and is dropped when level 2 closes.
//!
//!     Non-stackable words keep a single value (slot 0), tagged with the level it was set at.
//!     It only counts as active while the tokenizer is at exactly that level, and it is dropped
//!     when that level closes. This is the "is this block still open" flag picture and binary
//!     markers need.

use crate::rtf::token::{ActiveControlWord, ControlWord, Token, TokenKind};
use std::collections::HashMap;
use tracing::debug;

/// The value recorded for a tracked word at one nesting level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedValue {
    /// Control word token that set the value (synthetic for registered defaults)
    pub token: Token,
    pub nesting_level: usize,
    pub value: Option<i32>,
}

/// A registered control word and its scoped values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedControlWord {
    pub word: String,
    pub stackable: bool,
    stack: HashMap<usize, ScopedValue>,
}

impl TrackedControlWord {
    fn new(word: &str, stackable: bool) -> Self {
        TrackedControlWord {
            word: word.to_string(),
            stackable,
            stack: HashMap::new(),
        }
    }

    fn slot(&self, nesting_level: usize) -> usize {
        if self.stackable {
            nesting_level
        } else {
            0
        }
    }

    fn set(&mut self, token: Token, nesting_level: usize, value: Option<i32>) {
        let slot = self.slot(nesting_level);
        self.stack.insert(
            slot,
            ScopedValue {
                token,
                nesting_level,
                value,
            },
        );
    }

    /// Value opened at exactly `nesting_level`, if any
    pub fn active_at(&self, nesting_level: usize) -> Option<&ScopedValue> {
        self.stack
            .get(&self.slot(nesting_level))
            .filter(|scoped| scoped.nesting_level == nesting_level)
    }

    /// Drop the value opened at `nesting_level`
    fn close(&mut self, nesting_level: usize) {
        if self.active_at(nesting_level).is_some() {
            self.stack.remove(&self.slot(nesting_level));
        }
    }

    /// Value visible at `nesting_level`: the level's own slot, then the root slot
    fn visible_at(&self, nesting_level: usize) -> Option<&ScopedValue> {
        if self.stackable {
            self.stack
                .get(&nesting_level)
                .or_else(|| self.stack.get(&0))
        } else {
            self.stack.get(&0)
        }
    }

    /// Number of live scoped values
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn snapshot(&self, scoped: &ScopedValue) -> Option<ActiveControlWord> {
        let control_word = scoped.token.control_word()?.clone();
        Some(ActiveControlWord {
            word: self.word.clone(),
            stackable: self.stackable,
            nesting_level: scoped.nesting_level,
            value: scoped.value,
            control_word,
            offset: scoped.token.offset,
        })
    }
}

/// Registered control words, in registration order.
#[derive(Debug, Clone, Default)]
pub struct TrackingTable {
    entries: Vec<TrackedControlWord>,
}

impl TrackingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&TrackedControlWord> {
        self.entries.iter().find(|entry| entry.word == word)
    }

    pub fn is_tracked(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Register `word`, replacing any previous registration.
    ///
    /// With a default, the slot for the current level is seeded with a synthetic control word
    /// token (`word` followed by the default) anchored at `anchor`.
    pub fn track(
        &mut self,
        word: &str,
        stackable: bool,
        default: Option<i32>,
        anchor: (usize, usize, usize),
        nesting_level: usize,
    ) {
        let mut entry = TrackedControlWord::new(word, stackable);
        if let Some(value) = default {
            let (offset, line, column) = anchor;
            let raw_text = format!("{}{}", word, value);
            let token = Token::new(
                TokenKind::ControlWord(ControlWord::parse(raw_text, false, false)),
                offset,
                line,
                column,
                offset..offset,
            );
            entry.set(token, nesting_level, Some(value));
        }
        debug!(word, stackable, ?default, "tracking control word");

        match self.entries.iter_mut().find(|existing| existing.word == word) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Record the value introduced by a control word token seen at `nesting_level`.
    pub fn enter(&mut self, token: &Token, nesting_level: usize) {
        let Some(control_word) = token.control_word() else {
            return;
        };
        let value = control_word.parameter;
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.word == control_word.name)
        {
            entry.set(token.clone(), nesting_level, value);
        }
    }

    /// Close every scope opened at `nesting_level`. Called before the level is decremented.
    pub fn leave(&mut self, nesting_level: usize) {
        for entry in &mut self.entries {
            entry.close(nesting_level);
        }
    }

    /// First entry, in registration order, holding a value opened at exactly `nesting_level`
    pub fn current(&self, nesting_level: usize) -> Option<&TrackedControlWord> {
        self.entries
            .iter()
            .find(|entry| entry.active_at(nesting_level).is_some())
    }

    /// Snapshot of [current](Self::current), for attaching to tokens
    pub fn current_snapshot(&self, nesting_level: usize) -> Option<ActiveControlWord> {
        let entry = self.current(nesting_level)?;
        entry.snapshot(entry.active_at(nesting_level)?)
    }

    /// Value of `word` as seen from `nesting_level`, or `default`.
    ///
    /// A stackable word answers with the value set at this very level, falling back to the root
    /// slot. A non-stackable word answers with its single value regardless of level. A slot
    /// whose control word carried no parameter also answers `default`.
    pub fn value_of(&self, word: &str, default: i32, nesting_level: usize) -> i32 {
        self.get(word)
            .and_then(|entry| entry.visible_at(nesting_level))
            .and_then(|scoped| scoped.value)
            .unwrap_or(default)
    }
}
