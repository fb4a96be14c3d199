//! Position and nesting bookkeeping

use serde::{Deserialize, Serialize};

/// Cursor of the tokenizer: byte offset, human readable line/column and brace depth.
///
/// Line numbers start at 1. The column starts at 0 for the first line and at 1 after every
/// newline token, which is how positions have always been reported by this tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub nesting_level: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 0,
            nesting_level: 0,
        }
    }
}

impl Position {
    /// Move line/column over `text` as if it had been read verbatim.
    ///
    /// The offset is not touched; the tokenizer moves it separately since it may consume bytes
    /// it does not want counted (trailing spaces of control words, binary payloads).
    pub fn advance_by_literal(&mut self, text: &[u8]) {
        let newlines = text.iter().filter(|&&byte| byte == b'\n').count();
        match text.iter().rposition(|&byte| byte == b'\n') {
            Some(last_newline) => {
                self.line += newlines;
                self.column = text.len() - last_newline;
            }
            None => self.column += text.len(),
        }
    }

    /// Account for a newline token
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    pub fn enter_brace(&mut self) {
        self.nesting_level += 1;
    }

    /// Close one level. Stray closing braces at the root keep the level at zero.
    pub fn leave_brace(&mut self) {
        self.nesting_level = self.nesting_level.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_line() {
        let position = Position::default();
        assert_eq!((position.line, position.column), (1, 0));
    }

    #[test]
    fn test_literal_without_newline_moves_column() {
        let mut position = Position::default();
        position.advance_by_literal(b"hello");
        assert_eq!((position.line, position.column), (1, 5));
    }

    #[test]
    fn test_literal_with_newlines() {
        let mut position = Position::default();
        position.advance_by_literal(b"ab\ncd\nxyz");
        assert_eq!(position.line, 3);
        // length 9, last newline at index 5
        assert_eq!(position.column, 4);
    }

    #[test]
    fn test_braces() {
        let mut position = Position::default();
        position.enter_brace();
        position.enter_brace();
        position.leave_brace();
        assert_eq!(position.nesting_level, 1);
        position.leave_brace();
        position.leave_brace();
        assert_eq!(position.nesting_level, 0);
    }
}
