//! Representation of the original input.
use std::fmt::{self, Display, Formatter};

/// Vertical tab ends a line, just as `\n` does.
const VERTICAL_TAB: char = '\u{0B}';

#[derive(Debug)]
pub(super) struct Source<'s> {
    body: &'s str,
}

impl<'s> Source<'s> {
    pub(super) fn new(body: &'s str) -> Source<'s> {
        Source { body }
    }

    pub(super) fn as_str(&self) -> &'s str {
        self.body
    }

    /// Convert a byte offset into a line and column, both counted
    /// from 1.  Columns count characters, not bytes.  `\r\n`, `\n`,
    /// `\r` and vertical tab each end a line.
    pub(super) fn location_of(&self, pos: usize) -> LineAndColumn {
        const START_COL: u32 = 1;
        const START_LINE: u32 = 1;

        let mut line = START_LINE;
        let mut column = START_COL;
        let mut chars = self.body.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            if i >= pos {
                break;
            }
            match ch {
                '\r' => {
                    if let Some((j, '\n')) = chars.peek() {
                        if *j < pos {
                            chars.next();
                        }
                    }
                    column = START_COL;
                    line += 1;
                }
                '\n' | VERTICAL_TAB => {
                    column = START_COL;
                    line += 1;
                }
                _ => {
                    column += 1;
                }
            }
        }
        LineAndColumn { line, column }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct LineAndColumn {
    line: u32,
    column: u32,
}

impl LineAndColumn {
    #[must_use]
    pub fn new(line: u32, column: u32) -> LineAndColumn {
        LineAndColumn { line, column }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Display for LineAndColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[test]
fn test_location_of() {
    fn loc(s: &str, pos: usize) -> (u32, u32) {
        let l = Source::new(s).location_of(pos);
        (l.line(), l.column())
    }

    assert_eq!(loc("", 0), (1, 1));
    assert_eq!(loc("hello", 0), (1, 1));
    assert_eq!(loc("hello", 3), (1, 4));
    assert_eq!(loc("x\nhello", 2), (2, 1));
    assert_eq!(loc("x\n hello", 3), (2, 2));
    assert_eq!(loc("x\r\ny", 3), (2, 1));
    assert_eq!(loc("x\ry", 2), (2, 1));
    assert_eq!(loc("x\u{0B}y", 2), (2, 1));
    assert_eq!(loc("a\r\n\r\nb", 5), (3, 1));
    // Column counts characters, not bytes.
    assert_eq!(loc("é x", 3), (1, 3));
    // Offsets past the end land just after the last character.
    assert_eq!(loc("ab", 2), (1, 3));
}

#[test]
fn test_line_and_column_display() {
    assert_eq!(LineAndColumn::new(3, 7).to_string(), "line 3, column 7");
}
