//! Line classification and block accumulation
//!
//! The scanner walks the source lines with a single forward cursor. At each
//! position the first matching rule wins:
//!
//! 1. code fence (captures up to the closing fence)
//! 2. pipe table (a `|` line followed by a separator row)
//! 3. ATX heading
//! 4. unordered list item
//! 5. ordered list item
//! 6. blank line
//! 7. paragraph (fallback, one per physical line)

use crate::block::Block;
use crate::utils::table_utils;
use regex::Regex;
use std::sync::LazyLock;

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

static UNORDERED_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*+-]\s+(.*)$").unwrap());

static ORDERED_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());

/// Opening and closing code fence marker
pub const FENCE: &str = "```";

/// Check whether a line opens or closes a fenced code block
pub fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

/// Check whether `ch` ends a line
///
/// Besides `\n` and `\r` this covers the vertical tab, form feed, the
/// information separators, NEL and the Unicode line/paragraph separators.
fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split a document into lines
///
/// `\r\n` counts as one break. A trailing break does not produce an empty
/// last line, and an empty source has no lines.
pub fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = source.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&source[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }

    if start < source.len() {
        lines.push(&source[start..]);
    }
    lines
}

/// Classify the block starting at `cursor` and return it with the next
/// cursor position.
///
/// The returned position is always greater than `cursor`. The block is
/// `None` only when a code fence is never closed: the rest of the input is
/// consumed and the captured lines are dropped.
///
/// # Panics
///
/// Panics if `cursor` is out of bounds.
pub fn next_block<'a>(lines: &[&'a str], cursor: usize) -> (Option<Block<'a>>, usize) {
    let line = lines[cursor];

    if is_fence(line) {
        let body_start = cursor + 1;
        return match lines[body_start..].iter().position(|l| is_fence(l)) {
            Some(offset) => {
                let close = body_start + offset;
                (Some(Block::CodeBlock(lines[body_start..close].to_vec())), close + 1)
            }
            None => {
                log::warn!(
                    "Unterminated code fence at line {}; dropping {} captured line(s)",
                    cursor + 1,
                    lines.len() - body_start
                );
                (None, lines.len())
            }
        };
    }

    if let Some(end) = table_utils::table_extent(lines, cursor) {
        let rows = table_utils::parse_table(&lines[cursor..end]);
        return (Some(Block::Table(rows)), end);
    }

    (Some(classify_line(line)), cursor + 1)
}

/// Classify a single line that is neither a fence nor a table start
fn classify_line(line: &str) -> Block<'_> {
    if let Some(caps) = HEADING_REGEX.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.len()) as u8;
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return Block::Heading { level, text };
    }

    if let Some(caps) = UNORDERED_ITEM_REGEX.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str().trim());
        return Block::ListItem { ordered: false, text };
    }

    if let Some(caps) = ORDERED_ITEM_REGEX.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str().trim());
        return Block::ListItem { ordered: true, text };
    }

    if line.trim().is_empty() {
        return Block::Blank;
    }

    Block::Paragraph(line)
}

/// Iterator over the blocks of a Markdown document
#[derive(Debug, Clone)]
pub struct BlockScanner<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> BlockScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::from_lines(split_lines(source))
    }

    pub fn from_lines(lines: Vec<&'a str>) -> Self {
        Self { lines, cursor: 0 }
    }

    /// Current read position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.lines.len()
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_exhausted() {
            let (block, next) = next_block(&self.lines, self.cursor);
            debug_assert!(next > self.cursor, "scanner cursor must advance");
            self.cursor = next;
            if block.is_some() {
                return block;
            }
        }
        None
    }
}

/// Scan a whole document into its block sequence
pub fn parse_blocks(source: &str) -> Vec<Block<'_>> {
    BlockScanner::new(source).collect()
}
