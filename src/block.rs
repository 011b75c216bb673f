//! Structural units produced by the line scanner.

use std::fmt;

/// One row of table cells, borrowed from the source line.
pub type TableRow<'a> = Vec<&'a str>;

/// A block of Markdown content materialized from one or more source lines.
///
/// Blocks borrow their text from the source document and are handed to the
/// renderer as soon as they are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// ATX heading (`# Title`), level 1..=6
    Heading { level: u8, text: &'a str },
    /// A single physical line of prose
    Paragraph(&'a str),
    /// Bullet (`-`, `*`, `+`) or numbered (`1.`) list item
    ListItem { ordered: bool, text: &'a str },
    /// Empty or whitespace-only line, kept as vertical spacing
    Blank,
    /// Lines captured between two fences, verbatim
    CodeBlock(Vec<&'a str>),
    /// Header row first, separator row already removed
    Table(Vec<TableRow<'a>>),
}

impl Block<'_> {
    /// Short name of the block kind, used in log output
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::ListItem { .. } => BlockKind::ListItem,
            Block::Blank => BlockKind::Blank,
            Block::CodeBlock(_) => BlockKind::CodeBlock,
            Block::Table(_) => BlockKind::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    ListItem,
    Blank,
    CodeBlock,
    Table,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading => write!(f, "heading"),
            BlockKind::Paragraph => write!(f, "paragraph"),
            BlockKind::ListItem => write!(f, "list item"),
            BlockKind::Blank => write!(f, "blank"),
            BlockKind::CodeBlock => write!(f, "code block"),
            BlockKind::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(Block::Blank.kind().to_string(), "blank");
        assert_eq!(Block::CodeBlock(vec!["x"]).kind().to_string(), "code block");
        assert_eq!(
            Block::ListItem {
                ordered: true,
                text: "a"
            }
            .kind(),
            BlockKind::ListItem
        );
    }
}
