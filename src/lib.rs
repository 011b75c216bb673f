pub mod block;
pub mod config;
pub mod docx;
pub mod exit_codes;
pub mod render;
pub mod scanner;
pub mod utils;

pub use crate::block::{Block, BlockKind, TableRow};
pub use crate::config::{Config, ConfigError, SourcedConfig};
pub use crate::docx::{CoreProperties, DocxDocument, PackageError};
pub use crate::render::Renderer;
pub use crate::scanner::{BlockScanner, next_block, parse_blocks, split_lines};

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while converting a file
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input path does not resolve to an existing file
    #[error("Markdown file not found: {}", path.display())]
    InputMissing { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read { source: io::Error, path: PathBuf },

    #[error(transparent)]
    Package(#[from] PackageError),
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output: PathBuf,
    /// Number of blocks emitted, by kind
    pub blocks: BTreeMap<String, usize>,
    /// Number of top-level elements in the document body
    pub elements: usize,
}

impl ConversionSummary {
    pub fn total_blocks(&self) -> usize {
        self.blocks.values().sum()
    }
}

/// Scan `source` and render every block into a new document
pub fn render_markdown(source: &str, config: &Config) -> DocxDocument {
    render_with_counts(source, config).0
}

fn render_with_counts(source: &str, config: &Config) -> (DocxDocument, BTreeMap<String, usize>) {
    let mut renderer = Renderer::new(config);
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for block in BlockScanner::new(source) {
        *counts.entry(block.kind().to_string()).or_default() += 1;
        renderer.emit(&block);
    }
    (renderer.finish(), counts)
}

/// Convert the Markdown file at `input` into a DOCX file at `output`.
///
/// Nothing is written unless the whole input has been read and rendered.
pub fn convert_file(input: &Path, output: &Path, config: &Config) -> Result<ConversionSummary, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::InputMissing {
            path: input.to_path_buf(),
        });
    }

    let source = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        source,
        path: input.to_path_buf(),
    })?;
    log::debug!("Read {} line(s) from {}", scanner::split_lines(&source).len(), input.display());

    let (document, blocks) = render_with_counts(&source, config);
    for (kind, count) in &blocks {
        log::debug!("  {kind}: {count}");
    }

    let properties = CoreProperties::new(config.metadata.author.as_str()).with_title(config.metadata.title.clone());
    document.save(output, &properties)?;

    Ok(ConversionSummary {
        output: output.to_path_buf(),
        blocks,
        elements: document.len(),
    })
}
