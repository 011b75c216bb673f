//! Block rendering with the configured typography

use crate::block::{Block, TableRow};
use crate::config::{Config, PageConfig};
use crate::docx::{DocxDocument, PageSetup, Paragraph, ParagraphStyle, Run, Table};
use crate::utils::units::cm_to_twips;

impl From<&PageConfig> for PageSetup {
    fn from(page: &PageConfig) -> Self {
        PageSetup {
            width: cm_to_twips(page.width_cm),
            height: cm_to_twips(page.height_cm),
            margin_top: cm_to_twips(page.margin_top_cm),
            margin_bottom: cm_to_twips(page.margin_bottom_cm),
            margin_left: cm_to_twips(page.margin_left_cm),
            margin_right: cm_to_twips(page.margin_right_cm),
        }
    }
}

/// Appends blocks to a document, one structural unit per block
pub struct Renderer<'c> {
    config: &'c Config,
    document: DocxDocument,
}

impl<'c> Renderer<'c> {
    /// Start a document with the configured page geometry
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            document: DocxDocument::new(PageSetup::from(&config.page)),
        }
    }

    pub fn emit(&mut self, block: &Block<'_>) {
        match block {
            Block::Heading { level, text } => {
                let size = self.config.headings.size_for(*level);
                let run = self.body_run(text).size(size).bold();
                self.push_paragraph(Paragraph::with_run(run));
            }
            Block::Paragraph(text) => {
                let run = self.body_run(text);
                self.push_paragraph(Paragraph::with_run(run));
            }
            Block::ListItem { ordered, text } => {
                let style = if *ordered {
                    ParagraphStyle::ListNumber
                } else {
                    ParagraphStyle::ListBullet
                };
                let run = self.body_run(text);
                self.push_paragraph(Paragraph::with_run(run).style(style));
            }
            Block::Blank => self.document.add_paragraph(Paragraph::empty()),
            Block::CodeBlock(lines) => {
                for line in lines {
                    let run = Run::new(*line)
                        .font(self.config.code.font.as_str())
                        .size(self.config.code.size_pt);
                    self.push_paragraph(Paragraph::with_run(run));
                }
            }
            Block::Table(rows) => self.emit_table(rows),
        }
    }

    fn emit_table(&mut self, rows: &[TableRow<'_>]) {
        let Some(header) = rows.first() else {
            return;
        };
        let columns = header.len();
        if columns == 0 {
            log::warn!("Skipping table with an empty header row");
            return;
        }

        let mut table = Table::new(columns, self.document.page().text_width());
        for (idx, row) in rows.iter().enumerate() {
            if row.len() > columns {
                log::warn!(
                    "Table row {} has {} cells but the header has {}; extra cells dropped",
                    idx + 1,
                    row.len(),
                    columns
                );
            }
            let cells = row
                .iter()
                .map(|cell| {
                    let run = self.body_run(cell.trim());
                    Paragraph::with_run(run).line_spacing(self.config.body.line_spacing)
                })
                .collect();
            table.push_row(cells);
        }
        self.document.add_table(table);
    }

    fn body_run(&self, text: &str) -> Run {
        Run::new(text)
            .font(self.config.body.font.as_str())
            .size(self.config.body.size_pt)
    }

    fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.document
            .add_paragraph(paragraph.line_spacing(self.config.body.line_spacing));
    }

    pub fn finish(self) -> DocxDocument {
        self.document
    }
}
