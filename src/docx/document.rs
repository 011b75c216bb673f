//! In-memory word-processing document
//!
//! The document is append-only: page setup is fixed when it is created and
//! body elements are only ever pushed to the end. Serialization produces the
//! `word/document.xml` part.

use crate::utils::units::{line_spacing_units, pt_to_half_points};
use super::xml::escape_text;
use std::fmt::Write;

/// Page size and margins, in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
}

impl PageSetup {
    /// Width available for text between the left and right margins
    pub fn text_width(&self) -> u32 {
        self.width.saturating_sub(self.margin_left + self.margin_right)
    }
}

/// Paragraph styles defined in `word/styles.xml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    ListBullet,
    ListNumber,
}

impl ParagraphStyle {
    pub fn style_id(self) -> &'static str {
        match self {
            ParagraphStyle::ListBullet => "ListBullet",
            ParagraphStyle::ListNumber => "ListNumber",
        }
    }
}

/// A run of uniformly formatted text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    /// Applied to the ASCII, high-ANSI and East Asian font slots
    pub font: Option<String>,
    pub size_pt: Option<f64>,
    pub bold: bool,
    pub italic: bool,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn size(mut self, size_pt: f64) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:r>");
        let has_props = self.font.is_some() || self.size_pt.is_some() || self.bold || self.italic;
        if has_props {
            out.push_str("<w:rPr>");
            if let Some(font) = &self.font {
                let font = escape_text(font);
                let _ = write!(
                    out,
                    r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#
                );
            }
            if self.bold {
                out.push_str("<w:b/><w:bCs/>");
            }
            if self.italic {
                out.push_str("<w:i/><w:iCs/>");
            }
            if let Some(size) = self.size_pt {
                let half_points = pt_to_half_points(size);
                let _ = write!(out, r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#);
            }
            out.push_str("</w:rPr>");
        }
        out.push_str(r#"<w:t xml:space="preserve">"#);
        out.push_str(&escape_text(&self.text));
        out.push_str("</w:t></w:r>");
    }
}

/// A paragraph of zero or more runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub style: Option<ParagraphStyle>,
    /// Line spacing multiple; `None` keeps the style default
    pub line_spacing: Option<f64>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// A paragraph with no runs, used as vertical spacing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_run(run: Run) -> Self {
        Self {
            runs: vec![run],
            ..Default::default()
        }
    }

    pub fn style(mut self, style: ParagraphStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn line_spacing(mut self, multiple: f64) -> Self {
        self.line_spacing = Some(multiple);
        self
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:p>");
        if self.style.is_some() || self.line_spacing.is_some() {
            out.push_str("<w:pPr>");
            if let Some(style) = self.style {
                let _ = write!(out, r#"<w:pStyle w:val="{}"/>"#, style.style_id());
            }
            if let Some(multiple) = self.line_spacing {
                let _ = write!(
                    out,
                    r#"<w:spacing w:line="{}" w:lineRule="auto"/>"#,
                    line_spacing_units(multiple)
                );
            }
            out.push_str("</w:pPr>");
        }
        for run in &self.runs {
            run.write_xml(out);
        }
        out.push_str("</w:p>");
    }
}

/// A table on a fixed grid of equal-width columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: usize,
    pub column_width: u32,
    /// Every row holds exactly `columns` cells
    pub rows: Vec<Vec<Paragraph>>,
}

impl Table {
    /// Create a table whose columns share `total_width` twips equally
    pub fn new(columns: usize, total_width: u32) -> Self {
        let column_width = if columns == 0 {
            0
        } else {
            total_width / columns as u32
        };
        Self {
            columns,
            column_width,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with empty cells or truncating to the grid width
    pub fn push_row(&mut self, mut cells: Vec<Paragraph>) {
        cells.resize_with(self.columns, Paragraph::empty);
        self.rows.push(cells);
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:tbl><w:tblPr>");
        out.push_str(r#"<w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/>"#);
        out.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
        out.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..self.columns {
            let _ = write!(out, r#"<w:gridCol w:w="{}"/>"#, self.column_width);
        }
        out.push_str("</w:tblGrid>");
        for row in &self.rows {
            out.push_str("<w:tr>");
            for cell in row {
                let _ = write!(
                    out,
                    r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr>"#,
                    self.column_width
                );
                cell.write_xml(out);
                out.push_str("</w:tc>");
            }
            out.push_str("</w:tr>");
        }
        out.push_str("</w:tbl>");
    }
}

/// A top-level element of the document body
#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
}

const DOCUMENT_NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#
);

#[derive(Debug, Clone, PartialEq)]
pub struct DocxDocument {
    page: PageSetup,
    body: Vec<BodyElement>,
}

impl DocxDocument {
    pub fn new(page: PageSetup) -> Self {
        Self { page, body: Vec::new() }
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(BodyElement::Paragraph(paragraph));
    }

    pub fn add_table(&mut self, table: Table) {
        self.body.push(BodyElement::Table(table));
    }

    pub fn elements(&self) -> &[BodyElement] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Serialize the `word/document.xml` part
    pub fn document_xml(&self) -> String {
        let mut out = String::with_capacity(256 + self.body.len() * 256);
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(out, "\n<w:document {DOCUMENT_NAMESPACES}><w:body>");
        for element in &self.body {
            match element {
                BodyElement::Paragraph(p) => p.write_xml(&mut out),
                BodyElement::Table(t) => t.write_xml(&mut out),
            }
        }

        let page = &self.page;
        let _ = write!(
            out,
            concat!(
                "<w:sectPr>",
                r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
                r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
                r#"<w:cols w:space="720"/>"#,
                "</w:sectPr>"
            ),
            page.width, page.height, page.margin_top, page.margin_right, page.margin_bottom, page.margin_left
        );
        out.push_str("</w:body></w:document>");
        out
    }
}
