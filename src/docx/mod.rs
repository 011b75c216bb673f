//! Minimal WordprocessingML writer
//!
//! Only the subset needed for report output is modelled: paragraphs of
//! formatted runs, list paragraph styles, grid tables and one section.

pub mod document;
pub mod package;
pub mod parts;
pub mod xml;

pub use document::{BodyElement, DocxDocument, PageSetup, Paragraph, ParagraphStyle, Run, Table};
pub use package::PackageError;
pub use parts::CoreProperties;
