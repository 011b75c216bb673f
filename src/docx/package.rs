//! Writing the OOXML zip container

use super::document::DocxDocument;
use super::parts::{self, CoreProperties};
use std::fs;
use std::io::{self, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Errors raised while writing a DOCX package
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Failed to write {path}: {source}")]
    Io { source: io::Error, path: String },

    #[error("Failed to build DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl From<io::Error> for PackageError {
    fn from(source: io::Error) -> Self {
        PackageError::Io {
            source,
            path: "<archive>".to_string(),
        }
    }
}

impl DocxDocument {
    /// Write the complete package to any seekable writer
    pub fn write_to<W: Write + Seek>(&self, writer: W, properties: &CoreProperties) -> Result<W, PackageError> {
        let mut zip = ZipWriter::new(writer);
        let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let core_xml = properties.to_xml();
        let entries: [(&str, &[u8]); 6] = [
            (parts::CONTENT_TYPES_PATH, parts::content_types_xml().as_bytes()),
            (parts::PACKAGE_RELS_PATH, parts::package_rels_xml().as_bytes()),
            (parts::DOCUMENT_RELS_PATH, parts::document_rels_xml().as_bytes()),
            (parts::STYLES_PATH, parts::styles_xml().as_bytes()),
            (parts::NUMBERING_PATH, parts::numbering_xml().as_bytes()),
            (parts::CORE_PROPERTIES_PATH, core_xml.as_bytes()),
        ];
        for (name, content) in entries {
            zip.start_file(name, opt)?;
            zip.write_all(content)?;
        }

        zip.start_file(parts::DOCUMENT_PATH, opt)?;
        zip.write_all(self.document_xml().as_bytes())?;

        Ok(zip.finish()?)
    }

    /// Write the package to `path`, creating parent directories as needed
    ///
    /// The archive is assembled in a temporary file next to `path` and moved
    /// into place only once it is complete, so an existing file survives a
    /// failed write.
    pub fn save(&self, path: &Path, properties: &CoreProperties) -> Result<(), PackageError> {
        let io_err = |source: io::Error| PackageError::Io {
            source,
            path: path.display().to_string(),
        };

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(parent).map_err(io_err)?;
        self.write_to(staged.as_file_mut(), properties)?.flush().map_err(io_err)?;
        staged.persist(path).map_err(|err| io_err(err.error))?;

        log::debug!("Wrote {} body element(s) to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::document::{PageSetup, Paragraph, Run};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn page() -> PageSetup {
        PageSetup {
            width: 11906,
            height: 16838,
            margin_top: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
            margin_right: 1440,
        }
    }

    #[test]
    fn test_package_contains_all_parts() {
        let mut doc = DocxDocument::new(page());
        doc.add_paragraph(Paragraph::with_run(Run::new("hello")));

        let buffer = doc
            .write_to(Cursor::new(Vec::new()), &CoreProperties::new("test"))
            .unwrap();
        let mut archive = ZipArchive::new(Cursor::new(buffer.into_inner())).unwrap();

        for name in [
            parts::CONTENT_TYPES_PATH,
            parts::PACKAGE_RELS_PATH,
            parts::DOCUMENT_PATH,
            parts::DOCUMENT_RELS_PATH,
            parts::STYLES_PATH,
            parts::NUMBERING_PATH,
            parts::CORE_PROPERTIES_PATH,
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {name}");
        }

        let mut document = String::new();
        archive
            .by_name(parts::DOCUMENT_PATH)
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains(">hello</w:t>"));
    }
}
