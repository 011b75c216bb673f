//! Fixed package parts: content types, relationships, styles and numbering

use chrono::{DateTime, SecondsFormat, Utc};
use super::xml::escape_text;

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";
pub const DOCUMENT_PATH: &str = "word/document.xml";
pub const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
pub const STYLES_PATH: &str = "word/styles.xml";
pub const NUMBERING_PATH: &str = "word/numbering.xml";
pub const CORE_PROPERTIES_PATH: &str = "docProps/core.xml";

/// `numId` of the bullet list definition in numbering.xml
pub const BULLET_NUM_ID: u32 = 1;
/// `numId` of the decimal list definition in numbering.xml
pub const DECIMAL_NUM_ID: u32 = 2;

pub fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#
}

pub fn package_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#
}

pub fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#
}

pub fn styles_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr>
      <w:numPr><w:numId w:val="1"/></w:numPr>
      <w:contextualSpacing/>
    </w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListNumber">
    <w:name w:val="List Number"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr>
      <w:numPr><w:numId w:val="2"/></w:numPr>
      <w:contextualSpacing/>
    </w:pPr>
  </w:style>
  <w:style w:type="table" w:default="1" w:styleId="TableNormal">
    <w:name w:val="Normal Table"/>
    <w:uiPriority w:val="99"/>
    <w:semiHidden/>
    <w:tblPr>
      <w:tblInd w:w="0" w:type="dxa"/>
      <w:tblCellMar>
        <w:top w:w="0" w:type="dxa"/>
        <w:left w:w="108" w:type="dxa"/>
        <w:bottom w:w="0" w:type="dxa"/>
        <w:right w:w="108" w:type="dxa"/>
      </w:tblCellMar>
    </w:tblPr>
  </w:style>
  <w:style w:type="table" w:styleId="TableGrid">
    <w:name w:val="Table Grid"/>
    <w:basedOn w:val="TableNormal"/>
    <w:uiPriority w:val="59"/>
    <w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>
    <w:tblPr>
      <w:tblBorders>
        <w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>
        <w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>
        <w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/>
        <w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/>
        <w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/>
        <w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>
      </w:tblBorders>
    </w:tblPr>
  </w:style>
</w:styles>"#
}

pub fn numbering_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="bullet"/>
      <w:pStyle w:val="ListBullet"/>
      <w:lvlText w:val="&#8226;"/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="decimal"/>
      <w:pStyle w:val="ListNumber"/>
      <w:lvlText w:val="%1."/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
  <w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>
</w:numbering>"#
}

/// Document properties stored in `docProps/core.xml`
#[derive(Debug, Clone, PartialEq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub creator: String,
    pub created: DateTime<Utc>,
}

impl CoreProperties {
    pub fn new(creator: impl Into<String>) -> Self {
        Self {
            title: None,
            creator: creator.into(),
            created: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Office documents use W3CDTF (ISO 8601, UTC, second precision)
    fn w3cdtf(&self) -> String {
        self.created.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn to_xml(&self) -> String {
        let title = self.title.as_deref().map(escape_text).unwrap_or_default();
        let creator = escape_text(&self.creator);
        let timestamp = self.w3cdtf();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{title}</dc:title>
  <dc:creator>{creator}</dc:creator>
  <cp:lastModifiedBy>{creator}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{timestamp}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{timestamp}</dcterms:modified>
</cp:coreProperties>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_properties_xml() {
        let props = CoreProperties {
            title: Some("R&D Report".to_string()),
            creator: "md2docx".to_string(),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
        };
        let xml = props.to_xml();
        assert!(xml.contains("<dc:title>R&amp;D Report</dc:title>"));
        assert!(xml.contains("<dc:creator>md2docx</dc:creator>"));
        assert!(xml.contains(">2024-03-01T08:30:00Z</dcterms:created>"));
    }

    #[test]
    fn test_core_properties_drop_control_characters() {
        let props = CoreProperties::new("ops\x07").with_title(Some("Q3\x0c Report".to_string()));
        let xml = props.to_xml();
        assert!(xml.contains("<dc:title>Q3 Report</dc:title>"));
        assert!(xml.contains("<dc:creator>ops</dc:creator>"));
    }

    #[test]
    fn test_list_styles_reference_numbering() {
        assert!(styles_xml().contains(&format!(r#"<w:numId w:val="{BULLET_NUM_ID}"/>"#)));
        assert!(styles_xml().contains(&format!(r#"<w:numId w:val="{DECIMAL_NUM_ID}"/>"#)));
        assert!(numbering_xml().contains(&format!(r#"<w:num w:numId="{DECIMAL_NUM_ID}">"#)));
    }
}
