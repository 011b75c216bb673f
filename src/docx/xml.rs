//! Escaping text for WordprocessingML parts

use quick_xml::escape::escape;
use std::borrow::Cow;

/// Whether `ch` may appear in an XML 1.0 document
pub fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape markup characters and drop characters XML cannot carry
pub fn escape_text(raw: &str) -> Cow<'_, str> {
    if raw.chars().all(is_xml_char) {
        return escape(raw);
    }
    let kept: String = raw.chars().filter(|&ch| is_xml_char(ch)).collect();
    log::debug!("Dropped {} control character(s) from text", raw.chars().count() - kept.chars().count());
    Cow::Owned(escape(kept.as_str()).into_owned())
}
