//! Gettext catalog assembly and POT serialization.

use crate::collate::collate;
use crate::extract::Extraction;

/// Metadata written into the POT header entry.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub project_name: String,
    pub project_version: String,
    pub bugs_email_address: Option<String>,
}

impl Default for HeaderInfo {
    fn default() -> Self {
        HeaderInfo {
            project_name: "untitled".to_string(),
            project_version: "1.0".to_string(),
            bugs_email_address: None,
        }
    }
}

/// A message catalog: a header plus deduplicated msgids in document order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub header: HeaderInfo,
    pub messages: Vec<String>,
}

impl Catalog {
    pub fn from_extractions(extractions: Vec<Extraction>, header: HeaderInfo) -> Self {
        let messages = collate(extractions.into_iter().map(|e| e.text).collect());
        Catalog { header, messages }
    }

    /// Serialize as a POT file with empty msgstrs.
    pub fn to_pot(&self) -> String {
        let mut out = String::new();
        out.push_str("msgid \"\"\n");
        out.push_str("msgstr \"\"\n");
        out.push_str(&format!(
            "\"Project-Id-Version: {} {}\\n\"\n",
            self.header.project_name, self.header.project_version
        ));
        if let Some(address) = &self.header.bugs_email_address {
            out.push_str(&format!("\"Report-Msgid-Bugs-To: {address}\\n\"\n"));
        }
        out.push_str("\"MIME-Version: 1.0\\n\"\n");
        out.push_str("\"Content-Type: text/plain; charset=utf-8\\n\"\n");
        out.push_str("\"Content-Transfer-Encoding: 8bit\\n\"\n");
        out.push_str("\"X-Generator: adoc-gettext\\n\"\n");
        for message in &self.messages {
            out.push('\n');
            out.push_str(&po_field("msgid", message));
            out.push_str("msgstr \"\"\n");
        }
        out
    }
}

/// One PO field. Single-line values go on the keyword line; multiline
/// values use the conventional empty first string with one quoted string
/// per line.
fn po_field(keyword: &str, value: &str) -> String {
    if !value.contains('\n') {
        return format!("{keyword} \"{}\"\n", po_escape(value));
    }
    let mut out = format!("{keyword} \"\"\n");
    let mut lines = value.split('\n').peekable();
    while let Some(line) = lines.next() {
        let suffix = if lines.peek().is_some() { "\\n" } else { "" };
        out.push_str(&format!("\"{}{suffix}\"\n", po_escape(line)));
    }
    out
}

fn po_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\t', "\\t")
}
