use serde_json::Value;

use crate::decode::Document;
use crate::selector::Selector;

/// Resolve every field path against the document and join the results, in
/// path order, with the selector's separator.
pub fn render_line(selector: &Selector, doc: &Document) -> String {
    let values: Vec<String> = selector
        .field_paths()
        .iter()
        .map(|path| select_field(path, doc))
        .collect();
    values.join(&selector.separator().to_string())
}

/// Resolve one dotted field path against a document.
///
/// Non-terminal segments descend through nested objects; the last segment
/// names the leaf. Any miss along the way (absent key, non-object
/// intermediate, absent leaf) yields the missing-field sentinel carrying
/// the path exactly as given.
pub fn select_field(path: &str, doc: &Document) -> String {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = doc;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            current = match current.get(segment).and_then(Value::as_object) {
                Some(nested) => nested,
                None => return missing_field(path),
            };
        }
    }

    match current.get(leaf) {
        Some(value) => format_value(value),
        None => missing_field(path),
    }
}

/// Textual form of a terminal value.
///
/// Strings come out unquoted, trimmed of surrounding whitespace; interior
/// line breaks are rendered as their two-character JSON escapes so one
/// value can never split a projected line. Everything else (numbers,
/// booleans, null, and object/array leaves) is the canonical JSON text.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().replace('\r', "\\r").replace('\n', "\\n"),
        other => other.to_string(),
    }
}

fn missing_field(path: &str) -> String {
    format!("<jtoh:missing field \"{}\">", path)
}
