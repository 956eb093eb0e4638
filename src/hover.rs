//! Per-record hover/metadata synthesis
//!
//! Runs independently per record and has no dependency on clustering: key
//! facts are pulled via fixed paths, conditions via the generalized deep
//! search, and URL-shaped substrings are harvested from the record's full
//! textual serialization.

use crate::config::PipelineConfig;
use crate::record::{extract, Record, Value};
use regex::Regex;
use std::sync::OnceLock;

/// Fallback shown for any absent field
pub const NOT_AVAILABLE: &str = "N/A";

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*(),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
            .expect("URL pattern compiles")
    })
}

/// Synthesize the hover string for one record.
///
/// Sections are fixed: last update, brief title, brief summary, conditions,
/// then one `<a>` link per URL found anywhere in the record, `<br>`-joined.
pub fn hover_text(record: &Record, config: &PipelineConfig) -> String {
    let root = record.root();
    let last_update = scalar_at(root, &config.last_update_path);
    let brief_title = scalar_at(root, &config.title_path);
    let brief_summary = scalar_at(root, &config.summary_path);

    let conditions = extract::attribute_values(root, &config.attribute_key);
    let conditions_str = if conditions.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        conditions.join(", ")
    };

    let links = extract_links(root);
    let links_str = if links.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        links
            .iter()
            .map(|link| format!("<a href=\"{}\" target=\"_blank\">{}</a>", link, link))
            .collect::<Vec<_>>()
            .join("<br>")
    };

    format!(
        "Last update: {}<br>Brief title: {}<br>Brief summary: {}<br>Conditions: {}<br>Links:<br>{}",
        last_update, brief_title, brief_summary, conditions_str, links_str
    )
}

/// All URL-shaped substrings in the record's serialized form, in order of
/// appearance
pub fn extract_links(root: &Value) -> Vec<String> {
    let serialized = root.to_string();
    url_pattern()
        .find_iter(&serialized)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn scalar_at(root: &Value, path: &[String]) -> String {
    extract::lookup_path(root, path)
        .and_then(Value::scalar_to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
