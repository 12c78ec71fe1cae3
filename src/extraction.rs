/*!
 * Page text extraction from document JSON of unknown shape.
 *
 * Documents arrive in several incompatible layouts. Detection runs through
 * [`SHAPE_RULES`] top-down and the first matching rule extracts the
 * segments, one per page.
 */

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::errors::ExtractionError;
use crate::reporter::{PipelineEvent, Reporter};

/// Keys of a flat page mapping that never hold page text
pub const RESERVED_KEYS: [&str; 3] = ["total_pages", "content", "document"];

/// Layouts the extractor recognizes, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// `{"document": {"pages": [{"content": ...}, ...]}}`
    NestedDocument,
    /// `{"content": [{"content": ...} | "text", ...]}`
    ContentList,
    /// `{"page_1": ..., "page_2": ..., "total_pages": 2}`
    PageMapping,
    /// `["text", ...]`
    PageList,
    /// Any other value, taken as one page
    Scalar,
}

impl DocumentShape {
    /// Human readable description for progress output
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NestedDocument => "nested 'document' -> 'pages' structure",
            Self::ContentList => "direct 'content' list",
            Self::PageMapping => "flat page mapping",
            Self::PageList => "flat page list",
            Self::Scalar => "single value",
        }
    }
}

/// A shape predicate paired with the extractor for that shape
pub struct ShapeRule {
    pub shape: DocumentShape,
    pub matches: fn(&Value) -> bool,
    pub extract: fn(&Value) -> Vec<String>,
}

/// Detection table. Order is priority: the first rule whose predicate holds wins.
pub static SHAPE_RULES: [ShapeRule; 5] = [
    ShapeRule {
        shape: DocumentShape::NestedDocument,
        matches: is_nested_document,
        extract: extract_nested_document,
    },
    ShapeRule {
        shape: DocumentShape::ContentList,
        matches: is_content_list,
        extract: extract_content_list,
    },
    ShapeRule {
        shape: DocumentShape::PageMapping,
        matches: Value::is_object,
        extract: extract_page_mapping,
    },
    ShapeRule {
        shape: DocumentShape::PageList,
        matches: Value::is_array,
        extract: extract_page_list,
    },
    ShapeRule {
        shape: DocumentShape::Scalar,
        matches: matches_any,
        extract: extract_whole,
    },
];

/// Segments extracted from one document
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub shape: DocumentShape,
    pub segments: Vec<String>,
}

/// Find the shape of a parsed document
pub fn detect_shape(value: &Value) -> DocumentShape {
    rule_for(value).shape
}

/// Extract the ordered page segments of a parsed document
pub fn extract_segments(value: &Value) -> Extraction {
    let rule = rule_for(value);
    Extraction {
        shape: rule.shape,
        segments: (rule.extract)(value),
    }
}

/// Read and parse a document file, then extract its segments
pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Extraction, ExtractionError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ExtractionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| ExtractionError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(extract_segments(&value))
}

/// Extract segments from a file, reporting any failure and returning no
/// segments instead of an error.
pub fn extract_text_from_file<P: AsRef<Path>>(path: P, reporter: &dyn Reporter) -> Vec<String> {
    match load_segments(path) {
        Ok(extraction) => {
            reporter.report(&PipelineEvent::ShapeDetected {
                shape: extraction.shape,
            });
            extraction.segments
        }
        Err(e) => {
            reporter.report(&PipelineEvent::ExtractionFailed {
                message: e.to_string(),
            });
            Vec::new()
        }
    }
}

fn rule_for(value: &Value) -> &'static ShapeRule {
    SHAPE_RULES
        .iter()
        .find(|rule| (rule.matches)(value))
        // The last rule matches everything
        .unwrap_or(&SHAPE_RULES[SHAPE_RULES.len() - 1])
}

/// Page text of a JSON value: strings verbatim, everything else as compact JSON
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn nested_pages(value: &Value) -> Option<&Vec<Value>> {
    value.get("document")?.as_object()?.get("pages")?.as_array()
}

fn is_nested_document(value: &Value) -> bool {
    nested_pages(value).is_some()
}

fn extract_nested_document(value: &Value) -> Vec<String> {
    nested_pages(value)
        .into_iter()
        .flatten()
        .filter_map(|page| page.as_object()?.get("content"))
        .map(stringify)
        .collect()
}

fn content_items(value: &Value) -> Option<&Vec<Value>> {
    value.as_object()?.get("content")?.as_array()
}

fn is_content_list(value: &Value) -> bool {
    content_items(value).is_some()
}

fn extract_content_list(value: &Value) -> Vec<String> {
    content_items(value)
        .into_iter()
        .flatten()
        .filter_map(|item| match item {
            Value::Object(fields) => fields.get("content").map(stringify),
            Value::String(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn extract_page_mapping(value: &Value) -> Vec<String> {
    let Some(pages) = value.as_object() else {
        return Vec::new();
    };

    // Lexicographic, so "page_10" comes before "page_2"
    let mut keys: Vec<&String> = pages
        .keys()
        .filter(|key| !RESERVED_KEYS.contains(&key.as_str()))
        .collect();
    keys.sort();

    keys.into_iter()
        .filter_map(|key| pages.get(key))
        .map(stringify)
        .collect()
}

fn extract_page_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().map(stringify).collect())
        .unwrap_or_default()
}

fn matches_any(_: &Value) -> bool {
    true
}

fn extract_whole(value: &Value) -> Vec<String> {
    vec![stringify(value)]
}
