/*!
 * Tests for document shape detection and page extraction
 */

use anyhow::Result;
use serde_json::json;
use doctrans::extraction::{
    DocumentShape, detect_shape, extract_segments, extract_text_from_file, load_segments,
};
use doctrans::reporter::PipelineEvent;
use crate::common::{self, RecordingReporter};

#[test]
fn test_extractSegments_withNestedDocument_shouldReturnPageContentsInOrder() {
    let doc = json!({
        "document": {
            "pages": [
                {"content": "Erste Seite"},
                {"number": 2},
                {"content": "Dritte Seite"},
                "stray"
            ]
        }
    });

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.shape, DocumentShape::NestedDocument);
    assert_eq!(extraction.segments, vec!["Erste Seite", "Dritte Seite"]);
}

#[test]
fn test_extractSegments_withNestedNonStringContent_shouldStringify() {
    let doc = json!({"document": {"pages": [{"content": 12}, {"content": ["a", "b"]}]}});

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.segments, vec!["12", r#"["a","b"]"#]);
}

#[test]
fn test_extractSegments_withEmptyPages_shouldReturnNoSegments() {
    let doc = json!({"document": {"pages": []}});

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.shape, DocumentShape::NestedDocument);
    assert!(extraction.segments.is_empty());
}

#[test]
fn test_extractSegments_withContentList_shouldAcceptObjectsAndStrings() {
    let doc = json!({"content": [{"content": "Hallo"}, "Welt", 7, {"other": "x"}]});

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.shape, DocumentShape::ContentList);
    assert_eq!(extraction.segments, vec!["Hallo", "Welt"]);
}

#[test]
fn test_extractSegments_withEmptyContentList_shouldReturnNoSegments() {
    let extraction = extract_segments(&json!({"content": []}));

    assert_eq!(extraction.shape, DocumentShape::ContentList);
    assert!(extraction.segments.is_empty());
}

#[test]
fn test_extractSegments_withFlatMapping_shouldSortKeysAndSkipReserved() {
    let doc = json!({"page_2": "B", "page_1": "A", "total_pages": 2});

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.shape, DocumentShape::PageMapping);
    assert_eq!(extraction.segments, vec!["A", "B"]);
}

#[test]
fn test_extractSegments_withFlatMappingReservedKeys_shouldExcludeExactlyThose() {
    let doc = json!({
        "total_pages": 3,
        "content": "not a list",
        "document": "not a mapping",
        "summary": "kept",
        "page_1": "A"
    });

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.shape, DocumentShape::PageMapping);
    assert_eq!(extraction.segments, vec!["A", "kept"]);
}

#[test]
fn test_extractSegments_withTwoDigitPageKeys_shouldKeepLexicographicOrder() {
    let doc = json!({"page_1": "one", "page_2": "two", "page_10": "ten"});

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.segments, vec!["one", "ten", "two"]);
}

#[test]
fn test_extractSegments_withFlatList_shouldStringifyEachElement() {
    let doc = json!(["eins", 2, {"k": "v"}, null]);

    let extraction = extract_segments(&doc);

    assert_eq!(extraction.shape, DocumentShape::PageList);
    assert_eq!(extraction.segments, vec!["eins", "2", r#"{"k":"v"}"#, "null"]);
}

#[test]
fn test_extractSegments_withScalar_shouldReturnSingleSegment() {
    assert_eq!(extract_segments(&json!("nur Text")).segments, vec!["nur Text"]);
    assert_eq!(extract_segments(&json!(3)).segments, vec!["3"]);
    assert_eq!(detect_shape(&json!(true)), DocumentShape::Scalar);
}

#[test]
fn test_detectShape_withNestedAndContentKeys_shouldPreferNestedDocument() {
    let doc = json!({
        "document": {"pages": [{"content": "nested"}]},
        "content": ["direct"]
    });

    assert_eq!(detect_shape(&doc), DocumentShape::NestedDocument);
    assert_eq!(extract_segments(&doc).segments, vec!["nested"]);
}

#[test]
fn test_detectShape_withDocumentWithoutPages_shouldFallBackToMapping() {
    let doc = json!({"document": {"title": "x"}, "page_1": "A"});

    assert_eq!(detect_shape(&doc), DocumentShape::PageMapping);
    assert_eq!(extract_segments(&doc).segments, vec!["A"]);
}

#[test]
fn test_loadSegments_withInvalidJson_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{not json")?;

    let result = load_segments(&path);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not a valid JSON file"));
    Ok(())
}

#[test]
fn test_extractTextFromFile_withInvalidJson_shouldReportAndReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "[1, 2,")?;
    let reporter = RecordingReporter::new();

    let segments = extract_text_from_file(&path, &reporter);

    assert!(segments.is_empty());
    assert!(reporter.has(|e| matches!(e, PipelineEvent::ExtractionFailed { .. })));
    Ok(())
}

#[test]
fn test_extractTextFromFile_withMissingFile_shouldReportAndReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let reporter = RecordingReporter::new();

    let segments = extract_text_from_file(temp_dir.path().join("absent.json"), &reporter);

    assert!(segments.is_empty());
    assert!(reporter.has(|e| matches!(e, PipelineEvent::ExtractionFailed { .. })));
    Ok(())
}

#[test]
fn test_extractTextFromFile_withValidFile_shouldReportShape() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "doc.json", r#"["a", "b"]"#)?;
    let reporter = RecordingReporter::new();

    let segments = extract_text_from_file(&path, &reporter);

    assert_eq!(segments, vec!["a", "b"]);
    assert_eq!(
        reporter.events(),
        vec![PipelineEvent::ShapeDetected { shape: DocumentShape::PageList }]
    );
    Ok(())
}
