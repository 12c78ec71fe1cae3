/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use doctrans::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that dir_exists distinguishes directories from files
#[test]
fn test_dir_exists_withFileAndDir_shouldOnlyAcceptDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "plain.txt", "x")?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&test_file));
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));

    Ok(())
}

/// Test that ensure_dir creates nested directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("results").join("batch");

    FileManager::ensure_dir(&nested)?;
    // Second call on an existing directory is a no-op
    FileManager::ensure_dir(&nested)?;

    assert!(nested.is_dir());
    Ok(())
}

/// Test that generate_output_path appends the profile suffix to the stem
#[test]
fn test_generate_output_path_withSuffix_shouldUseStemSuffixAndTxt() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/data/doc1.json"),
        Path::new("/tmp/results"),
        "_en",
    );

    assert_eq!(output_path, Path::new("/tmp/results/doc1_en.txt"));
}

/// Test that a dotted stem keeps everything before the last extension
#[test]
fn test_generate_output_path_withDottedName_shouldKeepInnerDots() {
    let output_path = FileManager::generate_output_path(
        Path::new("report.v2.json"),
        Path::new("out"),
        "_ur",
    );

    assert_eq!(output_path, Path::new("out/report.v2_ur.txt"));
}

/// Test that find_json_files only returns top-level json files, sorted
#[test]
fn test_find_json_files_withMixedEntries_shouldReturnSortedTopLevelJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "b.json", "[]")?;
    common::create_test_file(dir, "a.JSON", "[]")?;
    common::create_test_file(dir, "notes.txt", "x")?;
    fs::create_dir(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "c.json", "[]")?;

    let files = FileManager::find_json_files(dir)?;

    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    assert_eq!(names, vec!["a.JSON", "b.json"]);
    Ok(())
}

/// Test that find_json_files fails for a missing folder
#[test]
fn test_find_json_files_withMissingDir_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(FileManager::find_json_files(temp_dir.path().join("missing")).is_err());
    Ok(())
}
