/*!
 * # doctrans - page-by-page document translation with a local LLM
 *
 * A Rust library and CLI that translates folders of document JSON files
 * through a locally hosted inference server.
 *
 * ## Features
 *
 * - Text extraction from several document JSON layouts without a schema
 * - One inference request per page, run strictly in sequence
 * - Cleanup of model preambles and postambles
 * - Resumable output: an existing output file means "already done"
 * - Pages are appended as they finish, so partial work survives failures
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration and model profiles
 * - `extraction`: Shape detection and page text extraction
 * - `sanitizer`: Model response cleanup
 * - `translation`: Prompt templates and the per-page translation client
 * - `providers`: Client for the inference endpoint:
 *   - `providers::ollama`: Ollama `/api/generate` client
 * - `output_store`: Append-only output storage
 * - `reporter`: Pipeline events and the console reporter
 * - `app_controller`: The pipeline driver
 * - `profile_menu`: Interactive profile selection
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## Known limitation
 *
 * Flat page mappings are read in lexicographic key order, so `page_10`
 * comes before `page_2`. This keeps page numbering compatible with outputs
 * produced earlier.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod output_store;
pub mod profile_menu;
pub mod providers;
pub mod reporter;
pub mod sanitizer;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, ModelProfile, TranslationDirection};
pub use app_controller::{Controller, FileOutcome, RunSummary};
pub use errors::{AppError, ConfigError, ExtractionError, ProviderError};
pub use extraction::{DocumentShape, extract_segments, extract_text_from_file};
pub use output_store::{FsOutputStore, MemoryOutputStore, OutputStore};
pub use reporter::{ConsoleReporter, PipelineEvent, Reporter};
pub use sanitizer::sanitize;
pub use translation::TranslationClient;
