/*!
 * Pipeline event reporting.
 *
 * The driver, extractor and translation client never print directly. They
 * hand a [`PipelineEvent`] to an injected [`Reporter`]; the binary uses
 * [`ConsoleReporter`], tests record the events.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use crate::app_controller::{FileOutcome, RunSummary};
use crate::extraction::DocumentShape;

/// Something observable that happened during a run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    RunStarted { data_folder: PathBuf, file_count: usize },
    NoInputFiles { data_folder: PathBuf },
    FileSkipped { input: PathBuf },
    FileStarted { input: PathBuf },
    ShapeDetected { shape: DocumentShape },
    ExtractionFailed { message: String },
    NoText { input: PathBuf },
    SegmentsExtracted { count: usize },
    PageStarted { page: usize, total: usize },
    PageTranslated { page: usize },
    PageEmpty { page: usize },
    TranslationFailed { message: String },
    StoreFailed { output: PathBuf, message: String },
    FileFinished { input: PathBuf, outcome: FileOutcome },
    RunFinished { summary: RunSummary },
}

/// Receiver of pipeline events
pub trait Reporter: Send + Sync {
    fn report(&self, event: &PipelineEvent);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reports events through the `log` facade, with a page progress bar per file
pub struct ConsoleReporter {
    // @field: Bar for the file currently being translated
    bar: Mutex<Option<ProgressBar>>,
    // @field: Whether progress bars are drawn at all
    show_progress: bool,
}

impl ConsoleReporter {
    /// Create a reporter that draws page progress bars
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            show_progress: true,
        }
    }

    /// Create a reporter that only logs
    pub fn plain() -> Self {
        Self {
            bar: Mutex::new(None),
            show_progress: false,
        }
    }

    fn start_bar(&self, total: usize) {
        if !self.show_progress {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("█▓▒░"));
        *self.bar.lock() = Some(bar);
    }

    fn advance_bar(&self) {
        if let Some(bar) = self.bar.lock().as_ref() {
            bar.inc(1);
        }
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.bar.lock().take() {
            bar.finish_and_clear();
        }
    }

    /// Run a logging closure without the bar drawing over it
    fn with_bar_suspended<F: FnOnce()>(&self, f: F) {
        match self.bar.lock().as_ref() {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    fn log_event(event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted { file_count, .. } => {
                info!("Found {} files to process.", file_count);
            }
            PipelineEvent::NoInputFiles { data_folder } => {
                warn!("No .json files found in {:?}.", data_folder);
            }
            PipelineEvent::FileSkipped { input } => {
                info!("[SKIP] {} already translated.", file_name(input));
            }
            PipelineEvent::FileStarted { input } => {
                info!("Processing: {}...", file_name(input));
            }
            PipelineEvent::ShapeDetected { shape } => {
                debug!("Detected {}.", shape.describe());
            }
            PipelineEvent::ExtractionFailed { message } => {
                error!("{}", message);
            }
            PipelineEvent::NoText { input } => {
                warn!("No text found in {}.", file_name(input));
            }
            PipelineEvent::SegmentsExtracted { count } => {
                debug!("Extracted {} page(s).", count);
            }
            PipelineEvent::PageStarted { page, total } => {
                debug!("Translating Page {}/{}...", page, total);
            }
            PipelineEvent::PageTranslated { page } => {
                debug!("Page {} done.", page);
            }
            PipelineEvent::PageEmpty { page } => {
                warn!("Page {} failed: the model returned no text.", page);
            }
            PipelineEvent::TranslationFailed { message } => {
                error!("API Error: {}", message);
            }
            PipelineEvent::StoreFailed { output, message } => {
                error!("Cannot write {:?}: {}", output, message);
            }
            PipelineEvent::FileFinished { input, outcome } => match outcome {
                FileOutcome::Completed { pages_written, pages_empty } => {
                    info!(
                        "Finished {}: {} page(s) written, {} empty.",
                        file_name(input),
                        pages_written,
                        pages_empty
                    );
                }
                FileOutcome::Aborted { failed_page, pages_written } => {
                    warn!(
                        "Aborted {} at page {}; {} page(s) kept.",
                        file_name(input),
                        failed_page,
                        pages_written
                    );
                }
                FileOutcome::Skipped | FileOutcome::NoText => {}
            },
            PipelineEvent::RunFinished { summary } => {
                info!(
                    "{} completed, {} aborted, {} skipped, {} without text ({} inference calls).",
                    summary.completed,
                    summary.aborted,
                    summary.skipped,
                    summary.no_text,
                    summary.inference_calls
                );
                info!("All jobs completed.");
            }
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &PipelineEvent) {
        if let PipelineEvent::SegmentsExtracted { count } = event {
            self.start_bar(*count);
        }

        self.with_bar_suspended(|| Self::log_event(event));

        match event {
            PipelineEvent::PageTranslated { .. } | PipelineEvent::PageEmpty { .. } => {
                self.advance_bar();
            }
            PipelineEvent::FileFinished { .. } => self.clear_bar(),
            _ => {}
        }
    }
}
