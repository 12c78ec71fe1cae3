use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app_config::{Config, ModelProfile};
use crate::extraction::extract_text_from_file;
use crate::file_utils::FileManager;
use crate::output_store::{FsOutputStore, OutputStore};
use crate::providers::Provider;
use crate::providers::ollama::Ollama;
use crate::reporter::{PipelineEvent, Reporter};
use crate::translation::TranslationClient;

// @module: Pipeline driver for document translation

/// How processing of one input file ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The output already existed; nothing was done
    Skipped,
    /// Extraction produced no segments; no output was created
    NoText,
    /// Every segment was visited
    Completed {
        pages_written: usize,
        pages_empty: usize,
    },
    /// Processing stopped at `failed_page` (1-indexed, 0 if the output could
    /// not be created). Pages before it stay in the output.
    Aborted {
        failed_page: usize,
        pages_written: usize,
    },
}

/// Totals over one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: usize,
    pub no_text: usize,
    pub completed: usize,
    pub aborted: usize,
    pub inference_calls: usize,
}

impl RunSummary {
    /// Count one file outcome
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::NoText => self.no_text += 1,
            FileOutcome::Completed { .. } => self.completed += 1,
            FileOutcome::Aborted { .. } => self.aborted += 1,
        }
    }

    /// Number of files visited
    pub fn files(&self) -> usize {
        self.skipped + self.no_text + self.completed + self.aborted
    }
}

/// Format one translated page as it appears in the output file
pub fn format_page(page: usize, text: &str) -> String {
    format!("--- Page {} ---\n{}\n\n", page, text)
}

/// Main pipeline driver: one file at a time, one page at a time
pub struct Controller<'a, P: Provider, S: OutputStore> {
    // @field: Page translation client
    client: TranslationClient<P>,
    // @field: Output persistence
    store: S,
    // @field: Event sink
    reporter: &'a dyn Reporter,
    // @field: Inference requests issued so far
    inference_calls: AtomicUsize,
}

impl<'a> Controller<'a, Ollama, FsOutputStore> {
    // @method: Create a controller talking to the configured endpoint and writing to disk
    pub fn with_config(config: &Config, reporter: &'a dyn Reporter) -> Self {
        Self::new(Ollama::from_url(config.llm_engine_url.clone()), FsOutputStore, reporter)
    }
}

impl<'a, P: Provider, S: OutputStore> Controller<'a, P, S> {
    pub fn new(provider: P, store: S, reporter: &'a dyn Reporter) -> Self {
        Self {
            client: TranslationClient::new(provider),
            store,
            reporter,
            inference_calls: AtomicUsize::new(0),
        }
    }

    /// The output store, mostly for inspection after a run
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Translate every `.json` file in `data_folder` into `result_folder`.
    ///
    /// Only a failure to list the data folder is an error; everything that
    /// goes wrong for an individual file is reported and the run moves on.
    pub async fn run(
        &self,
        data_folder: &Path,
        result_folder: &Path,
        profile: &ModelProfile,
    ) -> Result<RunSummary> {
        let files = FileManager::find_json_files(data_folder)?;
        let calls_before = self.inference_calls.load(Ordering::Relaxed);

        if files.is_empty() {
            self.reporter.report(&PipelineEvent::NoInputFiles {
                data_folder: data_folder.to_path_buf(),
            });
        } else {
            self.reporter.report(&PipelineEvent::RunStarted {
                data_folder: data_folder.to_path_buf(),
                file_count: files.len(),
            });
        }

        let mut summary = RunSummary::default();
        for input in &files {
            let outcome = self.process_file(input, result_folder, profile).await;
            summary.record(&outcome);
        }
        summary.inference_calls = self.inference_calls.load(Ordering::Relaxed) - calls_before;

        self.reporter.report(&PipelineEvent::RunFinished {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    /// Translate one input file, honouring an existing output as "done"
    pub async fn process_file(
        &self,
        input: &Path,
        result_folder: &Path,
        profile: &ModelProfile,
    ) -> FileOutcome {
        let output = FileManager::generate_output_path(input, result_folder, &profile.file_suffix);
        let outcome = self.translate_file(input, &output, profile).await;

        if !matches!(outcome, FileOutcome::Skipped | FileOutcome::NoText) {
            self.reporter.report(&PipelineEvent::FileFinished {
                input: input.to_path_buf(),
                outcome: outcome.clone(),
            });
        }
        outcome
    }

    async fn translate_file(&self, input: &Path, output: &Path, profile: &ModelProfile) -> FileOutcome {
        if self.store.exists(output) {
            self.reporter.report(&PipelineEvent::FileSkipped {
                input: input.to_path_buf(),
            });
            return FileOutcome::Skipped;
        }

        self.reporter.report(&PipelineEvent::FileStarted {
            input: input.to_path_buf(),
        });

        let segments = extract_text_from_file(input, self.reporter);
        if segments.is_empty() {
            self.reporter.report(&PipelineEvent::NoText {
                input: input.to_path_buf(),
            });
            return FileOutcome::NoText;
        }
        self.reporter.report(&PipelineEvent::SegmentsExtracted {
            count: segments.len(),
        });

        // The empty output marks the file as taken before any page lands
        if let Err(e) = self.store.create_empty(output) {
            self.report_store_failure(output, &e);
            return FileOutcome::Aborted {
                failed_page: 0,
                pages_written: 0,
            };
        }

        let total = segments.len();
        let mut pages_written = 0;
        let mut pages_empty = 0;

        for (index, segment) in segments.iter().enumerate() {
            let page = index + 1;
            self.reporter.report(&PipelineEvent::PageStarted { page, total });
            self.inference_calls.fetch_add(1, Ordering::Relaxed);

            match self.client.translate_segment(segment, profile, self.reporter).await {
                Some(translation) if !translation.is_empty() => {
                    if let Err(e) = self.store.append(output, &format_page(page, &translation)) {
                        self.report_store_failure(output, &e);
                        return FileOutcome::Aborted {
                            failed_page: page,
                            pages_written,
                        };
                    }
                    pages_written += 1;
                    self.reporter.report(&PipelineEvent::PageTranslated { page });
                }
                Some(_) => {
                    pages_empty += 1;
                    self.reporter.report(&PipelineEvent::PageEmpty { page });
                }
                None => {
                    return FileOutcome::Aborted {
                        failed_page: page,
                        pages_written,
                    };
                }
            }
        }

        FileOutcome::Completed {
            pages_written,
            pages_empty,
        }
    }

    fn report_store_failure(&self, output: &Path, error: &dyn std::fmt::Display) {
        self.reporter.report(&PipelineEvent::StoreFailed {
            output: PathBuf::from(output),
            message: error.to_string(),
        });
    }
}
