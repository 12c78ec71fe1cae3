/*!
 * Per-page translation client.
 *
 * Wraps a [`Provider`], renders the prompt for the selected model profile
 * and sanitizes what comes back. Errors never leave this type: they are
 * reported and turned into `None`, the failure signal the driver aborts on.
 */

use crate::app_config::ModelProfile;
use crate::providers::Provider;
use crate::reporter::{PipelineEvent, Reporter};
use crate::sanitizer::sanitize;
use crate::translation::prompts::PromptTemplate;

/// Translates single pages through an inference provider
#[derive(Debug)]
pub struct TranslationClient<P: Provider> {
    provider: P,
}

impl<P: Provider> TranslationClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Build the prompt sent for `text` under `profile`
    pub fn build_prompt(text: &str, profile: &ModelProfile) -> String {
        PromptTemplate::for_profile(profile).render(&profile.source_language, text)
    }

    /// Translate one page.
    ///
    /// Returns `Some` with the sanitized text (which may be empty) on success,
    /// `None` if the request failed in any way.
    pub async fn translate_segment(
        &self,
        text: &str,
        profile: &ModelProfile,
        reporter: &dyn Reporter,
    ) -> Option<String> {
        let prompt = Self::build_prompt(text, profile);
        let request = self.provider.build_request(&profile.base_model, &prompt);

        match self.provider.complete(request).await {
            Ok(response) => Some(sanitize(Some(&P::extract_text(&response)))),
            Err(e) => {
                reporter.report(&PipelineEvent::TranslationFailed {
                    message: e.to_string(),
                });
                None
            }
        }
    }
}
