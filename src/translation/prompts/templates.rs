/*!
 * Prompt templates for page translation.
 *
 * Each translation direction has one fixed template. The templates insist
 * on a complete translation because local models tend to summarize long
 * pages.
 */

use crate::app_config::{ModelProfile, TranslationDirection};

/// Prompt template for one translation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Instructed translation into English
    ToEnglish,
    /// Instructed translation into Urdu
    ToUrdu,
    /// The page text is sent unchanged
    Passthrough,
}

impl PromptTemplate {
    pub const TO_ENGLISH: &'static str = "Translate the following {source_language} text into English. \
Provide a complete, accurate translation. \
Do NOT summarize. \
Do NOT skip any details. \
Output ONLY the translated text:\n\n{text}";

    pub const TO_URDU: &'static str = "Translate the following {source_language} text into Urdu. \
Provide a complete, accurate translation. \
Do NOT summarize. \
Output ONLY the translated text:\n\n{text}";

    /// Template for a translation direction
    pub fn for_direction(direction: TranslationDirection) -> Self {
        match direction {
            TranslationDirection::ToEnglish => Self::ToEnglish,
            TranslationDirection::ToUrdu => Self::ToUrdu,
            TranslationDirection::Passthrough => Self::Passthrough,
        }
    }

    /// Template for a model profile's effective direction
    pub fn for_profile(profile: &ModelProfile) -> Self {
        Self::for_direction(profile.direction())
    }

    /// Render the prompt for one page of text.
    pub fn render(&self, source_language: &str, text: &str) -> String {
        let template = match self {
            Self::ToEnglish => Self::TO_ENGLISH,
            Self::ToUrdu => Self::TO_URDU,
            Self::Passthrough => return text.to_string(),
        };

        // Text goes in last so braces inside the page are left alone
        template
            .replace("{source_language}", source_language)
            .replace("{text}", text)
    }
}
