/*!
 * Tests for prompt templates
 */

use doctrans::app_config::{ModelProfile, TranslationDirection};
use doctrans::translation::PromptTemplate;

#[test]
fn test_render_withToEnglish_shouldWrapTextWithInstructions() {
    let prompt = PromptTemplate::ToEnglish.render("German", "Guten Tag");

    assert!(prompt.starts_with("Translate the following German text into English."));
    assert!(prompt.contains("Do NOT summarize."));
    assert!(prompt.contains("Do NOT skip any details."));
    assert!(prompt.ends_with("Output ONLY the translated text:\n\nGuten Tag"));
}

#[test]
fn test_render_withToUrdu_shouldTargetUrdu() {
    let prompt = PromptTemplate::ToUrdu.render("German", "Guten Tag");

    assert!(prompt.starts_with("Translate the following German text into Urdu."));
    assert!(prompt.contains("Do NOT summarize."));
    assert!(!prompt.contains("Do NOT skip any details."));
    assert!(prompt.ends_with("Output ONLY the translated text:\n\nGuten Tag"));
}

#[test]
fn test_render_withPassthrough_shouldReturnTextUnchanged() {
    let text = "Guten Tag, {source_language}!";

    assert_eq!(PromptTemplate::Passthrough.render("German", text), text);
}

#[test]
fn test_render_withBracesInText_shouldNotSubstituteInsideText() {
    let prompt = PromptTemplate::ToEnglish.render("French", "literal {source_language}");

    assert!(prompt.starts_with("Translate the following French text"));
    assert!(prompt.ends_with("literal {source_language}"));
}

#[test]
fn test_forProfile_withDeclaredDirection_shouldIgnoreModelMarkers() {
    let profile = ModelProfile::new("Urdu", "GTE-named-model", "_ur")
        .with_direction(TranslationDirection::ToUrdu);

    assert_eq!(PromptTemplate::for_profile(&profile), PromptTemplate::ToUrdu);
}

#[test]
fn test_forProfile_withoutDirection_shouldUseLegacyMarkers() {
    let english = ModelProfile::new("English", "llama-GTE", "_en");
    let urdu = ModelProfile::new("Urdu", "llama-GTU", "_ur");
    let plain = ModelProfile::new("Plain", "llama3", "_x");

    assert_eq!(PromptTemplate::for_profile(&english), PromptTemplate::ToEnglish);
    assert_eq!(PromptTemplate::for_profile(&urdu), PromptTemplate::ToUrdu);
    assert_eq!(PromptTemplate::for_profile(&plain), PromptTemplate::Passthrough);
}
