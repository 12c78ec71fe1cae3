/*!
 * Cleanup of model output.
 *
 * Local models like to wrap a translation in chatter ("Here is the
 * translation:", "Please let me know..."). The sanitizer strips the known
 * phrases from the start and end of lines.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Preambles, applied in order.
///
/// Each pattern is applied once per call, so a repeated label such as
/// "Translation: Translation: X" only loses its first layer.
const PREFIX_PATTERNS: [&str; 5] = [
    r"^Here is the.*?translation.*?:",
    r"^Sure, here is.*?:",
    r"^Here is the word-for-word.*?:",
    r"^Translation:",
    r"^Here's the translation.*?",
];

/// Postambles, applied in order after the preambles. Each removes the rest of its line.
const SUFFIX_PATTERNS: [&str; 3] = [
    r"^Note: The translation is word-for-word.*",
    r"^Note: I have.*",
    r"^Please let me know.*",
];

static PREFIX_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(&PREFIX_PATTERNS));
static SUFFIX_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(&SUFFIX_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(&format!("(?im){}", pattern)).ok())
        .collect()
}

/// Strip boilerplate preambles and postambles from a model response.
///
/// Absent or empty input gives an empty string.
pub fn sanitize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    PREFIX_RES
        .iter()
        .chain(SUFFIX_RES.iter())
        .fold(text.trim().to_string(), |cleaned, re| {
            re.replace_all(&cleaned, "").trim().to_string()
        })
}
