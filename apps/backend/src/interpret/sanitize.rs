use lazy_regex::{lazy_regex, Lazy, Regex};
use regex::RegexBuilder;
use tracing::warn;

use super::templates::orientation_tokens;

static EMPTY_PARENS: Lazy<Regex> = lazy_regex!(r"[(（]\s*[)）]");
static MULTI_SPACE: Lazy<Regex> = lazy_regex!(r"[ \t]{2,}");
static SPACE_BEFORE_PUNCT: Lazy<Regex> = lazy_regex!(r"[ \t]+([,.!?;:，。！？；：])");

/// Strips card names and orientation words from generated prose.
///
/// Matching is case-insensitive. Latin tokens only match whole words so
/// "reversed" does not eat into "irreversed". Leftover empty brackets and
/// doubled spaces are collapsed. The pattern is compiled once per card set.
pub struct Sanitizer {
    pattern: Option<Regex>,
}

impl Sanitizer {
    pub fn new(card_names: &[&str]) -> Self {
        let mut terms: Vec<String> = card_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(word_pattern)
            .collect();
        terms.extend(orientation_tokens().iter().map(|t| word_pattern(t)));
        // longest first so "正位置" wins over "正位"
        terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
        terms.dedup();

        let pattern = match RegexBuilder::new(&terms.join("|")).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "sanitizer pattern failed to compile; text passes through unchanged");
                None
            }
        };
        Self { pattern }
    }

    pub fn apply(&self, text: &str) -> String {
        let stripped = match &self.pattern {
            Some(re) => re.replace_all(text, ""),
            None => text.into(),
        };
        let stripped = EMPTY_PARENS.replace_all(&stripped, "");
        let stripped = SPACE_BEFORE_PUNCT.replace_all(&stripped, "$1");
        let stripped = MULTI_SPACE.replace_all(&stripped, " ");
        stripped.trim().to_string()
    }
}

/// One-shot form of [`Sanitizer::apply`].
pub fn sanitize(text: &str, card_names: &[&str]) -> String {
    Sanitizer::new(card_names).apply(text)
}

fn word_pattern(term: &str) -> String {
    let escaped = regex::escape(term);
    if !term.is_ascii() {
        return escaped;
    }
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let lead = if term.starts_with(is_word) { r"\b" } else { "" };
    let trail = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{lead}{escaped}{trail}")
}
