/// Pluggable per-word emphasis scoring for the color-shift effect.
///
/// Implementations must be cheap and deterministic; the score is recomputed
/// every frame a word is visible.
pub trait ImportanceScorer: Send + Sync {
    /// Emphasis weight for a word, in `[0, 1]`. `0` leaves the fill color
    /// unchanged; `1` blends fully to the emphasis color.
    fn score(&self, word: &str) -> f64;
}

/// Default scorer: every word is ordinary, no color shift.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformImportance;

impl ImportanceScorer for UniformImportance {
    fn score(&self, _word: &str) -> f64 {
        0.0
    }
}

/// Keyword-list scorer: emphasis keywords score `0.6`, strong keywords `1.0`.
///
/// Matching is case-insensitive on the trimmed word with surrounding
/// punctuation stripped, substring style ("importantly" matches "important").
#[derive(Clone, Debug)]
pub struct KeywordImportance {
    keywords: Vec<String>,
    strong_keywords: Vec<String>,
}

impl Default for KeywordImportance {
    fn default() -> Self {
        Self::new(
            ["important", "key", "critical", "essential", "significant", "major"],
            ["must", "vital", "crucial", "extremely"],
        )
    }
}

impl KeywordImportance {
    /// Construct with explicit keyword lists; entries are lowercased.
    pub fn new<I, J>(keywords: I, strong_keywords: J) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let lower = |it: &str| it.trim().to_ascii_lowercase();
        Self {
            keywords: keywords.into_iter().map(|k| lower(k.as_ref())).collect(),
            strong_keywords: strong_keywords
                .into_iter()
                .map(|k| lower(k.as_ref()))
                .collect(),
        }
    }
}

impl ImportanceScorer for KeywordImportance {
    fn score(&self, word: &str) -> f64 {
        let normalized = word
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_ascii_lowercase();
        if normalized.is_empty() {
            return 0.0;
        }
        if self.strong_keywords.iter().any(|k| normalized.contains(k.as_str())) {
            return 1.0;
        }
        if self.keywords.iter().any(|k| normalized.contains(k.as_str())) {
            return 0.6;
        }
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/importance.rs"]
mod tests;
