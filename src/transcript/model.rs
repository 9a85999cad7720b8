use crate::{
    foundation::error::{SublineError, SublineResult},
    transcript::cursor::{ActivePolicy, window_bounds},
};

/// A single spoken word with its `[start, end)` interval in seconds.
///
/// Deserializes directly from word-level speech-to-text output of the shape
/// `{"word": "...", "start": 0.0, "end": 0.5}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordTiming {
    /// Word text as spoken.
    #[serde(alias = "word")]
    pub text: String,
    /// Onset time in seconds from the start of the video.
    #[serde(alias = "start")]
    pub start_sec: f64,
    /// End time in seconds; exclusive.
    #[serde(alias = "end")]
    pub end_sec: f64,
}

impl WordTiming {
    /// Construct a word timing entry.
    pub fn new(text: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            text: text.into(),
            start_sec,
            end_sec,
        }
    }

    /// Spoken duration in seconds. Zero for instantaneous words produced by
    /// overlap clamping.
    pub fn duration_sec(&self) -> f64 {
        (self.end_sec - self.start_sec).max(0.0)
    }

    /// Whether `t_sec` falls inside the half-open `[start, end)` interval.
    pub fn contains(&self, t_sec: f64) -> bool {
        self.start_sec <= t_sec && t_sec < self.end_sec
    }
}

/// Validated, ordered word-timing sequence for one video.
///
/// Invariants, enforced at construction:
///
/// - every entry has finite times, `start >= 0`, non-empty text
/// - `end > start` per entry (`end == start` only via [`Transcript::new_clamped`])
/// - starts are non-decreasing and intervals do not overlap:
///   `word[i].end <= word[i + 1].start`
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<WordTiming>", into = "Vec<WordTiming>")]
pub struct Transcript {
    words: Vec<WordTiming>,
}

impl Transcript {
    /// Build a transcript, rejecting any invariant violation with
    /// [`SublineError::Transcript`].
    pub fn new(words: Vec<WordTiming>) -> SublineResult<Self> {
        validate_words(&words, false)?;
        Ok(Self { words })
    }

    /// Build a transcript, clamping overlapping entries instead of rejecting.
    ///
    /// Where `word[i].end` runs past `word[i + 1].start`, the end is clamped
    /// down to that start (possibly leaving a zero-duration word). Ordering
    /// violations and malformed entries are still rejected.
    pub fn new_clamped(mut words: Vec<WordTiming>) -> SublineResult<Self> {
        validate_words(&words, true)?;
        for i in 1..words.len() {
            let limit = words[i].start_sec;
            let prev = &mut words[i - 1];
            if prev.end_sec > limit {
                prev.end_sec = limit.max(prev.start_sec);
            }
        }
        Ok(Self { words })
    }

    /// Ordered word timings.
    pub fn words(&self) -> &[WordTiming] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the transcript holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// End time of the last word, or `0.0` for an empty transcript.
    pub fn end_sec(&self) -> f64 {
        self.words.last().map(|w| w.end_sec).unwrap_or(0.0)
    }

    /// Words to draw at `t_sec` under `policy`, as a contiguous window.
    ///
    /// With the default policy this is exactly the words whose `[start, end)`
    /// interval contains `t_sec` (at most one, given the no-overlap
    /// invariant). A grace window keeps the most recently ended word visible
    /// for `grace_sec` after its end while nothing else is active; a rolling
    /// phrase policy extends the window backward over recent words. This is
    /// the stateless entry point; [`crate::ActiveCursor`] provides the
    /// cheaper monotonic lookup for in-order frame queries.
    pub fn active_words_at(&self, t_sec: f64, policy: &ActivePolicy) -> &[WordTiming] {
        let started = self.words.partition_point(|w| w.start_sec <= t_sec);
        let range = window_bounds(&self.words, started, t_sec, policy);
        &self.words[range]
    }
}

impl TryFrom<Vec<WordTiming>> for Transcript {
    type Error = SublineError;

    fn try_from(words: Vec<WordTiming>) -> SublineResult<Self> {
        Self::new(words)
    }
}

impl From<Transcript> for Vec<WordTiming> {
    fn from(t: Transcript) -> Self {
        t.words
    }
}

fn validate_words(words: &[WordTiming], allow_overlap: bool) -> SublineResult<()> {
    for (i, w) in words.iter().enumerate() {
        if w.text.trim().is_empty() {
            return Err(SublineError::transcript(format!(
                "word {i} has empty text"
            )));
        }
        if !w.start_sec.is_finite() || !w.end_sec.is_finite() {
            return Err(SublineError::transcript(format!(
                "word {i} ('{}') has non-finite timing",
                w.text
            )));
        }
        if w.start_sec < 0.0 {
            return Err(SublineError::transcript(format!(
                "word {i} ('{}') starts before 0s",
                w.text
            )));
        }
        if w.end_sec <= w.start_sec {
            return Err(SublineError::transcript(format!(
                "word {i} ('{}') has end <= start ({} <= {})",
                w.text, w.end_sec, w.start_sec
            )));
        }
    }

    for (i, pair) in words.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        if b.start_sec < a.start_sec {
            return Err(SublineError::transcript(format!(
                "word {} ('{}') starts before its predecessor",
                i + 1,
                b.text
            )));
        }
        if !allow_overlap && a.end_sec > b.start_sec {
            return Err(SublineError::transcript(format!(
                "word {i} ('{}') overlaps '{}' ({} > {})",
                a.text, b.text, a.end_sec, b.start_sec
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/model.rs"]
mod tests;
