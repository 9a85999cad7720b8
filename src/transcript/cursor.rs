use crate::{
    foundation::error::{SublineError, SublineResult},
    transcript::model::{Transcript, WordTiming},
};

/// Word-window policy applied when querying active words.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActivePolicy {
    /// Seconds a finished word stays visible after its end while no other
    /// word is active. `0.0` disables the grace window, leaving blank frames
    /// in the gaps between words.
    pub grace_sec: f64,
    /// Size of the rolling caption line: the window extends backward over the
    /// most recent started words, up to this many. `1` shows only the
    /// current word.
    pub phrase_words: usize,
}

impl Default for ActivePolicy {
    fn default() -> Self {
        Self {
            grace_sec: 0.0,
            phrase_words: 1,
        }
    }
}

impl ActivePolicy {
    /// Strict `[start, end)` containment: no grace, single word.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Single word with a grace window after each word's end.
    pub fn with_grace(grace_sec: f64) -> Self {
        Self {
            grace_sec,
            phrase_words: 1,
        }
    }

    /// Rolling caption line of up to `phrase_words` recent words, with grace.
    pub fn rolling(phrase_words: usize, grace_sec: f64) -> Self {
        Self {
            grace_sec,
            phrase_words,
        }
    }

    /// Validate policy invariants.
    pub fn validate(&self) -> SublineResult<()> {
        if !self.grace_sec.is_finite() || self.grace_sec < 0.0 {
            return Err(SublineError::validation(
                "active policy grace_sec must be finite and >= 0",
            ));
        }
        if self.phrase_words == 0 {
            return Err(SublineError::validation(
                "active policy phrase_words must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Shared window computation: `started` is the count of words whose start is
/// `<= t_sec`. Returns the index range of words to draw.
pub(crate) fn window_bounds(
    words: &[WordTiming],
    started: usize,
    t_sec: f64,
    policy: &ActivePolicy,
) -> std::ops::Range<usize> {
    if started == 0 {
        return 0..0;
    }

    // The most recent started word decides visibility. Intervals are
    // disjoint, so if it has ended nothing else is active and only the grace
    // window can keep it on screen.
    let last = &words[started - 1];
    let visible =
        t_sec < last.end_sec || (policy.grace_sec > 0.0 && t_sec < last.end_sec + policy.grace_sec);
    if !visible {
        return 0..0;
    }

    let lo = started.saturating_sub(policy.phrase_words.max(1));
    lo..started
}

/// Monotonically advancing active-word lookup.
///
/// Render loops query frames in non-decreasing timestamp order, so the cursor
/// advances its position in a single pass over the transcript. An
/// out-of-order query falls back to binary search and resets the position;
/// results are identical either way.
#[derive(Clone, Debug)]
pub struct ActiveCursor {
    policy: ActivePolicy,
    started: usize,
    last_t: f64,
}

impl ActiveCursor {
    /// Construct a cursor with the given policy.
    pub fn new(policy: ActivePolicy) -> SublineResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            started: 0,
            last_t: f64::NEG_INFINITY,
        })
    }

    /// The policy this cursor applies.
    pub fn policy(&self) -> &ActivePolicy {
        &self.policy
    }

    /// Words to draw at `t_sec`, as a contiguous window of the transcript.
    pub fn active<'t>(&mut self, transcript: &'t Transcript, t_sec: f64) -> &'t [WordTiming] {
        let words = transcript.words();

        if t_sec < self.last_t || self.started > words.len() {
            self.started = words.partition_point(|w| w.start_sec <= t_sec);
        } else {
            while self.started < words.len() && words[self.started].start_sec <= t_sec {
                self.started += 1;
            }
        }
        self.last_t = t_sec;

        let range = window_bounds(words, self.started, t_sec, &self.policy);
        &words[range]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/cursor.rs"]
mod tests;
