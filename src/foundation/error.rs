/// Convenience result type used across Subline.
pub type SublineResult<T> = Result<T, SublineError>;

/// Top-level error taxonomy used by the caption engine APIs.
///
/// Every variant here is fatal for the operation that returned it; conditions
/// the engine can recover from are reported as [`RenderWarning`] instead.
#[derive(thiserror::Error, Debug)]
pub enum SublineError {
    /// Malformed word-timing data, rejected when the transcript is built.
    #[error("transcript error: {0}")]
    Transcript(String),

    /// Invalid configuration, style, or buffer geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font required by the render job could not be loaded.
    ///
    /// Fatal for the whole job: substituting a different face would produce
    /// visibly wrong output. The message names every path that was probed so
    /// the missing file can be installed.
    #[error(
        "font error: no usable font for family '{family}' on {platform} (tried {}); \
         install the font or point the FontStore at a directory containing it",
        fmt_attempted(.attempted)
    )]
    Font {
        /// Requested family name.
        family: String,
        /// Paths probed while resolving the family.
        attempted: Vec<std::path::PathBuf>,
        /// Operating system the lookup ran on.
        platform: &'static str,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SublineError {
    /// Build a [`SublineError::Transcript`] value.
    pub fn transcript(msg: impl Into<String>) -> Self {
        Self::Transcript(msg.into())
    }

    /// Build a [`SublineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

fn fmt_attempted(attempted: &[std::path::PathBuf]) -> String {
    if attempted.is_empty() {
        return "no candidate paths".to_string();
    }
    attempted
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Non-fatal conditions collected while resolving styles and rendering frames.
///
/// Warnings are recorded in the render-job summary and logged via `tracing`;
/// they never interrupt frame production.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderWarning {
    /// Requested style name is not a known preset; the default was used.
    #[error("unknown style '{requested}', falling back to '{fallback}'")]
    UnknownStyle {
        /// Style name as requested.
        requested: String,
        /// Preset that was used instead.
        fallback: String,
    },

    /// Requested effect name is not a known effect; static text was used.
    #[error("unknown effect '{requested}', rendering static text")]
    UnknownEffect {
        /// Effect name as requested.
        requested: String,
    },

    /// A word could not be shaped or measured and was skipped for the frame.
    #[error("word '{word}' skipped: {reason}")]
    WordSkipped {
        /// The word that failed to render.
        word: String,
        /// Why shaping or measurement failed.
        reason: String,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
