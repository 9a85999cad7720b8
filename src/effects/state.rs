use crate::{animation::ease::Ease, foundation::core::Rgba8};

/// Closed set of per-word caption animation effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Static text, no animation.
    #[default]
    None,
    /// Fade in at word onset, fade out toward word end.
    Fade,
    /// Grow from `scale_min` to `scale_max` over the word's duration.
    Scale,
    /// Vertical sine-wave bobbing.
    Wave,
    /// Reveal the word one character at a time over its duration.
    Typewriter,
    /// Blend the fill color by per-word importance.
    ColorShift,
}

impl EffectKind {
    /// Parse a user-facing effect name; `None` for unknown names.
    ///
    /// The empty string and `"none"` are the static effect, not an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "static" => Some(Self::None),
            "fade" => Some(Self::Fade),
            "scale" | "pop" => Some(Self::Scale),
            "wave" => Some(Self::Wave),
            "typewriter" => Some(Self::Typewriter),
            "color_shift" | "colorshift" => Some(Self::ColorShift),
            _ => None,
        }
    }
}

/// Numeric knobs consumed by the effect functions.
///
/// One flat parameter set covers all effects; each effect reads only the
/// fields it names. Unspecified fields keep their defaults when deserialized
/// from a JSON override object.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Fade-in duration in seconds.
    pub fade_in_sec: f64,
    /// Fade-out duration in seconds, ending at the word's end.
    pub fade_out_sec: f64,
    /// Scale factor at word onset.
    pub scale_min: f64,
    /// Scale factor at word end.
    pub scale_max: f64,
    /// Easing curve shaping scale progress.
    pub scale_ease: Ease,
    /// Wave displacement amplitude in pixels.
    pub wave_amplitude_px: f64,
    /// Wave period in seconds (one full cycle).
    pub wave_period_sec: f64,
    /// Color-shift blend source (ordinary words).
    pub color_a: Rgba8,
    /// Color-shift blend target (emphasized words).
    pub color_b: Rgba8,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            fade_in_sec: 0.2,
            fade_out_sec: 0.1,
            scale_min: 0.8,
            scale_max: 1.5,
            scale_ease: Ease::InOutCubic,
            wave_amplitude_px: 10.0,
            wave_period_sec: 0.5,
            color_a: Rgba8::rgb(255, 255, 255),
            color_b: Rgba8::rgb(255, 255, 0),
        }
    }
}

impl EffectParams {
    /// Validate parameter invariants.
    pub fn validate(&self) -> crate::SublineResult<()> {
        for (name, v) in [
            ("fade_in_sec", self.fade_in_sec),
            ("fade_out_sec", self.fade_out_sec),
            ("wave_amplitude_px", self.wave_amplitude_px),
            ("wave_period_sec", self.wave_period_sec),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(crate::SublineError::validation(format!(
                    "effect param {name} must be finite and >= 0"
                )));
            }
        }
        if !self.scale_min.is_finite() || self.scale_min <= 0.0 {
            return Err(crate::SublineError::validation(
                "effect param scale_min must be finite and > 0",
            ));
        }
        if !self.scale_max.is_finite() || self.scale_max < self.scale_min {
            return Err(crate::SublineError::validation(
                "effect param scale_max must be finite and >= scale_min",
            ));
        }
        Ok(())
    }
}

/// Visual state of one word at one frame, derived fresh per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Glyph opacity in `[0, 1]`, multiplied into the fill and stroke alpha.
    pub opacity: f64,
    /// Uniform scale factor applied to the word box, `> 0`.
    pub scale: f64,
    /// Vertical draw offset in pixels (positive moves down).
    pub dy_px: f64,
    /// Effect-driven fill color; the style fill when `None`.
    pub color: Option<Rgba8>,
    /// Number of leading characters to draw; all when `None`.
    pub visible_chars: Option<usize>,
}

impl AnimationState {
    /// State of a word with no animation applied.
    pub fn neutral() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            dy_px: 0.0,
            color: None,
            visible_chars: None,
        }
    }
}

/// Compute the visual state of one word at one instant.
///
/// Pure function of elapsed time and duration: no side effects, no shared
/// state, safe to call concurrently for different words and frames.
///
/// `elapsed_sec` is clamped to `0` defensively (the active-word filter should
/// not hand out words that have not started) and progress saturates at `1`
/// past the word's end. A zero-duration word is treated as instantaneous:
/// full opacity, `scale_max`, every character visible.
pub fn animation_state(
    effect: EffectKind,
    params: &EffectParams,
    elapsed_sec: f64,
    dur_sec: f64,
    char_count: usize,
    importance: f64,
) -> AnimationState {
    let elapsed = elapsed_sec.max(0.0);
    let progress = if dur_sec <= 0.0 {
        1.0
    } else {
        (elapsed / dur_sec).clamp(0.0, 1.0)
    };

    let mut state = AnimationState::neutral();
    match effect {
        EffectKind::None => {}
        EffectKind::Fade => {
            if dur_sec <= 0.0 {
                // Instantaneous word: no ramp to fade along.
                state.opacity = 1.0;
            } else {
                let fade_in = if params.fade_in_sec <= 0.0 {
                    1.0
                } else {
                    (elapsed / params.fade_in_sec).clamp(0.0, 1.0)
                };
                let fade_out = if params.fade_out_sec <= 0.0 {
                    1.0
                } else {
                    ((dur_sec - elapsed) / params.fade_out_sec).clamp(0.0, 1.0)
                };
                state.opacity = fade_in.min(fade_out);
            }
        }
        EffectKind::Scale => {
            let eased = params.scale_ease.apply(progress);
            state.scale = params.scale_min + (params.scale_max - params.scale_min) * eased;
        }
        EffectKind::Wave => {
            if params.wave_period_sec > 0.0 {
                state.dy_px = params.wave_amplitude_px
                    * (std::f64::consts::TAU * elapsed / params.wave_period_sec).sin();
            }
        }
        EffectKind::Typewriter => {
            // Epsilon keeps exact fractions like 5 * 0.6 from flooring one
            // character short of the intended count.
            let visible = ((char_count as f64) * progress + 1e-9).floor() as usize;
            state.visible_chars = Some(visible.min(char_count));
        }
        EffectKind::ColorShift => {
            state.color = Some(params.color_a.lerp(params.color_b, importance.clamp(0.0, 1.0)));
        }
    }
    state
}

#[cfg(test)]
#[path = "../../tests/unit/effects/state.rs"]
mod tests;
