use crate::{
    effects::state::{EffectKind, EffectParams},
    foundation::core::Rgba8,
    foundation::error::{RenderWarning, SublineError, SublineResult},
};

/// Where the caption line is anchored on the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Line sits a margin above the bottom edge, horizontally centered.
    #[default]
    #[serde(alias = "bottom")]
    BottomCenter,
    /// Line sits a margin below the top edge, horizontally centered.
    #[serde(alias = "top")]
    TopCenter,
    /// Line is centered on the frame.
    Center,
}

/// Concrete rendering parameters for one caption render job.
///
/// Resolved once per job from a preset name, an effect name, and explicit
/// overrides; immutable afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleConfig {
    /// Font family to resolve through the [`crate::FontStore`].
    pub font_family: String,
    /// Glyph size in pixels.
    pub font_size_px: f32,
    /// Fill color.
    pub fill: Rgba8,
    /// Stroke (outline) color, drawn under the fill.
    pub stroke: Rgba8,
    /// Stroke radius in pixels; `0` disables the stroke pass.
    pub stroke_width_px: f32,
    /// Caption line anchor.
    pub anchor: Anchor,
    /// Distance between the anchored frame edge and the caption line, as a
    /// fraction of frame height. Ignored for [`Anchor::Center`].
    pub anchor_margin_frac: f64,
    /// Horizontal gap between words of a multi-word line, in pixels.
    pub word_spacing_px: f64,
    /// Animation effect applied per word.
    pub effect: EffectKind,
    /// Effect parameter knobs.
    pub params: EffectParams,
}

impl StyleConfig {
    /// Validate style invariants.
    pub fn validate(&self) -> SublineResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(SublineError::validation("style font_family must be non-empty"));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(SublineError::validation(
                "style font_size_px must be finite and > 0",
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px < 0.0 {
            return Err(SublineError::validation(
                "style stroke_width_px must be finite and >= 0",
            ));
        }
        if !self.anchor_margin_frac.is_finite() || !(0.0..1.0).contains(&self.anchor_margin_frac) {
            return Err(SublineError::validation(
                "style anchor_margin_frac must be in [0, 1)",
            ));
        }
        if !self.word_spacing_px.is_finite() || self.word_spacing_px < 0.0 {
            return Err(SublineError::validation(
                "style word_spacing_px must be finite and >= 0",
            ));
        }
        self.params.validate()
    }
}

/// Explicit parameter overrides; any set field takes precedence over the
/// preset and effect defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOverrides {
    /// Override the font family.
    pub font_family: Option<String>,
    /// Override the glyph size in pixels.
    pub font_size_px: Option<f32>,
    /// Override the fill color.
    pub fill: Option<Rgba8>,
    /// Override the stroke color.
    pub stroke: Option<Rgba8>,
    /// Override the stroke radius in pixels.
    pub stroke_width_px: Option<f32>,
    /// Override the caption anchor.
    pub anchor: Option<Anchor>,
    /// Override the anchor margin fraction.
    pub anchor_margin_frac: Option<f64>,
    /// Override the word spacing in pixels.
    pub word_spacing_px: Option<f64>,
    /// Replace the effect parameter knobs. Fields omitted from a JSON object
    /// keep their defaults.
    pub params: Option<EffectParams>,
}

impl StyleOverrides {
    /// Parse overrides from a JSON object, e.g.
    /// `{"font_size_px": 56, "anchor": "top_center"}`.
    ///
    /// `null` means no overrides. Unknown fields and malformed values are
    /// validation errors rather than silent fallbacks.
    pub fn from_json(value: &serde_json::Value) -> SublineResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        if !value.is_object() {
            return Err(SublineError::validation(
                "style overrides must be a JSON object",
            ));
        }
        let overrides: Self = serde_json::from_value(value.clone())
            .map_err(|e| SublineError::validation(format!("invalid style overrides: {e}")))?;
        Ok(overrides)
    }

    fn apply(&self, cfg: &mut StyleConfig) {
        if let Some(v) = &self.font_family {
            cfg.font_family = v.clone();
        }
        if let Some(v) = self.font_size_px {
            cfg.font_size_px = v;
        }
        if let Some(v) = self.fill {
            cfg.fill = v;
        }
        if let Some(v) = self.stroke {
            cfg.stroke = v;
        }
        if let Some(v) = self.stroke_width_px {
            cfg.stroke_width_px = v;
        }
        if let Some(v) = self.anchor {
            cfg.anchor = v;
        }
        if let Some(v) = self.anchor_margin_frac {
            cfg.anchor_margin_frac = v;
        }
        if let Some(v) = self.word_spacing_px {
            cfg.word_spacing_px = v;
        }
        if let Some(v) = self.params {
            cfg.params = v;
        }
    }
}

const DEFAULT_STYLE: &str = "modern_bold";
const STYLE_NAMES: &[&str] = &["tiktok", "modern_bold", "minimal", "news", "social"];

/// Names of the built-in style presets.
pub fn style_names() -> &'static [&'static str] {
    STYLE_NAMES
}

/// Name of the preset used when an unknown style is requested.
pub fn default_style_name() -> &'static str {
    DEFAULT_STYLE
}

/// Resolve a named style and effect, plus overrides, into a [`StyleConfig`].
///
/// Unknown style names fall back to [`default_style_name`] and unknown effect
/// names fall back to static text; both are reported as warnings, never
/// errors. Deterministic: identical inputs yield an identical config.
pub fn resolve_style(
    style_name: &str,
    effect_name: &str,
    overrides: &StyleOverrides,
) -> (StyleConfig, Vec<RenderWarning>) {
    let mut warnings = Vec::new();

    let canonical = style_name.trim().to_ascii_lowercase();
    let mut cfg = match preset(&canonical) {
        Some(cfg) => cfg,
        None => {
            tracing::warn!(style = %style_name, fallback = DEFAULT_STYLE, "unknown caption style");
            warnings.push(RenderWarning::UnknownStyle {
                requested: style_name.to_string(),
                fallback: DEFAULT_STYLE.to_string(),
            });
            default_style()
        }
    };

    cfg.effect = match EffectKind::parse(effect_name) {
        Some(effect) => effect,
        None => {
            tracing::warn!(effect = %effect_name, "unknown caption effect");
            warnings.push(RenderWarning::UnknownEffect {
                requested: effect_name.to_string(),
            });
            EffectKind::None
        }
    };

    overrides.apply(&mut cfg);
    (cfg, warnings)
}

fn default_style() -> StyleConfig {
    StyleConfig {
        font_family: "Impact".to_string(),
        font_size_px: 45.0,
        fill: Rgba8::rgb(255, 255, 255),
        stroke: Rgba8::new(255, 0, 0, 200),
        stroke_width_px: 3.0,
        anchor: Anchor::BottomCenter,
        anchor_margin_frac: 0.12,
        word_spacing_px: 12.0,
        effect: EffectKind::None,
        params: EffectParams::default(),
    }
}

fn preset(canonical: &str) -> Option<StyleConfig> {
    let base = default_style();
    match canonical {
        "tiktok" => Some(StyleConfig {
            font_family: "Arial Bold".to_string(),
            font_size_px: 40.0,
            stroke: Rgba8::new(0, 0, 0, 180),
            ..base
        }),
        "modern_bold" => Some(base),
        "minimal" => Some(StyleConfig {
            font_family: "Arial".to_string(),
            font_size_px: 35.0,
            stroke: Rgba8::new(0, 0, 0, 0),
            stroke_width_px: 0.0,
            ..base
        }),
        "news" => Some(StyleConfig {
            font_family: "Georgia".to_string(),
            font_size_px: 38.0,
            stroke: Rgba8::new(0, 0, 139, 230),
            stroke_width_px: 2.0,
            ..base
        }),
        "social" => Some(StyleConfig {
            font_family: "Arial Bold".to_string(),
            font_size_px: 42.0,
            stroke: Rgba8::new(50, 50, 50, 200),
            ..base
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
