use std::{borrow::Cow, collections::HashMap, sync::Arc};

use crate::{
    effects::importance::{ImportanceScorer, UniformImportance},
    effects::state::{AnimationState, animation_state},
    fonts::store::{FontStore, GlyphBrush, LoadedFont, TextLayoutEngine, measure_layout},
    foundation::core::{Rgba8, Transform2D, Vec2},
    foundation::error::{RenderWarning, SublineError, SublineResult},
    render::composite::premul_over_in_place,
    render::frame::RenderFrame,
    style::resolve::{Anchor, StyleConfig},
    transcript::model::WordTiming,
};

/// Ring of unit offsets used to draw the stroke pass: the glyphs are filled
/// in the stroke color at `stroke_width_px` distance in eight directions,
/// then the fill pass lands on top.
const STROKE_RING: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
];

#[derive(Clone, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    size_bits: u32,
}

struct WordItem {
    layout: Arc<parley::Layout<GlyphBrush>>,
    width: f64,
    height: f64,
    state: AnimationState,
}

/// Per-worker caption compositor.
///
/// Owns the mutable shaping and raster contexts, so one instance lives per
/// render worker; everything shared between workers (transcript, style,
/// fonts, scorer) is read-only. The bound font is loaded eagerly in
/// [`Compositor::new`], so a missing font aborts the job before any frame is
/// produced.
pub struct Compositor {
    style: StyleConfig,
    font: Arc<LoadedFont>,
    font_data: vello_cpu::peniko::FontData,
    engine: TextLayoutEngine,
    scorer: Arc<dyn ImportanceScorer>,
    ctx: Option<vello_cpu::RenderContext>,
    overlay: Option<vello_cpu::Pixmap>,
    layouts: HashMap<LayoutKey, Arc<parley::Layout<GlyphBrush>>>,
    warnings: Vec<RenderWarning>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("style", &self.style)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Bind a style and importance scorer, resolving the style's font.
    pub fn new(
        style: StyleConfig,
        fonts: &FontStore,
        scorer: Arc<dyn ImportanceScorer>,
    ) -> SublineResult<Self> {
        style.validate()?;
        let font = fonts.load_family(&style.font_family)?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.font_bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            style,
            font,
            font_data,
            engine: TextLayoutEngine::new(),
            scorer,
            ctx: None,
            overlay: None,
            layouts: HashMap::new(),
            warnings: Vec::new(),
        })
    }

    /// [`Compositor::new`] with the no-shift [`UniformImportance`] scorer.
    pub fn with_default_scorer(style: StyleConfig, fonts: &FontStore) -> SublineResult<Self> {
        Self::new(style, fonts, Arc::new(UniformImportance))
    }

    /// The style this compositor renders with.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Drain warnings recorded since the last call.
    pub fn take_warnings(&mut self) -> Vec<RenderWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Draw the given active words onto `frame` in place.
    ///
    /// Returns the number of words drawn. Words that fail to shape are
    /// skipped with a [`RenderWarning::WordSkipped`]; the frame is still
    /// produced.
    #[tracing::instrument(skip_all, fields(t_sec = frame.t_sec, words = words.len()))]
    pub fn render(&mut self, frame: &mut RenderFrame, words: &[WordTiming]) -> SublineResult<usize> {
        if words.is_empty() {
            return Ok(0);
        }

        let width: u16 = frame
            .width
            .try_into()
            .map_err(|_| SublineError::validation("frame width exceeds u16 pixel limit"))?;
        let height: u16 = frame
            .height
            .try_into()
            .map_err(|_| SublineError::validation("frame height exceeds u16 pixel limit"))?;

        let items = self.shape_words(frame.t_sec, words);
        if items.is_empty() {
            return Ok(0);
        }

        let scaled: Vec<(f64, f64)> = items
            .iter()
            .map(|it| (it.width * it.state.scale, it.height * it.state.scale))
            .collect();
        let (line_w, line_h) = group_line_size(&scaled, self.style.word_spacing_px);
        let group_top = anchor_group_top(
            self.style.anchor,
            f64::from(frame.height),
            line_h,
            self.style.anchor_margin_frac,
        );
        let mut x = (f64::from(frame.width) - line_w) * 0.5;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for (item, &(sw, sh)) in items.iter().zip(&scaled) {
            let opacity = item.state.opacity;
            if opacity > 0.0 {
                let transform = Transform2D {
                    translate: Vec2::new(x, group_top + (line_h - sh) + item.state.dy_px),
                    scale: Vec2::new(item.state.scale, item.state.scale),
                    anchor: Vec2::ZERO,
                }
                .to_affine();

                if opacity < 1.0 {
                    ctx.push_opacity_layer(opacity as f32);
                }
                if self.style.stroke_width_px > 0.0 && self.style.stroke.a > 0 {
                    let r = f64::from(self.style.stroke_width_px);
                    for (dx, dy) in STROKE_RING {
                        let offset = kurbo::Affine::translate((dx * r, dy * r)) * transform;
                        draw_layout(&mut ctx, &self.font_data, &item.layout, self.style.stroke, offset);
                    }
                }
                let fill = item.state.color.unwrap_or(self.style.fill);
                draw_layout(&mut ctx, &self.font_data, &item.layout, fill, transform);
                if opacity < 1.0 {
                    ctx.pop_layer();
                }
            }
            x += sw + self.style.word_spacing_px;
        }

        ctx.flush();
        let mut overlay = match self.overlay.take() {
            Some(pm) if pm.width() == width && pm.height() == height => pm,
            _ => vello_cpu::Pixmap::new(width, height),
        };
        overlay.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut overlay);

        premul_over_in_place(&mut frame.data, overlay.data_as_u8_slice())?;

        let drawn = items.len();
        self.ctx = Some(ctx);
        self.overlay = Some(overlay);
        Ok(drawn)
    }

    /// Shape every visible word at `t_sec`, computing its animation state and
    /// normalized extent. Shaping failures skip the word with a warning.
    fn shape_words(&mut self, t_sec: f64, words: &[WordTiming]) -> Vec<WordItem> {
        let mut items = Vec::with_capacity(words.len());
        for word in words {
            let char_count = word.text.chars().count();
            let state = animation_state(
                self.style.effect,
                &self.style.params,
                t_sec - word.start_sec,
                word.duration_sec(),
                char_count,
                self.scorer.score(&word.text),
            );

            let text: Cow<'_, str> = match state.visible_chars {
                Some(n) if n < char_count => Cow::Owned(word.text.chars().take(n).collect()),
                _ => Cow::Borrowed(word.text.as_str()),
            };
            if text.trim().is_empty() {
                continue;
            }

            let layout = match self.layout_for(&text) {
                Ok(layout) => layout,
                Err(e) => {
                    tracing::warn!(word = %word.text, error = %e, "skipping unshapeable word");
                    self.warnings.push(RenderWarning::WordSkipped {
                        word: word.text.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let (width, height) = measure_layout(&layout);
            items.push(WordItem {
                layout,
                width,
                height,
                state,
            });
        }
        items
    }

    fn layout_for(&mut self, text: &str) -> SublineResult<Arc<parley::Layout<GlyphBrush>>> {
        let key = LayoutKey {
            text: text.to_string(),
            size_bits: self.style.font_size_px.to_bits(),
        };
        if let Some(hit) = self.layouts.get(&key) {
            return Ok(hit.clone());
        }

        let brush = GlyphBrush {
            r: self.style.fill.r,
            g: self.style.fill.g,
            b: self.style.fill.b,
            a: self.style.fill.a,
        };
        let layout = Arc::new(self.engine.layout_word(
            text,
            &self.font,
            self.style.font_size_px,
            brush,
        )?);
        self.layouts.insert(key, layout.clone());
        Ok(layout)
    }
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<GlyphBrush>,
    color: Rgba8,
    transform: kurbo::Affine,
) {
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Total extent of a caption line: scaled word widths joined with fixed
/// spacing, height of the tallest word.
pub(crate) fn group_line_size(scaled: &[(f64, f64)], spacing_px: f64) -> (f64, f64) {
    let w: f64 = scaled.iter().map(|(w, _)| *w).sum::<f64>()
        + (scaled.len().saturating_sub(1) as f64) * spacing_px;
    let h = scaled.iter().map(|(_, h)| *h).fold(0.0, f64::max);
    (w, h)
}

/// Vertical position of the caption line's top edge for an anchor.
pub(crate) fn anchor_group_top(
    anchor: Anchor,
    frame_h: f64,
    line_h: f64,
    margin_frac: f64,
) -> f64 {
    match anchor {
        Anchor::BottomCenter => frame_h * (1.0 - margin_frac) - line_h,
        Anchor::TopCenter => frame_h * margin_frac,
        Anchor::Center => (frame_h - line_h) * 0.5,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
