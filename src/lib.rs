//! Subline renders word-timed captions onto video frames.
//!
//! Given a transcript with per-word timestamps (the word-level output of a
//! speech-to-text step), Subline draws synchronized, styled, animated caption
//! overlays directly into RGBA8 pixel buffers. It owns timing, typography,
//! and compositing only; decoding, encoding, and transcription belong to the
//! surrounding video pipeline.
//!
//! # Pipeline overview
//!
//! 1. **Transcript**: validated, ordered word timings ([`Transcript`])
//! 2. **Style**: a named preset plus effect resolved into a concrete
//!    [`StyleConfig`] ([`resolve_style`])
//! 3. **Composite**: per output frame, the [`Compositor`] selects the active
//!    word window, derives each word's [`AnimationState`], and draws stroked,
//!    filled glyphs over the frame in place
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same transcript, style, and timestamp always
//!   produce identical pixels.
//! - **No IO during compositing**: fonts are loaded once up front in a
//!   [`FontStore`]; render calls never touch the filesystem.
//! - **Premultiplied RGBA8** end-to-end: overlays are rasterized and blended
//!   as premultiplied pixels (identical to straight alpha for the opaque
//!   frames a video decoder hands over).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod effects;
mod fonts;
mod foundation;
mod render;
mod style;
mod transcript;

pub use animation::ease::Ease;
pub use effects::importance::{ImportanceScorer, KeywordImportance, UniformImportance};
pub use effects::state::{AnimationState, EffectKind, EffectParams, animation_state};
pub use fonts::store::{FontStore, GlyphBrush, LoadedFont, TextLayoutEngine, measure_layout};
pub use foundation::core::{Rgba8, Transform2D};
pub use foundation::error::{RenderWarning, SublineError, SublineResult};
pub use render::composite::{PremulRgba8, over, over_in_place, premul_over_in_place};
pub use render::compositor::Compositor;
pub use render::frame::RenderFrame;
pub use render::pipeline::{RenderSummary, RenderThreading, render_frame, render_frames};
pub use style::resolve::{
    Anchor, StyleConfig, StyleOverrides, default_style_name, resolve_style, style_names,
};
pub use transcript::cursor::{ActiveCursor, ActivePolicy};
pub use transcript::model::{Transcript, WordTiming};
