use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    effects::importance::ImportanceScorer,
    fonts::store::FontStore,
    foundation::error::{RenderWarning, SublineError, SublineResult},
    render::compositor::Compositor,
    render::frame::RenderFrame,
    style::resolve::StyleConfig,
    transcript::cursor::{ActiveCursor, ActivePolicy},
    transcript::model::Transcript,
};

/// Threading configuration for batch rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render frames across a rayon pool instead of sequentially.
    pub parallel: bool,
    /// Worker count; `None` uses the rayon default.
    pub threads: Option<usize>,
}

/// Outcome of a render job: counters plus every non-fatal warning collected
/// along the way. Warnings never interrupt frame production; fatal errors
/// abort before any frame is touched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSummary {
    /// Frames processed.
    pub frames_total: u64,
    /// Frames that received at least one word.
    pub frames_captioned: u64,
    /// Total words drawn across all frames.
    pub words_drawn: u64,
    /// Non-fatal warnings, in frame order.
    pub warnings: Vec<RenderWarning>,
}

/// Composite the active caption words onto a single frame.
///
/// This is the per-frame entry point for callers that drive their own encode
/// loop: hand each decoded frame through and pass it onward to the muxer.
/// Returns the number of words drawn.
pub fn render_frame(
    frame: &mut RenderFrame,
    transcript: &Transcript,
    cursor: &mut ActiveCursor,
    compositor: &mut Compositor,
) -> SublineResult<usize> {
    let words = cursor.active(transcript, frame.t_sec);
    compositor.render(frame, words)
}

/// Composite captions onto a batch of frames.
///
/// Sequential by default; with [`RenderThreading::parallel`] the batch is
/// rendered across a rayon pool with one [`Compositor`] per worker. Frames
/// share no mutable state, so parallel and sequential output are identical.
#[tracing::instrument(skip_all, fields(frames = frames.len(), parallel = threading.parallel))]
pub fn render_frames(
    frames: &mut [RenderFrame],
    transcript: &Transcript,
    policy: ActivePolicy,
    style: &StyleConfig,
    fonts: &FontStore,
    scorer: Arc<dyn ImportanceScorer>,
    threading: &RenderThreading,
) -> SublineResult<RenderSummary> {
    policy.validate()?;

    // Fatal setup errors (bad style, missing font) must surface before any
    // frame is produced; this compositor doubles as the sequential worker.
    let mut compositor = Compositor::new(style.clone(), fonts, scorer.clone())?;

    let mut summary = RenderSummary::default();

    if !threading.parallel {
        let mut cursor = ActiveCursor::new(policy)?;
        for frame in frames.iter_mut() {
            let drawn = render_frame(frame, transcript, &mut cursor, &mut compositor)? as u64;
            summary.frames_total += 1;
            summary.frames_captioned += u64::from(drawn > 0);
            summary.words_drawn += drawn;
            summary.warnings.append(&mut compositor.take_warnings());
        }
        return Ok(summary);
    }

    let pool = build_thread_pool(threading.threads)?;
    let results = pool.install(|| {
        frames
            .par_iter_mut()
            .map_init(
                || Compositor::new(style.clone(), fonts, scorer.clone()).ok(),
                |slot, frame| -> SublineResult<(u64, Vec<RenderWarning>)> {
                    let Some(worker) = slot.as_mut() else {
                        // The probe compositor above already succeeded, so a
                        // worker failing to build means the environment
                        // changed mid-job.
                        return Err(SublineError::validation(
                            "failed to construct worker compositor",
                        ));
                    };
                    let words = transcript.active_words_at(frame.t_sec, &policy);
                    let drawn = worker.render(frame, words)? as u64;
                    Ok((drawn, worker.take_warnings()))
                },
            )
            .collect::<Vec<_>>()
    });

    for result in results {
        let (drawn, mut warnings) = result?;
        summary.frames_total += 1;
        summary.frames_captioned += u64::from(drawn > 0);
        summary.words_drawn += drawn;
        summary.warnings.append(&mut warnings);
    }
    Ok(summary)
}

fn build_thread_pool(threads: Option<usize>) -> SublineResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SublineError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SublineError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
