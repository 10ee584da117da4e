//! Cairo-based rendering functions for stroke segments.

use super::color::Color;
use super::segment::{Stroke, StyledSegment};

/// Fills the whole target with the canvas background color.
///
/// Uses the `Source` operator so the fill replaces whatever was drawn before,
/// which is how a surface is reset to blank before a replay.
pub fn render_background(ctx: &cairo::Context, background: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let _ = ctx.paint(); // A failed paint leaves the previous pixels; nothing to recover
    let _ = ctx.restore();
}

/// Renders a single styled segment.
///
/// Round caps and joins keep consecutive segments of a drag visually continuous,
/// even when the width changes between them.
pub fn render_segment(ctx: &cairo::Context, segment: &StyledSegment) {
    let color = segment.color;
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(segment.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(segment.x1 as f64, segment.y1 as f64);
    ctx.line_to(segment.x2 as f64, segment.y2 as f64);
    let _ = ctx.stroke();
}

/// Renders segments in order (first = bottom layer).
pub fn render_segments<'a>(
    ctx: &cairo::Context,
    segments: impl IntoIterator<Item = &'a StyledSegment>,
) {
    for segment in segments {
        render_segment(ctx, segment);
    }
}

/// Renders every stroke onto a blank background: the canvas as a fold over history.
pub fn render_strokes(ctx: &cairo::Context, background: Color, strokes: &[Stroke]) {
    render_background(ctx, background);
    render_segments(ctx, strokes.iter().flat_map(Stroke::segments));
}
