//! Drawing targets that mirror the stroke history.

use super::segment::StyledSegment;

/// A target the session draws onto: the on-screen display or the export raster.
///
/// Surfaces hold no history of their own. The session drives them segment by
/// segment during live drawing and rebuilds them with `reset` + replay on
/// undo/redo, so every surface stays a projection of the same stroke list.
pub trait Surface {
    /// Draws one segment on top of the current contents.
    fn draw_segment(&mut self, segment: &StyledSegment);

    /// Returns the surface to a blank canvas.
    fn reset(&mut self);
}

/// Display stand-in for hosts without a screen (headless replay, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw_segment(&mut self, _segment: &StyledSegment) {}

    fn reset(&mut self) {}
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn draw_segment(&mut self, segment: &StyledSegment) {
        (**self).draw_segment(segment);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
