//! The drawing session: live strokes, history replay, and export.

use super::brush::{BrushMode, BrushState};
use super::history::History;
use crate::draw::{
    Color, NullSurface, Point, RasterImage, Stroke, StyledSegment, Surface, WHITE,
};
use crate::export::{self, ExportError, ExportOptions};
use crate::util;
use std::path::{Path, PathBuf};

/// Fixed canvas geometry and background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    /// Blank-canvas color; erase mode paints with it
    pub background: Color,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: WHITE,
        }
    }
}

/// Stroke being dragged: the segments so far plus where the pointer last was.
#[derive(Debug)]
struct ActiveStroke {
    stroke: Stroke,
    last: Point,
}

/// All mutable whiteboard state, owned by the host UI.
///
/// The committed stroke [`History`] is the single source of truth. The display
/// surface `D` and the export [`RasterImage`] are both projections of it: live
/// segments go to both as they arrive, and undo/redo rebuild both by replay.
pub struct DrawingSession<D: Surface = NullSurface> {
    canvas: CanvasSettings,
    brush: BrushState,
    history: History,
    active: Option<ActiveStroke>,
    image: RasterImage,
    display: D,
    export_options: ExportOptions,
}

impl DrawingSession<NullSurface> {
    /// Creates a session without a display (headless replay, tests).
    pub fn new(canvas: CanvasSettings, brush: BrushState) -> Result<Self, cairo::Error> {
        Self::with_display(canvas, brush, NullSurface)
    }
}

impl<D: Surface> DrawingSession<D> {
    /// Creates a session drawing onto `display` and a blank export raster.
    ///
    /// # Errors
    /// Returns an error if the export raster cannot be allocated.
    pub fn with_display(
        canvas: CanvasSettings,
        brush: BrushState,
        mut display: D,
    ) -> Result<Self, cairo::Error> {
        let image = RasterImage::new(canvas.width, canvas.height, canvas.background)?;
        display.reset();
        log::debug!(
            "Created {}x{} drawing session (background {})",
            canvas.width,
            canvas.height,
            canvas.background.to_hex()
        );
        Ok(Self {
            canvas,
            brush,
            history: History::new(),
            active: None,
            image,
            display,
            export_options: ExportOptions::default(),
        })
    }

    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Begins a stroke at `point`. An unfinished stroke is ended first.
    pub fn start(&mut self, point: Point) {
        if self.active.is_some() {
            log::debug!("Stroke started while another was active; ending previous stroke");
            self.end();
        }
        self.active = Some(ActiveStroke {
            stroke: Stroke::new(),
            last: point,
        });
    }

    /// Draws a segment from the last pointer position to `point`.
    ///
    /// Uses the brush as it is right now, so color or width changes made during a
    /// drag apply from the next segment on. Returns `false` when no stroke is active.
    pub fn extend(&mut self, point: Point) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let segment = StyledSegment::new(active.last, point, self.brush.color(), self.brush.width());
        self.display.draw_segment(&segment);
        self.image.draw_segment(&segment);
        active.stroke.push(segment);
        active.last = point;
        true
    }

    /// Finishes the active stroke. Returns `true` if it was committed to history.
    ///
    /// A stroke with no segments (press and release without a drag) is discarded.
    pub fn end(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        let segments = active.stroke.len();
        if self.history.commit(active.stroke) {
            log::debug!(
                "Committed stroke with {} segment(s); history depth {}",
                segments,
                self.history.len()
            );
            true
        } else {
            false
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer position the next segment will start from, if a stroke is active.
    pub fn last_point(&self) -> Option<Point> {
        self.active.as_ref().map(|active| active.last)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Removes the newest stroke and repaints. No-op on empty history.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.redraw();
        log::debug!(
            "Undo: {} stroke(s) remain, {} redoable",
            self.history.len(),
            self.history.redo_len()
        );
        true
    }

    /// Restores the most recently undone stroke and repaints. No-op when nothing was undone.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.redraw();
        log::debug!(
            "Redo: {} stroke(s), {} redoable",
            self.history.len(),
            self.history.redo_len()
        );
        true
    }

    /// Blanks both surfaces and forgets all history, including redo.
    pub fn clear(&mut self) {
        self.active = None;
        self.history.clear();
        self.image.reset();
        self.display.reset();
        log::info!("Canvas cleared");
    }

    /// Resets both surfaces and replays every committed stroke in order, then
    /// the segments of the stroke still being dragged.
    ///
    /// The raster keeps no per-stroke layers, so removing a stroke is only
    /// possible by repainting everything underneath it.
    pub fn redraw(&mut self) {
        self.image.reset();
        self.display.reset();
        let committed = self.history.strokes().iter().flat_map(Stroke::segments);
        let in_progress = self.active.iter().flat_map(|active| active.stroke.segments());
        for segment in committed.chain(in_progress) {
            self.image.draw_segment(segment);
            self.display.draw_segment(segment);
        }
    }

    // ------------------------------------------------------------------
    // Brush
    // ------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: BrushMode) {
        let previous = self.brush.mode();
        self.brush.set_mode(mode, self.canvas.background);
        if previous != mode {
            log::info!("Switched from {:?} to {:?} mode", previous, mode);
        }
    }

    /// Chooses a brush color; leaves erase mode if it was active.
    pub fn set_color(&mut self, color: Color) {
        self.brush.set_color(color);
        log::debug!(
            "Brush color set to {} ({})",
            util::color_to_name(&color),
            color.to_hex()
        );
    }

    /// Sets the width used from the next segment on.
    pub fn set_brush_width(&mut self, width: f64) -> bool {
        let applied = self.brush.set_width(width);
        if applied {
            log::debug!("Brush width set to {:.1}px", width);
        }
        applied
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Writes the export raster to `path`, choosing the format from its extension.
    ///
    /// Failure leaves the session untouched.
    pub fn export(&mut self, path: &Path) -> Result<PathBuf, ExportError> {
        export::save_image(&mut self.image, path, &self.export_options)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Committed strokes in draw order.
    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    pub fn canvas(&self) -> &CanvasSettings {
        &self.canvas
    }

    pub fn background(&self) -> Color {
        self.canvas.background
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RasterImage {
        &mut self.image
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
