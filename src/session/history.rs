//! Stroke-granularity undo/redo stacks.

use crate::draw::Stroke;

/// Committed strokes plus the strokes undone since the last commit.
///
/// Linear undo: committing a stroke discards the redo stack, so there is never
/// more than one future to return to.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Strokes in draw order (first = bottom layer, last = top layer)
    done: Vec<Stroke>,
    /// Undone strokes; the last element is the next one to redo
    undone: Vec<Stroke>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stroke and clears the redo stack. Empty strokes are dropped.
    pub fn commit(&mut self, stroke: Stroke) -> bool {
        if stroke.is_empty() {
            return false;
        }
        self.done.push(stroke);
        self.undone.clear();
        true
    }

    /// Moves the newest stroke to the redo stack.
    pub fn undo(&mut self) -> bool {
        match self.done.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Moves the most recently undone stroke back onto history.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                self.done.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.done
    }

    pub fn undone(&self) -> &[Stroke] {
        &self.undone
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }
}
