use crate::stroke::Stroke;

/// Linear undo/redo over committed strokes
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    /// Strokes currently on the board, oldest first
    committed: Vec<Stroke>,
    /// Undone strokes; the last entry is the next one to redo
    redo_buffer: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a new stroke. Any redo branch is discarded.
    pub fn record(&mut self, stroke: Stroke) {
        self.committed.push(stroke);
        if !self.redo_buffer.is_empty() {
            log::debug!("Discarding {} redo entries", self.redo_buffer.len());
            self.redo_buffer.clear();
        }
    }

    /// Moves the newest stroke to the redo buffer. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                self.redo_buffer.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Moves the top of the redo buffer back onto the board.
    pub fn redo(&mut self) -> bool {
        match self.redo_buffer.pop() {
            Some(stroke) => {
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Moves every committed stroke onto the redo buffer in reverse order.
    ///
    /// The first stroke drawn ends up on top of the redo buffer, so successive
    /// redos bring the board back in drawing order.
    pub fn clear_all(&mut self) -> bool {
        if self.committed.is_empty() {
            return false;
        }
        self.redo_buffer.extend(self.committed.drain(..).rev());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo_buffer
    }

    /// The stroke a live gesture appends to
    pub(crate) fn last_mut(&mut self) -> Option<&mut Stroke> {
        self.committed.last_mut()
    }
}
