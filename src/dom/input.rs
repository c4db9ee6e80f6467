//! Editing state of an input instance.
//!
//! Tracks the value, a byte-offset cursor kept on char boundaries, an optional
//! length limit (in chars), and the last committed value used to decide when a
//! change event is due.

/// A cursor movement within an input's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMotion {
    Left,
    Right,
    Home,
    End,
}

/// Value, cursor and commit bookkeeping for a text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    value: String,
    cursor_position: usize,
    max_length: Option<usize>,
    committed: String,
}

impl InputState {
    /// An empty input with no length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value without firing anything.
    ///
    /// The value is truncated to the length limit, the cursor moves to the end,
    /// and the new value counts as committed.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.truncate_to_limit();
        self.cursor_position = self.value.len();
        self.committed = self.value.clone();
    }

    /// The length limit in chars, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Set the length limit, truncating the current value if needed.
    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
        self.truncate_to_limit();
        self.cursor_position = self.cursor_position.min(self.value.len());
    }

    /// Insert a character at the cursor. Returns `false` when the limit is hit.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self
            .max_length
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return false;
        }
        self.value.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
        true
    }

    /// Delete the character before the cursor. Returns whether anything changed.
    pub fn delete_char(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }
        let prev = self.prev_char_boundary();
        self.value.drain(prev..self.cursor_position);
        self.cursor_position = prev;
        true
    }

    /// Delete the character after the cursor. Returns whether anything changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor_position >= self.value.len() {
            return false;
        }
        let next = self.next_char_boundary();
        self.value.drain(self.cursor_position..next);
        true
    }

    /// Move the cursor. Returns whether it moved.
    pub fn move_cursor(&mut self, motion: CursorMotion) -> bool {
        let target = match motion {
            CursorMotion::Left if self.cursor_position > 0 => self.prev_char_boundary(),
            CursorMotion::Right if self.cursor_position < self.value.len() => {
                self.next_char_boundary()
            }
            CursorMotion::Left | CursorMotion::Right => self.cursor_position,
            CursorMotion::Home => 0,
            CursorMotion::End => self.value.len(),
        };
        let moved = target != self.cursor_position;
        self.cursor_position = target;
        moved
    }

    /// Cursor position as a byte offset.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Mark the current value committed, returning it if it changed since the
    /// last commit.
    pub fn take_change(&mut self) -> Option<String> {
        if self.value == self.committed {
            return None;
        }
        self.committed = self.value.clone();
        Some(self.value.clone())
    }

    fn truncate_to_limit(&mut self) {
        if let Some(max) = self.max_length {
            if let Some((byte, _)) = self.value.char_indices().nth(max) {
                self.value.truncate(byte);
            }
        }
    }

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor_position.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor_position + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}
