//! State for the message composition input and its submit control.

/// Maximum allowed input length in characters.
const MAX_INPUT_LENGTH: usize = 4096;

/// State of the compose field: the text being typed, the cursor, and
/// whether the submit control currently accepts a submission.
///
/// The control is disabled while a submission awaits its acknowledgment
/// and re-enabled when the ack arrives or the delivery deadline expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeState {
    text: String,
    cursor_position: usize,
    submit_enabled: bool,
    focused: bool,
}

impl Default for ComposeState {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
            submit_enabled: true,
            focused: true,
        }
    }
}

impl ComposeState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Disables the submit control for the duration of a pending delivery.
    pub fn disable_submit(&mut self) {
        self.submit_enabled = false;
    }

    pub fn enable_submit(&mut self) {
        self.submit_enabled = true;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Inserts a character at the cursor.
    /// Returns false if the input would exceed the maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_INPUT_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    /// Clears all text and resets the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
