use super::SeqStatus;

/// Reveals text one character at a time at a fixed characters-per-second
/// rate. Skipping reveals the full text instantly.
#[derive(Clone, Debug)]
pub struct Typewriter {
    full: String,
    char_count: usize,
    revealed: f32,
    chars_per_second: f32,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, chars_per_second: f32) -> Self {
        let full = text.into();
        let char_count = full.chars().count();
        Self {
            full,
            char_count,
            revealed: 0.0,
            chars_per_second: chars_per_second.max(1.0),
        }
    }

    /// Advances by real (unscaled) time.
    pub fn advance(&mut self, dt_real: f32) -> SeqStatus {
        self.revealed =
            (self.revealed + dt_real * self.chars_per_second).min(self.char_count as f32);
        self.status()
    }

    /// Jumps straight to the fully revealed text.
    pub fn skip(&mut self) {
        self.revealed = self.char_count as f32;
    }

    pub fn is_done(&self) -> bool {
        self.revealed as usize >= self.char_count
    }

    fn status(&self) -> SeqStatus {
        if self.is_done() {
            SeqStatus::Done
        } else {
            SeqStatus::Running
        }
    }

    /// The currently revealed prefix, always on a char boundary.
    pub fn visible(&self) -> &str {
        let shown = (self.revealed as usize).min(self.char_count);
        match self.full.char_indices().nth(shown) {
            Some((byte_index, _)) => &self.full[..byte_index],
            None => &self.full,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full
    }
}
