//! Resumable multi-tick sequences.
//!
//! Long-running presentation beats (typewriter text, screen fades, cutscene
//! scripts) are explicit state objects advanced once per tick, replacing
//! engine coroutines. Each sequence exposes `advance(dt)` returning a
//! [`SeqStatus`] and a skip path that materializes the end state immediately
//! instead of leaving the sequence mid-transition.
//!
//! Sequences that pace narration or fades run on *real* time; only movement
//! and follow logic consume scaled simulation time.

mod cutscene;
mod fade;
mod typewriter;

pub use cutscene::{CutscenePlayer, CutsceneStep};
pub use fade::{Fade, BLACK};
pub use typewriter::Typewriter;

/// Whether a sequence still wants ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqStatus {
    Running,
    Done,
}

impl SeqStatus {
    pub fn is_done(self) -> bool {
        matches!(self, SeqStatus::Done)
    }
}
