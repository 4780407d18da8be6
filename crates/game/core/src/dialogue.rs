//! Scripted conversations.
//!
//! A [`DialogueSession`] walks a list of lines with a typewriter per line.
//! Starting a session claims a movement lock and switches to `Dialogue`
//! mode; finishing releases both, on every exit path. The advance input first
//! skips an in-flight typewriter, then moves to the next line.

use crate::events::{EventSink, GameEvent};
use crate::mode::{self, GameMode};
use crate::seq::{SeqStatus, Typewriter};
use crate::state::{EntityId, GameState};

/// One line of scripted dialogue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    /// Portrait asset key for the dialogue panel.
    pub portrait: Option<String>,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            portrait: None,
        }
    }

    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }
}

/// An in-flight conversation with an NPC.
#[derive(Clone, Debug)]
pub struct DialogueSession {
    npc: EntityId,
    lines: Vec<DialogueLine>,
    index: usize,
    writer: Typewriter,
    /// Whether starting the session took a movement claim to release later.
    holds_movement_claim: bool,
}

impl DialogueSession {
    /// Starts a conversation: claims movement (unless the NPC opts out),
    /// enters `Dialogue` mode, and shows the first line.
    pub(crate) fn begin(
        state: &mut GameState,
        npc: EntityId,
        lines: Vec<DialogueLine>,
        freeze_player: bool,
        events: &mut EventSink,
    ) -> Self {
        if freeze_player {
            state.player.lock_movement();
        }
        mode::set_mode(state, GameMode::Dialogue, events);
        events.push(GameEvent::DialogueStarted { entity: npc });

        let speed = state.config.typewriter_speed;
        let mut session = Self {
            npc,
            lines,
            index: 0,
            writer: Typewriter::new("", speed),
            holds_movement_claim: freeze_player,
        };
        session.show_current_line(speed, events);
        session
    }

    fn show_current_line(&mut self, speed: f32, events: &mut EventSink) {
        if let Some(line) = self.lines.get(self.index) {
            self.writer = Typewriter::new(line.text.clone(), speed);
            events.push(GameEvent::DialogueLineShown {
                speaker: line.speaker.clone(),
                text: line.text.clone(),
                portrait: line.portrait.clone(),
            });
        }
    }

    /// Per-tick typewriter progress (real time).
    pub fn advance(&mut self, dt_real: f32) {
        self.writer.advance(dt_real);
    }

    /// Handles one advance/skip input edge.
    ///
    /// A line still typing is skipped to its full text; a finished line
    /// moves to the next one, or ends the session after the last line.
    pub fn input_advance(&mut self, state: &mut GameState, events: &mut EventSink) -> SeqStatus {
        if !self.writer.is_done() {
            self.writer.skip();
            return SeqStatus::Running;
        }

        self.index += 1;
        if self.index < self.lines.len() {
            let speed = state.config.typewriter_speed;
            self.show_current_line(speed, events);
            return SeqStatus::Running;
        }

        self.finish(state, events);
        SeqStatus::Done
    }

    /// Ends the conversation and restores player control.
    pub fn finish(&mut self, state: &mut GameState, events: &mut EventSink) {
        if let Some(entity) = state.world.interactable_mut(self.npc) {
            if let crate::interact::kinds::InteractableKind::Npc(npc) = &mut entity.kind {
                npc.in_dialogue = false;
            }
        }

        if self.holds_movement_claim {
            state.player.unlock_movement();
            self.holds_movement_claim = false;
        }
        mode::set_mode(state, GameMode::Playing, events);
        events.push(GameEvent::DialogueEnded { entity: self.npc });
    }

    /// The conversation is over when the cursor has walked past every line.
    pub fn is_finished(&self) -> bool {
        self.index >= self.lines.len()
    }

    pub fn npc(&self) -> EntityId {
        self.npc
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        self.lines.get(self.index)
    }

    /// Revealed prefix of the current line for the dialogue panel.
    pub fn visible_text(&self) -> &str {
        self.writer.visible()
    }

    pub fn is_typing(&self) -> bool {
        !self.writer.is_done()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{SceneId, WorldState};

    fn test_state() -> GameState {
        GameState::new(GameConfig::default(), WorldState::new(SceneId::new("test")))
    }

    fn lines() -> Vec<DialogueLine> {
        vec![
            DialogueLine::new("Hawk", "Hello there, Mouse!"),
            DialogueLine::new("Hawk", "It's good to see you."),
        ]
    }

    #[test]
    fn session_claims_and_releases_movement() {
        let mut state = test_state();
        let mut events = EventSink::new();

        let mut session =
            DialogueSession::begin(&mut state, EntityId(7), lines(), true, &mut events);
        assert!(!state.player.can_move());
        assert_eq!(state.mode.current(), GameMode::Dialogue);

        // Skip typing, advance through both lines.
        assert_eq!(session.input_advance(&mut state, &mut events), SeqStatus::Running);
        assert_eq!(session.input_advance(&mut state, &mut events), SeqStatus::Running);
        assert_eq!(session.input_advance(&mut state, &mut events), SeqStatus::Running);
        assert_eq!(session.input_advance(&mut state, &mut events), SeqStatus::Done);

        assert!(state.player.can_move());
        assert_eq!(state.mode.current(), GameMode::Playing);
    }

    #[test]
    fn advance_first_skips_typing_then_moves_on() {
        let mut state = test_state();
        let mut events = EventSink::new();

        let mut session =
            DialogueSession::begin(&mut state, EntityId(7), lines(), true, &mut events);
        assert!(session.is_typing());

        session.input_advance(&mut state, &mut events);
        assert!(!session.is_typing());
        assert_eq!(session.visible_text(), "Hello there, Mouse!");
        assert_eq!(session.current_line().unwrap().text, "Hello there, Mouse!");

        session.input_advance(&mut state, &mut events);
        assert_eq!(session.current_line().unwrap().text, "It's good to see you.");
    }

    #[test]
    fn line_events_are_emitted_in_script_order() {
        let mut state = test_state();
        let mut events = EventSink::new();

        let mut session =
            DialogueSession::begin(&mut state, EntityId(7), lines(), true, &mut events);
        session.input_advance(&mut state, &mut events);
        session.input_advance(&mut state, &mut events);

        let shown: Vec<_> = events
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::DialogueLineShown { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(shown, vec!["Hello there, Mouse!", "It's good to see you."]);
    }
}
