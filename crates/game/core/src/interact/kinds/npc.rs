use crate::dialogue::{DialogueLine, DialogueSession};
use crate::events::EventSink;
use crate::interact::kinds::InteractableKind;
use crate::interact::{InteractError, InteractOutcome};
use crate::state::{CompanionId, EntityId, GameState};

/// A character the player can talk to.
#[derive(Clone, Debug, Default)]
pub struct NpcState {
    /// Portrait asset key for the dialogue panel.
    pub portrait: Option<String>,
    /// Scripted conversation, shown line by line.
    pub lines: Vec<DialogueLine>,
    /// Whether the player is frozen for the conversation.
    pub freeze_player: bool,
    pub in_dialogue: bool,
    /// Companion who joins the party when this conversation ends.
    pub recruits: Option<CompanionId>,
}

impl NpcState {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self {
            portrait: None,
            lines,
            freeze_player: true,
            in_dialogue: false,
            recruits: None,
        }
    }

    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }

    pub fn recruiting(mut self, id: impl Into<CompanionId>) -> Self {
        self.recruits = Some(id.into());
        self
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let (lines, freeze_player, portrait) = {
        let Some(entity) = state.world.interactable_mut(id) else {
            return Err(InteractError::UnknownEntity(id));
        };
        let InteractableKind::Npc(npc) = &mut entity.kind else {
            return Err(InteractError::UnknownEntity(id));
        };
        if npc.in_dialogue {
            return Ok(InteractOutcome::Ignored);
        }
        npc.in_dialogue = true;
        (npc.lines.clone(), npc.freeze_player, npc.portrait.clone())
    };

    // Lines without an explicit portrait inherit the NPC's.
    let lines = lines
        .into_iter()
        .map(|mut line| {
            if line.portrait.is_none() {
                line.portrait = portrait.clone();
            }
            line
        })
        .collect();

    let session = DialogueSession::begin(state, id, lines, freeze_player, events);
    Ok(InteractOutcome::DialogueStarted(session))
}
