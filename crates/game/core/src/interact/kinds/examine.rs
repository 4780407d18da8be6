use crate::events::{EventSink, GameEvent};
use crate::interact::kinds::InteractableKind;
use crate::interact::{InteractError, InteractOutcome};
use crate::state::{EntityId, GameState};

/// An object that shows a description when examined.
///
/// Good for world-building details, hints, and flavor text. A second
/// description can replace the first after the initial examination.
#[derive(Clone, Debug)]
pub struct ExaminableState {
    pub text: String,
    /// Shown instead of `text` once the object has been examined.
    pub text_after_first: Option<String>,
    pub examined: bool,
}

impl ExaminableState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_after_first: None,
            examined: false,
        }
    }

    pub fn with_followup(mut self, text: impl Into<String>) -> Self {
        self.text_after_first = Some(text.into());
        self
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let Some(entity) = state.world.interactable_mut(id) else {
        return Err(InteractError::UnknownEntity(id));
    };
    let InteractableKind::Examinable(examinable) = &mut entity.kind else {
        return Err(InteractError::UnknownEntity(id));
    };

    let text = match (&examinable.text_after_first, examinable.examined) {
        (Some(followup), true) => followup.clone(),
        _ => examinable.text.clone(),
    };
    examinable.examined = true;

    events.push(GameEvent::MessageShown { text: text.clone() });
    Ok(InteractOutcome::Examined { text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::math::Vec2;
    use crate::state::{SceneId, WorldState};

    #[test]
    fn followup_text_appears_on_repeat_examinations() {
        let mut world = WorldState::new(SceneId::new("test"));
        let id = world
            .spawn(
                "Old Oak",
                Vec2::ZERO,
                InteractableKind::Examinable(
                    ExaminableState::new("A gnarled oak, older than the village.")
                        .with_followup("The oak again. It hasn't moved."),
                ),
            )
            .unwrap();
        let mut state = GameState::new(GameConfig::default(), world);
        let mut events = EventSink::new();

        let first = interact(&mut state, id, &mut events).unwrap();
        assert!(matches!(
            first,
            InteractOutcome::Examined { text } if text.starts_with("A gnarled oak")
        ));

        let second = interact(&mut state, id, &mut events).unwrap();
        assert!(matches!(
            second,
            InteractOutcome::Examined { text } if text == "The oak again. It hasn't moved."
        ));
    }
}
