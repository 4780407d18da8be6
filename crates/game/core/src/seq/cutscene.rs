use super::fade::Fade;
use super::typewriter::Typewriter;
use super::SeqStatus;
use crate::events::{EventSink, GameEvent};
use crate::math::Vec2;
use crate::mode::{self, GameMode};
use crate::state::GameState;

/// One beat of a cutscene script.
#[derive(Clone, Debug, PartialEq)]
pub enum CutsceneStep {
    /// Fade the screen overlay to the given alpha.
    Fade {
        color: [f32; 3],
        to_alpha: f32,
        duration: f32,
    },
    /// Typewritten narration line, held on screen once complete.
    Narration { text: String },
    /// Wait in place.
    Hold { seconds: f32 },
    /// Relocate the player instantly (awakening beats, reveals).
    TeleportPlayer { position: Vec2 },
}

#[derive(Debug)]
enum StepProgress {
    Fade(Fade),
    Narration { writer: Typewriter, hold_left: f32 },
    Hold { left: f32 },
}

/// Plays a scripted list of [`CutsceneStep`]s, one step at a time.
///
/// Beginning a cutscene enters `Cutscene` mode (which claims the player's
/// movement); finishing returns to `Playing`. Narration honors the skip
/// input: a typing line jumps to full text, a held line ends its hold.
/// Pacing uses real time throughout so cutscenes play identically whatever
/// the simulation clock does.
#[derive(Debug)]
pub struct CutscenePlayer {
    steps: Vec<CutsceneStep>,
    index: usize,
    progress: Option<StepProgress>,
    narration_speed: f32,
    narration_hold: f32,
}

impl CutscenePlayer {
    pub fn begin(
        steps: Vec<CutsceneStep>,
        state: &mut GameState,
        events: &mut EventSink,
    ) -> Self {
        mode::set_mode(state, GameMode::Cutscene, events);
        events.push(GameEvent::CutsceneStarted);
        Self {
            steps,
            index: 0,
            progress: None,
            narration_speed: state.config.narration_speed,
            narration_hold: state.config.narration_hold,
        }
    }

    /// Advances the script by one tick of real time.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        dt_real: f32,
        skip_pressed: bool,
        events: &mut EventSink,
    ) -> SeqStatus {
        loop {
            let Some(step) = self.steps.get(self.index) else {
                self.finish(state, events);
                return SeqStatus::Done;
            };

            // Start the current step on first touch.
            if self.progress.is_none() {
                match step {
                    CutsceneStep::Fade {
                        color,
                        to_alpha,
                        duration,
                    } => {
                        let fade = if *to_alpha >= 0.5 {
                            Fade::fade_out(*color, *duration)
                        } else {
                            Fade::fade_in(*color, *duration)
                        };
                        events.push(fade.request_event());
                        self.progress = Some(StepProgress::Fade(fade));
                    }
                    CutsceneStep::Narration { text } => {
                        events.push(GameEvent::NarrationShown { text: text.clone() });
                        self.progress = Some(StepProgress::Narration {
                            writer: Typewriter::new(text.clone(), self.narration_speed),
                            hold_left: self.narration_hold,
                        });
                    }
                    CutsceneStep::Hold { seconds } => {
                        self.progress = Some(StepProgress::Hold { left: *seconds });
                    }
                    CutsceneStep::TeleportPlayer { position } => {
                        state.player.position = *position;
                        self.index += 1;
                        continue;
                    }
                }
            }

            let done = match self.progress.as_mut().expect("step progress just set") {
                StepProgress::Fade(fade) => fade.advance(dt_real).is_done(),
                StepProgress::Narration { writer, hold_left } => {
                    if !writer.is_done() {
                        if skip_pressed {
                            writer.skip();
                        } else {
                            writer.advance(dt_real);
                        }
                        false
                    } else if skip_pressed {
                        true
                    } else {
                        *hold_left -= dt_real;
                        *hold_left <= 0.0
                    }
                }
                StepProgress::Hold { left } => {
                    *left -= dt_real;
                    *left <= 0.0
                }
            };

            if done {
                self.progress = None;
                self.index += 1;
                continue;
            }
            return SeqStatus::Running;
        }
    }

    fn finish(&mut self, state: &mut GameState, events: &mut EventSink) {
        mode::set_mode(state, GameMode::Playing, events);
        events.push(GameEvent::CutsceneEnded);
    }

    /// Revealed narration text for the overlay, when narrating.
    pub fn narration_text(&self) -> Option<&str> {
        match &self.progress {
            Some(StepProgress::Narration { writer, .. }) => Some(writer.visible()),
            _ => None,
        }
    }
}
