//! Input intent mapping.
//!
//! The embedder samples its input device once per tick into an
//! [`InputFrame`] of abstract intents (no literal keys). The tracker diffs
//! consecutive frames to produce edge-triggered intents, which is what
//! guarantees interactions fire at most once per button press.

use emberveil_core::Vec2;

/// Raw intent state for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Movement intent, unnormalized.
    pub movement: Vec2,
    /// Targeting device held.
    pub engage_targeting: bool,
    /// Interact with the hovered target.
    pub activate: bool,
    /// Proximity interaction without the targeting device.
    pub quick_interact: bool,
    pub toggle_inventory: bool,
    pub toggle_pause: bool,
    /// Advance or skip dialogue/narration text.
    pub advance_text: bool,
}

/// Edge-detected intents derived from two consecutive frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputIntents {
    pub movement: Vec2,
    /// Level: the targeting device is held this tick.
    pub engage_held: bool,
    pub activate_pressed: bool,
    pub quick_interact_pressed: bool,
    pub toggle_inventory_pressed: bool,
    pub toggle_pause_pressed: bool,
    pub advance_text_pressed: bool,
}

/// Diffs frames into edges.
#[derive(Debug, Default)]
pub struct InputTracker {
    previous: InputFrame,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&mut self, frame: InputFrame) -> InputIntents {
        let rising = |now: bool, before: bool| now && !before;
        let intents = InputIntents {
            movement: frame.movement,
            engage_held: frame.engage_targeting,
            activate_pressed: rising(frame.activate, self.previous.activate),
            quick_interact_pressed: rising(frame.quick_interact, self.previous.quick_interact),
            toggle_inventory_pressed: rising(
                frame.toggle_inventory,
                self.previous.toggle_inventory,
            ),
            toggle_pause_pressed: rising(frame.toggle_pause, self.previous.toggle_pause),
            advance_text_pressed: rising(frame.advance_text, self.previous.advance_text),
        };
        self.previous = frame;
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_buttons_fire_one_edge() {
        let mut tracker = InputTracker::new();
        let held = InputFrame {
            activate: true,
            ..InputFrame::default()
        };

        assert!(tracker.edges(held).activate_pressed);
        assert!(!tracker.edges(held).activate_pressed);
        assert!(!tracker.edges(held).activate_pressed);

        assert!(!tracker.edges(InputFrame::default()).activate_pressed);
        assert!(tracker.edges(held).activate_pressed);
    }

    #[test]
    fn engage_is_level_not_edge() {
        let mut tracker = InputTracker::new();
        let held = InputFrame {
            engage_targeting: true,
            ..InputFrame::default()
        };
        assert!(tracker.edges(held).engage_held);
        assert!(tracker.edges(held).engage_held);
    }
}
