//! Presentation port.
//!
//! The runtime calls into this trait instead of owning any UI. Embedders
//! plug in their rendering layer; headless hosts and tests use
//! [`TracingPresenter`] or [`NullPresenter`].

use emberveil_core::InventorySlot;
use tracing::info;

pub trait Presenter {
    /// The inventory panel should re-render these slots.
    fn refresh_inventory(&mut self, slots: &[InventorySlot]);

    /// Show one dialogue line (the typewriter reveal is sampled by the
    /// embedder from the active session each frame).
    fn show_dialogue_line(&mut self, speaker: &str, text: &str, portrait: Option<&str>);

    /// Run a screen-overlay fade.
    fn fade(&mut self, color: [f32; 3], to_alpha: f32, duration: f32);

    /// Show short user-facing text (examine results, refusal messages).
    fn show_message(&mut self, text: &str);
}

/// Presenter that logs everything through `tracing`.
#[derive(Debug, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn refresh_inventory(&mut self, slots: &[InventorySlot]) {
        info!(slots = slots.len(), "inventory refreshed");
    }

    fn show_dialogue_line(&mut self, speaker: &str, text: &str, portrait: Option<&str>) {
        info!(speaker, portrait = portrait.unwrap_or(""), "{text}");
    }

    fn fade(&mut self, color: [f32; 3], to_alpha: f32, duration: f32) {
        info!(?color, to_alpha, duration, "fade requested");
    }

    fn show_message(&mut self, text: &str) {
        info!("{text}");
    }
}

/// Presenter that ignores everything.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn refresh_inventory(&mut self, _slots: &[InventorySlot]) {}
    fn show_dialogue_line(&mut self, _speaker: &str, _text: &str, _portrait: Option<&str>) {}
    fn fade(&mut self, _color: [f32; 3], _to_alpha: f32, _duration: f32) {}
    fn show_message(&mut self, _text: &str) {}
}
