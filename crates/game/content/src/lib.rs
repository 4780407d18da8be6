//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML
//! data files:
//! - Item catalogs (data-driven via RON)
//! - Companion roster (data-driven via RON)
//! - Scene layouts with interactable placements and spawn points (RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and the scene factory; it never
//! appears in game state directly. Loaders deserialize into spec types and
//! map them onto `emberveil-core` state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilitySpec, CompanionLoader, CompanionSpec, ConfigLoader, ContentFactory,
    InteractableKindSpec, InteractableSpec, ItemLoader, SceneLoader, SceneSpec, SpawnPointSpec,
};
