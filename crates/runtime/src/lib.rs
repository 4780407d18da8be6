//! Runtime orchestration for the Emberveil simulation core.
//!
//! This crate wires the pure logic in `emberveil-core` to the outside
//! world: input intents arrive as per-tick frames, collision queries run
//! against a rebuilt spatial index, scene loads go through a poll-based
//! source, and presentation happens behind the [`Presenter`] port. One
//! [`Runtime::tick`] call advances everything in a fixed order: glove
//! scan and dispatch, the active sequence, companion positioning, then
//! presentation refresh.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`input`] maps raw intent frames to edges
//! - [`index`] implements the world-query collaborator
//! - [`oracle`] adapts loaded content to core oracle traits
//! - [`presenter`] is the presentation port

pub mod error;
pub mod index;
pub mod input;
pub mod oracle;
pub mod presenter;
pub mod runtime;

pub use error::{Result, RuntimeError};
pub use index::SpatialIndex;
pub use input::{InputFrame, InputIntents, InputTracker};
pub use oracle::{CatalogOracle, ContentSceneSource, SceneSource, StaticSceneSource};
pub use presenter::{NullPresenter, Presenter, TracingPresenter};
pub use runtime::{Runtime, RuntimeBuilder};
