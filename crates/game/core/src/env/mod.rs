//! Traits describing read-only collaborator services.
//!
//! The core never reaches for globals: item reference data and collision
//! queries are exposed through traits, and the [`Env`] aggregate bundles them
//! so interaction dispatch can access everything it needs without hard
//! coupling to concrete implementations. A missing collaborator surfaces as
//! [`OracleError`]; callers no-op the dependent behavior rather than crash.

mod items;
mod query;

pub use items::{Ingredient, ItemCategory, ItemDefinition, ItemId, ItemOracle, Recipe};
pub use query::{LayerMask, OverlapHit, RayHit, WorldQuery};

/// Raised when a collaborator service was not provided to [`Env`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("item oracle not available")]
    ItemsNotAvailable,
    #[error("world query not available")]
    QueryNotAvailable,
}

/// Aggregates read-only collaborators required by interaction dispatch.
#[derive(Clone, Copy)]
pub struct Env<'a, I, Q>
where
    I: ItemOracle + ?Sized,
    Q: WorldQuery + ?Sized,
{
    items: Option<&'a I>,
    query: Option<&'a Q>,
}

pub type GameEnv<'a> = Env<'a, dyn ItemOracle + 'a, dyn WorldQuery + 'a>;

impl<'a, I, Q> Env<'a, I, Q>
where
    I: ItemOracle + ?Sized,
    Q: WorldQuery + ?Sized,
{
    pub fn new(items: Option<&'a I>, query: Option<&'a Q>) -> Self {
        Self { items, query }
    }

    pub fn with_all(items: &'a I, query: &'a Q) -> Self {
        Self::new(Some(items), Some(query))
    }

    pub fn empty() -> Self {
        Self {
            items: None,
            query: None,
        }
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the WorldQuery, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::QueryNotAvailable` if no world query was provided.
    pub fn query(&self) -> Result<&'a Q, OracleError> {
        self.query.ok_or(OracleError::QueryNotAvailable)
    }
}

impl<'a, I, Q> Env<'a, I, Q>
where
    I: ItemOracle + 'a,
    Q: WorldQuery + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let query: Option<&'a dyn WorldQuery> = self.query.map(|query| query as _);
        Env::new(items, query)
    }
}
