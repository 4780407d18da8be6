use std::fmt;

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Reference to an item definition stored outside the core (lookup via Env).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition>;

    /// Returns every item definition available in this oracle.
    /// Used by crafting menus to enumerate recipes.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

/// Immutable item reference data.
///
/// # Stacking
///
/// Stackable items share one inventory slot per distinct definition; items
/// with `stackable = false` occupy one slot each (keys, unique quest items).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    pub stackable: bool,
    pub max_stack: u16,
    /// Present when the item can be crafted at a forge.
    pub recipe: Option<Recipe>,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            stackable: true,
            max_stack: 99,
            recipe: None,
        }
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn unstackable(mut self) -> Self {
        self.stackable = false;
        self.max_stack = 1;
        self
    }

    pub fn is_craftable(&self) -> bool {
        self.recipe.is_some()
    }
}

/// Broad item classification, mostly of interest to UI and gifting logic.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    /// Raw crafting materials.
    #[default]
    Material,
    /// Items produced at a forge.
    Crafted,
    /// Story items that cannot be discarded.
    Quest,
    /// Usable/consumable items.
    Consumable,
    /// Items meant to be given to characters.
    Gift,
    /// Keys and access tokens.
    Key,
}

/// Ingredient list consumed when crafting one unit of the item.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub ingredients: ArrayVec<Ingredient, { GameConfig::MAX_RECIPE_INGREDIENTS }>,
}

impl Recipe {
    pub fn new(ingredients: &[(ItemId, u16)]) -> Self {
        let mut list = ArrayVec::new();
        for &(item, quantity) in ingredients {
            list.push(Ingredient { item, quantity });
        }
        Self { ingredients: list }
    }
}

/// One required ingredient in a recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ingredient {
    pub item: ItemId,
    pub quantity: u16,
}
