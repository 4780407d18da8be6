//! Crafting against the inventory ledger.
//!
//! Recipes live on item definitions. `try_craft` re-validates before
//! touching the ledger, so a failed attempt consumes nothing: either the
//! whole recipe is satisfiable or no ingredient is removed.

use crate::env::{ItemId, ItemOracle};
use crate::events::{EventSink, GameEvent};
use crate::state::InventoryState;

/// True iff the item is craftable and every ingredient is held in at least
/// its required quantity.
pub fn can_craft(inventory: &InventoryState, items: &dyn ItemOracle, item: ItemId) -> bool {
    let Some(definition) = items.definition(item) else {
        return false;
    };
    let Some(recipe) = &definition.recipe else {
        return false;
    };

    recipe
        .ingredients
        .iter()
        .all(|ingredient| inventory.has(ingredient.item, ingredient.quantity))
}

/// Consumes the recipe's ingredients and adds one unit of the crafted item.
///
/// Returns `false` without mutating anything when the recipe is not
/// satisfiable.
pub fn try_craft(
    inventory: &mut InventoryState,
    items: &dyn ItemOracle,
    item: ItemId,
    events: &mut EventSink,
) -> bool {
    if !can_craft(inventory, items, item) {
        return false;
    }

    // can_craft just proved the definition and recipe exist.
    let definition = items
        .definition(item)
        .expect("definition checked by can_craft");
    let recipe = definition
        .recipe
        .as_ref()
        .expect("recipe checked by can_craft");

    for ingredient in &recipe.ingredients {
        inventory.remove(ingredient.item, ingredient.quantity, events);
    }
    inventory.add(Some(&definition), item, 1, events);

    events.push(GameEvent::ItemCrafted { item });
    true
}
