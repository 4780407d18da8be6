use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{ItemDefinition, ItemId};
use crate::events::{EventSink, GameEvent};

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub item: ItemId,
    pub quantity: u16,
}

impl InventorySlot {
    pub fn new(item: ItemId, quantity: u16) -> Self {
        Self { item, quantity }
    }
}

/// The item ledger.
///
/// Stackable items share one slot per distinct definition; a slot is deleted
/// the moment its quantity reaches zero or below. Capacity counts occupied
/// slots, not total quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
    capacity: usize,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            slots: ArrayVec::new(),
            capacity: GameConfig::MAX_INVENTORY_SLOTS,
        }
    }
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger with a reduced slot capacity (clamped to the
    /// compile-time maximum).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: ArrayVec::new(),
            capacity: capacity.min(GameConfig::MAX_INVENTORY_SLOTS),
        }
    }

    /// Adds `quantity` of an item.
    ///
    /// Stackable items merge into an existing slot; otherwise a new slot is
    /// appended. Fails without mutating when every slot is occupied. When no
    /// definition is available the item is treated as stackable.
    pub fn add(
        &mut self,
        definition: Option<&ItemDefinition>,
        item: ItemId,
        quantity: u16,
        events: &mut EventSink,
    ) -> bool {
        let stackable = definition.map(|def| def.stackable).unwrap_or(true);

        if stackable {
            if let Some(slot) = self.slots.iter_mut().find(|slot| slot.item == item) {
                slot.quantity += quantity;
                events.push(GameEvent::ItemAdded { item, quantity });
                events.push(GameEvent::InventoryChanged);
                return true;
            }
        }

        if self.slots.len() >= self.capacity {
            events.push(GameEvent::InventoryFull { item });
            return false;
        }

        self.slots.push(InventorySlot::new(item, quantity));
        events.push(GameEvent::ItemAdded { item, quantity });
        events.push(GameEvent::InventoryChanged);
        true
    }

    /// Removes `quantity` of an item. Fails without mutating when the item
    /// is absent; the slot is deleted when the decrement reaches zero or
    /// below.
    pub fn remove(&mut self, item: ItemId, quantity: u16, events: &mut EventSink) -> bool {
        let Some(index) = self.slots.iter().position(|slot| slot.item == item) else {
            return false;
        };

        let remaining = i32::from(self.slots[index].quantity) - i32::from(quantity);
        if remaining <= 0 {
            self.slots.remove(index);
        } else {
            self.slots[index].quantity = remaining as u16;
        }

        events.push(GameEvent::ItemRemoved { item, quantity });
        events.push(GameEvent::InventoryChanged);
        true
    }

    /// Whether at least `quantity` of the item is held.
    pub fn has(&self, item: ItemId, quantity: u16) -> bool {
        self.count(item) >= quantity
    }

    /// Total quantity held of the item.
    pub fn count(&self, item: ItemId) -> u16 {
        self.slots
            .iter()
            .find(|slot| slot.item == item)
            .map(|slot| slot.quantity)
            .unwrap_or(0)
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self, events: &mut EventSink) {
        if !self.slots.is_empty() {
            self.slots.clear();
            events.push(GameEvent::InventoryChanged);
        }
    }
}
