//! Inventory reconciliation
//!
//! Pure transformation of a character snapshot by a server-declared delta.
//! The empty-delta guard and the persist/refetch flow live in the character
//! service; this module only computes the next snapshot.

use crate::domain::character::{CharacterSnapshot, InventoryDelta, InventoryLine};

/// Apply a delta to a snapshot, producing the next snapshot
///
/// Item name matching is case-insensitive. Additions increment an existing
/// line or append a new one with quantity 1; removals decrement or drop the
/// line entirely. A removal naming no held item is a silent no-op. The gold
/// change is applied as-is; clamping is a UI-affordance concern.
pub fn apply(snapshot: &CharacterSnapshot, delta: &InventoryDelta) -> CharacterSnapshot {
    let mut next = snapshot.clone();

    for name in &delta.items_added {
        match next
            .inventory
            .iter_mut()
            .find(|line| line.name.eq_ignore_ascii_case(name))
        {
            Some(line) => line.quantity += 1,
            None => next.inventory.push(InventoryLine {
                name: name.clone(),
                quantity: 1,
            }),
        }
    }

    for name in &delta.items_removed {
        let Some(index) = next
            .inventory
            .iter()
            .position(|line| line.name.eq_ignore_ascii_case(name))
        else {
            tracing::debug!(item = %name, "removal for item not held, ignoring");
            continue;
        };
        if next.inventory[index].quantity > 1 {
            next.inventory[index].quantity -= 1;
        } else {
            next.inventory.remove(index);
        }
    }

    next.money += delta.gold_change;
    next
}
