//! Character state and the deltas applied to it

use serde::{Deserialize, Serialize};

use loreline_protocol::{
    CharacterPatchData, CharacterRecordData, InventoryDeltaData, InventoryLineWire,
};

/// One held item, always in the normalized name+quantity form
///
/// Quantity never drops below 1; a line disappears from the inventory rather
/// than holding quantity 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub name: String,
    pub quantity: u32,
}

impl From<InventoryLineWire> for InventoryLine {
    fn from(wire: InventoryLineWire) -> Self {
        match wire {
            InventoryLineWire::Name(name) => Self { name, quantity: 1 },
            InventoryLineWire::Pair { name, quantity } => Self {
                name,
                quantity: quantity.max(1),
            },
        }
    }
}

impl From<&InventoryLine> for InventoryLineWire {
    fn from(line: &InventoryLine) -> Self {
        InventoryLineWire::Pair {
            name: line.name.clone(),
            quantity: line.quantity,
        }
    }
}

/// Locally held character state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub armor_class: i32,
    pub experience: i64,
    pub level: i32,
    pub money: i64,
    pub inventory: Vec<InventoryLine>,
}

impl From<CharacterRecordData> for CharacterSnapshot {
    fn from(record: CharacterRecordData) -> Self {
        Self {
            id: record.id,
            name: record.name,
            hp: record.hp,
            max_hp: record.max_hp,
            armor_class: record.armor_class,
            experience: record.experience,
            level: record.level,
            money: record.money,
            inventory: record.inventory.into_iter().map(Into::into).collect(),
        }
    }
}

/// Inventory/gold change produced by one narrative turn
///
/// Applied at most once per delta object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryDelta {
    pub items_added: Vec<String>,
    pub items_removed: Vec<String>,
    pub gold_change: i64,
}

impl InventoryDelta {
    /// True when applying this delta would change nothing
    pub fn is_empty(&self) -> bool {
        self.items_added.is_empty() && self.items_removed.is_empty() && self.gold_change == 0
    }
}

impl From<InventoryDeltaData> for InventoryDelta {
    fn from(data: InventoryDeltaData) -> Self {
        Self {
            items_added: data.items_added,
            items_removed: data.items_removed,
            gold_change: data.gold_change,
        }
    }
}

/// Partial character update pushed by the server
///
/// Each present field replaces the local value wholesale; absent fields are
/// left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterPatch {
    pub hp: Option<i32>,
    pub max_hp: Option<i32>,
    pub armor_class: Option<i32>,
    pub experience: Option<i64>,
    pub level: Option<i32>,
    pub money: Option<i64>,
    pub inventory: Option<Vec<InventoryLine>>,
}

impl CharacterPatch {
    /// Apply this patch to a snapshot in place
    pub fn apply_to(&self, snapshot: &mut CharacterSnapshot) {
        if let Some(hp) = self.hp {
            snapshot.hp = hp;
        }
        if let Some(max_hp) = self.max_hp {
            snapshot.max_hp = max_hp;
        }
        if let Some(armor_class) = self.armor_class {
            snapshot.armor_class = armor_class;
        }
        if let Some(experience) = self.experience {
            snapshot.experience = experience;
        }
        if let Some(level) = self.level {
            snapshot.level = level;
        }
        if let Some(money) = self.money {
            snapshot.money = money;
        }
        if let Some(ref inventory) = self.inventory {
            snapshot.inventory = inventory.clone();
        }
    }
}

impl From<CharacterPatchData> for CharacterPatch {
    fn from(data: CharacterPatchData) -> Self {
        Self {
            hp: data.hp,
            max_hp: data.max_hp,
            armor_class: data.armor_class,
            experience: data.experience,
            level: data.level,
            money: data.money,
            inventory: data
                .inventory
                .map(|lines| lines.into_iter().map(Into::into).collect()),
        }
    }
}
