use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The fixed containers a character carries. The bag of holding only exists
/// when the record opts in ([`Inventory::has_bag_of_holding`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Container {
    Body,
    BeltPouch,
    Quiver,
    Backpack,
    BagOfHolding,
    Gems,
    Valuables,
}

impl Container {
    pub const ALL: [Container; 7] = [
        Container::Body,
        Container::BeltPouch,
        Container::Quiver,
        Container::Backpack,
        Container::BagOfHolding,
        Container::Gems,
        Container::Valuables,
    ];

    /// Maximum number of items.
    pub fn capacity(self) -> usize {
        match self {
            Container::Body => 10,
            Container::BeltPouch => 4,
            Container::Quiver => 30,
            Container::Backpack => 20,
            Container::BagOfHolding => 50,
            Container::Gems => 20,
            Container::Valuables => 20,
        }
    }

    /// Maximum total weight.
    pub fn weight_limit(self) -> f64 {
        match self {
            Container::Body => 40.0,
            Container::BeltPouch => 5.0,
            Container::Quiver => 10.0,
            Container::Backpack => 50.0,
            Container::BagOfHolding => 500.0,
            Container::Gems => 10.0,
            Container::Valuables => 10.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Container::Body => "body",
            Container::BeltPouch => "belt pouch",
            Container::Quiver => "quiver",
            Container::Backpack => "backpack",
            Container::BagOfHolding => "bag of holding",
            Container::Gems => "gems",
            Container::Valuables => "valuables",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who an item may be used on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemTarget {
    Anyone,
    SelfOnly,
    OthersOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub weight: f64,
    pub target: ItemTarget,
    #[serde(default)]
    pub heal: i64,
    #[serde(default)]
    pub damage: i64,
    #[serde(default)]
    pub usable: bool,
}

/// What consuming an item does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Heal(i64),
    Damage(i64),
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    containers: BTreeMap<Container, Vec<Item>>,
    #[serde(default)]
    pub has_bag_of_holding: bool,
}

impl Inventory {
    /// Add an item, enforcing the container's item and weight limits.
    pub fn add(&mut self, container: Container, item: Item) -> Result<()> {
        if container == Container::BagOfHolding && !self.has_bag_of_holding {
            return Err(CoreError::InventoryFull(container.as_str().to_string()));
        }
        let items = self.containers.entry(container).or_default();
        if items.len() >= container.capacity() {
            return Err(CoreError::InventoryFull(container.as_str().to_string()));
        }
        let weight: f64 = items.iter().map(|i| i.weight).sum();
        if weight + item.weight > container.weight_limit() {
            return Err(CoreError::InventoryFull(container.as_str().to_string()));
        }
        items.push(item);
        Ok(())
    }

    pub fn items(&self, container: Container) -> &[Item] {
        self.containers
            .get(&container)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn carried_weight(&self) -> f64 {
        self.containers
            .values()
            .flatten()
            .map(|i| i.weight)
            .sum()
    }

    /// Consume a named item, using it on the holder (`on_self`) or on someone
    /// else. The item is removed only when every rule check passes.
    pub fn use_item(&mut self, name: &str, on_self: bool) -> Result<ItemEffect> {
        let (container, idx) = self
            .containers
            .iter()
            .find_map(|(c, items)| {
                items
                    .iter()
                    .position(|i| i.name.eq_ignore_ascii_case(name))
                    .map(|idx| (*c, idx))
            })
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;

        let item = &self.containers[&container][idx];
        if item.heal > 0 && item.damage > 0 {
            return Err(CoreError::ConflictingItemEffects(item.name.clone()));
        }
        if !item.usable {
            return Err(CoreError::ItemNotUsable(item.name.clone()));
        }
        let allowed = match item.target {
            ItemTarget::Anyone => true,
            ItemTarget::SelfOnly => on_self,
            ItemTarget::OthersOnly => !on_self,
        };
        if !allowed {
            return Err(CoreError::WrongTarget {
                item: item.name.clone(),
                target: if on_self { "yourself" } else { "someone else" }.to_string(),
            });
        }

        let item = self
            .containers
            .get_mut(&container)
            .map(|items| items.remove(idx))
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;
        Ok(if item.heal > 0 {
            ItemEffect::Heal(item.heal)
        } else if item.damage > 0 {
            ItemEffect::Damage(item.damage)
        } else {
            ItemEffect::None
        })
    }
}
