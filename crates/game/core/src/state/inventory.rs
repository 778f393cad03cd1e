use std::collections::BTreeMap;

use super::ItemId;

/// Consumable stock keyed by item kind.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    stock: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: ItemId, count: u32) -> Self {
        self.add(item, count);
        self
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.stock.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.stock.entry(item).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Removes one unit of `item`. Returns false when none is in stock.
    pub fn consume(&mut self, item: ItemId) -> bool {
        match self.stock.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.stock.remove(&item);
                }
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.stock.iter().map(|(item, count)| (*item, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_until_empty() {
        let potion = ItemId(1);
        let mut inventory = Inventory::new().with_item(potion, 2);

        assert!(inventory.consume(potion));
        assert!(inventory.consume(potion));
        assert!(!inventory.consume(potion));
        assert_eq!(inventory.count(potion), 0);
        assert_eq!(inventory.iter().count(), 0);
    }
}
