// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::collections::HashSet;
use std::hash::Hash;

/// Ordered ratings collected for the ephemeral user during one session.
///
/// The buffer never deduplicates: rating the same item twice keeps both
/// entries, and the merge step appends every row it holds. Callers that
/// care should warn when that happens instead of dropping rows.
#[derive(Debug, Clone)]
pub struct SessionRatings<ItemId> {
    entries: Vec<(ItemId, f64)>,
}

impl<ItemId> Default for SessionRatings<ItemId> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<ItemId> SessionRatings<ItemId>
where
    ItemId: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a rating for `item_id`, keeping any previous entry for it
    pub fn rate(&mut self, item_id: ItemId, score: f64) {
        self.entries.push((item_id, score));
    }

    /// Remove every entry for `item_id`, returning how many were removed
    pub fn retract(&mut self, item_id: &ItemId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| id != item_id);
        before - self.entries.len()
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.entries.iter().any(|(id, _)| id == item_id)
    }

    /// The distinct items rated so far
    pub fn rated_items(&self) -> HashSet<ItemId> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn distinct_count(&self) -> usize {
        self.rated_items().len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, f64)> {
        self.entries.iter().map(|(id, score)| (id, *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
