// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;
pub mod searchby;
pub mod session;

#[macro_export]
macro_rules! eid {
    ($e:ty) => {
        <$e as $crate::entity::Entity>::Id
    };
}

use anyhow::Error;

pub use entity::{Entity, ToTable};
pub use searchby::SearchBy;
pub use session::SessionRatings;

pub type Result<T> = std::result::Result<T, Error>;

/// A single row of the ratings table, timestamp already dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating<UserId, ItemId> {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub score: f64,
}

pub trait Controller {
    type User: Entity;
    type Item: Entity;

    /// Get all items in the catalog
    fn items(&self) -> Result<Vec<Self::Item>>;

    /// Get items that matched the search criteria by id or name
    fn items_by(&self, by: &SearchBy) -> Result<Vec<Self::Item>>;

    /// Get every rating row, in load order
    fn ratings(&self) -> Result<Vec<Rating<eid!(Self::User), eid!(Self::Item)>>>;

    /// The controller score range, ex. (0.5, 5.0) is (min_rating, max_rating)
    fn score_range(&self) -> (f64, f64);

    /// An id guaranteed not to collide with any user in the ratings table,
    /// used for the session's ephemeral user
    fn ephemeral_user_id(&self) -> eid!(Self::User);
}
