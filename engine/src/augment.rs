// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use controller::{Rating, SessionRatings};
use std::hash::Hash;

/// Append the session's rows to the base rating table under `user_id`.
///
/// Scores are validated against `score_range` before anything is appended;
/// an invalid entry rejects the whole batch. The merged table always holds
/// exactly `base.len() + session.len()` rows: duplicated item ids in the
/// session are kept as separate rows.
pub fn merged_with_session<UserId, ItemId>(
    mut base: Vec<Rating<UserId, ItemId>>,
    user_id: UserId,
    session: &SessionRatings<ItemId>,
    score_range: (f64, f64),
) -> Result<Vec<Rating<UserId, ItemId>>, ErrorKind>
where
    UserId: Clone,
    ItemId: Hash + Eq + Clone,
{
    let (min, max) = score_range;

    for (_, score) in session.iter() {
        if !score.is_finite() {
            return Err(ErrorKind::InvalidScore(score));
        }

        if score < min || score > max {
            return Err(ErrorKind::ScoreOutOfRange { score, min, max });
        }
    }

    base.reserve(session.len());
    for (item_id, score) in session.iter() {
        base.push(Rating {
            user_id: user_id.clone(),
            item_id: item_id.clone(),
            score,
        });
    }

    Ok(base)
}
