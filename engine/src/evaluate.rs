use crate::als::AlsModel;
use controller::Rating;
use num_traits::float::Float;
use std::hash::Hash;
use std::ops::AddAssign;

/// Root-mean-square error over (predicted, actual) pairs.
///
/// `None` when the iterator is empty, which keeps "no measurable error"
/// distinct from a zero error.
pub fn rmse<V, I>(pairs: I) -> Option<V>
where
    V: Float + AddAssign,
    I: IntoIterator<Item = (V, V)>,
{
    let mut sum = None;
    let mut count = 0;

    for (predicted, actual) in pairs {
        *sum.get_or_insert_with(V::zero) += (predicted - actual).powi(2);
        count += 1;
    }

    let sum: V = sum?;
    Some((sum / V::from(count)?).sqrt())
}

/// Apply `model` to the held-out rows and measure the error.
///
/// Rows without a prediction (cold-start gaps) are dropped first; when
/// nothing survives the filter the error is undefined and `None` is
/// returned.
pub fn model_rmse<UserId, ItemId>(
    model: &AlsModel<UserId, ItemId>,
    test: &[Rating<UserId, ItemId>],
) -> Option<f64>
where
    UserId: Hash + Eq + Clone,
    ItemId: Hash + Eq + Clone,
{
    rmse(test.iter().filter_map(|row| {
        model
            .predict(&row.user_id, &row.item_id)
            .map(|predicted| (predicted, row.score))
    }))
}
