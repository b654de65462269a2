// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use config::AlsConfig;
use controller::Rating;
use nalgebra::{Cholesky, DMatrix, DVector};
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

/// Fitted latent-factor model produced by alternating least squares.
///
/// Prediction is the inner product of a user factor and an item factor;
/// pairs involving an id the model never saw yield `None` (cold start).
#[derive(Debug, Clone)]
pub struct AlsModel<UserId, ItemId>
where
    UserId: Hash + Eq,
    ItemId: Hash + Eq,
{
    user_factors: HashMap<UserId, DVector<f64>>,
    item_factors: HashMap<ItemId, DVector<f64>>,
    mean_user_factor: DVector<f64>,
}

impl<UserId, ItemId> AlsModel<UserId, ItemId>
where
    UserId: Hash + Eq + Clone,
    ItemId: Hash + Eq + Clone,
{
    /// Fit user and item factors on the training rows.
    ///
    /// Each half-step solves the regularized normal equations
    /// `(QᵀQ + λ·n·I)p = Qᵀr` per entity, with λ weighted by the entity's
    /// rating count (ALS-WR). Item factors start from `rng`, so a seeded
    /// generator gives a reproducible fit.
    pub fn fit<R>(
        train: &[Rating<UserId, ItemId>],
        config: &AlsConfig,
        rng: &mut R,
    ) -> Result<Self, ErrorKind>
    where
        R: Rng,
    {
        if train.is_empty() {
            return Err(ErrorKind::EmptyTrainingSet);
        }

        if train.len() < config.factors {
            return Err(ErrorKind::DegenerateTrainingSet {
                rows: train.len(),
                factors: config.factors,
            });
        }

        let mut user_ids = Vec::new();
        let mut item_ids = Vec::new();
        let mut user_index = HashMap::new();
        let mut item_index = HashMap::new();
        let mut by_user: Vec<Vec<(usize, f64)>> = Vec::new();
        let mut by_item: Vec<Vec<(usize, f64)>> = Vec::new();
        let mut score_sum = 0.0;

        for rating in train {
            let user = *user_index.entry(rating.user_id.clone()).or_insert_with(|| {
                user_ids.push(rating.user_id.clone());
                by_user.push(Vec::new());
                user_ids.len() - 1
            });

            let item = *item_index.entry(rating.item_id.clone()).or_insert_with(|| {
                item_ids.push(rating.item_id.clone());
                by_item.push(Vec::new());
                item_ids.len() - 1
            });

            by_user[user].push((item, rating.score));
            by_item[item].push((user, rating.score));
            score_sum += rating.score;
        }

        let factors = config.factors;
        let global_mean = score_sum / train.len() as f64;

        // Scale the random init so an initial prediction lands near the
        // global mean instead of far outside the rating scale.
        let scale = (global_mean.abs() / factors as f64).sqrt();

        let mut user_factors = vec![DVector::zeros(factors); user_ids.len()];
        let mut item_factors: Vec<DVector<f64>> = (0..item_ids.len())
            .map(|_| DVector::from_fn(factors, |_, _| rng.gen::<f64>() * scale))
            .collect();

        for _ in 0..config.iterations {
            solve_side(&mut user_factors, &item_factors, &by_user, config.regularization);
            solve_side(&mut item_factors, &user_factors, &by_item, config.regularization);
        }

        let mean_user_factor = mean_factor(&user_factors, factors);

        Ok(Self {
            user_factors: user_ids.into_iter().zip(user_factors).collect(),
            item_factors: item_ids.into_iter().zip(item_factors).collect(),
            mean_user_factor,
        })
    }

    /// Predicted score for a (user, item) pair, `None` on a cold-start gap
    pub fn predict(&self, user_id: &UserId, item_id: &ItemId) -> Option<f64> {
        let user = self.user_factors.get(user_id)?;
        let item = self.item_factors.get(item_id)?;

        Some(user.dot(item))
    }

    pub fn knows_user(&self, user_id: &UserId) -> bool {
        self.user_factors.contains_key(user_id)
    }

    /// Score an item for a user absent from the model, ranking by the
    /// average user's factors.
    pub fn cold_start_score(&self, item_id: &ItemId) -> Option<f64> {
        let item = self.item_factors.get(item_id)?;
        Some(self.mean_user_factor.dot(item))
    }
}

fn mean_factor(factors: &[DVector<f64>], dim: usize) -> DVector<f64> {
    let mut sum = DVector::zeros(dim);
    for factor in factors {
        sum += factor;
    }

    if factors.is_empty() {
        sum
    } else {
        sum / factors.len() as f64
    }
}

fn solve_side(
    target: &mut [DVector<f64>],
    fixed: &[DVector<f64>],
    observed: &[Vec<(usize, f64)>],
    regularization: f64,
) {
    let factors = match target.first() {
        Some(factor) => factor.len(),
        None => return,
    };

    for (index, ratings) in observed.iter().enumerate() {
        if ratings.is_empty() {
            continue;
        }

        let mut gram = DMatrix::zeros(factors, factors);
        let mut rhs = DVector::zeros(factors);

        for &(other, score) in ratings {
            let fixed_factor = &fixed[other];
            gram.ger(1.0, fixed_factor, fixed_factor, 1.0);
            rhs.axpy(score, fixed_factor, 1.0);
        }

        let lambda = regularization * ratings.len() as f64;
        for d in 0..factors {
            gram[(d, d)] += lambda;
        }

        if let Some(cholesky) = Cholesky::new(gram) {
            target[index] = cholesky.solve(&rhs);
        }
    }
}
