// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod als;
pub mod augment;
pub mod error;
pub mod evaluate;
pub mod split;

use crate::als::AlsModel;
use anyhow::Error;
use config::EngineConfig;
use controller::{eid, Controller, Entity, SessionRatings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::hash::Hash;

/// Outcome of one recommendation request.
#[derive(Debug, Clone)]
pub struct Recommended<Item> {
    /// Held-out error of the freshly fitted model, when it could be
    /// computed (`None` if the filtered test subset came out empty).
    pub rmse: Option<f64>,
    /// Unrated items ranked by predicted score, best first. Ties keep an
    /// arbitrary relative order.
    pub items: Vec<(Item, f64)>,
}

pub struct Engine<'a, C> {
    controller: &'a C,
    config: EngineConfig,
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
    <C::User as Entity>::Id: Hash + Eq + Clone,
    <C::Item as Entity>::Id: Hash + Eq + Clone,
{
    pub fn with_controller(controller: &'a C) -> Self {
        Self::with_config(controller, EngineConfig::default())
    }

    pub fn with_config(controller: &'a C, config: EngineConfig) -> Self {
        Self { controller, config }
    }

    /// Run the full pipeline for the session's ephemeral user: merge the
    /// session ratings into the base table, split, fit, evaluate on the
    /// held-out rows and rank the movies the session never rated.
    ///
    /// Every call refits from scratch; nothing is reused across requests.
    pub fn recommend(
        &self,
        session: &SessionRatings<eid!(C::Item)>,
        count: usize,
    ) -> Result<Recommended<C::Item>, Error> {
        let base = self.controller.ratings()?;
        let user_id = self.controller.ephemeral_user_id();

        let merged = augment::merged_with_session(
            base,
            user_id.clone(),
            session,
            self.controller.score_range(),
        )?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (train, test) =
            split::train_test_split(merged, self.config.split.test_fraction, &mut rng)?;
        log::debug!(
            "Split ratings into {} train rows and {} test rows",
            train.len(),
            test.len()
        );

        let model = AlsModel::fit(&train, &self.config.als, &mut rng)?;
        let rmse = evaluate::model_rmse(&model, &test);
        log::debug!("Fitted model on {} rows, rmse {:?}", train.len(), rmse);

        let rated = session.rated_items();
        let mut items = Vec::new();

        for item in self.controller.items()? {
            let item_id = item.get_id();
            if rated.contains(&item_id) {
                continue;
            }

            let predicted = if model.knows_user(&user_id) {
                model.predict(&user_id, &item_id)
            } else {
                // The model never saw the session user (nothing was rated,
                // or every session row landed in the test partition); rank
                // by the average user's factors instead.
                model.cold_start_score(&item_id)
            };

            if let Some(predicted) = predicted {
                items.push((item, predicted));
            }
        }

        items.sort_unstable_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        items.truncate(count);

        Ok(Recommended { rmse, items })
    }
}
