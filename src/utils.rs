// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::{SCORE_MAX, SCORE_MIN, SCORE_STEP};
use anyhow::{bail, Error};
use controller::{Controller, SearchBy, SessionRatings};
use movie_lens::models::movies::Movie;
use movie_lens::MovieLensController;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table};

pub(crate) fn validate_score(score: f64) -> Result<(), Error> {
    let steps = (score - SCORE_MIN) / SCORE_STEP;
    let on_step = (steps - steps.round()).abs() < 1e-9;

    if !score.is_finite() || score < SCORE_MIN || score > SCORE_MAX || !on_step {
        bail!(
            "Invalid score {}, scores go from {:.1} to {:.1} in steps of {:.1}",
            score,
            SCORE_MIN,
            SCORE_MAX,
            SCORE_STEP
        );
    }

    Ok(())
}

pub(crate) fn session_table(
    controller: &MovieLensController,
    session: &SessionRatings<i32>,
) -> Table {
    let mut table = Table::new();
    table.add_row(row!["id", "title", "score"]);

    for (movie_id, score) in session.iter() {
        let title = controller
            .items_by(&SearchBy::id(&movie_id.to_string()))
            .ok()
            .and_then(|mut movies| movies.pop())
            .map(|movie| movie.title)
            .unwrap_or_else(|| "<unknown>".into());

        table.add_row(row![movie_id, title, format!("{:.1}", score)]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

pub(crate) fn recommendations_table(items: &[(Movie, f64)]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["#", "title", "predicted"]);

    for (position, (movie, predicted)) in items.iter().enumerate() {
        table.add_row(row![
            position + 1,
            movie.title,
            format!("{:.2}", predicted)
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}
