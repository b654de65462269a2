// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod models;

use crate::models::{movies::Movie, ratings::Rating, users::User};
use anyhow::{bail, Context, Error};
use controller::{error::ErrorKind, Controller, SearchBy};
use indicatif::ProgressIterator;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const MOVIES_FILE: &str = "movies.csv";
const RATINGS_FILE: &str = "ratings.csv";

const MOVIES_HEADER: [&str; 3] = ["movieId", "title", "genres"];
const RATINGS_HEADER: [&str; 4] = ["userId", "movieId", "rating", "timestamp"];

lazy_static! {
    // One immutable dataset per source directory, loaded on first use and
    // kept for the rest of the process (the files are assumed static, so
    // the cache is never invalidated).
    static ref DATASETS: Mutex<HashMap<PathBuf, Arc<Dataset>>> = Mutex::new(HashMap::new());
}

#[derive(Debug)]
struct Dataset {
    movies: Vec<Movie>,
    movies_by_id: HashMap<i32, usize>,
    ratings: Vec<Rating>,
    max_user_id: i32,
}

impl Dataset {
    fn load(dir: &Path) -> Result<Self, Error> {
        let movies = read_movies(&dir.join(MOVIES_FILE))?;
        let ratings = read_ratings(&dir.join(RATINGS_FILE))?;

        Ok(Self::from_tables(movies, ratings))
    }

    fn from_tables(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        let movies_by_id = movies
            .iter()
            .enumerate()
            .map(|(index, movie)| (movie.id, index))
            .collect();

        let max_user_id = ratings.iter().map(|rating| rating.user_id).max();

        Self {
            movies,
            movies_by_id,
            ratings,
            max_user_id: max_user_id.unwrap_or(0),
        }
    }
}

fn check_header(found: &csv::StringRecord, expected: &[&str], path: &Path) -> Result<(), Error> {
    let found: Vec<_> = found.iter().collect();
    if found != expected {
        bail!(
            "Malformed header in {}: expected {:?}, found {:?}",
            path.display(),
            expected,
            found
        );
    }

    Ok(())
}

fn read_movies(path: &Path) -> Result<Vec<Movie>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    check_header(csv.headers()?, &MOVIES_HEADER, path)?;

    let mut movies = Vec::new();
    for record in csv.records() {
        let record = record?;
        let id: i32 = record[0]
            .parse()
            .with_context(|| format!("Invalid movie id {:?}", &record[0]))?;

        movies.push(Movie {
            id,
            title: record[1].to_owned(),
            genres: record[2].to_owned(),
        });
    }

    Ok(movies)
}

fn read_ratings(path: &Path) -> Result<Vec<Rating>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    check_header(csv.headers()?, &RATINGS_HEADER, path)?;

    let records = csv.records().collect::<Result<Vec<_>, _>>()?;

    let mut ratings = Vec::with_capacity(records.len());
    for record in records.iter().progress() {
        let user_id: i32 = record[0]
            .parse()
            .with_context(|| format!("Invalid user id {:?}", &record[0]))?;
        let item_id: i32 = record[1]
            .parse()
            .with_context(|| format!("Invalid movie id {:?}", &record[1]))?;
        let score: f64 = record[2]
            .parse()
            .with_context(|| format!("Invalid rating {:?}", &record[2]))?;

        // record[3] is the timestamp, dropped before use
        ratings.push(Rating {
            user_id,
            item_id,
            score,
        });
    }

    Ok(ratings)
}

pub struct MovieLensController {
    data: Arc<Dataset>,
}

impl MovieLensController {
    pub fn new() -> Result<Self, Error> {
        Self::with_dir("data")
    }

    /// Open the dataset under `dir`, reusing the tables if this process
    /// already loaded them.
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let key = dir.as_ref().to_path_buf();

        let mut cache = DATASETS
            .lock()
            .map_err(|_| anyhow::anyhow!("Dataset cache was poisoned"))?;

        let data = match cache.get(&key) {
            Some(data) => Arc::clone(data),
            None => {
                let data = Arc::new(Dataset::load(&key)?);
                cache.insert(key, Arc::clone(&data));
                data
            }
        };

        Ok(Self { data })
    }

    /// Build a controller from already materialized tables, bypassing the
    /// cache. Meant for small fixtures.
    pub fn from_records(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        Self {
            data: Arc::new(Dataset::from_tables(movies, ratings)),
        }
    }
}

impl Controller for MovieLensController {
    type User = User;
    type Item = Movie;

    fn items(&self) -> Result<Vec<Self::Item>, Error> {
        Ok(self.data.movies.clone())
    }

    fn items_by(&self, by: &SearchBy) -> Result<Vec<Self::Item>, Error> {
        match by {
            SearchBy::Id(id) => {
                let id: i32 = id.parse()?;
                match self.data.movies_by_id.get(&id) {
                    Some(&index) => Ok(vec![self.data.movies[index].clone()]),
                    None => Err(ErrorKind::NotFoundById(id.to_string()).into()),
                }
            }

            SearchBy::Name(name) => {
                let pattern = name.to_lowercase();
                let movies: Vec<_> = self
                    .data
                    .movies
                    .iter()
                    .filter(|movie| movie.title.to_lowercase().contains(&pattern))
                    .cloned()
                    .collect();

                if movies.is_empty() {
                    Err(ErrorKind::NotFoundByName(name.clone()).into())
                } else {
                    Ok(movies)
                }
            }
        }
    }

    fn ratings(&self) -> Result<Vec<Rating>, Error> {
        Ok(self.data.ratings.clone())
    }

    fn score_range(&self) -> (f64, f64) {
        (0.5, 5.)
    }

    fn ephemeral_user_id(&self) -> i32 {
        self.data.max_user_id + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_DIR: &str = "tests/data";

    #[test]
    fn load_fixture_dataset() -> Result<(), Error> {
        let controller = MovieLensController::with_dir(FIXTURE_DIR)?;

        assert_eq!(controller.items()?.len(), 12);
        assert_eq!(controller.ratings()?.len(), 40);

        Ok(())
    }

    #[test]
    fn repeated_loads_reuse_the_dataset() -> Result<(), Error> {
        let first = MovieLensController::with_dir(FIXTURE_DIR)?;
        let second = MovieLensController::with_dir(FIXTURE_DIR)?;

        assert!(Arc::ptr_eq(&first.data, &second.data));

        Ok(())
    }

    #[test]
    fn ephemeral_id_is_above_every_user() -> Result<(), Error> {
        let controller = MovieLensController::with_dir(FIXTURE_DIR)?;
        let max_user = controller
            .ratings()?
            .into_iter()
            .map(|rating| rating.user_id)
            .max()
            .unwrap();

        assert!(controller.ephemeral_user_id() > max_user);

        Ok(())
    }

    #[test]
    fn search_by_name_is_substring_and_case_insensitive() -> Result<(), Error> {
        let controller = MovieLensController::with_dir(FIXTURE_DIR)?;

        let movies = controller.items_by(&SearchBy::name("toy story"))?;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);

        Ok(())
    }

    #[test]
    fn search_by_unknown_id_fails() -> Result<(), Error> {
        let controller = MovieLensController::with_dir(FIXTURE_DIR)?;
        assert!(controller.items_by(&SearchBy::id("99999")).is_err());

        Ok(())
    }

    #[test]
    fn missing_directory_is_fatal() {
        assert!(MovieLensController::with_dir("no-such-dir").is_err());
    }

    #[test]
    fn from_records_bypasses_the_cache() {
        let movies = vec![Movie {
            id: 1,
            title: "Toy Story (1995)".into(),
            genres: "Animation".into(),
        }];
        let ratings = vec![Rating {
            user_id: 7,
            item_id: 1,
            score: 4.5,
        }];

        let controller = MovieLensController::from_records(movies, ratings);
        assert_eq!(controller.ephemeral_user_id(), 8);
    }
}
