// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use common_macros::hash_map;
use controller::Entity;
use std::collections::HashMap;

/// A `movies.csv` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genres: String,
}

impl Entity for Movie {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "title".into() => self.title.clone(),
            "genres".into() => self.genres.clone(),
        }
    }
}
