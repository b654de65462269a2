// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::Entity;

/// Users carry no profile data in the dataset, only an id.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
}

impl Entity for User {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }
}
