// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

/// A `ratings.csv` row once the timestamp column has been dropped.
pub type Rating = controller::Rating<i32, i32>;
