// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use config::AlsConfig;
use controller::Rating;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::als::AlsModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_ratings(users: i32, movies: i32, per_user: usize) -> Vec<Rating<i32, i32>> {
    let mut rng = StdRng::seed_from_u64(7);

    let mut ratings = Vec::with_capacity(users as usize * per_user);
    for user_id in 0..users {
        for _ in 0..per_user {
            let item_id = rng.gen_range(0, movies);
            let score = f64::from(rng.gen_range(1, 11)) / 2.0;

            ratings.push(Rating {
                user_id,
                item_id,
                score,
            });
        }
    }

    ratings
}

fn fit_100_users(c: &mut Criterion) {
    let train = generate_ratings(100, 50, 20);
    let config = AlsConfig::default();

    c.bench_function("als fit 100 users", |bench| {
        bench.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            AlsModel::fit(black_box(&train), &config, &mut rng)
        })
    });
}

fn fit_500_users(c: &mut Criterion) {
    let train = generate_ratings(500, 200, 20);
    let config = AlsConfig::default();

    c.bench_function("als fit 500 users", |bench| {
        bench.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            AlsModel::fit(black_box(&train), &config, &mut rng)
        })
    });
}

criterion_group!(benches, fit_100_users, fit_500_users);
criterion_main!(benches);
