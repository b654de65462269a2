// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Placeholder server, unrelated to the recommendation pipeline: a single
//! route answering with a fixed body.

use anyhow::Error;
use axum::routing::get;
use axum::Router;

const BIND_ADDR: &str = "0.0.0.0:5000";

async fn index() -> &'static str {
    "Hello, World!"
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let app = Router::new().route("/", get(index));

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    println!("Listening on {}", BIND_ADDR);
    axum::serve(listener, app).await?;

    Ok(())
}
