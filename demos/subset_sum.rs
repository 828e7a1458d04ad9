//! Example: subset sum with the word-ram solver in both reconstruction modes,
//! then with the balancing solver.
//!
//! Run with:
//! `cargo run --example subset_sum`

use std::io;

use knapsack_dp::{Algorithm, EngineBuilder, Instance, Reconstruction};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("KNAPSACK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let weights: Vec<i64> = (1..=40).map(|k| (k * 7_919) % 1_000 + 1).collect();
    let target = 9_999;
    let instance = Instance::subset_sum(target, weights).expect("demo instance is valid");

    for mode in [Reconstruction::Snapshot, Reconstruction::Replay] {
        let engine = EngineBuilder::new(Algorithm::WordRam)
            .with_reconstruction(mode)
            .with_verbosity(1)
            .build();
        let sol = match engine.run(&instance) {
            Ok(sol) => sol,
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        };
        let witness: Vec<usize> = sol
            .selected_items()
            .iter()
            .map(|&id| instance.item(id).weight)
            .collect();
        println!(
            "{:<8} best={} reached={} words={} witness={:?}",
            mode.as_str(),
            sol.optimal_value(),
            sol.target_reached(),
            sol.nodes_explored(),
            witness
        );
    }

    let engine = EngineBuilder::new(Algorithm::Balancing).with_verbosity(1).build();
    match engine.run(&instance) {
        Ok(sol) => println!(
            "{:<8} best={} reached={} cells={} items={}",
            "balance",
            sol.optimal_value(),
            sol.target_reached(),
            sol.nodes_explored(),
            sol.selected_items().len()
        ),
        Err(err) => eprintln!("{err}"),
    }
}
