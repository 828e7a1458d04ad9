//! Example: 0/1 knapsack under every variant.
//!
//! Run with:
//! `cargo run --example knapsack`
//!
//! Set `KNAPSACK_LOG=debug` to see per-solve spans and phase events.

use std::io;
use std::time::Duration;

use knapsack_dp::{solve, Algorithm, EngineBuilder, Instance, SolveOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("KNAPSACK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let items = vec![
        (12, 24),
        (7, 13),
        (11, 23),
        (8, 15),
        (9, 16),
        (6, 11),
        (14, 29),
        (5, 9),
    ];
    let instance = Instance::knapsack(40, items).expect("demo instance is valid");

    let options = SolveOptions::new().with_verbosity(1);
    for algo in Algorithm::ALL.into_iter().filter(|a| a.supports_knapsack()) {
        match solve(&instance, algo, &options) {
            Ok(sol) => println!(
                "{:<18} value={} weight={} items={:?} nodes={}",
                algo.as_str(),
                sol.optimal_value(),
                sol.total_weight(),
                sol.selected_items(),
                sol.nodes_explored()
            ),
            Err(err) => println!("{:<18} error: {err}", algo.as_str()),
        }
    }

    // A budget too small to finish: the answer is feasible but unproven.
    let engine = EngineBuilder::new(Algorithm::PrimalDual)
        .with_step_limit(2)
        .with_time_limit(Duration::from_millis(50))
        .build();
    if let Ok(sol) = engine.run(&instance) {
        println!(
            "budgeted primal-dual: status={} value={} upper={} gap={}",
            sol.status(),
            sol.optimal_value(),
            sol.upper_bound(),
            sol.gap()
        );
    }
}
