#![cfg(feature = "heavy")]
use knapsack_dp::{solve, Algorithm, Instance, Reconstruction, SolveOptions, SolveStatus};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_knapsack(rng: &mut StdRng, n: usize, capacity: i64) -> Instance {
    let items: Vec<(i64, i64)> = (0..n)
        .map(|_| (rng.gen_range(1..200), rng.gen_range(1..1000)))
        .collect();
    Instance::knapsack(capacity, items).unwrap()
}

#[test]
fn heavy_stress_knapsack_medium() {
    let mut rng = StdRng::seed_from_u64(123);
    let inst = random_knapsack(&mut rng, 500, 3_000);
    let reference = solve(&inst, Algorithm::List, &SolveOptions::default()).unwrap();
    for algo in [
        Algorithm::BellmanIterative,
        Algorithm::BellmanStack,
        Algorithm::BellmanMap,
        Algorithm::PrimalDual,
    ] {
        let sol = solve(&inst, algo, &SolveOptions::default()).unwrap();
        assert_eq!(sol.optimal_value(), reference.optimal_value(), "{algo}");
        assert!(sol.verify(&inst));
    }
}

#[test]
fn heavy_stress_deep_stack() {
    let mut rng = StdRng::seed_from_u64(321);
    let inst = random_knapsack(&mut rng, 100_000, 50);
    let reference = solve(&inst, Algorithm::BellmanIterative, &SolveOptions::default()).unwrap();
    let sol = solve(&inst, Algorithm::BellmanStack, &SolveOptions::default()).unwrap();
    assert_eq!(sol.optimal_value(), reference.optimal_value());
    assert_eq!(sol.selected_items(), reference.selected_items());
}

#[test]
fn heavy_stress_word_ram_replay() {
    let mut rng = StdRng::seed_from_u64(99);
    let weights: Vec<i64> = (0..5_000).map(|_| rng.gen_range(1..10_000)).collect();
    let target = weights.iter().step_by(2).sum::<i64>();
    let inst = Instance::subset_sum(target, weights).unwrap();
    let opts = SolveOptions::new().with_reconstruction(Reconstruction::Replay);
    let sol = solve(&inst, Algorithm::WordRam, &opts).unwrap();
    assert_eq!(sol.status(), SolveStatus::Optimal);
    assert!(sol.target_reached());
    assert!(sol.verify(&inst));
}
