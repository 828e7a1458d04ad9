use knapsack_dp::{solve, Algorithm, Instance, Reconstruction, SolveOptions};
use proptest::prelude::*;

fn items_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..25, 0i64..40), 0..=14)
}

proptest! {
    #[test]
    fn solving_twice_is_identical(capacity in 0i64..80, items in items_strategy()) {
        let inst = Instance::knapsack(capacity, items).unwrap();
        for algo in Algorithm::ALL {
            let a = solve(&inst, algo, &SolveOptions::default()).unwrap();
            let b = solve(&inst, algo, &SolveOptions::default()).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn more_capacity_never_hurts(
        capacity in 0i64..60,
        extra in 0i64..30,
        items in items_strategy(),
    ) {
        let small = Instance::knapsack(capacity, items.clone()).unwrap();
        let large = Instance::knapsack(capacity + extra, items).unwrap();
        for algo in Algorithm::ALL.into_iter().filter(|a| a.supports_knapsack()) {
            let a = solve(&small, algo, &SolveOptions::default()).unwrap();
            let b = solve(&large, algo, &SolveOptions::default()).unwrap();
            prop_assert!(a.optimal_value() <= b.optimal_value(), "{}", algo);
        }
    }

    #[test]
    fn optimal_solutions_are_feasible(capacity in 0i64..80, items in items_strategy()) {
        let inst = Instance::knapsack(capacity, items).unwrap();
        for algo in Algorithm::ALL {
            let sol = solve(&inst, algo, &SolveOptions::default()).unwrap();
            prop_assert!(sol.verify(&inst), "{}", algo);
            if sol.status().is_optimal() {
                prop_assert!(sol.total_weight() <= inst.capacity());
                prop_assert_eq!(sol.gap(), 0);
            }
        }
    }

    #[test]
    fn budgeted_solutions_stay_feasible(
        capacity in 0i64..80,
        items in items_strategy(),
        steps in 0u64..12,
    ) {
        let inst = Instance::knapsack(capacity, items).unwrap();
        let exact = solve(&inst, Algorithm::List, &SolveOptions::default()).unwrap();
        let opts = SolveOptions::new().with_step_limit(steps);
        for algo in Algorithm::ALL.into_iter().filter(|a| a.supports_knapsack()) {
            let sol = solve(&inst, algo, &opts).unwrap();
            prop_assert!(sol.status().is_feasible());
            prop_assert!(sol.verify(&inst), "{}", algo);
            prop_assert!(sol.optimal_value() <= exact.optimal_value());
            prop_assert!(sol.upper_bound() >= exact.optimal_value(), "{}", algo);
        }
    }

    #[test]
    fn word_ram_modes_are_interchangeable(
        capacity in 0i64..400,
        weights in prop::collection::vec(0i64..90, 0..=30),
    ) {
        let inst = Instance::subset_sum(capacity, weights).unwrap();
        let snapshot = solve(
            &inst,
            Algorithm::WordRam,
            &SolveOptions::new().with_reconstruction(Reconstruction::Snapshot),
        )
        .unwrap();
        let replay = solve(
            &inst,
            Algorithm::WordRam,
            &SolveOptions::new().with_reconstruction(Reconstruction::Replay),
        )
        .unwrap();
        prop_assert_eq!(snapshot.optimal_value(), replay.optimal_value());
        prop_assert_eq!(snapshot.selected_items(), replay.selected_items());
    }
}
