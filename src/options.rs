//! Algorithm selection and per-solve options.

use std::str::FromStr;
use std::time::Duration;

use crate::budget::Budget;

/// The eight solver variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Dense forward table.
    List,
    /// Bellman recurrence, bottom-up table.
    BellmanIterative,
    /// Bellman recurrence, native recursion with a dense memo.
    BellmanRecursive,
    /// Bellman recurrence, explicit frame stack with a dense memo.
    BellmanStack,
    /// Bellman recurrence, explicit frame stack with a hash-map memo.
    BellmanMap,
    /// Bit-packed reachability; subset sum only.
    WordRam,
    /// Balanced fillings around the break solution; subset sum only.
    Balancing,
    /// Bounded list search closing the primal-dual gap.
    PrimalDual,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::List,
        Algorithm::BellmanIterative,
        Algorithm::BellmanRecursive,
        Algorithm::BellmanStack,
        Algorithm::BellmanMap,
        Algorithm::WordRam,
        Algorithm::Balancing,
        Algorithm::PrimalDual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::List => "list",
            Algorithm::BellmanIterative => "bellman-iterative",
            Algorithm::BellmanRecursive => "bellman-recursive",
            Algorithm::BellmanStack => "bellman-stack",
            Algorithm::BellmanMap => "bellman-map",
            Algorithm::WordRam => "word-ram",
            Algorithm::Balancing => "balancing",
            Algorithm::PrimalDual => "primal-dual",
        }
    }

    /// Whether the variant accepts instances whose profits differ from
    /// their weights.
    pub fn supports_knapsack(self) -> bool {
        !matches!(self, Algorithm::WordRam | Algorithm::Balancing)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    input: String,
}

impl std::fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown algorithm '{}'", self.input)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseAlgorithmError {
                input: s.to_string(),
            })
    }
}

/// How the word-ram solver recovers a witnessing subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reconstruction {
    /// Keep every per-item bitset: O(n * C / W) words, one sweep.
    #[default]
    Snapshot,
    /// Keep a checkpoint every `ceil(sqrt(n))` items and re-run each block's
    /// sweep while replaying: O(sqrt(n) * C / W) words, two sweeps.
    Replay,
}

impl Reconstruction {
    pub fn as_str(self) -> &'static str {
        match self {
            Reconstruction::Snapshot => "snapshot",
            Reconstruction::Replay => "replay",
        }
    }
}

/// Options recognized by every solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Wall-clock budget. `None` means no limit.
    pub time_limit: Option<Duration>,
    /// Number of budget check points allowed. `None` means no limit.
    pub step_limit: Option<u64>,
    /// 0 is silent, 1 logs a summary per solve, 2 adds per-item progress.
    pub verbosity_level: u8,
    /// Word-ram only.
    pub reconstruction: Reconstruction,
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }

    pub fn with_verbosity(mut self, level: u8) -> Self {
        self.verbosity_level = level;
        self
    }

    pub fn with_reconstruction(mut self, mode: Reconstruction) -> Self {
        self.reconstruction = mode;
        self
    }

    /// Start a fresh budget for one solve.
    pub fn budget(&self) -> Budget {
        Budget::new(self.time_limit, self.step_limit)
    }

    /// Whether solves log a summary event. Has no effect without the
    /// `tracing` feature.
    pub fn logs_summary(&self) -> bool {
        self.verbosity_level >= 1
    }

    pub fn logs_progress(&self) -> bool {
        self.verbosity_level >= 2
    }
}
