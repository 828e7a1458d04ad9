use std::time::Duration;

use crate::options::{Algorithm, Reconstruction, SolveOptions};
use crate::Engine;

pub struct EngineBuilder {
    algorithm: Algorithm,
    options: SolveOptions,
}

impl EngineBuilder {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            options: SolveOptions::default(),
        }
    }
    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.options.time_limit = Some(limit);
        self
    }
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.options.step_limit = Some(steps);
        self
    }
    pub fn with_verbosity(mut self, level: u8) -> Self {
        self.options.verbosity_level = level;
        self
    }
    pub fn with_reconstruction(mut self, mode: Reconstruction) -> Self {
        self.options.reconstruction = mode;
        self
    }
    pub fn build(self) -> Engine {
        Engine::with_options(self.algorithm, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_options() {
        let engine = EngineBuilder::new(Algorithm::WordRam)
            .with_time_limit(Duration::from_secs(1))
            .with_step_limit(100)
            .with_verbosity(1)
            .with_reconstruction(Reconstruction::Replay)
            .build();
        assert_eq!(engine.algorithm(), Algorithm::WordRam);
        let opts = engine.options();
        assert_eq!(opts.time_limit, Some(Duration::from_secs(1)));
        assert_eq!(opts.step_limit, Some(100));
        assert_eq!(opts.verbosity_level, 1);
        assert_eq!(opts.reconstruction, Reconstruction::Replay);
    }

    #[test]
    fn later_setters_override_options() {
        let engine = EngineBuilder::new(Algorithm::List)
            .with_options(SolveOptions::new().with_verbosity(2))
            .with_verbosity(0)
            .build();
        assert_eq!(engine.options().verbosity_level, 0);
    }
}
