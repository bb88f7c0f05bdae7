//! Batch assembly: one program, `num_examples` accepted pairs.

use super::oracle::{CodeSource, WorldOracle};
use super::sampler::{sample_pair, SamplingExhausted};
use super::{Batch, GenError, GenParams, Pair};
use crate::dsl::Program;

/// An in-progress batch: the candidate program, its remaining no-change
/// allowance and the pairs accepted so far. Owned by value and dropped
/// wholesale when any slot exhausts its attempt budget; no partial state
/// survives an abandoned program.
struct Draft {
    program: Program,
    quota: usize,
    pairs: Vec<Pair>,
}

impl Draft {
    fn new(program: Program, params: &GenParams) -> Self {
        Self {
            program,
            quota: params.no_change_quota(),
            pairs: Vec::with_capacity(params.num_examples),
        }
    }

    fn accept(&mut self, pair: Pair) {
        if pair.is_unchanged() {
            self.quota = self.quota.saturating_sub(1);
        }
        self.pairs.push(pair);
    }
}

/// Assemble one complete batch.
///
/// Requests a program, then fills `num_examples` slots sequentially; a slot
/// may accept an unchanged pair only while the draft's quota is positive.
/// When a slot exhausts its `cutoff`, the whole draft is discarded and a
/// fresh program is requested. After `max_batch_attempts` abandoned
/// programs the split is considered unproducible and a fatal error is
/// returned.
pub fn assemble_batch(
    codes: &mut dyn CodeSource,
    oracle: &mut dyn WorldOracle,
    params: &GenParams,
) -> Result<Batch, GenError> {
    'programs: for _ in 0..params.max_batch_attempts {
        let mut draft = Draft::new(codes.random_code(params.max_depth), params);
        for _ in 0..params.num_examples {
            match sample_pair(
                oracle,
                &draft.program,
                params.width,
                params.height,
                draft.quota > 0,
                params.cutoff,
            ) {
                Ok(pair) => draft.accept(pair),
                Err(SamplingExhausted { .. }) => continue 'programs,
            }
        }
        return Ok(Batch {
            program: draft.program,
            pairs: draft.pairs,
        });
    }
    Err(GenError::BatchAttemptsExhausted {
        attempts: params.max_batch_attempts,
        cutoff: params.cutoff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::oracle::RunOutcome;
    use crate::dsl::{Action, Stmt};
    use crate::world::{Direction, World};

    struct FixedSource {
        calls: usize,
    }

    impl CodeSource for FixedSource {
        fn random_code(&mut self, _max_depth: usize) -> Program {
            self.calls += 1;
            Program::new(vec![Stmt::Action(Action::Move)])
        }
    }

    /// Alternates between leaving the world untouched and moving the hero.
    struct AlternatingOracle {
        world: World,
        runs: usize,
    }

    impl WorldOracle for AlternatingOracle {
        fn new_game(&mut self, width: usize, height: usize) {
            self.world = World::new(width, height);
        }
        fn get_state(&self) -> World {
            self.world.clone()
        }
        fn run(&mut self, _program: &Program) -> RunOutcome {
            self.runs += 1;
            if self.runs % 2 == 0 {
                self.world.place_hero(1, 0, Direction::East);
            }
            RunOutcome::Ok
        }
    }

    fn params(num_examples: usize, fraction: f64) -> GenParams {
        GenParams {
            num_examples,
            no_change_fraction: fraction,
            cutoff: 100,
            max_batch_attempts: 10,
            width: 2,
            height: 1,
            ..GenParams::default()
        }
    }

    #[test]
    fn test_quota_splits_batch_between_unchanged_and_changed() {
        let mut codes = FixedSource { calls: 0 };
        let mut oracle = AlternatingOracle {
            world: World::new(2, 1),
            runs: 0,
        };
        let batch = assemble_batch(&mut codes, &mut oracle, &params(4, 0.5)).unwrap();
        assert_eq!(batch.pairs.len(), 4);
        assert_eq!(batch.unchanged_count(), 2);
        assert_eq!(codes.calls, 1);
    }

    #[test]
    fn test_zero_fraction_rejects_every_unchanged_pair() {
        let mut codes = FixedSource { calls: 0 };
        let mut oracle = AlternatingOracle {
            world: World::new(2, 1),
            runs: 0,
        };
        let batch = assemble_batch(&mut codes, &mut oracle, &params(6, 0.0)).unwrap();
        assert_eq!(batch.unchanged_count(), 0);
    }

    #[test]
    fn test_full_fraction_accepts_all_unchanged() {
        struct StaticOracle {
            world: World,
        }
        impl WorldOracle for StaticOracle {
            fn new_game(&mut self, width: usize, height: usize) {
                self.world = World::new(width, height);
            }
            fn get_state(&self) -> World {
                self.world.clone()
            }
            fn run(&mut self, _program: &Program) -> RunOutcome {
                RunOutcome::Ok
            }
        }

        let mut codes = FixedSource { calls: 0 };
        let mut oracle = StaticOracle {
            world: World::new(2, 1),
        };
        let batch = assemble_batch(&mut codes, &mut oracle, &params(5, 1.0)).unwrap();
        assert_eq!(batch.unchanged_count(), 5);
    }

    #[test]
    fn test_exhaustion_abandons_and_finally_errors() {
        // Every run times out, so every program's first slot exhausts its
        // cutoff and the assembler burns through max_batch_attempts.
        struct TimeoutOracle {
            world: World,
        }
        impl WorldOracle for TimeoutOracle {
            fn new_game(&mut self, width: usize, height: usize) {
                self.world = World::new(width, height);
            }
            fn get_state(&self) -> World {
                self.world.clone()
            }
            fn run(&mut self, _program: &Program) -> RunOutcome {
                RunOutcome::Timeout
            }
        }

        let mut codes = FixedSource { calls: 0 };
        let mut oracle = TimeoutOracle {
            world: World::new(2, 1),
        };
        let err = assemble_batch(&mut codes, &mut oracle, &params(3, 0.5)).unwrap_err();
        match err {
            GenError::BatchAttemptsExhausted { attempts, .. } => assert_eq!(attempts, 10),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(codes.calls, 10);
    }
}
