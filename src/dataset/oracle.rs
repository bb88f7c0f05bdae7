//! Collaborator seams: program source and world oracle.
//!
//! The engine sees its two collaborators only through these traits, so
//! tests can script both. The concrete implementations own their RNGs
//! explicitly; nothing in the crate touches process-global randomness.

use crate::dsl::{self, Program};
use crate::interp::{ExecResult, Interpreter};
use crate::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Outcome of executing a program against the oracle's current world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Execution completed; the oracle's world holds the result.
    Ok,
    /// Execution exceeded the oracle's internal step budget.
    Timeout,
    /// An action was illegal for the current world.
    Invalid,
}

/// Produces programs on demand.
pub trait CodeSource {
    fn random_code(&mut self, max_depth: usize) -> Program;
}

/// Holds one world, reinitializes it on demand, and executes programs
/// against it.
pub trait WorldOracle {
    /// Reset the internal world to a fresh state of the given shape.
    fn new_game(&mut self, width: usize, height: usize);

    /// Snapshot the current world as an immutable value.
    fn get_state(&self) -> World;

    /// Execute a program against the current world, mutating it in place.
    fn run(&mut self, program: &Program) -> RunOutcome;
}

/// Grammar-driven random program source.
pub struct GrammarSource {
    rng: ChaCha8Rng,
}

impl GrammarSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CodeSource for GrammarSource {
    fn random_code(&mut self, max_depth: usize) -> Program {
        dsl::random_code(&mut self.rng, max_depth)
    }
}

/// The real oracle: a randomly initialized Karel world plus the
/// step-budgeted interpreter.
pub struct KarelOracle {
    world: World,
    rng: ChaCha8Rng,
    interp: Interpreter,
}

impl KarelOracle {
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(1, 1),
            rng: ChaCha8Rng::seed_from_u64(seed),
            interp: Interpreter::new(),
        }
    }

    /// Set the interpreter's statement budget.
    pub fn with_max_steps(mut self, max: u64) -> Self {
        self.interp = self.interp.with_max_steps(max);
        self
    }
}

impl WorldOracle for KarelOracle {
    fn new_game(&mut self, width: usize, height: usize) {
        self.world = World::random(&mut self.rng, width, height);
    }

    fn get_state(&self) -> World {
        self.world.clone()
    }

    fn run(&mut self, program: &Program) -> RunOutcome {
        match self.interp.execute(&mut self.world, program) {
            ExecResult::Ok => RunOutcome::Ok,
            ExecResult::MaxStepsExceeded => RunOutcome::Timeout,
            ExecResult::BlockedMove | ExecResult::EmptyCellPick | ExecResult::FullCellPut => {
                RunOutcome::Invalid
            }
        }
    }
}
