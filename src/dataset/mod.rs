//! Dataset generation engine.
//!
//! Turns random programs into fixed-size batches of (input world, output
//! world) training pairs, under a per-pair attempt cutoff and a per-batch
//! no-change quota, then folds batches into split-level parallel arrays for
//! serialization. Layered bottom-up:
//!
//! - [`sampler`]: one accepted pair per call, or [`SamplingExhausted`]
//! - [`batch`]: one complete batch per program, abandoning the draft
//!   wholesale when a slot exhausts its budget
//! - [`driver`]: batches until a split reaches its target size
//! - [`archive`]: parallel-array archives and code listings on disk
//!
//! The engine touches its collaborators only through the [`CodeSource`] and
//! [`WorldOracle`] seams in [`oracle`].

pub mod archive;
pub mod batch;
pub mod driver;
pub mod oracle;
pub mod sampler;

pub use archive::{write_listing, write_split, SplitArchive};
pub use batch::assemble_batch;
pub use driver::{generate_split, SplitData};
pub use oracle::{CodeSource, GrammarSource, KarelOracle, RunOutcome, WorldOracle};
pub use sampler::{sample_pair, SamplingExhausted};

use crate::dsl::Program;
use crate::world::World;
use thiserror::Error;

/// Generation and serialization errors. Per-attempt and per-batch failures
/// are absorbed below this level; everything here is fatal for its split.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("no batch completed after {attempts} candidate programs ({cutoff} attempts per example)")]
    BatchAttemptsExhausted { attempts: usize, cutoff: usize },

    #[error("split `{split}` accumulated {len} pairs, not a multiple of group size {num_examples}")]
    MisalignedSplit {
        split: String,
        len: usize,
        num_examples: usize,
    },

    #[error("parallel arrays disagree: {inputs} inputs, {outputs} outputs, {codes} codes, {code_lengths} code lengths")]
    MismatchedArrays {
        inputs: usize,
        outputs: usize,
        codes: usize,
        code_lengths: usize,
    },

    #[error("failed to access dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode dataset archive: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One training example: the world before and after executing the batch's
/// program. Snapshotted out of the oracle at acceptance time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub input: World,
    pub output: World,
}

impl Pair {
    /// Whether execution left the world untouched.
    pub fn is_unchanged(&self) -> bool {
        self.input == self.output
    }
}

/// A completed batch: one program and exactly `num_examples` accepted pairs.
#[derive(Debug, Clone)]
pub struct Batch {
    pub program: Program,
    pub pairs: Vec<Pair>,
}

impl Batch {
    /// Number of accepted pairs with `input == output`.
    pub fn unchanged_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_unchanged()).count()
    }
}

/// Knobs for the sampling engine, shared by batch assembly and the driver.
#[derive(Debug, Clone)]
pub struct GenParams {
    /// Pairs per batch (and per program).
    pub num_examples: usize,
    /// Target fraction of pairs per batch where execution changes nothing.
    pub no_change_fraction: f64,
    /// World-initialization attempts per pair before giving up on a program.
    pub cutoff: usize,
    /// Candidate programs per batch before giving up on the split.
    pub max_batch_attempts: usize,
    /// Statement nesting bound handed to the code source.
    pub max_depth: usize,
    /// World shape.
    pub width: usize,
    pub height: usize,
}

impl GenParams {
    /// Per-batch allowance for accepted pairs with `input == output`.
    pub fn no_change_quota(&self) -> usize {
        (self.no_change_fraction * self.num_examples as f64).round() as usize
    }
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            num_examples: 10,
            no_change_fraction: 0.2,
            cutoff: 10_000,
            max_batch_attempts: 1_000,
            max_depth: 5,
            width: 8,
            height: 8,
        }
    }
}
