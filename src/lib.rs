//! Karel - grid-world training data for program synthesis
//!
//! Generates labeled training data for program-synthesis models over the
//! Karel grid-world robot language: triples of (program, input world,
//! output world), grouped so that every program contributes a fixed-size
//! batch of examples.
//!
//! # Pipeline
//!
//! ```text
//! ┌───────────────┐   random_code    ┌────────────────┐
//! │ GrammarSource │ ───────────────▶ │ assemble_batch │  num_examples slots,
//! └───────────────┘                  └───────┬────────┘  no-change quota
//!                                            ▼
//! ┌───────────────┐  new_game/run    ┌────────────────┐
//! │  KarelOracle  │ ◀─────────────── │  sample_pair   │  cutoff attempts
//! └───────────────┘                  └───────┬────────┘
//!                                            ▼
//!                                    ┌────────────────┐
//!                                    │ generate_split │  group alignment
//!                                    └───────┬────────┘
//!                                            ▼
//!                                     archive + listing
//! ```
//!
//! A pair is accepted only if the program executes successfully on a fresh
//! random world; worlds left unchanged by execution are admitted only while
//! the batch's no-change quota lasts. A program whose pair sampling
//! exhausts its attempt cutoff is abandoned wholesale and replaced.
//!
//! # Example
//!
//! ```rust
//! use karel::dataset::{assemble_batch, GenParams, GrammarSource, KarelOracle};
//!
//! let mut codes = GrammarSource::new(42);
//! let mut oracle = KarelOracle::new(43);
//! let params = GenParams {
//!     num_examples: 2,
//!     width: 6,
//!     height: 6,
//!     ..GenParams::default()
//! };
//!
//! let batch = assemble_batch(&mut codes, &mut oracle, &params).unwrap();
//! assert_eq!(batch.pairs.len(), 2);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod dataset;
pub mod dsl;
pub mod interp;
pub mod world;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, KarelConfig};
pub use dataset::{
    assemble_batch, generate_split, sample_pair, Batch, CodeSource, GenError, GenParams,
    GrammarSource, KarelOracle, Pair, RunOutcome, SamplingExhausted, SplitArchive, SplitData,
    WorldOracle,
};
pub use dsl::{random_code, GrammarVariant, Program};
pub use interp::{ExecResult, Interpreter};
pub use world::{Direction, World};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
