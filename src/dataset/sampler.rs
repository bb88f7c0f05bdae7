//! Pair sampling: one accepted (input, output) world pair per call.

use super::oracle::{RunOutcome, WorldOracle};
use super::Pair;
use crate::dsl::Program;
use thiserror::Error;

/// No acceptable pair was found within the attempt budget. Recoverable at
/// batch granularity: the caller abandons the program and picks a new one.
#[derive(Debug, Clone, Copy, Error)]
#[error("no acceptable world pair within {attempts} attempts")]
pub struct SamplingExhausted {
    pub attempts: usize,
}

/// Sample one accepted pair for `program`.
///
/// Each attempt initializes a fresh world of the given shape, snapshots it,
/// and executes the program. Execution failures (timeout, illegal action)
/// and policy rejections (unchanged world while `allow_unchanged` is false)
/// both discard the attempt and consume one unit of `cutoff`. The accepted
/// pair's worlds are copies, detached from the oracle's working state.
pub fn sample_pair(
    oracle: &mut dyn WorldOracle,
    program: &Program,
    width: usize,
    height: usize,
    allow_unchanged: bool,
    cutoff: usize,
) -> Result<Pair, SamplingExhausted> {
    for _ in 0..cutoff {
        oracle.new_game(width, height);
        let input = oracle.get_state();
        match oracle.run(program) {
            RunOutcome::Timeout | RunOutcome::Invalid => continue,
            RunOutcome::Ok => {}
        }
        let output = oracle.get_state();
        if input == output && !allow_unchanged {
            continue;
        }
        return Ok(Pair { input, output });
    }
    Err(SamplingExhausted { attempts: cutoff })
}
