//! Depth-bounded random program generation.

use super::ast::{Action, Cond, Program, Stmt};
use super::format::{REPEAT_MAX, REPEAT_MIN};
use rand::Rng;

/// Statements per block.
const BLOCK_MIN: usize = 1;
const BLOCK_MAX: usize = 4;

/// Chance that a condition is wrapped in `not`.
const NEGATE_PROB: f64 = 0.25;

/// Generate a random program whose statement nesting never exceeds
/// `max_depth`. With `max_depth <= 1` the program is a flat action sequence.
pub fn random_code(rng: &mut impl Rng, max_depth: usize) -> Program {
    Program::new(random_block(rng, max_depth.max(1)))
}

fn random_block(rng: &mut impl Rng, depth: usize) -> Vec<Stmt> {
    let len = rng.gen_range(BLOCK_MIN..=BLOCK_MAX);
    (0..len).map(|_| random_stmt(rng, depth)).collect()
}

fn random_stmt(rng: &mut impl Rng, depth: usize) -> Stmt {
    if depth <= 1 {
        return Stmt::Action(random_action(rng));
    }
    // Actions keep the majority share so deep programs stay executable.
    match rng.gen_range(0..8) {
        0 => Stmt::Repeat(
            rng.gen_range(REPEAT_MIN..=REPEAT_MAX),
            random_block(rng, depth - 1),
        ),
        1 => Stmt::While(random_cond(rng), random_block(rng, depth - 1)),
        2 => Stmt::If(random_cond(rng), random_block(rng, depth - 1)),
        3 => Stmt::IfElse(
            random_cond(rng),
            random_block(rng, depth - 1),
            random_block(rng, depth - 1),
        ),
        _ => Stmt::Action(random_action(rng)),
    }
}

fn random_action(rng: &mut impl Rng) -> Action {
    match rng.gen_range(0..5) {
        0 => Action::Move,
        1 => Action::TurnLeft,
        2 => Action::TurnRight,
        3 => Action::PickMarker,
        _ => Action::PutMarker,
    }
}

fn random_cond(rng: &mut impl Rng) -> Cond {
    let base = match rng.gen_range(0..5) {
        0 => Cond::FrontIsClear,
        1 => Cond::LeftIsClear,
        2 => Cond::RightIsClear,
        3 => Cond::MarkersPresent,
        _ => Cond::NoMarkersPresent,
    };
    if rng.gen_bool(NEGATE_PROB) {
        Cond::Not(Box::new(base))
    } else {
        base
    }
}
