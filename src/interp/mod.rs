//! Program execution against a world.
//!
//! A tree-walking interpreter over the program AST. Every statement
//! execution consumes one step of a fixed budget, so `while` loops cannot
//! spin forever. Outcomes are a tagged result rather than an error type:
//! budget exhaustion and illegal actions are expected, recoverable events
//! for the sampling layer above.

use crate::dsl::{Action, Cond, Program, Stmt};
use crate::world::World;

/// Default statement budget per execution.
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Interpreter execution result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecResult {
    /// Normal completion.
    Ok,
    /// Statement budget exceeded.
    MaxStepsExceeded,
    /// `move` into a wall or off the grid.
    BlockedMove,
    /// `pickMarker` on a cell with no markers.
    EmptyCellPick,
    /// `putMarker` on a cell at the marker cap.
    FullCellPut,
}

impl ExecResult {
    pub fn is_ok(self) -> bool {
        matches!(self, ExecResult::Ok)
    }
}

/// Executes programs under a statement budget.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    max_steps: u64,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Set the statement budget.
    pub fn with_max_steps(mut self, max: u64) -> Self {
        self.max_steps = max;
        self
    }

    /// Run a program against a world, mutating it in place. On a non-`Ok`
    /// result the world is left in whatever state execution reached.
    pub fn execute(&self, world: &mut World, program: &Program) -> ExecResult {
        let mut steps = 0u64;
        self.run_block(world, &program.body, &mut steps)
    }

    fn run_block(&self, world: &mut World, stmts: &[Stmt], steps: &mut u64) -> ExecResult {
        for stmt in stmts {
            let result = self.run_stmt(world, stmt, steps);
            if !result.is_ok() {
                return result;
            }
        }
        ExecResult::Ok
    }

    fn run_stmt(&self, world: &mut World, stmt: &Stmt, steps: &mut u64) -> ExecResult {
        *steps += 1;
        if *steps > self.max_steps {
            return ExecResult::MaxStepsExceeded;
        }
        match stmt {
            Stmt::Action(action) => run_action(world, *action),
            Stmt::Repeat(count, body) => {
                for _ in 0..*count {
                    let result = self.run_block(world, body, steps);
                    if !result.is_ok() {
                        return result;
                    }
                }
                ExecResult::Ok
            }
            Stmt::While(cond, body) => {
                while eval(world, cond) {
                    let result = self.run_block(world, body, steps);
                    if !result.is_ok() {
                        return result;
                    }
                }
                ExecResult::Ok
            }
            Stmt::If(cond, body) => {
                if eval(world, cond) {
                    self.run_block(world, body, steps)
                } else {
                    ExecResult::Ok
                }
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                if eval(world, cond) {
                    self.run_block(world, then_body, steps)
                } else {
                    self.run_block(world, else_body, steps)
                }
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn run_action(world: &mut World, action: Action) -> ExecResult {
    match action {
        Action::Move => {
            if world.move_forward() {
                ExecResult::Ok
            } else {
                ExecResult::BlockedMove
            }
        }
        Action::TurnLeft => {
            world.turn_left();
            ExecResult::Ok
        }
        Action::TurnRight => {
            world.turn_right();
            ExecResult::Ok
        }
        Action::PickMarker => {
            if world.pick_marker() {
                ExecResult::Ok
            } else {
                ExecResult::EmptyCellPick
            }
        }
        Action::PutMarker => {
            if world.put_marker() {
                ExecResult::Ok
            } else {
                ExecResult::FullCellPut
            }
        }
    }
}

/// Evaluate a predicate against the hero's current pose.
pub fn eval(world: &World, cond: &Cond) -> bool {
    match cond {
        Cond::FrontIsClear => world.front_is_clear(),
        Cond::LeftIsClear => world.left_is_clear(),
        Cond::RightIsClear => world.right_is_clear(),
        Cond::MarkersPresent => world.markers_here() > 0,
        Cond::NoMarkersPresent => world.markers_here() == 0,
        Cond::Not(inner) => !eval(world, inner),
    }
}
