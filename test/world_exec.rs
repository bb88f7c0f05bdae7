//! Interpreter Execution Tests
//!
//! Tests that run programs through the interpreter against hand-built
//! worlds and verify the resulting world state. These validate the action
//! and predicate semantics the sampling engine relies on.

use karel::dsl::{Action, Cond, Program, Stmt};
use karel::interp::{ExecResult, Interpreter};
use karel::world::{Direction, World};

/// Helper to run a program and return the final world, asserting success.
fn run_ok(mut world: World, program: Program) -> World {
    let result = Interpreter::new().execute(&mut world, &program);
    assert_eq!(result, ExecResult::Ok, "execution failed: {:?}", result);
    world
}

fn action(a: Action) -> Stmt {
    Stmt::Action(a)
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_exec_move_advances_one_cell() {
    let mut world = World::new(4, 4);
    world.place_hero(1, 2, Direction::East);

    let world = run_ok(world, Program::new(vec![action(Action::Move)]));
    assert_eq!(world.hero(), (2, 2));
}

#[test]
fn test_exec_move_north_decreases_y() {
    let mut world = World::new(4, 4);
    world.place_hero(2, 2, Direction::North);

    let world = run_ok(world, Program::new(vec![action(Action::Move)]));
    assert_eq!(world.hero(), (2, 1));
}

#[test]
fn test_exec_move_into_wall_fails() {
    let mut world = World::new(4, 1);
    world.set_wall(2, 0);
    world.place_hero(1, 0, Direction::East);

    let result = Interpreter::new().execute(&mut world, &Program::new(vec![action(Action::Move)]));
    assert_eq!(result, ExecResult::BlockedMove);
    assert_eq!(world.hero(), (1, 0));
}

#[test]
fn test_exec_move_off_grid_fails() {
    let mut world = World::new(3, 3);
    world.place_hero(0, 0, Direction::West);

    let result = Interpreter::new().execute(&mut world, &Program::new(vec![action(Action::Move)]));
    assert_eq!(result, ExecResult::BlockedMove);
}

#[test]
fn test_exec_four_left_turns_restore_orientation() {
    let world = {
        let mut w = World::new(3, 3);
        w.place_hero(1, 1, Direction::North);
        w
    };
    let turned = run_ok(
        world.clone(),
        Program::new(vec![action(Action::TurnLeft); 4]),
    );
    assert_eq!(turned, world);
}

#[test]
fn test_exec_turn_left_then_right_is_identity() {
    let world = {
        let mut w = World::new(3, 3);
        w.place_hero(1, 1, Direction::South);
        w
    };
    let turned = run_ok(
        world.clone(),
        Program::new(vec![action(Action::TurnLeft), action(Action::TurnRight)]),
    );
    assert_eq!(turned, world);
}

#[test]
fn test_exec_pick_and_put_markers() {
    let mut world = World::new(2, 2);
    world.set_markers(0, 0, 2);
    world.place_hero(0, 0, Direction::East);

    let world = run_ok(
        world,
        Program::new(vec![
            action(Action::PickMarker),
            action(Action::PickMarker),
            action(Action::PutMarker),
        ]),
    );
    assert_eq!(world.marker_count(0, 0), 1);
}

#[test]
fn test_exec_pick_on_empty_cell_fails() {
    let mut world = World::new(2, 2);
    world.place_hero(1, 1, Direction::East);

    let result =
        Interpreter::new().execute(&mut world, &Program::new(vec![action(Action::PickMarker)]));
    assert_eq!(result, ExecResult::EmptyCellPick);
}

#[test]
fn test_exec_put_on_full_cell_fails() {
    let mut world = World::new(2, 2);
    world.set_markers(0, 0, 9);
    world.place_hero(0, 0, Direction::East);

    let result =
        Interpreter::new().execute(&mut world, &Program::new(vec![action(Action::PutMarker)]));
    assert_eq!(result, ExecResult::FullCellPut);
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_exec_repeat_runs_body_n_times() {
    let mut world = World::new(8, 1);
    world.place_hero(0, 0, Direction::East);

    let world = run_ok(
        world,
        Program::new(vec![Stmt::Repeat(5, vec![action(Action::Move)])]),
    );
    assert_eq!(world.hero(), (5, 0));
}

#[test]
fn test_exec_while_drains_markers() {
    let mut world = World::new(2, 2);
    world.set_markers(0, 0, 7);
    world.place_hero(0, 0, Direction::East);

    let world = run_ok(
        world,
        Program::new(vec![Stmt::While(
            Cond::MarkersPresent,
            vec![action(Action::PickMarker)],
        )]),
    );
    assert_eq!(world.marker_count(0, 0), 0);
}

#[test]
fn test_exec_while_front_is_clear_walks_to_border() {
    let mut world = World::new(6, 1);
    world.place_hero(0, 0, Direction::East);

    let world = run_ok(
        world,
        Program::new(vec![Stmt::While(
            Cond::FrontIsClear,
            vec![action(Action::Move)],
        )]),
    );
    assert_eq!(world.hero(), (5, 0));
}

#[test]
fn test_exec_if_takes_branch_only_when_true() {
    let mut blocked = World::new(2, 1);
    blocked.place_hero(1, 0, Direction::East);
    let program = Program::new(vec![Stmt::If(
        Cond::FrontIsClear,
        vec![action(Action::Move)],
    )]);

    // Facing the border: condition false, body skipped, nothing changes.
    let after = run_ok(blocked.clone(), program.clone());
    assert_eq!(after, blocked);

    // Facing a clear cell: body runs.
    let mut open = World::new(2, 1);
    open.place_hero(0, 0, Direction::East);
    let after = run_ok(open, program);
    assert_eq!(after.hero(), (1, 0));
}

#[test]
fn test_exec_ifelse_takes_exactly_one_branch() {
    let program = Program::new(vec![Stmt::IfElse(
        Cond::MarkersPresent,
        vec![action(Action::PickMarker)],
        vec![action(Action::PutMarker)],
    )]);

    let mut with_marker = World::new(2, 2);
    with_marker.set_markers(0, 0, 1);
    with_marker.place_hero(0, 0, Direction::East);
    let after = run_ok(with_marker, program.clone());
    assert_eq!(after.marker_count(0, 0), 0);

    let mut without_marker = World::new(2, 2);
    without_marker.place_hero(0, 0, Direction::East);
    let after = run_ok(without_marker, program);
    assert_eq!(after.marker_count(0, 0), 1);
}

#[test]
fn test_exec_not_inverts_predicate() {
    let mut world = World::new(2, 2);
    world.place_hero(0, 0, Direction::East);

    // No markers here, so `not markersPresent` is true and the body runs.
    let world = run_ok(
        world,
        Program::new(vec![Stmt::If(
            Cond::Not(Box::new(Cond::MarkersPresent)),
            vec![action(Action::PutMarker)],
        )]),
    );
    assert_eq!(world.marker_count(0, 0), 1);
}

#[test]
fn test_exec_infinite_loop_hits_step_budget() {
    let mut world = World::new(3, 3);
    world.place_hero(1, 1, Direction::East);

    let program = Program::new(vec![Stmt::While(
        Cond::NoMarkersPresent,
        vec![action(Action::TurnLeft)],
    )]);
    let result = Interpreter::new()
        .with_max_steps(1_000)
        .execute(&mut world, &program);
    assert_eq!(result, ExecResult::MaxStepsExceeded);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_exec_is_deterministic_on_equal_worlds() {
    let mut seed_world = World::new(5, 5);
    seed_world.set_markers(2, 2, 3);
    seed_world.set_wall(4, 4);
    seed_world.place_hero(2, 2, Direction::North);

    let program = Program::new(vec![
        Stmt::While(Cond::MarkersPresent, vec![action(Action::PickMarker)]),
        Stmt::Repeat(2, vec![action(Action::TurnRight)]),
        Stmt::If(Cond::FrontIsClear, vec![action(Action::Move)]),
    ]);

    let a = run_ok(seed_world.clone(), program.clone());
    let b = run_ok(seed_world, program);
    assert_eq!(a, b);
}
