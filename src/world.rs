//! Grid world state for the Karel robot.
//!
//! A [`World`] is a fixed-shape grid of cells. Each cell is either a wall or
//! clear; clear cells hold zero or more markers. Exactly one robot (the
//! "hero") stands on a clear cell, facing one of four directions. Worlds are
//! plain value types: two worlds are equal iff every cell, the hero position
//! and the hero orientation match.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum markers a single cell can hold.
pub const MAX_MARKERS: u8 = 9;

/// Probability that a cell is generated as a wall.
const WALL_PROB: f64 = 0.1;

/// Probability that a clear cell is generated with markers on it.
const MARKER_PROB: f64 = 0.1;

/// Hero orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Orientation after a 90-degree left turn.
    pub fn left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Orientation after a 90-degree right turn.
    pub fn right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Unit step in this direction. North is up, i.e. decreasing y.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    fn glyph(self) -> char {
        match self {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}

/// Fixed-shape grid state: walls, markers and the hero pose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    markers: Vec<u8>,
    hero: (usize, usize),
    dir: Direction,
}

impl World {
    /// An empty world: no walls, no markers, hero at the origin facing east.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "world shape must be non-degenerate");
        Self {
            width,
            height,
            walls: vec![false; width * height],
            markers: vec![0; width * height],
            hero: (0, 0),
            dir: Direction::East,
        }
    }

    /// A randomly initialized world of the given shape.
    ///
    /// Cells become walls with a fixed probability, clear cells receive a
    /// random marker count with a fixed probability, and the hero is placed
    /// on a random clear cell with a random orientation. At least one cell
    /// is always kept clear for the hero.
    pub fn random(rng: &mut impl Rng, width: usize, height: usize) -> Self {
        let mut world = Self::new(width, height);
        for i in 0..width * height {
            world.walls[i] = rng.gen_bool(WALL_PROB);
        }
        // Guarantee a standing spot before placing markers and the hero.
        if world.walls.iter().all(|&w| w) {
            world.walls[rng.gen_range(0..width * height)] = false;
        }
        let clear: Vec<usize> = (0..width * height).filter(|&i| !world.walls[i]).collect();
        for &i in &clear {
            if rng.gen_bool(MARKER_PROB) {
                world.markers[i] = rng.gen_range(1..=MAX_MARKERS);
            }
        }
        let spot = clear[rng.gen_range(0..clear.len())];
        world.hero = (spot % width, spot / width);
        world.dir = match rng.gen_range(0..4) {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        };
        world
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Hero position as (x, y).
    pub fn hero(&self) -> (usize, usize) {
        self.hero
    }

    /// Hero orientation.
    pub fn dir(&self) -> Direction {
        self.dir
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Whether (x, y) is inside the grid and not a wall.
    pub fn is_clear(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && !self.walls[(y as usize) * self.width + x as usize]
    }

    /// Marker count on the hero's cell.
    pub fn markers_here(&self) -> u8 {
        let (x, y) = self.hero;
        self.markers[self.idx(x, y)]
    }

    /// Marker count at (x, y).
    pub fn marker_count(&self, x: usize, y: usize) -> u8 {
        self.markers[self.idx(x, y)]
    }

    /// The cell one step ahead of the hero.
    pub fn front(&self) -> (i64, i64) {
        let (dx, dy) = self.dir.delta();
        (self.hero.0 as i64 + dx, self.hero.1 as i64 + dy)
    }

    /// Whether the cell ahead of the hero is clear.
    pub fn front_is_clear(&self) -> bool {
        let (x, y) = self.front();
        self.is_clear(x, y)
    }

    /// Whether the cell to the hero's left is clear.
    pub fn left_is_clear(&self) -> bool {
        let (dx, dy) = self.dir.left().delta();
        self.is_clear(self.hero.0 as i64 + dx, self.hero.1 as i64 + dy)
    }

    /// Whether the cell to the hero's right is clear.
    pub fn right_is_clear(&self) -> bool {
        let (dx, dy) = self.dir.right().delta();
        self.is_clear(self.hero.0 as i64 + dx, self.hero.1 as i64 + dy)
    }

    /// Advance the hero one cell. Returns false (world unchanged) when the
    /// cell ahead is a wall or outside the grid.
    pub fn move_forward(&mut self) -> bool {
        let (x, y) = self.front();
        if !self.is_clear(x, y) {
            return false;
        }
        self.hero = (x as usize, y as usize);
        true
    }

    /// Rotate the hero 90 degrees counterclockwise.
    pub fn turn_left(&mut self) {
        self.dir = self.dir.left();
    }

    /// Rotate the hero 90 degrees clockwise.
    pub fn turn_right(&mut self) {
        self.dir = self.dir.right();
    }

    /// Remove one marker from the hero's cell. Returns false when the cell
    /// holds no markers.
    pub fn pick_marker(&mut self) -> bool {
        let i = self.idx(self.hero.0, self.hero.1);
        if self.markers[i] == 0 {
            return false;
        }
        self.markers[i] -= 1;
        true
    }

    /// Add one marker to the hero's cell. Returns false when the cell is at
    /// the marker cap.
    pub fn put_marker(&mut self) -> bool {
        let i = self.idx(self.hero.0, self.hero.1);
        if self.markers[i] >= MAX_MARKERS {
            return false;
        }
        self.markers[i] += 1;
        true
    }

    /// Turn (x, y) into a wall. Test and world-building helper.
    pub fn set_wall(&mut self, x: usize, y: usize) {
        let i = self.idx(x, y);
        self.walls[i] = true;
    }

    /// Set the marker count at (x, y). Test and world-building helper.
    pub fn set_markers(&mut self, x: usize, y: usize, count: u8) {
        let i = self.idx(x, y);
        self.markers[i] = count.min(MAX_MARKERS);
    }

    /// Place the hero at (x, y) with the given orientation.
    pub fn place_hero(&mut self, x: usize, y: usize, dir: Direction) {
        self.hero = (x, y);
        self.dir = dir;
    }

    /// ASCII rendering, one string per row: `#` wall, `.` clear, a digit for
    /// markers, and `^ > v <` for the hero.
    pub fn render(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        if self.hero == (x, y) {
                            self.dir.glyph()
                        } else if self.walls[self.idx(x, y)] {
                            '#'
                        } else if self.markers[self.idx(x, y)] > 0 {
                            char::from(b'0' + self.markers[self.idx(x, y)])
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_equality_is_structural() {
        let mut a = World::new(4, 3);
        let mut b = World::new(4, 3);
        assert_eq!(a, b);

        a.set_markers(2, 1, 3);
        assert_ne!(a, b);
        b.set_markers(2, 1, 3);
        assert_eq!(a, b);

        a.turn_left();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_hero_stands_on_clear_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let world = World::random(&mut rng, 8, 8);
            let (x, y) = world.hero();
            assert!(world.is_clear(x as i64, y as i64));
        }
    }

    #[test]
    fn test_random_is_deterministic_for_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(World::random(&mut a, 6, 6), World::random(&mut b, 6, 6));
    }

    #[test]
    fn test_move_blocked_by_border() {
        let mut world = World::new(2, 1);
        world.place_hero(1, 0, Direction::East);
        assert!(!world.move_forward());
        assert_eq!(world.hero(), (1, 0));
    }

    #[test]
    fn test_marker_cap() {
        let mut world = World::new(1, 1);
        world.set_markers(0, 0, MAX_MARKERS);
        assert!(!world.put_marker());
        assert!(world.pick_marker());
        assert_eq!(world.markers_here(), MAX_MARKERS - 1);
    }

    #[test]
    fn test_render_shape_and_glyphs() {
        let mut world = World::new(3, 2);
        world.set_wall(2, 0);
        world.set_markers(1, 1, 5);
        world.place_hero(0, 0, Direction::South);

        let rows = world.render();
        assert_eq!(rows, vec!["v.#", ".5."]);
    }
}
