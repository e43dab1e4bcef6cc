use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::direction::Direction;
use crate::error::Error;
use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// `\`: top-left to bottom-right.
    NwSe,
    /// `/`: top-right to bottom-left.
    NeSw,
}

impl Orientation {
    /// Travel direction after entering a deflector of this orientation.
    pub fn deflect(&self, entry: Direction) -> Direction {
        match (self, entry) {
            (Orientation::NwSe, Direction::Up) => Direction::Left,
            (Orientation::NwSe, Direction::Down) => Direction::Right,
            (Orientation::NwSe, Direction::Left) => Direction::Up,
            (Orientation::NwSe, Direction::Right) => Direction::Down,
            (Orientation::NeSw, Direction::Up) => Direction::Right,
            (Orientation::NeSw, Direction::Down) => Direction::Left,
            (Orientation::NeSw, Direction::Left) => Direction::Down,
            (Orientation::NeSw, Direction::Right) => Direction::Up,
        }
    }
}

/// A colored diagonal in one cell. Robots of the same color pass straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagonal {
    pub color: Color,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub point: Point,
    pub color: Color,
}

/// Static part of a puzzle: walls, deflectors and the target. Robots live elsewhere.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    walls: Vec<u8>,
    diagonals: FxHashMap<Point, Diagonal>,
    target: Option<Target>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Board, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Board {
            width,
            height,
            walls: vec![0; width * height],
            diagonals: FxHashMap::default(),
            target: None,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    fn check(&self, point: Point) -> Result<(), Error> {
        if self.contains(point) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                point,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Add a wall on one side of a cell, and the matching wall on the neighbor facing it.
    pub fn add_wall(&mut self, point: Point, side: Direction) -> Result<(), Error> {
        self.check(point)?;

        let index = self.index(point);
        self.walls[index] |= side.bit();

        let neighbor = point.step(side);
        if self.contains(neighbor) {
            let index = self.index(neighbor);
            self.walls[index] |= side.flip().bit();
        }

        Ok(())
    }

    pub fn add_diagonal(&mut self, point: Point, diagonal: Diagonal) -> Result<(), Error> {
        self.check(point)?;
        self.diagonals.insert(point, diagonal);
        Ok(())
    }

    pub fn set_target(&mut self, point: Point, color: Color) -> Result<(), Error> {
        self.check(point)?;
        self.target = Some(Target { point, color });
        Ok(())
    }

    /// Anything outside the board counts as walled in.
    pub fn has_wall(&self, point: Point, side: Direction) -> bool {
        if !self.contains(point) {
            return true;
        }

        self.walls[self.index(point)] & side.bit() != 0
    }

    pub fn diagonal(&self, point: Point) -> Option<Diagonal> {
        self.diagonals.get(&point).copied()
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }
}

#[cfg(test)]
mod test_board {
    use super::*;

    #[test]
    fn test_deflection_table() {
        use Direction::*;

        let nw_se = [(Up, Left), (Down, Right), (Left, Up), (Right, Down)];
        for (entry, exit) in nw_se {
            assert_eq!(Orientation::NwSe.deflect(entry), exit);
        }

        let ne_sw = [(Up, Right), (Down, Left), (Left, Down), (Right, Up)];
        for (entry, exit) in ne_sw {
            assert_eq!(Orientation::NeSw.deflect(entry), exit);
        }
    }

    #[test]
    fn test_walls_are_symmetric() {
        let mut board = Board::new(4, 4).unwrap();
        board.add_wall(Point::new(1, 1), Direction::Right).unwrap();
        board.add_wall(Point::new(1, 1), Direction::Up).unwrap();

        assert!(board.has_wall(Point::new(1, 1), Direction::Right));
        assert!(board.has_wall(Point::new(2, 1), Direction::Left));
        assert!(board.has_wall(Point::new(1, 0), Direction::Down));
        assert!(!board.has_wall(Point::new(1, 1), Direction::Down));
    }

    #[test]
    fn test_edge_wall_has_no_mirror() {
        let mut board = Board::new(2, 2).unwrap();
        board.add_wall(Point::new(0, 0), Direction::Left).unwrap();
        assert!(board.has_wall(Point::new(0, 0), Direction::Left));
        assert!(!board.has_wall(Point::new(1, 0), Direction::Left));
    }

    #[test]
    fn test_outside_is_walled() {
        let board = Board::new(2, 2).unwrap();
        assert!(board.has_wall(Point::new(-1, 0), Direction::Right));
        assert!(board.has_wall(Point::new(0, 2), Direction::Up));
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let mut board = Board::new(3, 2).unwrap();
        assert_eq!(
            board.set_target(Point::new(3, 0), Color::Red),
            Err(Error::OutOfBounds {
                point: Point::new(3, 0),
                width: 3,
                height: 2,
            })
        );
        assert!(board.target().is_none());
        assert!(Board::new(0, 4).is_err());
    }
}
