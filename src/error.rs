use thiserror::Error;

use crate::color::Color;
use crate::direction::Direction;
use crate::point::Point;

/// Broad class of an [`Error`], so callers can tell bad input from internal defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The board, palette or starting robots were rejected before searching.
    Configuration,
    /// The move simulator broke one of its own invariants.
    Simulation,
    /// The search records are corrupt and no path can be trusted.
    Consistency,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{point} is outside the {width}x{height} board")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    #[error("palette must not be empty")]
    EmptyPalette,

    #[error("palette lists {0} more than once")]
    DuplicateColor(Color),

    #[error("board has no target")]
    MissingTarget,

    #[error("target color {0} does not match any robot")]
    UnknownTargetColor(Color),

    #[error("no robot is painted {0}")]
    UnknownRobot(Color),

    #[error("expected {expected} robots, got {found}")]
    RobotCount { expected: usize, found: usize },

    #[error("robots {first} and {second} both occupy {point}")]
    RobotsOverlap {
        first: Color,
        second: Color,
        point: Point,
    },

    #[error("{width}x{height} board with {robots} robots does not fit in a 64-bit state")]
    StateTooWide {
        width: usize,
        height: usize,
        robots: usize,
    },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("robot {robot} moving {direction} stopped on occupied cell {point}")]
    Collision {
        robot: Color,
        direction: Direction,
        point: Point,
    },

    #[error("state {0:#x} has no search record")]
    MissingRecord(u64),

    #[error("search records loop back through state {0:#x}")]
    RecordCycle(u64),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Collision { .. } => ErrorKind::Simulation,
            Error::MissingRecord(_) | Error::RecordCycle(_) => ErrorKind::Consistency,
            _ => ErrorKind::Configuration,
        }
    }
}
