use std::fmt;
use std::time::Instant;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::codec::StateCodec;
use crate::color::{Color, Palette};
use crate::direction::Direction;
use crate::error::Error;
use crate::point::Point;

mod parallel;
pub mod path;
mod sequential;
mod space;

use space::StateSpace;

/// One slide: which robot, and which way it was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub robot: Color,
    pub direction: Direction,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.robot, self.direction)
    }
}

/// How a state was first discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Root,
    Step { parent: u64, step: Move },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solution {
    /// A shortest non-empty sequence of moves.
    Solved(Vec<Move>),
    /// The target robot already sits on the target.
    AlreadySolved,
    /// No sequence of moves reaches the target.
    Unreachable,
}

impl From<Vec<Move>> for Solution {
    fn from(moves: Vec<Move>) -> Solution {
        if moves.is_empty() {
            Solution::AlreadySolved
        } else {
            Solution::Solved(moves)
        }
    }
}

impl Solution {
    pub fn moves(&self) -> &[Move] {
        match self {
            Solution::Solved(moves) => moves,
            _ => &[],
        }
    }

    pub fn is_reachable(&self) -> bool {
        !matches!(self, Solution::Unreachable)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverMode {
    Sequential,
    #[default]
    Parallel,
}

impl TryFrom<&str> for SolverMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "s" | "seq" | "sequential" => Ok(SolverMode::Sequential),
            "p" | "par" | "parallel" => Ok(SolverMode::Parallel),
            _ => Err(anyhow!("Invalid solver mode: {value}")),
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMode::Sequential => f.write_str("sequential"),
            SolverMode::Parallel => f.write_str("parallel"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SearchStats {
    pub states: usize,
    pub depth: usize,
}

/// Shortest-path solver for one board and one starting configuration.
///
/// All validation happens in the constructors, so a `Solver` that exists can always run.
#[derive(Debug)]
pub struct Solver {
    space: StateSpace,
    initial: u64,
    mode: SolverMode,
    threads: usize,
    stats: SearchStats,
    time_spent: f32,
}

impl Solver {
    /// Solver for the standard five robots, `robots` in red, blue, green, yellow, purple order.
    pub fn new(board: Board, robots: &[Point]) -> Result<Solver, Error> {
        Solver::with_palette(board, Palette::default(), robots)
    }

    pub fn with_palette(board: Board, palette: Palette, robots: &[Point]) -> Result<Solver, Error> {
        let target = board.target().ok_or(Error::MissingTarget)?;
        let target_robot = palette
            .index_of(target.color)
            .ok_or(Error::UnknownTargetColor(target.color))?;

        if robots.len() != palette.len() {
            return Err(Error::RobotCount {
                expected: palette.len(),
                found: robots.len(),
            });
        }

        for (i, point) in robots.iter().enumerate() {
            if !board.contains(*point) {
                return Err(Error::OutOfBounds {
                    point: *point,
                    width: board.width(),
                    height: board.height(),
                });
            }

            if let Some(j) = robots[..i].iter().position(|other| other == point) {
                return Err(Error::RobotsOverlap {
                    first: palette.color(j),
                    second: palette.color(i),
                    point: *point,
                });
            }
        }

        let codec = StateCodec::new(board.width(), board.height(), palette.len())?;
        let initial = codec.encode(robots);

        Ok(Solver {
            space: StateSpace {
                board,
                palette,
                codec,
                target,
                target_robot,
            },
            initial,
            mode: SolverMode::default(),
            threads: 0,
            stats: SearchStats::default(),
            time_spent: 0.0,
        })
    }

    pub fn set_mode(&mut self, mode: SolverMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Worker count for the parallel engine, 0 for rayon's default.
    pub fn set_threads(&mut self, threads: usize) -> &mut Self {
        self.threads = threads;
        self
    }

    pub fn solve(&mut self) -> Result<Solution, Error> {
        let start = Instant::now();

        let result = match self.mode {
            SolverMode::Sequential => sequential::solve(&self.space, self.initial),
            SolverMode::Parallel => parallel::solve(&self.space, self.initial, self.threads),
        };
        self.time_spent += start.elapsed().as_secs_f32();

        let (solution, stats) = result?;
        self.stats = stats;

        log::debug!(
            "{} search: {} states, depth {}, {:.3} seconds",
            self.mode,
            stats.states,
            stats.depth,
            self.time_spent
        );

        Ok(solution)
    }

    pub fn mode(&self) -> SolverMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.space.board
    }

    pub fn palette(&self) -> &Palette {
        &self.space.palette
    }

    pub fn robots(&self) -> Vec<Point> {
        self.space.codec.decode(self.initial)
    }

    /// Number of distinct states recorded by the last search.
    pub fn states_checked(&self) -> usize {
        self.stats.states
    }

    /// Deepest level the last search reached.
    pub fn depth(&self) -> usize {
        self.stats.depth
    }

    pub fn time_spent(&self) -> f32 {
        self.time_spent
    }
}
