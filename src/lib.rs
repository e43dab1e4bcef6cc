pub mod board;
pub mod codec;
pub mod color;
pub mod config;
pub mod direction;
pub mod error;
pub mod parse;
pub mod point;
pub mod render;
pub mod search;
pub mod simulate;

pub use board::{Board, Diagonal, Orientation, Target};
pub use codec::StateCodec;
pub use color::{Color, Palette};
pub use config::Config;
pub use direction::Direction;
pub use error::{Error, ErrorKind};
pub use parse::Puzzle;
pub use point::Point;
pub use search::path::reconstruct;
pub use search::{Move, Record, Solution, Solver, SolverMode};
pub use simulate::{replay, simulate};
