use crate::board::{Board, Target};
use crate::codec::StateCodec;
use crate::color::Palette;
use crate::direction::Direction;
use crate::error::Error;
use crate::simulate::simulate;

use super::Move;

/// Everything an engine needs to walk the state graph. Read-only once built.
#[derive(Debug, Clone)]
pub(crate) struct StateSpace {
    pub board: Board,
    pub palette: Palette,
    pub codec: StateCodec,
    pub target: Target,
    pub target_robot: usize,
}

impl StateSpace {
    pub fn is_goal(&self, state: u64) -> bool {
        self.codec.get(state, self.target_robot) == self.target.point
    }

    /// Call `visit` with every state one slide away from `state`, in robot then direction order.
    /// Slides that go nowhere are skipped. Returning `false` from `visit` stops early.
    pub fn expand<F>(&self, state: u64, mut visit: F) -> Result<(), Error>
    where
        F: FnMut(u64, Move) -> bool,
    {
        let robots = self.codec.decode(state);

        for (index, start) in robots.iter().enumerate() {
            let robot = self.palette.color(index);

            for direction in Direction::ALL {
                let end = simulate(&self.board, &self.palette, &robots, index, direction);
                if end == *start {
                    continue;
                }

                if robots.contains(&end) {
                    return Err(Error::Collision {
                        robot,
                        direction,
                        point: end,
                    });
                }

                let next = self.codec.with_robot(state, index, end);
                if !visit(next, Move { robot, direction }) {
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}
