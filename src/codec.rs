use crate::error::Error;
use crate::point::Point;

/// Packs one coordinate per robot into a `u64`.
///
/// Robot `i` owns bits `[2 * bits * i, 2 * bits * (i + 1))`: `x` in the low half, `y` in the
/// high half. On a 16x16 board that is one byte per robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodec {
    bits: u32,
    robots: usize,
}

impl StateCodec {
    pub fn new(width: usize, height: usize, robots: usize) -> Result<StateCodec, Error> {
        let largest = width.max(height).saturating_sub(1);
        let bits = (usize::BITS - largest.leading_zeros()).max(1);

        if 2 * bits as usize * robots > u64::BITS as usize {
            return Err(Error::StateTooWide {
                width,
                height,
                robots,
            });
        }

        Ok(StateCodec { bits, robots })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    fn mask(&self) -> u64 {
        (1 << self.bits) - 1
    }

    fn shift(&self, robot: usize) -> u32 {
        2 * self.bits * robot as u32
    }

    fn field(&self, point: Point) -> u64 {
        (point.x as u64 & self.mask()) | ((point.y as u64 & self.mask()) << self.bits)
    }

    pub fn encode(&self, robots: &[Point]) -> u64 {
        debug_assert_eq!(robots.len(), self.robots);

        robots
            .iter()
            .enumerate()
            .fold(0, |state, (i, p)| state | (self.field(*p) << self.shift(i)))
    }

    pub fn decode(&self, state: u64) -> Vec<Point> {
        (0..self.robots).map(|i| self.get(state, i)).collect()
    }

    pub fn get(&self, state: u64, robot: usize) -> Point {
        let field = state >> self.shift(robot);
        Point {
            x: (field & self.mask()) as isize,
            y: ((field >> self.bits) & self.mask()) as isize,
        }
    }

    /// Replace a single robot's field, leaving the others untouched.
    pub fn with_robot(&self, state: u64, robot: usize, point: Point) -> u64 {
        let shift = self.shift(robot);
        let field_mask = (u64::MAX >> (u64::BITS - 2 * self.bits)) << shift;
        (state & !field_mask) | (self.field(point) << shift)
    }
}
