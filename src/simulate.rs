use crate::board::Board;
use crate::color::Palette;
use crate::direction::Direction;
use crate::error::Error;
use crate::point::Point;
use crate::search::Move;

/// Slide robot `index` in `direction` until something stops it and return where it rests.
///
/// Walls, the board edge and other robots stop the slide. Deflectors of another color turn
/// the robot and keep it sliding; deflectors of its own color are ignored. If the robot
/// cannot leave its cell the start point is returned, which callers treat as "no move".
pub fn simulate(
    board: &Board,
    palette: &Palette,
    robots: &[Point],
    index: usize,
    direction: Direction,
) -> Point {
    let start = robots[index];
    let color = palette.color(index);

    // Each (cell, direction) pair can only be crossed once on a slide that ends
    let limit = 4 * board.width() * board.height();

    let mut current = start;
    let mut direction = direction;

    for _ in 0..limit {
        if board.has_wall(current, direction) {
            return current;
        }

        let next = current.step(direction);
        if !board.contains(next) || board.has_wall(next, direction.flip()) {
            return current;
        }

        if robots
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && *p == next)
        {
            return current;
        }

        if let Some(diagonal) = board.diagonal(next) {
            if diagonal.color != color {
                direction = diagonal.orientation.deflect(direction);
            }
        }

        current = next;
    }

    log::trace!("robot {color} loops forever from {start}, treating as no move");
    start
}

/// Apply `moves` in order and return the final robot positions.
pub fn replay(
    board: &Board,
    palette: &Palette,
    robots: &[Point],
    moves: &[Move],
) -> Result<Vec<Point>, Error> {
    let mut robots = robots.to_vec();

    for step in moves {
        let index = palette
            .index_of(step.robot)
            .ok_or(Error::UnknownRobot(step.robot))?;

        robots[index] = simulate(board, palette, &robots, index, step.direction);
    }

    Ok(robots)
}

#[cfg(test)]
mod test_simulate {
    use super::*;
    use crate::board::{Diagonal, Orientation};
    use crate::color::Color;

    fn empty_board() -> Board {
        Board::new(16, 16).unwrap()
    }

    fn lone_red() -> Palette {
        Palette::new(vec![Color::Red]).unwrap()
    }

    fn diagonal(color: Color, orientation: Orientation) -> Diagonal {
        Diagonal { color, orientation }
    }

    #[test]
    fn test_slide_to_edge() {
        let board = empty_board();
        let robots = [Point::new(0, 0)];

        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(15, 0)
        );
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Down),
            Point::new(0, 15)
        );
    }

    #[test]
    fn test_edge_is_no_move() {
        let board = empty_board();
        let robots = [Point::new(0, 0)];

        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Up),
            Point::new(0, 0)
        );
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Left),
            Point::new(0, 0)
        );
    }

    #[test]
    fn test_stops_at_wall() {
        let mut board = empty_board();
        board.add_wall(Point::new(6, 3), Direction::Right).unwrap();
        let robots = [Point::new(0, 3)];

        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(6, 3)
        );

        // Mirrored side stops a robot coming the other way
        let robots = [Point::new(15, 3)];
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Left),
            Point::new(7, 3)
        );
    }

    #[test]
    fn test_walled_in_is_no_move() {
        let mut board = empty_board();
        board.add_wall(Point::new(4, 4), Direction::Up).unwrap();
        let robots = [Point::new(4, 4)];

        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Up),
            Point::new(4, 4)
        );
    }

    #[test]
    fn test_stops_before_robot() {
        let board = empty_board();
        let palette = Palette::default();
        let robots = [
            Point::new(0, 0),
            Point::new(9, 0),
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(3, 3),
        ];

        assert_eq!(
            simulate(&board, &palette, &robots, 0, Direction::Right),
            Point::new(8, 0)
        );

        // Adjacent robot blocks immediately
        let robots = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(3, 3),
        ];
        assert_eq!(
            simulate(&board, &palette, &robots, 0, Direction::Right),
            Point::new(0, 0)
        );
    }

    #[test]
    fn test_deflect_nw_se() {
        let mut board = empty_board();
        board
            .add_diagonal(Point::new(5, 0), diagonal(Color::Blue, Orientation::NwSe))
            .unwrap();
        let robots = [Point::new(0, 0)];

        // Right turns down
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(5, 15)
        );
    }

    #[test]
    fn test_deflect_ne_sw_into_edge() {
        let mut board = empty_board();
        board
            .add_diagonal(Point::new(5, 0), diagonal(Color::Blue, Orientation::NeSw))
            .unwrap();

        // Right turns up, straight into the top edge, so the robot rests on the deflector
        let robots = [Point::new(0, 0)];
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(5, 0)
        );

        // Up turns right
        let robots = [Point::new(5, 9)];
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Up),
            Point::new(15, 0)
        );
    }

    #[test]
    fn test_same_color_is_transparent() {
        let mut board = empty_board();
        board
            .add_diagonal(Point::new(5, 0), diagonal(Color::Red, Orientation::NwSe))
            .unwrap();
        let robots = [Point::new(0, 0)];

        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(15, 0)
        );
    }

    #[test]
    fn test_chained_deflectors() {
        let mut board = empty_board();
        board
            .add_diagonal(Point::new(5, 0), diagonal(Color::Blue, Orientation::NwSe))
            .unwrap();
        board
            .add_diagonal(Point::new(5, 1), diagonal(Color::Green, Orientation::NeSw))
            .unwrap();
        let robots = [Point::new(0, 0)];

        // Right -> down at (5, 0), down -> left at (5, 1)
        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(0, 1)
        );
    }

    #[test]
    fn test_robot_behind_deflector() {
        let mut board = empty_board();
        board
            .add_diagonal(Point::new(5, 0), diagonal(Color::Blue, Orientation::NwSe))
            .unwrap();
        let palette = Palette::new(vec![Color::Red, Color::Green]).unwrap();
        let robots = [Point::new(0, 0), Point::new(5, 1)];

        assert_eq!(
            simulate(&board, &palette, &robots, 0, Direction::Right),
            Point::new(5, 0)
        );
    }

    #[test]
    fn test_deflector_loop_is_no_move() {
        let mut board = empty_board();
        let ring = [
            (Point::new(5, 0), Orientation::NwSe),
            (Point::new(5, 5), Orientation::NeSw),
            (Point::new(0, 5), Orientation::NwSe),
            (Point::new(0, 0), Orientation::NeSw),
        ];
        for (point, orientation) in ring {
            board
                .add_diagonal(point, diagonal(Color::Blue, orientation))
                .unwrap();
        }
        let robots = [Point::new(2, 0)];

        assert_eq!(
            simulate(&board, &lone_red(), &robots, 0, Direction::Right),
            Point::new(2, 0)
        );
    }

    #[test]
    fn test_replay() {
        let board = empty_board();
        let moves = [
            Move {
                robot: Color::Red,
                direction: Direction::Right,
            },
            Move {
                robot: Color::Red,
                direction: Direction::Down,
            },
        ];

        let robots = replay(&board, &lone_red(), &[Point::new(0, 0)], &moves).unwrap();
        assert_eq!(robots, vec![Point::new(15, 15)]);

        let stray = [Move {
            robot: Color::Purple,
            direction: Direction::Up,
        }];
        assert_eq!(
            replay(&board, &lone_red(), &[Point::new(0, 0)], &stray),
            Err(Error::UnknownRobot(Color::Purple))
        );
    }
}
