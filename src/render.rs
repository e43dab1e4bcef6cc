use crate::board::{Board, Orientation};
use crate::color::Palette;
use crate::direction::Direction;
use crate::point::Point;

/// Draw the board as plain text, one `+---+` separator line between each row of cells.
pub fn stringify(board: &Board, palette: &Palette, robots: &[Point]) -> String {
    let mut output = String::new();

    output.push('+');
    for _ in 0..board.width() {
        output.push_str("---+");
    }
    output.push('\n');

    for y in 0..board.height() {
        for x in 0..board.width() {
            let p = Point::new(x as isize, y as isize);

            if x == 0 || board.has_wall(p, Direction::Left) {
                output.push('|');
            } else {
                output.push(' ');
            }

            let robot = robots.iter().position(|r| *r == p).map(|i| palette.color(i));
            let is_target = board.target().map_or(false, |t| t.point == p);

            let c = if let Some(color) = robot {
                char::from(color)
            } else if is_target {
                'T'
            } else if let Some(diagonal) = board.diagonal(p) {
                match diagonal.orientation {
                    Orientation::NwSe => '\\',
                    Orientation::NeSw => '/',
                }
            } else {
                ' '
            };

            output.push(' ');
            output.push(c);
            output.push(' ');
        }
        output.push_str("|\n");

        output.push('+');
        for x in 0..board.width() {
            let p = Point::new(x as isize, y as isize);
            if y + 1 == board.height() || board.has_wall(p, Direction::Down) {
                output.push_str("---+");
            } else {
                output.push_str("   +");
            }
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod test_render {
    use super::*;
    use crate::board::Diagonal;
    use crate::color::Color;

    #[test]
    fn test_small_board() {
        let mut board = Board::new(3, 2).unwrap();
        board.add_wall(Point::new(0, 0), Direction::Down).unwrap();
        board.add_wall(Point::new(1, 1), Direction::Right).unwrap();
        board.set_target(Point::new(2, 1), Color::Blue).unwrap();
        board
            .add_diagonal(
                Point::new(2, 0),
                Diagonal {
                    color: Color::Green,
                    orientation: Orientation::NwSe,
                },
            )
            .unwrap();

        let palette = Palette::new(vec![Color::Red, Color::Blue]).unwrap();
        let robots = [Point::new(0, 0), Point::new(0, 1)];

        let expected = "\
+---+---+---+
| R       \\ |
+---+   +   +
| B     | T |
+---+---+---+
";
        assert_eq!(stringify(&board, &palette, &robots), expected);
    }
}
