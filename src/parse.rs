use std::io::BufRead;

use anyhow::{anyhow, Result};

use crate::board::{Board, Diagonal, Orientation};
use crate::color::{Color, Palette};
use crate::direction::Direction;
use crate::point::Point;

/// A board together with where the standard five robots start.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub board: Board,
    pub robots: Vec<Point>,
}

impl Puzzle {
    /// Read a board file.
    ///
    /// The grid comes first, one row per line and one number per cell: 0-15 is a wall mask
    /// (up 1, down 2, left 4, right 8), 16-25 a deflector (yellow, red, blue, green, purple
    /// pairs; even is `\`, odd is `/`). After the grid, `robot <color> <x> <y>` places each
    /// robot and `target <color> <x> <y>` sets the goal. Blank lines and `#` comments are
    /// skipped.
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Puzzle> {
        let palette = Palette::default();

        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut robots: Vec<Option<Point>> = vec![None; palette.len()];
        let mut target = None;

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_ascii_whitespace();
            let first = parts.next().unwrap_or_default();

            match first {
                "robot" | "target" => {
                    let (color, point) = parse_placement(parts)
                        .map_err(|e| anyhow!("Line {}: {e} in `{line}`", number + 1))?;

                    if first == "target" {
                        if target.is_some() {
                            return Err(anyhow!("Line {}: multiple targets", number + 1));
                        }
                        target = Some((color, point));
                    } else {
                        let index = palette
                            .index_of(color)
                            .ok_or_else(|| anyhow!("Unknown robot color {color}"))?;
                        if robots[index].is_some() {
                            return Err(anyhow!("Line {}: robot {color} placed twice", number + 1));
                        }
                        robots[index] = Some(point);
                    }
                }
                _ => {
                    if target.is_some() || robots.iter().any(Option::is_some) {
                        return Err(anyhow!("Line {}: grid row after placements", number + 1));
                    }

                    let row = line
                        .split_ascii_whitespace()
                        .map(|v| v.parse::<u8>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| anyhow!("Line {}: invalid grid row `{line}`", number + 1))?;

                    if let Some(first_row) = rows.first() {
                        if first_row.len() != row.len() {
                            return Err(anyhow!(
                                "Line {}: expected {} cells, found {}",
                                number + 1,
                                first_row.len(),
                                row.len()
                            ));
                        }
                    }

                    rows.push(row);
                }
            }
        }

        if rows.is_empty() {
            return Err(anyhow!("Missing grid"));
        }

        let mut board = Board::new(rows[0].len(), rows.len())?;

        for (y, row) in rows.iter().enumerate() {
            for (x, code) in row.iter().enumerate() {
                let point = Point::new(x as isize, y as isize);

                match *code {
                    0..=15 => {
                        for side in Direction::ALL {
                            if code & side.bit() != 0 {
                                board.add_wall(point, side)?;
                            }
                        }
                    }
                    16..=25 => board.add_diagonal(point, diagonal_from_code(*code))?,
                    _ => return Err(anyhow!("Invalid cell code {code} at {point}")),
                }
            }
        }

        let (color, point) = target.ok_or_else(|| anyhow!("Missing target"))?;
        board.set_target(point, color)?;

        let robots = robots
            .iter()
            .zip(palette.iter())
            .map(|(p, color)| p.ok_or_else(|| anyhow!("Missing robot {color}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Puzzle { board, robots })
    }
}

fn parse_placement<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<(Color, Point)> {
    let color = parts
        .next()
        .and_then(|c| c.chars().next())
        .ok_or_else(|| anyhow!("missing color"))?;
    let color = Color::try_from(color)?;

    let mut coordinate = || -> Result<isize> {
        Ok(parts
            .next()
            .ok_or_else(|| anyhow!("missing coordinate"))?
            .parse()?)
    };
    let x = coordinate()?;
    let y = coordinate()?;

    Ok((color, Point::new(x, y)))
}

fn diagonal_from_code(code: u8) -> Diagonal {
    let color = match (code - 16) / 2 {
        0 => Color::Yellow,
        1 => Color::Red,
        2 => Color::Blue,
        3 => Color::Green,
        _ => Color::Purple,
    };

    let orientation = if code % 2 == 0 {
        Orientation::NwSe
    } else {
        Orientation::NeSw
    };

    Diagonal { color, orientation }
}
