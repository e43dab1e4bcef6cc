use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl TryFrom<char> for Color {
    type Error = anyhow::Error;

    fn try_from(value: char) -> Result<Self> {
        match value.to_ascii_uppercase() {
            'R' => Ok(Color::Red),
            'B' => Ok(Color::Blue),
            'G' => Ok(Color::Green),
            'Y' => Ok(Color::Yellow),
            'P' => Ok(Color::Purple),
            _ => Err(anyhow!("Invalid color: {value}")),
        }
    }
}

impl From<Color> for char {
    fn from(color: Color) -> char {
        match color {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Robot identities in canonical order: robot `i` is the robot painted `colors[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: vec![
                Color::Red,
                Color::Blue,
                Color::Green,
                Color::Yellow,
                Color::Purple,
            ],
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Palette, Error> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }

        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(Error::DuplicateColor(*color));
            }
        }

        Ok(Palette { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, index: usize) -> Color {
        self.colors[index]
    }

    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }
}
