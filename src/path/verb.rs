use std::fmt;

use super::syntax::{tokenize, tokenize_arc};
use crate::errors::{Error, Result};
use crate::geometry::Point;

/// Command family, as selected by a path data letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quadratic,
    SmoothQuadratic,
    Arc,
    Close,
}

impl Verb {
    /// Map a path data letter to its verb and whether it is absolute.
    pub fn from_letter(letter: char) -> Option<(Verb, bool)> {
        let verb = match letter.to_ascii_uppercase() {
            'M' => Verb::Move,
            'L' => Verb::Line,
            'H' => Verb::Horizontal,
            'V' => Verb::Vertical,
            'C' => Verb::Cubic,
            'S' => Verb::SmoothCubic,
            'Q' => Verb::Quadratic,
            'T' => Verb::SmoothQuadratic,
            'A' => Verb::Arc,
            'Z' => Verb::Close,
            _ => return None,
        };
        Some((verb, letter.is_ascii_uppercase()))
    }

    pub fn letter(&self, absolute: bool) -> char {
        let letter = match self {
            Verb::Move => 'M',
            Verb::Line => 'L',
            Verb::Horizontal => 'H',
            Verb::Vertical => 'V',
            Verb::Cubic => 'C',
            Verb::SmoothCubic => 'S',
            Verb::Quadratic => 'Q',
            Verb::SmoothQuadratic => 'T',
            Verb::Arc => 'A',
            Verb::Close => 'Z',
        };
        if absolute {
            letter
        } else {
            letter.to_ascii_lowercase()
        }
    }

    /// Number of values consumed by one repetition of this command.
    pub fn arity(&self) -> usize {
        match self {
            Verb::Close => 0,
            Verb::Horizontal | Verb::Vertical => 1,
            Verb::Move | Verb::Line | Verb::SmoothQuadratic => 2,
            Verb::SmoothCubic | Verb::Quadratic => 4,
            Verb::Cubic => 6,
            Verb::Arc => 7,
        }
    }

    /// Split a flat list of values into per-command groups.
    ///
    /// `Close` ignores any values; every other verb requires at least one
    /// group and a whole number of them.
    pub fn groups<'a>(&self, values: &'a [f64]) -> Result<Vec<&'a [f64]>> {
        let arity = self.arity();
        if arity == 0 {
            return Ok(vec![&values[..0]]);
        }
        if values.is_empty() || values.len() % arity != 0 {
            return Err(Error::Parse(format!(
                "'{}' expects a multiple of {arity} values, got {}",
                self.letter(true),
                values.len()
            )));
        }
        Ok(values.chunks_exact(arity).collect())
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter(true))
    }
}

/// Arguments accepted by the `Path` builder methods.
#[derive(Clone, Debug, PartialEq)]
pub enum Args {
    /// Raw coordinate text, e.g. `"10,20 30-5"`
    Text(String),
    Numbers(Vec<f64>),
    Points(Vec<Point>),
}

impl Args {
    /// Flatten into the list of values for the given verb.
    pub fn numbers(&self, verb: Verb) -> Result<Vec<f64>> {
        match self {
            Args::Text(text) if verb == Verb::Arc => tokenize_arc(text),
            Args::Text(text) => tokenize(text),
            Args::Numbers(values) => Ok(values.clone()),
            Args::Points(points) => Ok(points.iter().flat_map(|p| [p.x, p.y]).collect()),
        }
    }
}

impl From<&str> for Args {
    fn from(value: &str) -> Self {
        Args::Text(value.to_string())
    }
}

impl From<String> for Args {
    fn from(value: String) -> Self {
        Args::Text(value)
    }
}

impl From<Vec<f64>> for Args {
    fn from(value: Vec<f64>) -> Self {
        Args::Numbers(value)
    }
}

impl From<&[f64]> for Args {
    fn from(value: &[f64]) -> Self {
        Args::Numbers(value.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Args {
    fn from(value: [f64; N]) -> Self {
        Args::Numbers(value.to_vec())
    }
}

impl From<Point> for Args {
    fn from(value: Point) -> Self {
        Args::Points(vec![value])
    }
}

impl From<Vec<Point>> for Args {
    fn from(value: Vec<Point>) -> Self {
        Args::Points(value)
    }
}

impl<const N: usize> From<[Point; N]> for Args {
    fn from(value: [Point; N]) -> Self {
        Args::Points(value.to_vec())
    }
}
