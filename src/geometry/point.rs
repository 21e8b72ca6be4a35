use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance used for geometric comparisons (collinearity, control-point
/// reflection) where exact float equality would be too brittle.
pub const EPSILON: f64 = 1e-9;

/// An immutable 2D coordinate / vector.
///
/// All operations return new values; nothing mutates in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0., y: 0. };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both axes to the given number of fraction digits.
    pub fn round(&self, fraction_digits: u32) -> Self {
        Self::new(
            round_to(self.x, fraction_digits),
            round_to(self.y, fraction_digits),
        )
    }

    /// Exact equality on both axes.
    pub fn is_same(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }

    /// Angle (radians, -PI..=PI) of the vector from `self` to `other`.
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Round a value to `fraction_digits` decimal places, normalising `-0` to `0`.
pub fn round_to(value: f64, fraction_digits: u32) -> f64 {
    let factor = 10f64.powi(fraction_digits.min(15) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0. {
        0.
    } else {
        rounded
    }
}

/// True if `a`, `b`, `c` lie on one line with `b` between `a` and `c`
/// travelling in a single direction. Zero-length legs always qualify.
pub fn is_inline(a: Point, b: Point, c: Point) -> bool {
    if a.approx_eq(&b) || b.approx_eq(&c) {
        return true;
    }
    let diff = (a.angle_to(&b) - b.angle_to(&c)).rem_euclid(TAU);
    diff.min(TAU - diff) <= EPSILON
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Per-axis multiplication
impl Mul<Point> for Point {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        Point::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// A single value applies to both axes.
impl From<f64> for Point {
    fn from(v: f64) -> Self {
        Self::new(v, v)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
