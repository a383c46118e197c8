use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

const THRESH: f64 = 0.000_001;

/// Screen-space 2D vector. Equality is approximate (within 1e-6 per axis).
#[derive(Clone, Copy, Debug, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn distance_squared(self, other: Vec2) -> f64 {
        (self - other).magnitude_squared()
    }

    /// `None` when the divisor is too close to zero.
    pub fn divide(self, scalar: f64) -> Option<Vec2> {
        if scalar.abs() > THRESH {
            Some(Vec2::new(self.x / scalar, self.y / scalar))
        } else {
            None
        }
    }

    /// Exact bitwise comparison, for places that must not hide drift.
    pub fn same_as(self, other: Vec2) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < THRESH && (self.y - other.y).abs() < THRESH
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}
