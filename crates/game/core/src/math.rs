//! Small geometry types for the continuous 2D plane.
//!
//! The world is simulated on a flat plane; positions and directions are plain
//! `f32` vectors. Facing is discrete (4-way cardinal) because interaction
//! scans are cast along the axis the player last moved on.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Position or direction on the world plane.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: 1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: -1.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Returns the unit vector pointing the same way, or `Vec2::ZERO` for a
    /// (near-)zero vector.
    pub fn normalized_or_zero(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Moves toward `target` by at most `max_delta`, landing exactly on the
    /// target once within range.
    pub fn move_towards(self, target: Self, max_delta: f32) -> Self {
        let to_target = target - self;
        let dist = to_target.length();
        if dist <= max_delta || dist <= f32::EPSILON {
            target
        } else {
            self + to_target * (max_delta / dist)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
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
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Discrete facing direction used for interaction raycasts.
///
/// The player faces along whichever axis dominated the last movement input,
/// so scans are always cast along one of the four cardinal unit vectors.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Cardinal unit vector for this facing.
    pub const fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::UP,
            Facing::Down => Vec2::DOWN,
            Facing::Left => Vec2::LEFT,
            Facing::Right => Vec2::RIGHT,
        }
    }

    /// Derives a facing from a movement intent, preferring the dominant axis.
    ///
    /// Returns `None` for a (near-)zero intent so callers keep the previous
    /// facing while the player stands still.
    pub fn from_movement(intent: Vec2) -> Option<Self> {
        if intent.length_squared() <= 0.01 {
            return None;
        }
        if intent.x.abs() > intent.y.abs() {
            Some(if intent.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            })
        } else {
            Some(if intent.y > 0.0 { Facing::Up } else { Facing::Down })
        }
    }
}
