use std::fmt;

use serde::{Deserialize, Serialize};

/// Floating-point type used for texture coordinates.
pub type Float = f64;

/// 2D texture coordinate.
///
/// There is no constraint on the range; coordinates outside `[0, 1]` are
/// perfectly valid and are written as-is.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
pub struct CoordinatePair {
    /// Horizontal component (U).
    pub x: Float,
    /// Vertical component (V).
    pub y: Float,
}

impl CoordinatePair {
    /// Coordinate at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Constructs a new coordinate pair.
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }
}

impl From<[Float; 2]> for CoordinatePair {
    fn from([x, y]: [Float; 2]) -> Self {
        Self { x, y }
    }
}
impl From<CoordinatePair> for [Float; 2] {
    fn from(value: CoordinatePair) -> Self {
        [value.x, value.y]
    }
}
impl From<(Float, Float)> for CoordinatePair {
    fn from((x, y): (Float, Float)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.p$}, {:.p$})", self.x, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}
