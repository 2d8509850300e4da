use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage slot of the row coordinate, indexed by orientation axis.
pub const ROW_AXIS: [usize; 3] = [1, 2, 0];
/// Storage slot of the column coordinate, indexed by orientation axis.
pub const COL_AXIS: [usize; 3] = [2, 0, 1];
/// Storage slot of the depth coordinate, indexed by orientation axis.
pub const DEPTH_AXIS: [usize; 3] = [0, 1, 2];

/// One of the three primary axes. `X = 0`, `Y = 1`, `Z = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Errors from converting raw indices into axes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AxisError {
    #[error("axis index {0} out of range (expected 0..3)")]
    OutOfRange(usize),
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis into a `(x, y, z)` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Storage slots `(row, col, depth)` for points oriented on this axis.
    pub fn slots(self) -> (usize, usize, usize) {
        let a = self.index();
        (ROW_AXIS[a], COL_AXIS[a], DEPTH_AXIS[a])
    }
}

impl TryFrom<usize> for Axis {
    type Error = AxisError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            n => Err(AxisError::OutOfRange(n)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}
