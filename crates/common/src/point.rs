use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};

use crate::axis::{Axis, COL_AXIS, DEPTH_AXIS, ROW_AXIS};

/// Integer 3D coordinate used for spatial indexing.
///
/// Storage is always `(x, y, z)`. The oriented constructor lets callers
/// think in terms of row, column and depth relative to a chosen primary
/// axis; the depth coordinate lands on that axis, row and column on the
/// other two in a fixed cyclic order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0, z: 0 };

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Build a point from row/col/depth coordinates relative to `axis`.
    ///
    /// Panics if `axis` is not in `0..3`.
    pub fn oriented(axis: usize, row: i32, col: i32, depth: i32) -> Self {
        assert!(axis < 3, "axis {axis} out of range (expected 0..3)");
        let mut v = [0; 3];
        v[ROW_AXIS[axis]] = row;
        v[COL_AXIS[axis]] = col;
        v[DEPTH_AXIS[axis]] = depth;
        Self::from(v)
    }

    /// Typed variant of [`Point::oriented`].
    pub fn on(axis: Axis, row: i32, col: i32, depth: i32) -> Self {
        Self::oriented(axis.index(), row, col, depth)
    }

    /// Row coordinate of this point when viewed along `axis`.
    pub fn row(&self, axis: Axis) -> i32 {
        self[ROW_AXIS[axis.index()]]
    }

    /// Column coordinate of this point when viewed along `axis`.
    pub fn col(&self, axis: Axis) -> i32 {
        self[COL_AXIS[axis.index()]]
    }

    /// Depth coordinate of this point when viewed along `axis`.
    pub fn depth(&self, axis: Axis) -> i32 {
        self[DEPTH_AXIS[axis.index()]]
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Index<usize> for Point {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("point index {index} out of range (expected 0..3)"),
        }
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, index: usize) -> &mut i32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("point index {index} out of range (expected 0..3)"),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[i32; 3]> for Point {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<IVec3> for Point {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point> for IVec3 {
    fn from(p: Point) -> Self {
        IVec3::new(p.x, p.y, p.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
