//! Cell coordinates and the shape-scoped direction / corner tags.

use glam::IVec3;
use std::fmt;
use std::ops::{Add, Sub};

/// An integer coordinate identifying one cell of a tessellation.
///
/// The meaning of the three axes is grid-defined. Square grids leave `z`
/// at zero; hex grids use cube coordinates with the invariant
/// `x + y + z == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// First axis.
    pub x: i32,
    /// Second axis.
    pub y: i32,
    /// Third axis.
    pub z: i32,
}

impl Cell {
    /// The origin cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a cell from three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Create a planar cell with `z = 0`.
    pub const fn planar(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Create a hex cell in cube coordinates, deriving `z = -x - y`.
    pub const fn hex(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// The coordinate as a vector.
    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl From<IVec3> for Cell {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add<IVec3> for Cell {
    type Output = Self;

    #[inline]
    fn add(self, offset: IVec3) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }
}

impl Sub for Cell {
    type Output = IVec3;

    #[inline]
    fn sub(self, other: Self) -> IVec3 {
        IVec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the neighbour-facing sides of a cell.
///
/// The tag is only meaningful relative to a specific cell type; shape
/// modules provide typed views (e.g. a square's `Right`/`Up`/`Left`/`Down`)
/// that convert to and from this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellDir(pub u8);

impl CellDir {
    /// The raw tag.
    pub fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CellDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dir{}", self.0)
    }
}

/// One of the vertices of a cell's boundary, scoped like [`CellDir`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCorner(pub u8);

impl CellCorner {
    /// The raw tag.
    pub fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CellCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "corner{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_constructor_keeps_cube_invariant() {
        for (x, y) in [(0, 0), (3, -1), (-4, 7)] {
            let c = Cell::hex(x, y);
            assert_eq!(c.x + c.y + c.z, 0);
        }
    }

    #[test]
    fn offset_arithmetic() {
        let a = Cell::new(1, 2, -3);
        let b = a + IVec3::new(1, -1, 0);
        assert_eq!(b, Cell::new(2, 1, -3));
        assert_eq!(b - a, IVec3::new(1, -1, 0));
        assert_eq!(Cell::from(b.to_ivec3()), b);
    }

    #[test]
    fn display() {
        assert_eq!(Cell::planar(2, 0).to_string(), "(2, 0, 0)");
        assert_eq!(CellDir(3).to_string(), "dir3");
    }
}
