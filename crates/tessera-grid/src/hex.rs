//! Hexagon direction names and cube-coordinate offset arithmetic.
//!
//! Both orientations share one index layout: direction `i` always moves by
//! [`HEX_OFFSETS`]`[i]` in cube coordinates, so code that works on indices
//! never needs to know which way up the hexagons sit. Only the names and
//! the spatial embedding differ.

use glam::IVec3;
use tessera_core::{Cell, CellDir, CellRotation};

/// Cube-coordinate offsets indexed by direction.
pub const HEX_OFFSETS: [IVec3; 6] = [
    IVec3::new(1, 0, -1),
    IVec3::new(0, 1, -1),
    IVec3::new(-1, 1, 0),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, -1, 1),
    IVec3::new(1, -1, 0),
];

/// Directions of a pointy-topped hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PtHexDir {
    /// +X.
    Right = 0,
    /// 60 degrees.
    UpRight = 1,
    /// 120 degrees.
    UpLeft = 2,
    /// -X.
    Left = 3,
    /// 240 degrees.
    DownLeft = 4,
    /// 300 degrees.
    DownRight = 5,
}

/// Directions of a flat-topped hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FtHexDir {
    /// 30 degrees.
    UpRight = 0,
    /// +Y.
    Up = 1,
    /// 150 degrees.
    UpLeft = 2,
    /// 210 degrees.
    DownLeft = 3,
    /// -Y.
    Down = 4,
    /// 330 degrees.
    DownRight = 5,
}

impl PtHexDir {
    /// All directions in index order.
    pub const ALL: [PtHexDir; 6] = [
        Self::Right,
        Self::UpRight,
        Self::UpLeft,
        Self::Left,
        Self::DownLeft,
        Self::DownRight,
    ];
}

impl FtHexDir {
    /// All directions in index order.
    pub const ALL: [FtHexDir; 6] = [
        Self::UpRight,
        Self::Up,
        Self::UpLeft,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];
}

macro_rules! hex_dir_conversions {
    ($ty:ty) => {
        impl $ty {
            /// The opposite direction.
            pub fn inverted(self) -> Self {
                Self::ALL[(self as usize + 3) % 6]
            }

            /// Cube-coordinate offset of the neighbour in this direction.
            pub fn offset(self) -> IVec3 {
                HEX_OFFSETS[self as usize]
            }
        }

        impl From<$ty> for CellDir {
            fn from(d: $ty) -> Self {
                CellDir(d as u8)
            }
        }

        impl TryFrom<CellDir> for $ty {
            type Error = CellDir;

            fn try_from(dir: CellDir) -> Result<Self, CellDir> {
                Self::ALL.get(dir.0 as usize).copied().ok_or(dir)
            }
        }
    };
}

hex_dir_conversions!(PtHexDir);
hex_dir_conversions!(FtHexDir);

/// Offset of the neighbour in direction `dir`, if `dir` is a hex direction.
pub fn dir_offset(dir: CellDir) -> Option<IVec3> {
    HEX_OFFSETS.get(dir.0 as usize).copied()
}

/// Rotate a cube-coordinate offset by a hexagon rotation.
///
/// Reflections mirror `(x, y, z) -> (-z, -y, -x)` first, which fixes
/// direction 0; the rotation index then advances by sixths of a turn.
pub fn rotate_offset(offset: IVec3, rotation: CellRotation) -> IVec3 {
    let IVec3 { x, y, z } = offset;
    let (x, y, z) = if rotation.is_reflection() {
        (-z, -y, -x)
    } else {
        (x, y, z)
    };
    match rotation.index() % 6 {
        1 => IVec3::new(-y, -z, -x),
        2 => IVec3::new(z, x, y),
        3 => IVec3::new(-x, -y, -z),
        4 => IVec3::new(y, z, x),
        5 => IVec3::new(-z, -x, -y),
        _ => IVec3::new(x, y, z),
    }
}

/// Number of single steps between two cells.
pub fn hex_distance(a: Cell, b: Cell) -> u32 {
    let d = b - a;
    (d.x.unsigned_abs() + d.y.unsigned_abs() + d.z.unsigned_abs()) / 2
}
