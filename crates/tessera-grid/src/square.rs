//! The square cell type with named directions and corners.

use crate::dihedral;
use glam::{IVec3, Mat4, Vec3};
use smallvec::SmallVec;
use tessera_core::{
    CellCorner, CellDir, CellRotation, CellShape, CellType, Connection, GridError,
};

const SIDES: u8 = 4;

/// The four faces of a square, counter-clockwise from +X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SquareDir {
    /// +X.
    Right = 0,
    /// +Y.
    Up = 1,
    /// -X.
    Left = 2,
    /// -Y.
    Down = 3,
}

impl SquareDir {
    /// All directions in index order.
    pub const ALL: [SquareDir; 4] = [Self::Right, Self::Up, Self::Left, Self::Down];

    /// The opposite direction.
    pub fn inverted(self) -> Self {
        Self::ALL[(self as usize + 2) % 4]
    }

    /// Cell offset of the neighbour in this direction.
    pub fn offset(self) -> IVec3 {
        match self {
            Self::Right => IVec3::X,
            Self::Up => IVec3::Y,
            Self::Left => IVec3::NEG_X,
            Self::Down => IVec3::NEG_Y,
        }
    }
}

impl From<SquareDir> for CellDir {
    fn from(d: SquareDir) -> Self {
        CellDir(d as u8)
    }
}

impl TryFrom<CellDir> for SquareDir {
    type Error = CellDir;

    fn try_from(dir: CellDir) -> Result<Self, CellDir> {
        Self::ALL.get(dir.0 as usize).copied().ok_or(dir)
    }
}

/// The four corners of a square, counter-clockwise from the upper right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SquareCorner {
    /// Between `Right` and `Up`.
    UpRight = 0,
    /// Between `Up` and `Left`.
    UpLeft = 1,
    /// Between `Left` and `Down`.
    DownLeft = 2,
    /// Between `Down` and `Right`.
    DownRight = 3,
}

impl SquareCorner {
    /// All corners in index order.
    pub const ALL: [SquareCorner; 4] = [
        Self::UpRight,
        Self::UpLeft,
        Self::DownLeft,
        Self::DownRight,
    ];
}

impl From<SquareCorner> for CellCorner {
    fn from(c: SquareCorner) -> Self {
        CellCorner(c as u8)
    }
}

impl TryFrom<CellCorner> for SquareCorner {
    type Error = CellCorner;

    fn try_from(corner: CellCorner) -> Result<Self, CellCorner> {
        Self::ALL.get(corner.0 as usize).copied().ok_or(corner)
    }
}

/// Rotate a planar offset by a square rotation.
///
/// Reflections flip Y first, then turn; this matches the action on
/// [`SquareDir`].
pub fn rotate_offset(offset: IVec3, rotation: CellRotation) -> IVec3 {
    let (mut x, mut y) = (offset.x, offset.y);
    if rotation.is_reflection() {
        y = -y;
    }
    for _ in 0..rotation.index() % SIDES {
        (x, y) = (-y, x);
    }
    IVec3::new(x, y, offset.z)
}

/// Cell type of a square grid.
///
/// Behaves exactly like the 4-sided [`NGonCellType`](crate::NGonCellType)
/// but has its own identity and named directions.
///
/// # Examples
///
/// ```
/// use tessera_grid::{SquareCellType, SquareDir};
/// use tessera_core::{CellRotation, CellType};
///
/// let sq = SquareCellType::get();
/// let up = sq.rotate_dir(SquareDir::Right.into(), CellRotation::rotation(1));
/// assert_eq!(up, SquareDir::Up.into());
/// ```
#[derive(Debug)]
pub struct SquareCellType {
    _private: (),
}

static SQUARE: SquareCellType = SquareCellType { _private: () };

impl SquareCellType {
    /// The shared instance.
    pub fn get() -> &'static Self {
        &SQUARE
    }

    /// Quarter turn counter-clockwise.
    pub const ROTATE_CCW: CellRotation = CellRotation::rotation(1);
    /// Quarter turn clockwise.
    pub const ROTATE_CW: CellRotation = CellRotation::rotation(3);
    /// Mirror across the X axis (Up and Down swap).
    pub const REFLECT_Y: CellRotation = CellRotation::reflection(0);
    /// Mirror across the Y axis (Left and Right swap).
    pub const REFLECT_X: CellRotation = CellRotation::reflection(2);
}

impl CellType for SquareCellType {
    fn shape(&self) -> CellShape {
        CellShape::Square
    }

    fn cell_dirs(&self) -> SmallVec<[CellDir; 8]> {
        SquareDir::ALL.iter().map(|&d| d.into()).collect()
    }

    fn cell_corners(&self) -> SmallVec<[CellCorner; 12]> {
        SquareCorner::ALL.iter().map(|&c| c.into()).collect()
    }

    fn invert_dir(&self, dir: CellDir) -> Option<CellDir> {
        SquareDir::try_from(dir).ok().map(|d| d.inverted().into())
    }

    fn rotations(&self, include_reflections: bool) -> SmallVec<[CellRotation; 12]> {
        dihedral::rotations(SIDES, include_reflections)
    }

    fn multiply(&self, a: CellRotation, b: CellRotation) -> CellRotation {
        dihedral::multiply(SIDES, a, b)
    }

    fn invert(&self, a: CellRotation) -> CellRotation {
        dihedral::invert(SIDES, a)
    }

    fn rotate_dir(&self, dir: CellDir, rotation: CellRotation) -> CellDir {
        match SquareDir::try_from(dir) {
            Ok(d) => CellDir(dihedral::rotate_index(SIDES, d as u8, rotation)),
            Err(dir) => dir,
        }
    }

    fn rotate_corner(&self, corner: CellCorner, rotation: CellRotation) -> CellCorner {
        match SquareCorner::try_from(corner) {
            Ok(c) => CellCorner(dihedral::rotate_corner_index(SIDES, c as u8, rotation)),
            Err(corner) => corner,
        }
    }

    fn rotate_with_connection(
        &self,
        dir: CellDir,
        rotation: CellRotation,
    ) -> Result<(CellDir, Connection), GridError> {
        Ok((
            self.rotate_dir(dir, rotation),
            Connection::edge(rotation.is_reflection()),
        ))
    }

    fn try_get_rotation(
        &self,
        from: CellDir,
        to: CellDir,
        connection: Connection,
    ) -> Result<Option<CellRotation>, GridError> {
        let (Ok(from), Ok(to)) = (SquareDir::try_from(from), SquareDir::try_from(to)) else {
            return Ok(None);
        };
        if connection.sides != Connection::EDGE_SIDES || connection.rotation != 0 {
            return Ok(None);
        }
        Ok(Some(dihedral::solve(
            SIDES,
            from as u8,
            to as u8,
            connection.mirror,
        )))
    }

    fn matrix(&self, rotation: CellRotation) -> Mat4 {
        // Exact integer entries avoid float drift in quarter turns.
        let x = rotate_offset(IVec3::X, rotation).as_vec3();
        let y = rotate_offset(IVec3::Y, rotation).as_vec3();
        Mat4::from_cols(x.extend(0.0), y.extend(0.0), glam::Vec4::Z, glam::Vec4::W)
    }

    fn dir_vector(&self, dir: CellDir) -> Vec3 {
        match SquareDir::try_from(dir) {
            Ok(d) => d.offset().as_vec3(),
            Err(_) => Vec3::ZERO,
        }
    }

    fn corner_position(&self, corner: CellCorner) -> Vec3 {
        dihedral::corner_position(SIDES, corner.0 % SIDES, 0.0)
    }
}
