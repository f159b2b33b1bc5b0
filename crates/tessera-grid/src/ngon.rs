//! Regular polygon cell types.

use crate::dihedral;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use tessera_core::{
    CellCorner, CellDir, CellRotation, CellShape, CellType, Connection, GridError, HexOrientation,
};

/// The symmetry algebra of a regular polygon with `sides` edges.
///
/// Directions and corners are numbered counter-clockwise; the rotation
/// group is the full dihedral group of order `2 * sides`. Crossing an edge
/// reports [`Connection::edge`], mirrored exactly when the rotation is a
/// reflection.
///
/// Instances are interned: use [`NGonCellType::get`] or
/// [`NGonCellType::hex`].
///
/// # Examples
///
/// ```
/// use tessera_grid::NGonCellType;
/// use tessera_core::{CellDir, CellRotation, CellType};
///
/// let tri = NGonCellType::get(3).unwrap();
/// assert_eq!(tri.rotate_dir(CellDir(0), CellRotation::rotation(1)), CellDir(1));
/// // Odd polygons have no opposite face.
/// assert_eq!(tri.invert_dir(CellDir(0)), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NGonCellType {
    sides: u8,
    offset: bool,
}

const TABLE_LEN: usize = (NGonCellType::MAX_SIDES - NGonCellType::MIN_SIDES + 1) as usize;

static NGONS: [NGonCellType; TABLE_LEN] = build_table(false);
static OFFSET_NGONS: [NGonCellType; TABLE_LEN] = build_table(true);

const fn build_table(offset: bool) -> [NGonCellType; TABLE_LEN] {
    let mut out = [NGonCellType { sides: 0, offset }; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        out[i] = NGonCellType {
            sides: NGonCellType::MIN_SIDES + i as u8,
            offset,
        };
        i += 1;
    }
    out
}

impl NGonCellType {
    /// Fewest sides a polygon cell may have.
    pub const MIN_SIDES: u8 = 3;
    /// Most sides a polygon cell may have.
    pub const MAX_SIDES: u8 = 12;

    /// The polygon with `sides` edges and direction 0 facing +X.
    ///
    /// Returns `Err(GridError::InvalidConfig)` outside
    /// [`MIN_SIDES`](Self::MIN_SIDES)`..=`[`MAX_SIDES`](Self::MAX_SIDES).
    pub fn get(sides: u8) -> Result<&'static Self, GridError> {
        Self::lookup(sides, false)
    }

    /// Like [`get`](Self::get), but with direction 0 turned half a step
    /// counter-clockwise.
    pub fn get_offset(sides: u8) -> Result<&'static Self, GridError> {
        Self::lookup(sides, true)
    }

    /// The hexagon used by hex grids of the given orientation.
    pub fn hex(orientation: HexOrientation) -> &'static Self {
        let i = (6 - Self::MIN_SIDES) as usize;
        match orientation {
            HexOrientation::PointyTopped => &NGONS[i],
            HexOrientation::FlatTopped => &OFFSET_NGONS[i],
        }
    }

    fn lookup(sides: u8, offset: bool) -> Result<&'static Self, GridError> {
        if !(Self::MIN_SIDES..=Self::MAX_SIDES).contains(&sides) {
            return Err(GridError::InvalidConfig {
                reason: format!(
                    "polygon cells need {}..={} sides, got {sides}",
                    Self::MIN_SIDES,
                    Self::MAX_SIDES
                ),
            });
        }
        let i = (sides - Self::MIN_SIDES) as usize;
        Ok(if offset { &OFFSET_NGONS[i] } else { &NGONS[i] })
    }

    /// Number of sides.
    pub fn sides(&self) -> u8 {
        self.sides
    }

    fn base_angle(&self) -> f32 {
        if self.offset {
            std::f32::consts::PI / self.sides as f32
        } else {
            0.0
        }
    }

    fn in_range(&self, dir: CellDir) -> bool {
        dir.0 < self.sides
    }
}

impl CellType for NGonCellType {
    fn shape(&self) -> CellShape {
        CellShape::NGon {
            sides: self.sides,
            offset: self.offset,
        }
    }

    fn cell_dirs(&self) -> SmallVec<[CellDir; 8]> {
        (0..self.sides).map(CellDir).collect()
    }

    fn cell_corners(&self) -> SmallVec<[CellCorner; 12]> {
        (0..self.sides).map(CellCorner).collect()
    }

    fn invert_dir(&self, dir: CellDir) -> Option<CellDir> {
        if self.sides % 2 != 0 || !self.in_range(dir) {
            return None;
        }
        Some(CellDir((dir.0 + self.sides / 2) % self.sides))
    }

    fn rotations(&self, include_reflections: bool) -> SmallVec<[CellRotation; 12]> {
        dihedral::rotations(self.sides, include_reflections)
    }

    fn multiply(&self, a: CellRotation, b: CellRotation) -> CellRotation {
        dihedral::multiply(self.sides, a, b)
    }

    fn invert(&self, a: CellRotation) -> CellRotation {
        dihedral::invert(self.sides, a)
    }

    fn rotate_dir(&self, dir: CellDir, rotation: CellRotation) -> CellDir {
        if !self.in_range(dir) {
            return dir;
        }
        CellDir(dihedral::rotate_index(self.sides, dir.0, rotation))
    }

    fn rotate_corner(&self, corner: CellCorner, rotation: CellRotation) -> CellCorner {
        if corner.0 >= self.sides {
            return corner;
        }
        CellCorner(dihedral::rotate_corner_index(self.sides, corner.0, rotation))
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
        if !self.in_range(from) || !self.in_range(to) {
            return Ok(None);
        }
        if connection.sides != Connection::EDGE_SIDES || connection.rotation != 0 {
            return Ok(None);
        }
        Ok(Some(dihedral::solve(
            self.sides,
            from.0,
            to.0,
            connection.mirror,
        )))
    }

    fn matrix(&self, rotation: CellRotation) -> Mat4 {
        dihedral::matrix(self.sides, rotation, self.base_angle())
    }

    fn dir_vector(&self, dir: CellDir) -> Vec3 {
        dihedral::dir_vector(self.sides, dir.0, self.base_angle())
    }

    fn corner_position(&self, corner: CellCorner) -> Vec3 {
        dihedral::corner_position(self.sides, corner.0, self.base_angle())
    }
}
