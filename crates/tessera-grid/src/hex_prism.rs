//! The hexagonal prism cell type.
//!
//! A hex prism has two direction families. The six equatorial directions
//! ring the prism like a hexagon's edges and are permuted by the group;
//! the two axial directions cap the ends along Z and are fixed points of
//! every rotation. The symmetry group is the hexagon's dihedral group of
//! order 12, acting about +Z.
//!
//! Crossing a face reports a [`Connection`] whose `sides` is the symmetry
//! order of that face: 6 for a cap and 4 for a rectangular side. Because
//! the two caps face opposite ways, a rotation seen through the back cap
//! runs the other way round, so the back cap reports the complementary
//! index `(6 - r) % 6`.

use crate::dihedral;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use tessera_core::{
    CellCorner, CellDir, CellRotation, CellShape, CellType, Connection, GridError, HexOrientation,
    RotationKind,
};

const SIDES: u8 = 6;
const CAP_SIDES: u8 = 6;
const SIDE_FACE_SIDES: u8 = 4;

/// Which end of the prism an axial direction or corner belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxialEnd {
    /// The +Z cap.
    Forward,
    /// The -Z cap.
    Back,
}

/// A typed view of a hex-prism direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexPrismDir {
    /// One of the six side faces, indexed like a hexagon direction.
    /// Indices wrap modulo 6 when converted to a [`CellDir`].
    Equatorial(u8),
    /// One of the two caps.
    Axial(AxialEnd),
}

impl HexPrismDir {
    /// Untyped index of the forward cap.
    pub const FORWARD: CellDir = CellDir(6);
    /// Untyped index of the back cap.
    pub const BACK: CellDir = CellDir(7);
}

impl From<HexPrismDir> for CellDir {
    fn from(d: HexPrismDir) -> Self {
        match d {
            HexPrismDir::Equatorial(i) => CellDir(i % SIDES),
            HexPrismDir::Axial(AxialEnd::Forward) => HexPrismDir::FORWARD,
            HexPrismDir::Axial(AxialEnd::Back) => HexPrismDir::BACK,
        }
    }
}

impl TryFrom<CellDir> for HexPrismDir {
    type Error = CellDir;

    fn try_from(dir: CellDir) -> Result<Self, CellDir> {
        match dir.0 {
            i @ 0..=5 => Ok(Self::Equatorial(i)),
            6 => Ok(Self::Axial(AxialEnd::Forward)),
            7 => Ok(Self::Axial(AxialEnd::Back)),
            _ => Err(dir),
        }
    }
}

/// A typed view of a hex-prism corner: a hexagon corner on one cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexPrismCorner {
    /// The cap the corner lies on.
    pub end: AxialEnd,
    /// Hexagon corner index, `0..6`. Wraps modulo 6 when converted.
    pub planar: u8,
}

impl From<HexPrismCorner> for CellCorner {
    fn from(c: HexPrismCorner) -> Self {
        match c.end {
            AxialEnd::Back => CellCorner(c.planar % SIDES),
            AxialEnd::Forward => CellCorner(c.planar % SIDES + SIDES),
        }
    }
}

impl TryFrom<CellCorner> for HexPrismCorner {
    type Error = CellCorner;

    fn try_from(corner: CellCorner) -> Result<Self, CellCorner> {
        match corner.0 {
            i @ 0..=5 => Ok(Self {
                end: AxialEnd::Back,
                planar: i,
            }),
            i @ 6..=11 => Ok(Self {
                end: AxialEnd::Forward,
                planar: i - SIDES,
            }),
            _ => Err(corner),
        }
    }
}

/// Cell type of a hex-prism grid, one instance per orientation.
#[derive(Debug)]
pub struct HexPrismCellType {
    orientation: HexOrientation,
}

static POINTY: HexPrismCellType = HexPrismCellType {
    orientation: HexOrientation::PointyTopped,
};
static FLAT: HexPrismCellType = HexPrismCellType {
    orientation: HexOrientation::FlatTopped,
};

impl HexPrismCellType {
    /// The shared instance for `orientation`.
    pub fn get(orientation: HexOrientation) -> &'static Self {
        match orientation {
            HexOrientation::PointyTopped => &POINTY,
            HexOrientation::FlatTopped => &FLAT,
        }
    }

    /// Which way up the cap hexagons sit.
    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    fn base_angle(&self) -> f32 {
        match self.orientation {
            HexOrientation::PointyTopped => 0.0,
            HexOrientation::FlatTopped => std::f32::consts::FRAC_PI_6,
        }
    }

    fn back_cap_reflection_error() -> GridError {
        GridError::Unsupported {
            operation: "reflection through the back cap of a flat-topped hex prism",
        }
    }
}

impl CellType for HexPrismCellType {
    fn shape(&self) -> CellShape {
        CellShape::HexPrism(self.orientation)
    }

    fn cell_dirs(&self) -> SmallVec<[CellDir; 8]> {
        (0..SIDES + 2).map(CellDir).collect()
    }

    fn cell_corners(&self) -> SmallVec<[CellCorner; 12]> {
        (0..SIDES * 2).map(CellCorner).collect()
    }

    fn invert_dir(&self, dir: CellDir) -> Option<CellDir> {
        let inverted = match HexPrismDir::try_from(dir).ok()? {
            HexPrismDir::Equatorial(i) => HexPrismDir::Equatorial((i + 3) % SIDES),
            HexPrismDir::Axial(AxialEnd::Forward) => HexPrismDir::Axial(AxialEnd::Back),
            HexPrismDir::Axial(AxialEnd::Back) => HexPrismDir::Axial(AxialEnd::Forward),
        };
        Some(inverted.into())
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
        match HexPrismDir::try_from(dir) {
            Ok(HexPrismDir::Equatorial(i)) => CellDir(dihedral::rotate_index(SIDES, i, rotation)),
            // Caps and unknown tags are fixed points.
            _ => dir,
        }
    }

    fn rotate_corner(&self, corner: CellCorner, rotation: CellRotation) -> CellCorner {
        match HexPrismCorner::try_from(corner) {
            Ok(c) => HexPrismCorner {
                end: c.end,
                planar: dihedral::rotate_corner_index(SIDES, c.planar, rotation),
            }
            .into(),
            Err(corner) => corner,
        }
    }

    fn rotate_with_connection(
        &self,
        dir: CellDir,
        rotation: CellRotation,
    ) -> Result<(CellDir, Connection), GridError> {
        let mirror = rotation.is_reflection();
        let index = rotation.index() % SIDES;
        let connection = match HexPrismDir::try_from(dir) {
            Ok(HexPrismDir::Axial(AxialEnd::Forward)) => Connection::new(mirror, index, CAP_SIDES),
            Ok(HexPrismDir::Axial(AxialEnd::Back)) => {
                if mirror && self.orientation == HexOrientation::FlatTopped {
                    return Err(Self::back_cap_reflection_error());
                }
                Connection::new(mirror, (SIDES - index) % SIDES, CAP_SIDES)
            }
            // A side face can only be flipped end over end.
            Ok(HexPrismDir::Equatorial(_)) => {
                Connection::new(mirror, if mirror { 2 } else { 0 }, SIDE_FACE_SIDES)
            }
            Err(_) => Connection::default(),
        };
        Ok((self.rotate_dir(dir, rotation), connection))
    }

    fn try_get_rotation(
        &self,
        from: CellDir,
        to: CellDir,
        connection: Connection,
    ) -> Result<Option<CellRotation>, GridError> {
        let (Ok(from), Ok(to)) = (HexPrismDir::try_from(from), HexPrismDir::try_from(to)) else {
            return Ok(None);
        };
        let Connection {
            mirror,
            rotation,
            sides,
        } = connection;
        match (from, to) {
            (HexPrismDir::Equatorial(f), HexPrismDir::Equatorial(t)) => {
                if sides != SIDE_FACE_SIDES || rotation != if mirror { 2 } else { 0 } {
                    return Ok(None);
                }
                Ok(Some(dihedral::solve(SIDES, f, t, mirror)))
            }
            (HexPrismDir::Axial(f), HexPrismDir::Axial(t)) if f == t => {
                if sides != CAP_SIDES || rotation >= CAP_SIDES {
                    return Ok(None);
                }
                let index = match f {
                    AxialEnd::Forward => rotation,
                    AxialEnd::Back => {
                        if mirror && self.orientation == HexOrientation::FlatTopped {
                            return Err(Self::back_cap_reflection_error());
                        }
                        (SIDES - rotation) % SIDES
                    }
                };
                let kind = if mirror {
                    RotationKind::Reflect(index)
                } else {
                    RotationKind::Rotate(index)
                };
                Ok(Some(kind.into()))
            }
            // Different orbits.
            _ => Ok(None),
        }
    }

    fn matrix(&self, rotation: CellRotation) -> Mat4 {
        dihedral::matrix(SIDES, rotation, self.base_angle())
    }

    fn dir_vector(&self, dir: CellDir) -> Vec3 {
        match HexPrismDir::try_from(dir) {
            Ok(HexPrismDir::Equatorial(i)) => dihedral::dir_vector(SIDES, i, self.base_angle()),
            Ok(HexPrismDir::Axial(AxialEnd::Forward)) => Vec3::Z,
            Ok(HexPrismDir::Axial(AxialEnd::Back)) => Vec3::NEG_Z,
            Err(_) => Vec3::ZERO,
        }
    }

    fn corner_position(&self, corner: CellCorner) -> Vec3 {
        match HexPrismCorner::try_from(corner) {
            Ok(c) => {
                let p = dihedral::corner_position(SIDES, c.planar, self.base_angle());
                let z = match c.end {
                    AxialEnd::Forward => 0.5,
                    AxialEnd::Back => -0.5,
                };
                Vec3::new(p.x, p.y, z)
            }
            Err(_) => Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    fn pt() -> &'static HexPrismCellType {
        HexPrismCellType::get(HexOrientation::PointyTopped)
    }

    fn ft() -> &'static HexPrismCellType {
        HexPrismCellType::get(HexOrientation::FlatTopped)
    }

    // ── Cap connections ────────────────────────────────────────

    #[test]
    fn caps_report_complementary_twist() {
        for ct in [pt(), ft()] {
            let r = CellRotation::rotation(2);
            let (dir, conn) = ct.rotate_with_connection(HexPrismDir::FORWARD, r).unwrap();
            assert_eq!(dir, HexPrismDir::FORWARD);
            assert_eq!(conn, Connection::new(false, 2, 6));
            let (dir, conn) = ct.rotate_with_connection(HexPrismDir::BACK, r).unwrap();
            assert_eq!(dir, HexPrismDir::BACK);
            assert_eq!(conn, Connection::new(false, 4, 6));
        }
    }

    #[test]
    fn flat_topped_back_cap_reflection_is_unsupported() {
        let r = CellRotation::reflection(1);
        assert!(matches!(
            ft().rotate_with_connection(HexPrismDir::BACK, r),
            Err(GridError::Unsupported { .. })
        ));
        assert!(matches!(
            ft().try_get_rotation(
                HexPrismDir::BACK,
                HexPrismDir::BACK,
                Connection::new(true, 1, 6)
            ),
            Err(GridError::Unsupported { .. })
        ));
        // The same reflection through the front cap, or on a pointy-topped
        // prism, is fine.
        assert!(ft().rotate_with_connection(HexPrismDir::FORWARD, r).is_ok());
        assert_eq!(
            pt().rotate_with_connection(HexPrismDir::BACK, r).unwrap().1,
            Connection::new(true, 5, 6)
        );
    }

    // ── Side connections ───────────────────────────────────────

    #[test]
    fn side_faces_use_the_smaller_group() {
        let (dir, conn) = pt()
            .rotate_with_connection(CellDir(1), CellRotation::rotation(3))
            .unwrap();
        assert_eq!(dir, CellDir(4));
        assert_eq!(conn, Connection::new(false, 0, 4));
        let (_, conn) = pt()
            .rotate_with_connection(CellDir(1), CellRotation::reflection(0))
            .unwrap();
        assert_eq!(conn, Connection::new(true, 2, 4));
    }

    #[test]
    fn invalid_side_connections_are_rejected() {
        let ct = pt();
        let quarter = Connection::new(false, 1, 4);
        assert_eq!(ct.try_get_rotation(CellDir(0), CellDir(1), quarter), Ok(None));
        let cap_like = Connection::new(false, 0, 6);
        assert_eq!(ct.try_get_rotation(CellDir(0), CellDir(1), cap_like), Ok(None));
    }

    #[test]
    fn orbits_do_not_mix() {
        let ct = pt();
        let conn = Connection::new(false, 0, 6);
        assert_eq!(ct.try_get_rotation(CellDir(0), HexPrismDir::FORWARD, conn), Ok(None));
        assert_eq!(
            ct.try_get_rotation(HexPrismDir::FORWARD, HexPrismDir::BACK, conn),
            Ok(None)
        );
    }

    // ── Typed views ────────────────────────────────────────────

    #[test]
    fn axial_dirs_are_fixed_and_inverted() {
        let ct = ft();
        for r in ct.rotations(true) {
            assert_eq!(ct.rotate_dir(HexPrismDir::FORWARD, r), HexPrismDir::FORWARD);
        }
        assert_eq!(ct.invert_dir(HexPrismDir::FORWARD), Some(HexPrismDir::BACK));
        assert_eq!(ct.invert_dir(CellDir(2)), Some(CellDir(5)));
        assert_eq!(ct.invert_dir(CellDir(8)), None);
    }

    #[test]
    fn typed_views_wrap_out_of_range_indices() {
        assert_eq!(CellDir::from(HexPrismDir::Equatorial(7)), CellDir(1));
        assert_eq!(
            HexPrismDir::try_from(CellDir::from(HexPrismDir::Equatorial(6))),
            Ok(HexPrismDir::Equatorial(0))
        );
        let c: CellCorner = HexPrismCorner {
            end: AxialEnd::Forward,
            planar: 8,
        }
        .into();
        assert_eq!(c, CellCorner(8));
    }

    #[test]
    fn corners_stay_on_their_cap() {
        let c: CellCorner = HexPrismCorner {
            end: AxialEnd::Forward,
            planar: 0,
        }
        .into();
        assert_eq!(c, CellCorner(6));
        let rotated = pt().rotate_corner(c, CellRotation::reflection(0));
        assert_eq!(
            HexPrismCorner::try_from(rotated),
            Ok(HexPrismCorner {
                end: AxialEnd::Forward,
                planar: 5
            })
        );
        assert!(pt().corner_position(c).z > 0.0);
    }

    #[test]
    fn compliance() {
        compliance::run_cell_type_compliance(pt());
        compliance::run_cell_type_compliance(ft());
    }
}
