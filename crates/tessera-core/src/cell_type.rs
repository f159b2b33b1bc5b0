//! The [`CellType`] trait: the symmetry algebra of one cell shape.

use crate::cell::{CellCorner, CellDir};
use crate::connection::Connection;
use crate::error::GridError;
use crate::rotation::CellRotation;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use std::fmt;

/// Which way up a hexagon sits.
///
/// Direction and corner indices are laid out so that the same index
/// arithmetic works for both orientations; only the spatial embedding
/// (matrices, vectors, reflection axes) differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HexOrientation {
    /// A vertex points up; direction 0 faces +X.
    #[default]
    PointyTopped,
    /// An edge faces up; direction 0 faces up-right at 30 degrees.
    FlatTopped,
}

/// Bit-exact identity of a change-of-basis matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BasisKey([u32; 16]);

impl BasisKey {
    /// Key a column-major matrix by the bit patterns of its elements.
    ///
    /// Negative zero is keyed as positive zero, so matrices that compare
    /// equal get equal keys.
    pub fn from_matrix(m: &Mat4) -> Self {
        Self(m.to_cols_array().map(|v| {
            let v = if v == 0.0 { 0.0 } else { v };
            v.to_bits()
        }))
    }

    /// Recover the matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_cols_array(&self.0.map(f32::from_bits))
    }
}

/// Value identity of a cell type.
///
/// Two cell types are interchangeable exactly when their shapes are
/// equal; this is what "compatible cell types" means for cross-grid
/// operations such as parallel transport.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellShape {
    /// A regular polygon.
    NGon {
        /// Number of sides.
        sides: u8,
        /// Whether direction 0 is turned half a step counter-clockwise
        /// from +X (a flat-topped hexagon, for instance).
        offset: bool,
    },
    /// The square, with named directions and corners.
    Square,
    /// A hexagonal prism.
    HexPrism(HexOrientation),
    /// Another shape seen through a change of basis.
    Basis {
        /// The undecorated shape.
        inner: Box<CellShape>,
        /// The basis it is seen through.
        basis: BasisKey,
    },
}

/// Shared handle to an immutable, process-wide cell type.
pub type CellTypeRef = &'static dyn CellType;

/// The symmetry algebra of one cell shape.
///
/// A cell type enumerates its directions, corners and symmetry group, and
/// knows how group elements act on directions and corners. Rotations
/// compose with [`multiply`](Self::multiply) so that
/// `rotate_dir(d, multiply(a, b)) == rotate_dir(rotate_dir(d, b), a)`.
///
/// # Laws
///
/// - `multiply` is associative, [`identity`](Self::identity) is neutral and
///   `multiply(r, invert(r)) == identity()`.
/// - `invert_dir` is an involution wherever it is defined.
/// - [`try_get_rotation`](Self::try_get_rotation) inverts
///   [`rotate_with_connection`](Self::rotate_with_connection): for every
///   direction `d` and rotation `r` with `(d2, c) = rotate_with_connection(d, r)`,
///   `try_get_rotation(d, d2, c) == Some(r)`.
/// - `matrix(r) * dir_vector(d)` points along `dir_vector(rotate_dir(d, r))`.
///
/// # Thread Safety
///
/// Implementations are immutable data shared as `&'static` references, so
/// the trait requires `Send + Sync`.
pub trait CellType: Send + Sync + fmt::Debug + 'static {
    /// Value identity of this cell type.
    fn shape(&self) -> CellShape;

    /// Every direction, in index order.
    fn cell_dirs(&self) -> SmallVec<[CellDir; 8]>;

    /// Every corner, in index order.
    fn cell_corners(&self) -> SmallVec<[CellCorner; 12]>;

    /// The direction pointing back across the same face, if there is one.
    fn invert_dir(&self, dir: CellDir) -> Option<CellDir>;

    /// The pure rotations, optionally followed by the reflections.
    fn rotations(&self, include_reflections: bool) -> SmallVec<[CellRotation; 12]>;

    /// Compose two group elements: apply `b`, then `a`.
    fn multiply(&self, a: CellRotation, b: CellRotation) -> CellRotation;

    /// The inverse group element.
    fn invert(&self, a: CellRotation) -> CellRotation;

    /// The neutral group element.
    fn identity(&self) -> CellRotation {
        CellRotation::IDENTITY
    }

    /// Act on a direction. Directions outside the rotation's orbit are
    /// returned unchanged.
    fn rotate_dir(&self, dir: CellDir, rotation: CellRotation) -> CellDir;

    /// Act on a corner.
    fn rotate_corner(&self, corner: CellCorner, rotation: CellRotation) -> CellCorner;

    /// Act on a direction and report the twist of the face it lands on.
    ///
    /// Returns [`GridError::Unsupported`] for symmetry configurations the
    /// shape cannot describe.
    fn rotate_with_connection(
        &self,
        dir: CellDir,
        rotation: CellRotation,
    ) -> Result<(CellDir, Connection), GridError>;

    /// Solve for the rotation that takes `from` to `to` with the given
    /// connection.
    ///
    /// `Ok(None)` when no rotation does (different orbits, or a connection
    /// the face can never report). [`GridError::Unsupported`] for the same
    /// configurations [`rotate_with_connection`](Self::rotate_with_connection)
    /// rejects.
    fn try_get_rotation(
        &self,
        from: CellDir,
        to: CellDir,
        connection: Connection,
    ) -> Result<Option<CellRotation>, GridError>;

    /// Translation-free spatial transform of a group element.
    fn matrix(&self, rotation: CellRotation) -> Mat4;

    /// Unit vector pointing out through the given face.
    fn dir_vector(&self, dir: CellDir) -> Vec3;

    /// Position of a corner for a cell of unit size centred on the origin.
    fn corner_position(&self, corner: CellCorner) -> Vec3;
}

impl PartialEq for dyn CellType {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }
}

impl Eq for dyn CellType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_key_round_trips() {
        let m = Mat4::from_cols_array(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let key = BasisKey::from_matrix(&m);
        assert_eq!(key.to_matrix(), m);
        assert_eq!(key, BasisKey::from_matrix(&m));
        assert_ne!(key, BasisKey::from_matrix(&Mat4::IDENTITY));
    }

    #[test]
    fn basis_key_ignores_sign_of_zero() {
        let negated = Mat4::from_cols_array(&[
            1.0, -0.0, -0.0, 0.0, //
            -0.0, 1.0, 0.0, 0.0, //
            0.0, -0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        assert_eq!(negated, Mat4::IDENTITY);
        assert_eq!(BasisKey::from_matrix(&negated), BasisKey::from_matrix(&Mat4::IDENTITY));
    }

    #[test]
    fn shapes_compare_structurally() {
        let a = CellShape::Basis {
            inner: Box::new(CellShape::NGon {
                sides: 6,
                offset: false,
            }),
            basis: BasisKey::from_matrix(&Mat4::IDENTITY),
        };
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(
            a,
            CellShape::NGon {
                sides: 6,
                offset: false
            }
        );
        assert_ne!(
            CellShape::HexPrism(HexOrientation::FlatTopped),
            CellShape::HexPrism(HexOrientation::PointyTopped)
        );
    }
}
