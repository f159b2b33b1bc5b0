//! Re-embedding a grid through a change of basis.

use crate::bound::Bound;
use crate::defaults;
use crate::grid::{Grid, GridRef, Move, Path};
use crate::modifier::Modifier;
use glam::{IVec3, Mat4, Vec3, Vec4};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tessera_core::{
    BasisKey, Cell, CellCorner, CellDir, CellRotation, CellShape, CellType, CellTypeRef,
    Connection, GridError,
};

/// Swaps the Y and Z axes, turning an XY-plane grid into an XZ-plane one.
pub const XZ_SWAP: Mat4 = Mat4::from_cols(Vec4::X, Vec4::Z, Vec4::Y, Vec4::W);

/// Determinants closer to zero than this are rejected as singular.
const MIN_DETERMINANT: f32 = 1e-6;

fn is_improper(basis: &Mat4) -> bool {
    basis.determinant() < 0.0
}

/// Re-express a face twist as seen from the other handedness.
fn reflect_connection(c: Connection) -> Connection {
    if c.sides == 0 {
        return c;
    }
    Connection {
        rotation: (c.sides - c.rotation % c.sides) % c.sides,
        ..c
    }
}

/// A cell type seen through a change of basis.
///
/// Directions, corners and the rotation group are those of the inner
/// type. Spatial data (matrices, direction vectors, corner positions) is
/// mapped through the basis. When the basis reverses handedness, a twist
/// that looked counter-clockwise now looks clockwise, so connection
/// rotations are reported as `(sides - r) % sides`.
///
/// Instances are interned per inner shape and basis, so equal
/// configurations share one `&'static` cell type. Each distinct pair is
/// allocated once and lives for the rest of the process.
#[derive(Debug)]
pub struct BasisCellType {
    inner: CellTypeRef,
    basis: Mat4,
    inverse: Mat4,
    improper: bool,
}

type Interned = Mutex<IndexMap<CellShape, &'static BasisCellType>>;

static INTERNED: OnceLock<Interned> = OnceLock::new();

impl BasisCellType {
    /// The interned decoration of `inner` by `basis`.
    ///
    /// `basis` must be invertible; [`BasisModifier::new`] checks this.
    pub fn get(inner: CellTypeRef, basis: &Mat4) -> &'static BasisCellType {
        let key = CellShape::Basis {
            inner: Box::new(inner.shape()),
            basis: BasisKey::from_matrix(basis),
        };
        let mut map = INTERNED
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let cell_type = *map.entry(key).or_insert_with(|| {
            let leaked: &'static BasisCellType = Box::leak(Box::new(BasisCellType {
                inner,
                basis: *basis,
                inverse: basis.inverse(),
                improper: is_improper(basis),
            }));
            leaked
        });
        cell_type
    }

    /// The undecorated cell type.
    pub fn inner(&self) -> CellTypeRef {
        self.inner
    }

    /// The change-of-basis matrix.
    pub fn basis(&self) -> Mat4 {
        self.basis
    }

    fn adapt(&self, c: Connection) -> Connection {
        if self.improper {
            reflect_connection(c)
        } else {
            c
        }
    }
}

impl CellType for BasisCellType {
    fn shape(&self) -> CellShape {
        CellShape::Basis {
            inner: Box::new(self.inner.shape()),
            basis: BasisKey::from_matrix(&self.basis),
        }
    }

    fn cell_dirs(&self) -> SmallVec<[CellDir; 8]> {
        self.inner.cell_dirs()
    }

    fn cell_corners(&self) -> SmallVec<[CellCorner; 12]> {
        self.inner.cell_corners()
    }

    fn invert_dir(&self, dir: CellDir) -> Option<CellDir> {
        self.inner.invert_dir(dir)
    }

    fn rotations(&self, include_reflections: bool) -> SmallVec<[CellRotation; 12]> {
        self.inner.rotations(include_reflections)
    }

    fn multiply(&self, a: CellRotation, b: CellRotation) -> CellRotation {
        self.inner.multiply(a, b)
    }

    fn invert(&self, a: CellRotation) -> CellRotation {
        self.inner.invert(a)
    }

    fn identity(&self) -> CellRotation {
        self.inner.identity()
    }

    fn rotate_dir(&self, dir: CellDir, rotation: CellRotation) -> CellDir {
        self.inner.rotate_dir(dir, rotation)
    }

    fn rotate_corner(&self, corner: CellCorner, rotation: CellRotation) -> CellCorner {
        self.inner.rotate_corner(corner, rotation)
    }

    fn rotate_with_connection(
        &self,
        dir: CellDir,
        rotation: CellRotation,
    ) -> Result<(CellDir, Connection), GridError> {
        let (dir, connection) = self.inner.rotate_with_connection(dir, rotation)?;
        Ok((dir, self.adapt(connection)))
    }

    fn try_get_rotation(
        &self,
        from: CellDir,
        to: CellDir,
        connection: Connection,
    ) -> Result<Option<CellRotation>, GridError> {
        // The adjustment is an involution, so it also undoes itself.
        self.inner.try_get_rotation(from, to, self.adapt(connection))
    }

    fn matrix(&self, rotation: CellRotation) -> Mat4 {
        self.basis * self.inner.matrix(rotation) * self.inverse
    }

    fn dir_vector(&self, dir: CellDir) -> Vec3 {
        self.basis.transform_vector3(self.inner.dir_vector(dir))
    }

    fn corner_position(&self, corner: CellCorner) -> Vec3 {
        self.basis.transform_point3(self.inner.corner_position(corner))
    }
}

/// A grid re-embedded in space by a fixed change of basis.
///
/// Topology (cells, moves, paths, bounds) is the underlying grid's.
/// Positions are mapped through the basis and every cell type is wrapped
/// in a [`BasisCellType`]. Connections reported by moves are adjusted the
/// same way the decorated cell types adjust them.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tessera_grid::{BasisModifier, Grid, SquareGrid};
/// use tessera_core::Cell;
///
/// let flat = BasisModifier::xz(Arc::new(SquareGrid::new(1.0, None).unwrap())).unwrap();
/// let c = flat.cell_center(Cell::planar(0, 2));
/// assert_eq!((c.y, c.z), (0.0, 2.5));
/// ```
#[derive(Clone, Debug)]
pub struct BasisModifier {
    underlying: GridRef,
    basis: Mat4,
    decorated: Vec<&'static BasisCellType>,
}

impl BasisModifier {
    /// Re-embed `underlying` through `basis`.
    ///
    /// Returns `Err(GridError::InvalidConfig)` if `basis` is singular or
    /// not finite.
    pub fn new(underlying: GridRef, basis: Mat4) -> Result<Self, GridError> {
        let det = basis.determinant();
        if !basis.is_finite() || !det.is_finite() || det.abs() < MIN_DETERMINANT {
            return Err(GridError::InvalidConfig {
                reason: format!("basis must be invertible, determinant is {det}"),
            });
        }
        Ok(Self::build(underlying, basis))
    }

    /// Move a grid from the XY plane to the XZ plane by swapping Y and Z.
    pub fn xz(underlying: GridRef) -> Result<Self, GridError> {
        Self::new(underlying, XZ_SWAP)
    }

    fn build(underlying: GridRef, basis: Mat4) -> Self {
        let decorated = underlying
            .cell_types()
            .into_iter()
            .map(|ct| BasisCellType::get(ct, &basis))
            .collect();
        Self {
            underlying,
            basis,
            decorated,
        }
    }

    /// The change-of-basis matrix.
    pub fn basis(&self) -> Mat4 {
        self.basis
    }

    /// Whether the basis reverses handedness.
    pub fn is_improper(&self) -> bool {
        is_improper(&self.basis)
    }

    fn same_basis(&self, other: &BasisModifier) -> bool {
        BasisKey::from_matrix(&self.basis) == BasisKey::from_matrix(&other.basis)
    }
}

impl Modifier for BasisModifier {
    fn underlying(&self) -> &GridRef {
        &self.underlying
    }

    fn rebind(&self, underlying: GridRef) -> Self {
        Self::build(underlying, self.basis)
    }
}

impl Grid for BasisModifier {
    fn is_2d(&self) -> bool {
        self.underlying.is_2d()
    }

    fn is_3d(&self) -> bool {
        self.underlying.is_3d()
    }

    fn is_finite(&self) -> bool {
        self.underlying.is_finite()
    }

    fn is_single_cell_type(&self) -> bool {
        self.underlying.is_single_cell_type()
    }

    fn cell_types(&self) -> Vec<CellTypeRef> {
        self.decorated.iter().map(|&d| d as CellTypeRef).collect()
    }

    fn unbounded(&self) -> GridRef {
        Arc::new(self.rebind(self.underlying.unbounded()))
    }

    fn cells(&self) -> Result<Vec<Cell>, GridError> {
        self.underlying.cells()
    }

    fn is_cell_in_grid(&self, cell: Cell) -> bool {
        self.underlying.is_cell_in_grid(cell)
    }

    fn cell_type(&self, cell: Cell) -> CellTypeRef {
        if let [only] = self.decorated[..] {
            return only;
        }
        let inner = self.underlying.cell_type(cell);
        match self.decorated.iter().find(|d| *d.inner() == *inner) {
            Some(&d) => d,
            None => BasisCellType::get(inner, &self.basis),
        }
    }

    fn try_move(&self, cell: Cell, dir: CellDir) -> Option<Move> {
        let m = self.underlying.try_move(cell, dir)?;
        let connection = if self.is_improper() {
            reflect_connection(m.connection)
        } else {
            m.connection
        };
        Some(Move { connection, ..m })
    }

    fn try_move_by_offset(
        &self,
        start: Cell,
        start_offset: IVec3,
        dest_offset: IVec3,
        rotation: CellRotation,
    ) -> Result<Option<(Cell, CellRotation)>, GridError> {
        self.underlying
            .try_move_by_offset(start, start_offset, dest_offset, rotation)
    }

    /// Two grids re-embedded through the same basis agree on how twists
    /// are reported, so transport between them runs on the undecorated
    /// grids. Any other source goes through the generic algorithm.
    fn parallel_transport(
        &self,
        src_grid: &dyn Grid,
        src_start: Cell,
        src_dest: Cell,
        dest_start: Cell,
        rotation: CellRotation,
    ) -> Result<Option<(Cell, CellRotation)>, GridError> {
        match src_grid.downcast_ref::<BasisModifier>() {
            Some(other) if other.same_basis(self) => self.underlying.parallel_transport(
                other.underlying.as_ref(),
                src_start,
                src_dest,
                dest_start,
                rotation,
            ),
            _ => defaults::parallel_transport(
                src_grid, src_start, src_dest, self, dest_start, rotation,
            ),
        }
    }

    fn find_basic_path(&self, start: Cell, dest: Cell) -> Result<Option<Path>, GridError> {
        self.underlying.find_basic_path(start, dest)
    }

    fn index_count(&self) -> Result<usize, GridError> {
        self.underlying.index_count()
    }

    fn index(&self, cell: Cell) -> Result<Option<usize>, GridError> {
        self.underlying.index(cell)
    }

    fn cell_by_index(&self, index: usize) -> Result<Option<Cell>, GridError> {
        self.underlying.cell_by_index(index)
    }

    fn bound(&self) -> Option<Bound> {
        self.underlying.bound()
    }

    fn bound_of(&self, cells: &[Cell]) -> Result<Option<Bound>, GridError> {
        self.underlying.bound_of(cells)
    }

    fn bound_by(&self, bound: Option<&Bound>) -> Result<GridRef, GridError> {
        self.rebind_bounded(bound)
    }

    fn intersect_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        self.underlying.intersect_bounds(a, b)
    }

    fn union_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        self.underlying.union_bounds(a, b)
    }

    fn cells_in_bounds(&self, bound: Option<&Bound>) -> Result<Vec<Cell>, GridError> {
        self.underlying.cells_in_bounds(bound)
    }

    fn cell_center(&self, cell: Cell) -> Vec3 {
        self.basis.transform_point3(self.underlying.cell_center(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::{HexBound, SquareBound};
    use crate::compliance;
    use crate::hex_prism::{HexPrismCellType, HexPrismDir};
    use crate::hex_grid::HexGrid;
    use crate::square::{SquareCellType, SquareDir};
    use crate::square_grid::SquareGrid;
    use std::f32::consts::FRAC_PI_2;
    use tessera_core::HexOrientation;

    fn square() -> GridRef {
        Arc::new(SquareGrid::new(1.0, Some(SquareBound::from_size(4, 4))).unwrap())
    }

    /// An endless stack of hex prisms along Z, each a sixth-turn round from
    /// the one below. Orientation alternates by layer.
    #[derive(Clone, Debug)]
    struct TwistedColumn;

    impl TwistedColumn {
        fn layer_type(z: i32) -> CellTypeRef {
            if z.rem_euclid(2) == 0 {
                HexPrismCellType::get(HexOrientation::PointyTopped)
            } else {
                HexPrismCellType::get(HexOrientation::FlatTopped)
            }
        }
    }

    impl Grid for TwistedColumn {
        fn is_2d(&self) -> bool {
            false
        }
        fn cell_types(&self) -> Vec<CellTypeRef> {
            vec![Self::layer_type(0), Self::layer_type(1)]
        }
        fn unbounded(&self) -> GridRef {
            Arc::new(self.clone())
        }
        fn cells(&self) -> Result<Vec<Cell>, GridError> {
            Err(GridError::GridInfinite)
        }
        fn is_cell_in_grid(&self, cell: Cell) -> bool {
            cell.x == 0 && cell.y == 0
        }
        fn cell_type(&self, cell: Cell) -> CellTypeRef {
            Self::layer_type(cell.z)
        }
        fn try_move(&self, cell: Cell, dir: CellDir) -> Option<Move> {
            let (step, inverse_dir, rotation) = match dir {
                HexPrismDir::FORWARD => (1, HexPrismDir::BACK, 1),
                HexPrismDir::BACK => (-1, HexPrismDir::FORWARD, 5),
                _ => return None,
            };
            Some(Move {
                dest: Cell::new(0, 0, cell.z + step),
                inverse_dir,
                connection: Connection::new(false, rotation, 6),
            })
        }
        fn bound_by(&self, bound: Option<&Bound>) -> Result<GridRef, GridError> {
            defaults::bound_by(self, bound)
        }
        fn cell_center(&self, cell: Cell) -> Vec3 {
            Vec3::new(0.0, 0.0, cell.z as f32)
        }
    }

    // ── Cell type decoration ───────────────────────────────────

    #[test]
    fn decorations_are_interned_and_distinct() {
        let a = BasisCellType::get(SquareCellType::get(), &XZ_SWAP);
        let b = BasisCellType::get(SquareCellType::get(), &XZ_SWAP);
        assert!(std::ptr::eq(a, b));
        assert_ne!(a.shape(), SquareCellType::get().shape());
        let scaled = BasisCellType::get(SquareCellType::get(), &Mat4::from_scale(Vec3::splat(2.0)));
        assert!(!std::ptr::eq(a, scaled));
        assert_ne!(a.shape(), scaled.shape());
    }

    #[test]
    fn improper_basis_reverses_cap_twist() {
        let prism = HexPrismCellType::get(HexOrientation::PointyTopped);
        let swapped = BasisCellType::get(prism, &XZ_SWAP);
        let r = CellRotation::rotation(1);
        let (_, plain) = prism.rotate_with_connection(HexPrismDir::FORWARD, r).unwrap();
        let (_, seen) = swapped.rotate_with_connection(HexPrismDir::FORWARD, r).unwrap();
        assert_eq!(plain, Connection::new(false, 1, 6));
        assert_eq!(seen, Connection::new(false, 5, 6));
        assert_eq!(
            swapped.try_get_rotation(HexPrismDir::FORWARD, HexPrismDir::FORWARD, seen),
            Ok(Some(r))
        );
    }

    #[test]
    fn proper_basis_keeps_twist() {
        let prism = HexPrismCellType::get(HexOrientation::FlatTopped);
        let turned = BasisCellType::get(prism, &Mat4::from_rotation_x(FRAC_PI_2));
        let (_, c) = turned
            .rotate_with_connection(HexPrismDir::FORWARD, CellRotation::rotation(2))
            .unwrap();
        assert_eq!(c, Connection::new(false, 2, 6));
    }

    #[test]
    fn dir_vectors_follow_the_basis() {
        let swapped = BasisCellType::get(SquareCellType::get(), &XZ_SWAP);
        assert_eq!(swapped.dir_vector(SquareDir::Up.into()), Vec3::Z);
    }

    #[test]
    fn decorated_types_pass_compliance() {
        compliance::run_cell_type_compliance(BasisCellType::get(SquareCellType::get(), &XZ_SWAP));
        for o in [HexOrientation::PointyTopped, HexOrientation::FlatTopped] {
            let swapped = BasisCellType::get(HexPrismCellType::get(o), &XZ_SWAP);
            compliance::run_cell_type_compliance(swapped);
        }
    }

    // ── Grid ───────────────────────────────────────────────────

    #[test]
    fn singular_basis_is_rejected() {
        assert!(matches!(
            BasisModifier::new(square(), Mat4::ZERO),
            Err(GridError::InvalidConfig { .. })
        ));
        let nan = Mat4::from_scale(Vec3::new(1.0, f32::NAN, 1.0));
        assert!(BasisModifier::new(square(), nan).is_err());
    }

    #[test]
    fn xz_maps_centres_and_types() {
        let g = BasisModifier::xz(square()).unwrap();
        assert!(g.is_improper());
        assert_eq!(g.cell_center(Cell::planar(1, 2)), Vec3::new(1.5, 0.0, 2.5));
        let ct = g.cell_type(Cell::ORIGIN);
        assert_eq!(*ct, *g.cell_types()[0]);
        assert!(matches!(ct.shape(), CellShape::Basis { .. }));
    }

    #[test]
    fn moves_match_underlying() {
        let g = BasisModifier::xz(square()).unwrap();
        let m = g.try_move(Cell::ORIGIN, SquareDir::Up.into()).unwrap();
        assert_eq!(m.dest, Cell::planar(0, 1));
        assert!(m.connection.is_identity());
        assert!(g.try_move(Cell::ORIGIN, SquareDir::Down.into()).is_none());
    }

    #[test]
    fn transport_between_basis_grids_uses_underlying() {
        let a = BasisModifier::xz(square()).unwrap();
        let b = BasisModifier::xz(Arc::new(SquareGrid::new(1.0, None).unwrap())).unwrap();
        let r = CellRotation::rotation(1);
        let got = b
            .parallel_transport(&a, Cell::ORIGIN, Cell::planar(2, 0), Cell::planar(5, 5), r)
            .unwrap();
        // Rightward hops turned a quarter: upward.
        assert_eq!(got, Some((Cell::planar(5, 7), r)));
    }

    #[test]
    fn transport_between_different_bases_is_refused() {
        let swapped = BasisModifier::xz(square()).unwrap();
        let turned = BasisModifier::new(square(), Mat4::from_rotation_x(FRAC_PI_2)).unwrap();
        let r = CellRotation::rotation(1);
        let got =
            turned.parallel_transport(&swapped, Cell::ORIGIN, Cell::planar(2, 0), Cell::ORIGIN, r);
        assert_eq!(got, Ok(None));
    }

    #[test]
    fn improper_basis_reverses_move_twist() {
        let column: GridRef = Arc::new(TwistedColumn);
        let plain = column.try_move(Cell::ORIGIN, HexPrismDir::FORWARD).unwrap();
        assert_eq!(plain.connection, Connection::new(false, 1, 6));

        let swapped = BasisModifier::xz(column.clone()).unwrap();
        let up = swapped.try_move(Cell::ORIGIN, HexPrismDir::FORWARD).unwrap();
        assert_eq!(up.dest, Cell::new(0, 0, 1));
        assert_eq!(up.connection, Connection::new(false, 5, 6));
        let down = swapped.try_move(up.dest, up.inverse_dir).unwrap();
        assert_eq!(down.dest, Cell::ORIGIN);
        assert_eq!(down.connection, Connection::new(false, 1, 6));

        let turned = BasisModifier::new(column, Mat4::from_rotation_x(FRAC_PI_2)).unwrap();
        let up = turned.try_move(Cell::ORIGIN, HexPrismDir::FORWARD).unwrap();
        assert_eq!(up.connection, Connection::new(false, 1, 6));
    }

    #[test]
    fn mixed_types_resolve_to_listed_decorations() {
        let g = BasisModifier::xz(Arc::new(TwistedColumn)).unwrap();
        let listed = g.cell_types();
        assert_eq!(listed.len(), 2);
        for z in -2..2 {
            let ct = g.cell_type(Cell::new(0, 0, z));
            assert!(listed.iter().any(|&l| std::ptr::addr_eq(l, ct)));
        }
        assert_ne!(*g.cell_type(Cell::ORIGIN), *g.cell_type(Cell::new(0, 0, 1)));
    }

    #[test]
    fn transport_from_plain_grid_sees_different_types() {
        let plain = square();
        let swapped = BasisModifier::xz(square()).unwrap();
        let id = CellRotation::IDENTITY;
        let got = swapped
            .parallel_transport(plain.as_ref(), Cell::ORIGIN, Cell::planar(1, 0), Cell::ORIGIN, id)
            .unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn rebind_keeps_basis() {
        let g = BasisModifier::xz(square()).unwrap();
        let unbounded = g.unbounded();
        assert!(!unbounded.is_finite());
        let unbounded = unbounded.downcast_ref::<BasisModifier>().unwrap();
        assert_eq!(unbounded.basis(), XZ_SWAP);
        let bounded = g
            .bound_by(Some(&Bound::Square(SquareBound::from_size(2, 2))))
            .unwrap();
        assert_eq!(bounded.index_count(), Ok(4));
    }

    #[test]
    fn compliance() {
        compliance::run_grid_compliance(&BasisModifier::xz(square()).unwrap());
        let hex: GridRef = Arc::new(
            HexGrid::new(1.0, HexOrientation::FlatTopped, Some(HexBound::hexagon(2))).unwrap(),
        );
        compliance::run_grid_compliance(&BasisModifier::xz(hex).unwrap());
    }
}
