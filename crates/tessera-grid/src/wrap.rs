//! Torus-style wrapping of a grid.

use crate::bound::{Bound, SquareBound};
use crate::grid::{Grid, GridRef, Move, Path};
use crate::modifier::Modifier;
use crate::square_grid::SquareGrid;
use glam::{IVec3, Vec3};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tessera_core::{Cell, CellCorner, CellDir, CellRotation, CellTypeRef, GridError};
use tracing::debug;

/// Maps a raw coordinate to its representative inside the wrapped domain,
/// or `None` if the coordinate has no representative.
pub type Canonicalize = Arc<dyn Fn(Cell) -> Option<Cell> + Send + Sync>;

/// A grid that connects back onto itself when a move leaves its domain.
///
/// Moves are made on the *unbounded* form of the underlying grid and the
/// result is passed through the canonicalisation function, so leaving one
/// edge re-enters from the opposite edge. A move fails exactly when the
/// unbounded move fails or canonicalisation rejects the cell.
///
/// The canonicalisation must be idempotent and fix every cell already in
/// the domain.
///
/// # Examples
///
/// ```
/// use tessera_grid::{Grid, SquareBound, SquareDir, SquareGrid, WrapModifier};
/// use tessera_core::Cell;
///
/// let grid = SquareGrid::new(1.0, Some(SquareBound::from_size(3, 3))).unwrap();
/// let torus = WrapModifier::square_torus(grid).unwrap();
///
/// let step = torus.try_move(Cell::planar(2, 0), SquareDir::Right.into()).unwrap();
/// assert_eq!(step.dest, Cell::planar(0, 0));
/// ```
#[derive(Clone)]
pub struct WrapModifier {
    underlying: GridRef,
    unbounded_underlying: GridRef,
    canonicalize: Canonicalize,
}

impl WrapModifier {
    /// Wrap `underlying` with the given canonicalisation.
    pub fn new<F>(underlying: GridRef, canonicalize: F) -> Self
    where
        F: Fn(Cell) -> Option<Cell> + Send + Sync + 'static,
    {
        Self::with_canonicalize(underlying, Arc::new(canonicalize))
    }

    fn with_canonicalize(underlying: GridRef, canonicalize: Canonicalize) -> Self {
        let unbounded_underlying = underlying.unbounded();
        Self {
            underlying,
            unbounded_underlying,
            canonicalize,
        }
    }

    /// Turn a bounded square grid into a torus over its bound.
    ///
    /// Returns `Err(GridError::GridInfinite)` for an unbounded grid and
    /// `Err(GridError::InvalidConfig)` for an empty bound.
    pub fn square_torus(grid: SquareGrid) -> Result<Self, GridError> {
        let bound: SquareBound = *grid.square_bound().ok_or(GridError::GridInfinite)?;
        if bound.is_empty() {
            return Err(GridError::InvalidConfig {
                reason: format!("cannot wrap an empty bound {:?}..{:?}", bound.min, bound.max),
            });
        }
        Ok(Self::new(Arc::new(grid), move |cell| {
            if cell.z != 0 {
                return None;
            }
            bound.wrap(cell)
        }))
    }

    /// The representative of `cell`, or `None` if it has none.
    pub fn canonicalize(&self, cell: Cell) -> Option<Cell> {
        (self.canonicalize)(cell)
    }

    fn canonical_dest(&self, raw: Cell) -> Option<Cell> {
        let cell = self.canonicalize(raw);
        if cell.is_none() {
            debug!(%raw, "wrap rejected cell");
        }
        cell
    }
}

impl fmt::Debug for WrapModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapModifier")
            .field("underlying", &self.underlying)
            .finish_non_exhaustive()
    }
}

impl Modifier for WrapModifier {
    fn underlying(&self) -> &GridRef {
        &self.underlying
    }

    fn rebind(&self, underlying: GridRef) -> Self {
        Self::with_canonicalize(underlying, Arc::clone(&self.canonicalize))
    }
}

impl Grid for WrapModifier {
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
        self.underlying.cell_types()
    }

    /// Removing the wrap would change the topology, so this is `self`.
    fn unbounded(&self) -> GridRef {
        Arc::new(self.clone())
    }

    fn cells(&self) -> Result<Vec<Cell>, GridError> {
        self.underlying.cells()
    }

    fn is_cell_in_grid(&self, cell: Cell) -> bool {
        self.underlying.is_cell_in_grid(cell)
    }

    fn cell_type(&self, cell: Cell) -> CellTypeRef {
        self.underlying.cell_type(cell)
    }

    fn cell_dirs(&self, cell: Cell) -> SmallVec<[CellDir; 8]> {
        self.underlying.cell_dirs(cell)
    }

    fn cell_corners(&self, cell: Cell) -> SmallVec<[CellCorner; 12]> {
        self.underlying.cell_corners(cell)
    }

    fn try_move(&self, cell: Cell, dir: CellDir) -> Option<Move> {
        let m = self.unbounded_underlying.try_move(cell, dir)?;
        Some(Move {
            dest: self.canonical_dest(m.dest)?,
            ..m
        })
    }

    fn try_move_by_offset(
        &self,
        start: Cell,
        start_offset: IVec3,
        dest_offset: IVec3,
        rotation: CellRotation,
    ) -> Result<Option<(Cell, CellRotation)>, GridError> {
        let moved = self
            .unbounded_underlying
            .try_move_by_offset(start, start_offset, dest_offset, rotation)?;
        Ok(moved.and_then(|(raw, rotation)| Some((self.canonical_dest(raw)?, rotation))))
    }

    /// Paths never cross the seam: a path in the underlying grid is valid
    /// here because canonicalisation fixes in-domain cells.
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
        self.underlying.cell_center(cell)
    }
}
