//! The core [`Grid`] trait and `dyn Grid` downcast support.

use crate::bound::Bound;
use crate::defaults;
use glam::{IVec3, Vec3};
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tessera_core::{Cell, CellCorner, CellDir, CellRotation, CellTypeRef, Connection, GridError};

/// Shared handle to a grid. Modifiers hold their underlying grid this way.
pub type GridRef = Arc<dyn Grid>;

/// The outcome of a successful single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// The neighbouring cell.
    pub dest: Cell,
    /// The direction that leads from `dest` back to the start cell.
    pub inverse_dir: CellDir,
    /// How the neighbour's frame is twisted relative to the start cell's.
    pub connection: Connection,
}

/// A sequence of hops: each entry is a cell and the direction to leave it by.
///
/// Following every hop in order with [`Grid::try_move`] from the first
/// cell arrives at the path's destination.
pub type Path = Vec<(Cell, CellDir)>;

/// A (possibly infinite) collection of cells and the moves between them.
///
/// Concrete grids supply the single-hop primitive [`try_move`](Self::try_move),
/// cell-type lookup and cell enumeration; most other methods have default
/// implementations in [`defaults`](crate::defaults) expressed in terms of
/// those. Grids with a native bound or offset arithmetic override the
/// relevant defaults.
///
/// Expected negative outcomes (a move off the edge, no path) are `None`.
/// `Err` is reserved for calls the grid cannot answer: a bound-dependent
/// query on an unbounded grid ([`GridError::GridInfinite`]) or an
/// operation with no implementation ([`GridError::Unsupported`]).
///
/// # Object Safety
///
/// This trait is designed for use as `dyn Grid`. Use `downcast_ref` for
/// opt-in specialisation on concrete types.
///
/// # Thread Safety
///
/// Grids hold only immutable configuration, so the trait requires
/// `Send + Sync` and grids are shared as [`GridRef`].
pub trait Grid: Any + Send + Sync + fmt::Debug + 'static {
    // ── Basics ─────────────────────────────────────────────────

    /// Whether cells are laid out in a plane.
    fn is_2d(&self) -> bool;

    /// Whether cells fill a volume.
    fn is_3d(&self) -> bool {
        !self.is_2d()
    }

    /// Whether the grid has finitely many cells.
    fn is_finite(&self) -> bool {
        self.bound().is_some()
    }

    /// Whether every cell has the same cell type.
    fn is_single_cell_type(&self) -> bool {
        self.cell_types().len() == 1
    }

    /// Every cell type [`cell_type`](Self::cell_type) can return.
    fn cell_types(&self) -> Vec<CellTypeRef>;

    // ── Relatives ──────────────────────────────────────────────

    /// The same grid with any bound removed.
    fn unbounded(&self) -> GridRef;

    // ── Cell info ──────────────────────────────────────────────

    /// Every cell, in index order.
    ///
    /// Returns `Err(GridError::GridInfinite)` for an unbounded grid.
    fn cells(&self) -> Result<Vec<Cell>, GridError>;

    /// Whether `cell` is a valid coordinate inside the grid.
    fn is_cell_in_grid(&self, cell: Cell) -> bool;

    /// The cell type of `cell`.
    fn cell_type(&self, cell: Cell) -> CellTypeRef;

    /// The directions leading out of `cell`.
    fn cell_dirs(&self, cell: Cell) -> SmallVec<[CellDir; 8]> {
        defaults::cell_dirs(self, cell)
    }

    /// The corners of `cell`.
    fn cell_corners(&self, cell: Cell) -> SmallVec<[CellCorner; 12]> {
        defaults::cell_corners(self, cell)
    }

    // ── Topology ───────────────────────────────────────────────

    /// Step from `cell` in direction `dir`.
    ///
    /// Returns `None` if the neighbour is outside the grid or `dir` is
    /// not a direction of this cell.
    fn try_move(&self, cell: Cell, dir: CellDir) -> Option<Move>;

    /// Move a rigid shape: find where `dest_offset` lands when the shape
    /// is placed with `start_offset` on `start` and turned by `rotation`.
    ///
    /// Returns the destination cell and its rotation, or `Ok(None)` if it
    /// lands outside the grid.
    fn try_move_by_offset(
        &self,
        start: Cell,
        start_offset: IVec3,
        dest_offset: IVec3,
        rotation: CellRotation,
    ) -> Result<Option<(Cell, CellRotation)>, GridError> {
        defaults::try_move_by_offset(self, start, start_offset, dest_offset, rotation)
    }

    /// Replay the displacement `src_start -> src_dest` of `src_grid` in
    /// this grid, starting from `dest_start` with orientation `rotation`.
    ///
    /// See [`defaults::parallel_transport`] for the algorithm and its
    /// precondition on connections.
    fn parallel_transport(
        &self,
        src_grid: &dyn Grid,
        src_start: Cell,
        src_dest: Cell,
        dest_start: Cell,
        rotation: CellRotation,
    ) -> Result<Option<(Cell, CellRotation)>, GridError> {
        defaults::parallel_transport(src_grid, src_start, src_dest, self, dest_start, rotation)
    }

    /// A valid hop sequence from `start` to `dest`, or `Ok(None)` if
    /// `dest` is unreachable.
    fn find_basic_path(&self, start: Cell, dest: Cell) -> Result<Option<Path>, GridError> {
        defaults::find_basic_path(self, start, dest)
    }

    // ── Index ──────────────────────────────────────────────────

    /// Number of cells. Needs a finite grid.
    ///
    /// Default implementation enumerates [`cells`](Self::cells).
    fn index_count(&self) -> Result<usize, GridError> {
        Ok(self.cells()?.len())
    }

    /// Dense index of `cell` in `0..index_count()`. Needs a finite grid.
    ///
    /// Default implementation performs a linear search.
    fn index(&self, cell: Cell) -> Result<Option<usize>, GridError> {
        Ok(self.cells()?.iter().position(|&c| c == cell))
    }

    /// The cell with dense index `index`. Needs a finite grid.
    fn cell_by_index(&self, index: usize) -> Result<Option<Cell>, GridError> {
        Ok(self.cells()?.get(index).copied())
    }

    // ── Bounds ─────────────────────────────────────────────────

    /// The grid's bound, or `None` if it covers its whole address space.
    fn bound(&self) -> Option<Bound> {
        None
    }

    /// The smallest bound of this grid's family covering `cells`.
    ///
    /// `Ok(None)` means "unrestricted".
    fn bound_of(&self, cells: &[Cell]) -> Result<Option<Bound>, GridError> {
        defaults::bound_of(self, cells)
    }

    /// This grid restricted to `bound`. `None` returns the grid unchanged.
    fn bound_by(&self, bound: Option<&Bound>) -> Result<GridRef, GridError>;

    /// Intersect two bounds; `None` is the identity.
    fn intersect_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        defaults::intersect_bounds(a, b)
    }

    /// Union two bounds; `None` absorbs.
    fn union_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        defaults::union_bounds(a, b)
    }

    /// Cells of this grid inside `bound`; `None` enumerates every cell.
    fn cells_in_bounds(&self, bound: Option<&Bound>) -> Result<Vec<Cell>, GridError> {
        defaults::cells_in_bounds(self, bound)
    }

    // ── Position ───────────────────────────────────────────────

    /// Centre of `cell` in grid-local space.
    fn cell_center(&self, cell: Cell) -> Vec3;
}

impl dyn Grid {
    /// Attempt to downcast a trait object to a concrete grid type.
    pub fn downcast_ref<T: Grid>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
