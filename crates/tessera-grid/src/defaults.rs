//! Shape-agnostic fallbacks for [`Grid`] methods.
//!
//! Each function is written purely in terms of the grid's required
//! methods (`try_move`, `cell_type`, `cells`). The trait's default
//! methods call into here; concrete grids and modifiers may call them
//! too when they only want to adjust part of the behaviour.

use crate::bound::Bound;
use crate::grid::{Grid, GridRef, Path};
use glam::IVec3;
use smallvec::SmallVec;
use std::sync::Arc;
use tessera_core::{Cell, CellCorner, CellDir, CellRotation, CellTypeRef, GridError};
use tracing::{debug, trace};

/// The directions of `cell`'s cell type.
pub fn cell_dirs<G: Grid + ?Sized>(grid: &G, cell: Cell) -> SmallVec<[CellDir; 8]> {
    grid.cell_type(cell).cell_dirs()
}

/// The corners of `cell`'s cell type.
pub fn cell_corners<G: Grid + ?Sized>(grid: &G, cell: Cell) -> SmallVec<[CellCorner; 12]> {
    grid.cell_type(cell).cell_corners()
}

// ── Topology ───────────────────────────────────────────────────

/// No generic offset arithmetic exists; grids with a coordinate system
/// override [`Grid::try_move_by_offset`].
pub fn try_move_by_offset<G: Grid + ?Sized>(
    _grid: &G,
    _start: Cell,
    _start_offset: IVec3,
    _dest_offset: IVec3,
    _rotation: CellRotation,
) -> Result<Option<(Cell, CellRotation)>, GridError> {
    Err(GridError::Unsupported {
        operation: "try_move_by_offset",
    })
}

/// No generic path search exists; grids override
/// [`Grid::find_basic_path`] with one suited to their coordinates.
pub fn find_basic_path<G: Grid + ?Sized>(
    _grid: &G,
    _start: Cell,
    _dest: Cell,
) -> Result<Option<Path>, GridError> {
    Err(GridError::Unsupported {
        operation: "find_basic_path",
    })
}

/// Carry an orientation across a displacement, possibly between grids.
///
/// Finds a hop path from `src_start` to `src_dest` in `src_grid`, then
/// replays it in `dest_grid` from `dest_start`. Each hop's direction is
/// turned by `rotation` before stepping, and the cell types on both sides
/// must compare equal at every hop.
///
/// The rotation is carried unchanged along the path: connections reported
/// by the destination grid are not folded into it. The result is exact
/// when every hop in `dest_grid` has an identity connection (true for the
/// square and hex grids and their wraps); for twisted hops the callers
/// must apply the connections themselves. Twisted hops are logged at
/// `trace` level.
///
/// Returns `Ok(None)` when there is no path, a cell type differs, or a
/// replayed step leaves `dest_grid`. Fails with whatever `src_grid`'s
/// [`find_basic_path`](Grid::find_basic_path) fails with.
pub fn parallel_transport<S, D>(
    src_grid: &S,
    src_start: Cell,
    src_dest: Cell,
    dest_grid: &D,
    dest_start: Cell,
    rotation: CellRotation,
) -> Result<Option<(Cell, CellRotation)>, GridError>
where
    S: Grid + ?Sized,
    D: Grid + ?Sized,
{
    let Some(path) = src_grid.find_basic_path(src_start, src_dest)? else {
        debug!(%src_start, %src_dest, "parallel transport abandoned: no path");
        return Ok(None);
    };

    // Single-typed grids are checked once up front.
    let fixed: Option<CellTypeRef> =
        if src_grid.is_single_cell_type() && dest_grid.is_single_cell_type() {
            let src_types = src_grid.cell_types();
            let dest_types = dest_grid.cell_types();
            match (src_types.first(), dest_types.first()) {
                (Some(&s), Some(&d)) if *s == *d => Some(s),
                _ => {
                    debug!("parallel transport abandoned: grids have different cell types");
                    return Ok(None);
                }
            }
        } else {
            None
        };

    let mut dest_cell = dest_start;
    for (src_cell, src_dir) in path {
        let cell_type = match fixed {
            Some(ct) => ct,
            None => {
                let s = src_grid.cell_type(src_cell);
                if *s != *dest_grid.cell_type(dest_cell) {
                    debug!(
                        %src_cell,
                        %dest_cell,
                        "parallel transport abandoned: cell types differ"
                    );
                    return Ok(None);
                }
                s
            }
        };
        let dest_dir = cell_type.rotate_dir(src_dir, rotation);
        let Some(step) = dest_grid.try_move(dest_cell, dest_dir) else {
            debug!(%dest_cell, %dest_dir, "parallel transport abandoned: step blocked");
            return Ok(None);
        };
        if !step.connection.is_identity() {
            trace!(
                %dest_cell,
                %dest_dir,
                connection = ?step.connection,
                "twisted hop; rotation carried unchanged"
            );
        }
        trace!(%src_cell, %src_dir, from = %dest_cell, to = %step.dest, "replayed hop");
        dest_cell = step.dest;
    }
    Ok(Some((dest_cell, rotation)))
}

/// Walk `path` from `start` and return where it ends.
///
/// Returns `None` if any hop does not start where the previous one ended
/// or cannot be taken. An empty path ends at `start`.
pub fn follow_path<G: Grid + ?Sized>(
    grid: &G,
    start: Cell,
    path: &[(Cell, CellDir)],
) -> Option<Cell> {
    path.iter().try_fold(start, |at, &(cell, dir)| {
        if cell != at {
            return None;
        }
        grid.try_move(cell, dir).map(|m| m.dest)
    })
}

// ── Bounds ─────────────────────────────────────────────────────

/// Grids without a bound concept describe every cell set as unrestricted.
pub fn bound_of<G: Grid + ?Sized>(_grid: &G, _cells: &[Cell]) -> Result<Option<Bound>, GridError> {
    Ok(None)
}

/// Restrict a clonable grid with no bound concept. Only `None` is
/// accepted, and returns the grid unchanged.
pub fn bound_by<G: Grid + Clone>(grid: &G, bound: Option<&Bound>) -> Result<GridRef, GridError> {
    match bound {
        None => Ok(Arc::new(grid.clone())),
        Some(b) => {
            debug!(kind = b.kind(), "bound_by on a grid without bounds");
            Err(GridError::Unsupported {
                operation: "bound_by on a grid without bounds",
            })
        }
    }
}

/// `None` is the identity for intersection.
pub fn intersect_bounds(a: Option<&Bound>, b: Option<&Bound>) -> Result<Option<Bound>, GridError> {
    match (a, b) {
        (None, None) => Ok(None),
        (Some(x), None) | (None, Some(x)) => Ok(Some(*x)),
        (Some(a), Some(b)) => a.intersect(b).map(Some),
    }
}

/// `None` absorbs under union.
pub fn union_bounds(a: Option<&Bound>, b: Option<&Bound>) -> Result<Option<Bound>, GridError> {
    match (a, b) {
        (Some(a), Some(b)) => a.union(b).map(Some),
        _ => Ok(None),
    }
}

/// Cells of `grid` inside `bound`. `None` enumerates the whole grid,
/// failing with [`GridError::GridInfinite`] if it is unbounded.
pub fn cells_in_bounds<G: Grid + ?Sized>(
    grid: &G,
    bound: Option<&Bound>,
) -> Result<Vec<Cell>, GridError> {
    let cells = grid.cells()?;
    Ok(match bound {
        None => cells,
        Some(b) => cells.into_iter().filter(|&c| b.contains(c)).collect(),
    })
}
