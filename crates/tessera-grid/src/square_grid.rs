//! 2D grid of square cells.

use crate::bound::{Bound, SquareBound};
use crate::grid::{Grid, GridRef, Move, Path};
use crate::square::{self, SquareCellType, SquareDir};
use glam::{IVec3, Vec2, Vec3};
use std::sync::Arc;
use tessera_core::{Cell, CellDir, CellRotation, CellTypeRef, Connection, GridError};

/// A regular grid of squares in the XY plane.
///
/// Cell `(x, y, 0)` covers `[x, x + 1) * cell_size.x` by
/// `[y, y + 1) * cell_size.y`. Cells with a non-zero `z` are never part of
/// the grid. An optional [`SquareBound`] makes the grid finite; bounded
/// grids index their cells in row order.
///
/// # Examples
///
/// ```
/// use tessera_grid::{Grid, SquareBound, SquareDir, SquareGrid};
/// use tessera_core::Cell;
///
/// let grid = SquareGrid::new(1.0, Some(SquareBound::from_size(4, 3))).unwrap();
/// assert_eq!(grid.index_count().unwrap(), 12);
///
/// let step = grid.try_move(Cell::planar(0, 0), SquareDir::Up.into()).unwrap();
/// assert_eq!(step.dest, Cell::planar(0, 1));
/// // Off the left edge.
/// assert!(grid.try_move(Cell::planar(0, 0), SquareDir::Left.into()).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SquareGrid {
    cell_size: Vec2,
    bound: Option<SquareBound>,
}

/// Reject sizes that would put cell centres at NaN or infinity.
pub(crate) fn validate_cell_size(cell_size: Vec2) -> Result<Vec2, GridError> {
    if !cell_size.is_finite() || cell_size.min_element() <= 0.0 {
        return Err(GridError::InvalidConfig {
            reason: format!("cell size must be finite and positive, got {cell_size}"),
        });
    }
    Ok(cell_size)
}

impl SquareGrid {
    /// Create a grid of `cell_size` by `cell_size` squares.
    ///
    /// Returns `Err(GridError::InvalidConfig)` unless `cell_size` is
    /// finite and positive.
    pub fn new(cell_size: f32, bound: Option<SquareBound>) -> Result<Self, GridError> {
        Self::with_cell_size(Vec2::splat(cell_size), bound)
    }

    /// Create a grid of rectangles.
    pub fn with_cell_size(cell_size: Vec2, bound: Option<SquareBound>) -> Result<Self, GridError> {
        Ok(Self {
            cell_size: validate_cell_size(cell_size)?,
            bound,
        })
    }

    /// Size of one cell.
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// The native bound, if any.
    pub fn square_bound(&self) -> Option<&SquareBound> {
        self.bound.as_ref()
    }

    fn with_bound(&self, bound: Option<SquareBound>) -> Self {
        Self {
            cell_size: self.cell_size,
            bound,
        }
    }

    fn require_bound(&self) -> Result<&SquareBound, GridError> {
        self.bound.as_ref().ok_or(GridError::GridInfinite)
    }
}

fn as_square(bound: &Bound) -> Result<SquareBound, GridError> {
    match bound {
        Bound::Square(b) => Ok(*b),
        other => Err(GridError::BoundMismatch {
            expected: "square",
            found: other.kind(),
        }),
    }
}

fn as_square_opt(bound: Option<&Bound>) -> Result<Option<SquareBound>, GridError> {
    bound.map(as_square).transpose()
}

impl Grid for SquareGrid {
    fn is_2d(&self) -> bool {
        true
    }

    fn is_single_cell_type(&self) -> bool {
        true
    }

    fn cell_types(&self) -> Vec<CellTypeRef> {
        vec![SquareCellType::get()]
    }

    fn unbounded(&self) -> GridRef {
        Arc::new(self.with_bound(None))
    }

    fn cells(&self) -> Result<Vec<Cell>, GridError> {
        Ok(self.require_bound()?.cells().collect())
    }

    fn is_cell_in_grid(&self, cell: Cell) -> bool {
        cell.z == 0 && self.bound.is_none_or(|b| b.contains(cell))
    }

    fn cell_type(&self, _cell: Cell) -> CellTypeRef {
        SquareCellType::get()
    }

    fn try_move(&self, cell: Cell, dir: CellDir) -> Option<Move> {
        let d = SquareDir::try_from(dir).ok()?;
        let dest = cell + d.offset();
        if !self.is_cell_in_grid(dest) {
            return None;
        }
        Some(Move {
            dest,
            inverse_dir: d.inverted().into(),
            connection: Connection::edge(false),
        })
    }

    fn try_move_by_offset(
        &self,
        start: Cell,
        start_offset: IVec3,
        dest_offset: IVec3,
        rotation: CellRotation,
    ) -> Result<Option<(Cell, CellRotation)>, GridError> {
        let dest = start + square::rotate_offset(dest_offset - start_offset, rotation);
        Ok(self.is_cell_in_grid(dest).then_some((dest, rotation)))
    }

    /// Walks along X, then along Y. The path is as short as possible and
    /// never leaves the rectangle spanned by its ends.
    fn find_basic_path(&self, start: Cell, dest: Cell) -> Result<Option<Path>, GridError> {
        if !self.is_cell_in_grid(start) || !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        let mut path = Path::new();
        let mut at = start;
        for (delta, pos, neg) in [
            (dest.x - start.x, SquareDir::Right, SquareDir::Left),
            (dest.y - start.y, SquareDir::Up, SquareDir::Down),
        ] {
            let d = if delta > 0 { pos } else { neg };
            for _ in 0..delta.unsigned_abs() {
                path.push((at, d.into()));
                at = at + d.offset();
            }
        }
        Ok(Some(path))
    }

    fn index_count(&self) -> Result<usize, GridError> {
        Ok(self.require_bound()?.len())
    }

    fn index(&self, cell: Cell) -> Result<Option<usize>, GridError> {
        let b = self.require_bound()?;
        Ok(if cell.z == 0 { b.index_of(cell) } else { None })
    }

    fn cell_by_index(&self, index: usize) -> Result<Option<Cell>, GridError> {
        Ok(self.require_bound()?.cell_at(index))
    }

    fn bound(&self) -> Option<Bound> {
        self.bound.map(Bound::Square)
    }

    fn bound_of(&self, cells: &[Cell]) -> Result<Option<Bound>, GridError> {
        SquareBound::from_cells(cells)
            .map(|b| Some(Bound::Square(b)))
            .ok_or(GridError::EmptyCellSet)
    }

    fn bound_by(&self, bound: Option<&Bound>) -> Result<GridRef, GridError> {
        let bound = match (self.bound, as_square_opt(bound)?) {
            (Some(own), Some(b)) => Some(own.intersect(&b)),
            (own, b) => own.or(b),
        };
        Ok(Arc::new(self.with_bound(bound)))
    }

    fn intersect_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        as_square_opt(a)?;
        as_square_opt(b)?;
        crate::defaults::intersect_bounds(a, b)
    }

    fn union_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        as_square_opt(a)?;
        as_square_opt(b)?;
        crate::defaults::union_bounds(a, b)
    }

    fn cells_in_bounds(&self, bound: Option<&Bound>) -> Result<Vec<Cell>, GridError> {
        match as_square_opt(bound)? {
            None => self.cells(),
            Some(b) => {
                let b = match self.bound {
                    Some(own) => own.intersect(&b),
                    None => b,
                };
                Ok(b.cells().collect())
            }
        }
    }

    fn cell_center(&self, cell: Cell) -> Vec3 {
        Vec3::new(
            (cell.x as f32 + 0.5) * self.cell_size.x,
            (cell.y as f32 + 0.5) * self.cell_size.y,
            0.0,
        )
    }
}
