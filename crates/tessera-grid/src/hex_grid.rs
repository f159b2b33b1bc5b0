//! 2D grid of hexagons in cube coordinates.

use crate::bound::{Bound, HexBound};
use crate::grid::{Grid, GridRef, Move, Path};
use crate::hex::{self, HEX_OFFSETS};
use crate::ngon::NGonCellType;
use crate::square_grid::validate_cell_size;
use glam::{IVec3, Vec2, Vec3};
use std::sync::Arc;
use tessera_core::{Cell, CellDir, CellRotation, CellTypeRef, Connection, GridError, HexOrientation};

/// Ratio of a regular hexagon's corner-to-corner span to its edge-to-edge
/// span.
const CORNER_SPAN: f32 = 1.154_700_5;

/// A regular grid of hexagons in the XY plane.
///
/// Cells use cube coordinates `(x, y, z)` with `x + y + z == 0`; see
/// [`HEX_OFFSETS`] for the direction layout. Both orientations share the
/// same indices and offsets and differ only in where cell centres sit.
///
/// `cell_size` is the extent of one cell's bounding box. [`HexGrid::new`]
/// derives it from the distance between neighbouring centres so the
/// hexagons are regular.
///
/// # Examples
///
/// ```
/// use tessera_grid::{Grid, HexBound, HexGrid, PtHexDir};
/// use tessera_core::{Cell, HexOrientation};
///
/// let grid = HexGrid::new(1.0, HexOrientation::PointyTopped, Some(HexBound::hexagon(2))).unwrap();
/// assert_eq!(grid.index_count().unwrap(), 19);
///
/// let step = grid.try_move(Cell::hex(0, 0), PtHexDir::UpLeft.into()).unwrap();
/// assert_eq!(step.dest, Cell::hex(-1, 1));
/// assert_eq!(step.inverse_dir, PtHexDir::DownRight.into());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HexGrid {
    cell_size: Vec2,
    orientation: HexOrientation,
    bound: Option<HexBound>,
}

impl HexGrid {
    /// Create a grid of regular hexagons whose neighbouring centres are
    /// `spacing` apart.
    ///
    /// Returns `Err(GridError::InvalidConfig)` unless `spacing` is finite
    /// and positive.
    pub fn new(
        spacing: f32,
        orientation: HexOrientation,
        bound: Option<HexBound>,
    ) -> Result<Self, GridError> {
        let cell_size = match orientation {
            HexOrientation::PointyTopped => Vec2::new(spacing, spacing * CORNER_SPAN),
            HexOrientation::FlatTopped => Vec2::new(spacing * CORNER_SPAN, spacing),
        };
        Self::with_cell_size(cell_size, orientation, bound)
    }

    /// Create a grid with an explicit bounding-box size per cell.
    pub fn with_cell_size(
        cell_size: Vec2,
        orientation: HexOrientation,
        bound: Option<HexBound>,
    ) -> Result<Self, GridError> {
        Ok(Self {
            cell_size: validate_cell_size(cell_size)?,
            orientation,
            bound,
        })
    }

    /// Size of one cell's bounding box.
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Which way up the hexagons sit.
    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    /// The native bound, if any.
    pub fn hex_bound(&self) -> Option<&HexBound> {
        self.bound.as_ref()
    }

    fn with_bound(&self, bound: Option<HexBound>) -> Self {
        Self {
            cell_size: self.cell_size,
            orientation: self.orientation,
            bound,
        }
    }

    fn require_bound(&self) -> Result<&HexBound, GridError> {
        self.bound.as_ref().ok_or(GridError::GridInfinite)
    }
}

fn as_hex(bound: &Bound) -> Result<HexBound, GridError> {
    match bound {
        Bound::Hex(b) => Ok(*b),
        other => Err(GridError::BoundMismatch {
            expected: "hex",
            found: other.kind(),
        }),
    }
}

fn as_hex_opt(bound: Option<&Bound>) -> Result<Option<HexBound>, GridError> {
    bound.map(as_hex).transpose()
}

/// The direction that moves every coordinate of `delta` towards zero
/// without overshooting. `delta` must be non-zero with a zero sum.
fn step_towards(delta: IVec3) -> Option<CellDir> {
    let d = delta.to_array();
    HEX_OFFSETS.iter().position(|o| {
        o.to_array()
            .iter()
            .zip(d)
            .all(|(&c, d)| c == 0 || c == d.signum())
    })
    .map(|i| CellDir(i as u8))
}

impl Grid for HexGrid {
    fn is_2d(&self) -> bool {
        true
    }

    fn is_single_cell_type(&self) -> bool {
        true
    }

    fn cell_types(&self) -> Vec<CellTypeRef> {
        vec![NGonCellType::hex(self.orientation)]
    }

    fn unbounded(&self) -> GridRef {
        Arc::new(self.with_bound(None))
    }

    fn cells(&self) -> Result<Vec<Cell>, GridError> {
        Ok(self.require_bound()?.cells().collect())
    }

    fn is_cell_in_grid(&self, cell: Cell) -> bool {
        cell.x + cell.y + cell.z == 0 && self.bound.is_none_or(|b| b.contains(cell))
    }

    fn cell_type(&self, _cell: Cell) -> CellTypeRef {
        NGonCellType::hex(self.orientation)
    }

    fn try_move(&self, cell: Cell, dir: CellDir) -> Option<Move> {
        let dest = cell + hex::dir_offset(dir)?;
        if !self.is_cell_in_grid(dest) {
            return None;
        }
        Some(Move {
            dest,
            inverse_dir: CellDir((dir.0 + 3) % 6),
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
        let dest = start + hex::rotate_offset(dest_offset - start_offset, rotation);
        Ok(self.is_cell_in_grid(dest).then_some((dest, rotation)))
    }

    /// Greedy walk that moves every cube coordinate monotonically towards
    /// the destination. The path is as short as possible and stays inside
    /// any bound containing both ends.
    fn find_basic_path(&self, start: Cell, dest: Cell) -> Result<Option<Path>, GridError> {
        if !self.is_cell_in_grid(start) || !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        let mut path = Path::with_capacity(hex::hex_distance(start, dest) as usize);
        let mut at = start;
        while at != dest {
            let Some(dir) = step_towards(dest - at) else {
                return Ok(None);
            };
            path.push((at, dir));
            at = at + HEX_OFFSETS[dir.0 as usize];
        }
        Ok(Some(path))
    }

    fn index_count(&self) -> Result<usize, GridError> {
        Ok(self.require_bound()?.len())
    }

    fn index(&self, cell: Cell) -> Result<Option<usize>, GridError> {
        Ok(self.require_bound()?.index_of(cell))
    }

    fn cell_by_index(&self, index: usize) -> Result<Option<Cell>, GridError> {
        Ok(self.require_bound()?.cell_at(index))
    }

    fn bound(&self) -> Option<Bound> {
        self.bound.map(Bound::Hex)
    }

    fn bound_of(&self, cells: &[Cell]) -> Result<Option<Bound>, GridError> {
        HexBound::from_cells(cells)
            .map(|b| Some(Bound::Hex(b)))
            .ok_or(GridError::EmptyCellSet)
    }

    fn bound_by(&self, bound: Option<&Bound>) -> Result<GridRef, GridError> {
        let bound = match (self.bound, as_hex_opt(bound)?) {
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
        as_hex_opt(a)?;
        as_hex_opt(b)?;
        crate::defaults::intersect_bounds(a, b)
    }

    fn union_bounds(
        &self,
        a: Option<&Bound>,
        b: Option<&Bound>,
    ) -> Result<Option<Bound>, GridError> {
        as_hex_opt(a)?;
        as_hex_opt(b)?;
        crate::defaults::union_bounds(a, b)
    }

    fn cells_in_bounds(&self, bound: Option<&Bound>) -> Result<Vec<Cell>, GridError> {
        match as_hex_opt(bound)? {
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
        let (x, y, z) = (cell.x as f32, cell.y as f32, cell.z as f32);
        let Vec2 { x: sx, y: sy } = self.cell_size;
        match self.orientation {
            HexOrientation::FlatTopped => Vec3::new(
                (0.5 * x - 0.25 * y - 0.25 * z) * sx,
                (0.5 * y - 0.5 * z) * sy,
                0.0,
            ),
            HexOrientation::PointyTopped => Vec3::new(
                (0.5 * x - 0.5 * z) * sx,
                (0.5 * y - 0.25 * x - 0.25 * z) * sy,
                0.0,
            ),
        }
    }
}
