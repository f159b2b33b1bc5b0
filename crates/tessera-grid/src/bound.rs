//! Finite bounds for the built-in grid families.
//!
//! Every bound is a half-open box: `min` is inclusive and `max` is
//! exclusive on each axis. An inverted box (any `max <= min`) is empty.
//! Grids without a bound concept use `None` for "the whole grid".

use glam::{IVec2, IVec3};
use std::ops::Range;
use tessera_core::{Cell, GridError};

/// An axis-aligned rectangle of square cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SquareBound {
    /// Inclusive lower corner.
    pub min: IVec2,
    /// Exclusive upper corner.
    pub max: IVec2,
}

impl SquareBound {
    /// Create a bound from its corners.
    pub const fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// A `width` by `height` rectangle anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(IVec2::ZERO, IVec2::new(width, height))
    }

    /// Extent on each axis, clamped at zero.
    pub fn size(&self) -> IVec2 {
        (self.max - self.min).max(IVec2::ZERO)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        let s = self.size();
        s.x as usize * s.y as usize
    }

    /// Whether the bound contains no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `cell` lies inside. The `z` coordinate is ignored.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.y >= self.min.y && cell.x < self.max.x && cell.y < self.max.y
    }

    /// The overlap of two bounds, possibly empty.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// The smallest bound covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// The smallest bound covering every cell, or `None` for no cells.
    pub fn from_cells(cells: &[Cell]) -> Option<Self> {
        let (first, rest) = cells.split_first()?;
        let start = IVec2::new(first.x, first.y);
        let (min, max) = rest.iter().fold((start, start), |(min, max), c| {
            let v = IVec2::new(c.x, c.y);
            (min.min(v), max.max(v))
        });
        Some(Self::new(min, max + IVec2::ONE))
    }

    /// Cells in row order: `y` outer, `x` inner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| Cell::planar(x, y)))
    }

    /// Position of `cell` in [`cells`](Self::cells) order.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let w = self.size().x as usize;
        Some((cell.x - self.min.x) as usize + (cell.y - self.min.y) as usize * w)
    }

    /// The cell at `index` in [`cells`](Self::cells) order.
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.len() {
            return None;
        }
        let w = self.size().x as usize;
        Some(Cell::planar(
            self.min.x + (index % w) as i32,
            self.min.y + (index / w) as i32,
        ))
    }

    /// Map any planar cell onto the bound by wrapping each axis.
    ///
    /// Returns `None` when the bound is empty.
    pub fn wrap(&self, cell: Cell) -> Option<Cell> {
        if self.is_empty() {
            return None;
        }
        let s = self.size();
        Some(Cell::planar(
            self.min.x + (cell.x - self.min.x).rem_euclid(s.x),
            self.min.y + (cell.y - self.min.y).rem_euclid(s.y),
        ))
    }
}

/// A box of hex cells in cube coordinates.
///
/// A cell is inside when every one of its three coordinates lies in the
/// corresponding half-open range, so the box can be cut down to a
/// hexagon-shaped region by narrowing `z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexBound {
    /// Inclusive lower corner.
    pub min: IVec3,
    /// Exclusive upper corner.
    pub max: IVec3,
}

impl HexBound {
    /// Create a bound from its corners.
    pub const fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// A hexagon-shaped region of every cell within `radius` steps of the
    /// origin.
    pub fn hexagon(radius: i32) -> Self {
        Self::new(IVec3::splat(-radius), IVec3::splat(radius + 1))
    }

    /// Whether `cell` lies inside.
    pub fn contains(&self, cell: Cell) -> bool {
        let v = cell.to_ivec3();
        v.cmpge(self.min).all() && v.cmplt(self.max).all()
    }

    /// The overlap of two bounds, possibly empty.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// The smallest bound covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// The smallest bound covering every cell, or `None` for no cells.
    pub fn from_cells(cells: &[Cell]) -> Option<Self> {
        let (first, rest) = cells.split_first()?;
        let start = first.to_ivec3();
        let (min, max) = rest.iter().fold((start, start), |(min, max), c| {
            (min.min(c.to_ivec3()), max.max(c.to_ivec3()))
        });
        Some(Self::new(min, max + IVec3::ONE))
    }

    /// The `x` values present in row `y`.
    fn row(&self, y: i32) -> Range<i32> {
        // z = -x - y must satisfy min.z <= z < max.z.
        let lo = self.min.x.max(-y - self.max.z + 1);
        let hi = self.max.x.min(-y - self.min.z + 1);
        lo..hi.max(lo)
    }

    fn rows(&self) -> Range<i32> {
        self.min.y..self.max.y.max(self.min.y)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows().map(|y| self.row(y).len()).sum()
    }

    /// Whether the bound contains no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells in row order: `y` outer, `x` inner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows()
            .flat_map(move |y| self.row(y).map(move |x| Cell::hex(x, y)))
    }

    /// Position of `cell` in [`cells`](Self::cells) order.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) || cell.x + cell.y + cell.z != 0 {
            return None;
        }
        let before: usize = (self.min.y..cell.y).map(|y| self.row(y).len()).sum();
        Some(before + (cell.x - self.row(cell.y).start) as usize)
    }

    /// The cell at `index` in [`cells`](Self::cells) order.
    pub fn cell_at(&self, mut index: usize) -> Option<Cell> {
        for y in self.rows() {
            let row = self.row(y);
            if index < row.len() {
                return Some(Cell::hex(row.start + index as i32, y));
            }
            index -= row.len();
        }
        None
    }
}

/// The bound of one of the built-in grid families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Bound of a [`SquareGrid`](crate::SquareGrid).
    Square(SquareBound),
    /// Bound of a [`HexGrid`](crate::HexGrid).
    Hex(HexBound),
}

impl Bound {
    /// Short name of the bound family, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Square(_) => "square",
            Self::Hex(_) => "hex",
        }
    }

    /// Whether `cell` lies inside.
    pub fn contains(&self, cell: Cell) -> bool {
        match self {
            Self::Square(b) => b.contains(cell),
            Self::Hex(b) => b.contains(cell),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Self::Square(b) => b.len(),
            Self::Hex(b) => b.len(),
        }
    }

    /// Whether the bound contains no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells in row order.
    pub fn cells(&self) -> Vec<Cell> {
        match self {
            Self::Square(b) => b.cells().collect(),
            Self::Hex(b) => b.cells().collect(),
        }
    }

    /// The overlap of two bounds of the same family.
    pub fn intersect(&self, other: &Self) -> Result<Self, GridError> {
        match (self, other) {
            (Self::Square(a), Self::Square(b)) => Ok(Self::Square(a.intersect(b))),
            (Self::Hex(a), Self::Hex(b)) => Ok(Self::Hex(a.intersect(b))),
            _ => Err(self.mismatch(other)),
        }
    }

    /// The smallest bound of the same family covering both.
    pub fn union(&self, other: &Self) -> Result<Self, GridError> {
        match (self, other) {
            (Self::Square(a), Self::Square(b)) => Ok(Self::Square(a.union(b))),
            (Self::Hex(a), Self::Hex(b)) => Ok(Self::Hex(a.union(b))),
            _ => Err(self.mismatch(other)),
        }
    }

    fn mismatch(&self, other: &Self) -> GridError {
        GridError::BoundMismatch {
            expected: self.kind(),
            found: other.kind(),
        }
    }
}

impl From<SquareBound> for Bound {
    fn from(b: SquareBound) -> Self {
        Self::Square(b)
    }
}

impl From<HexBound> for Bound {
    fn from(b: HexBound) -> Self {
        Self::Hex(b)
    }
}
