//! Cell-type symmetry algebra, grid topology and grid modifiers for Tessera.
//!
//! This crate implements the [`CellType`](tessera_core::CellType) trait for
//! the built-in cell shapes, defines the [`Grid`] trait through which every
//! topology query flows, and provides concrete grids and the modifiers that
//! adapt them.
//!
//! # Cell types
//!
//! - [`NGonCellType`]: regular polygons with 3 to 12 sides
//! - [`SquareCellType`]: the square, with [`SquareDir`] / [`SquareCorner`] names
//! - [`HexPrismCellType`]: hexagonal prisms with equatorial and axial directions
//!
//! # Grids
//!
//! - [`SquareGrid`] and [`HexGrid`], optionally bounded by a [`Bound`]
//! - [`WrapModifier`]: torus-style wrapping through a canonicalisation function
//! - [`BasisModifier`]: re-embedding through a change of basis
//!
//! Shape-agnostic fallbacks for grid methods live in [`defaults`]; the
//! most important is [`defaults::parallel_transport`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod dihedral;

pub mod basis;
pub mod bound;
pub mod defaults;
pub mod grid;
pub mod hex;
pub mod hex_grid;
pub mod hex_prism;
pub mod modifier;
pub mod ngon;
pub mod square;
pub mod square_grid;
pub mod wrap;

#[cfg(test)]
pub(crate) mod compliance;

pub use basis::{BasisCellType, BasisModifier, XZ_SWAP};
pub use bound::{Bound, HexBound, SquareBound};
pub use grid::{Grid, GridRef, Move, Path};
pub use hex::{FtHexDir, PtHexDir, HEX_OFFSETS};
pub use hex_grid::HexGrid;
pub use hex_prism::{AxialEnd, HexPrismCellType, HexPrismCorner, HexPrismDir};
pub use modifier::Modifier;
pub use ngon::NGonCellType;
pub use square::{SquareCellType, SquareCorner, SquareDir};
pub use square_grid::SquareGrid;
pub use wrap::{Canonicalize, WrapModifier};
