//! Tessera: uniform topology and symmetry for square, hex and prism grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Tessera sub-crates. Most users only need `tessera` as a dependency.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // A 3x3 square torus: stepping off the right edge lands on the left.
//! let grid = SquareGrid::new(1.0, Some(SquareBound::from_size(3, 3))).unwrap();
//! let torus = WrapModifier::square_torus(grid).unwrap();
//! let step = torus.try_move(Cell::planar(2, 0), SquareDir::Right.into()).unwrap();
//! assert_eq!(step.dest, Cell::planar(0, 0));
//! assert!(step.connection.is_identity());
//!
//! // Replay a walk from one grid on another, a quarter turn round.
//! let hex = HexGrid::new(1.0, HexOrientation::PointyTopped, None).unwrap();
//! let quarter = CellRotation::rotation(1);
//! let (cell, rotation) = hex
//!     .parallel_transport(&hex, Cell::ORIGIN, Cell::hex(1, 0), Cell::ORIGIN, quarter)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(rotation, quarter);
//! assert!(hex.is_cell_in_grid(cell));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Cells, directions, rotations, connections, errors, `CellType` |
//! | [`grid`] | `tessera-grid` | Cell types, the `Grid` trait, concrete grids and modifiers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`tessera-core`).
///
/// Contains [`types::Cell`], the [`types::CellRotation`] encoding, the
/// [`types::Connection`] descriptor and the [`types::CellType`] trait.
pub use tessera_core as types;

/// Cell types, grids and modifiers (`tessera-grid`).
///
/// Provides the [`grid::Grid`] trait, [`grid::SquareGrid`] and
/// [`grid::HexGrid`], and the [`grid::WrapModifier`] and
/// [`grid::BasisModifier`] adapters.
pub use tessera_grid as grid;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use tessera_core::{
        Cell, CellCorner, CellDir, CellRotation, CellType, CellTypeRef, Connection,
        HexOrientation,
    };

    // Errors
    pub use tessera_core::GridError;

    // Cell types and direction names
    pub use tessera_grid::{
        FtHexDir, HexPrismCellType, HexPrismDir, NGonCellType, PtHexDir, SquareCellType,
        SquareDir,
    };

    // Grids and bounds
    pub use tessera_grid::{Bound, Grid, GridRef, HexBound, HexGrid, Move, SquareBound, SquareGrid};

    // Modifiers
    pub use tessera_grid::{BasisModifier, Modifier, WrapModifier};
}
