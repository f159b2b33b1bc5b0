//! Core types and traits for Tessera grids.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! shape-agnostic vocabulary every grid speaks: cell coordinates, the
//! shape-scoped direction and corner tags, the dihedral rotation encoding,
//! the face [`Connection`] descriptor, the [`GridError`] type, and the
//! [`CellType`] trait each cell shape implements.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod cell_type;
pub mod connection;
pub mod error;
pub mod rotation;

pub use cell::{Cell, CellCorner, CellDir};
pub use cell_type::{BasisKey, CellShape, CellType, CellTypeRef, HexOrientation};
pub use connection::Connection;
pub use error::GridError;
pub use rotation::{CellRotation, RotationKind};
