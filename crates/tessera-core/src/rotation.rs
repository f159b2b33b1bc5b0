//! The dihedral rotation encoding shared by every cell type.

use std::fmt;

/// The decoded form of a [`CellRotation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// A pure rotation by `index` steps.
    Rotate(u8),
    /// A reflection composed with a rotation by `index` steps.
    Reflect(u8),
}

/// An element of a cell type's symmetry group.
///
/// A cell with `n` sides has a dihedral group of order `2n`: `n` rotations
/// and `n` reflections. Internally a rotation by `r` steps is stored as
/// `r` and a reflection at index `r` as its bitwise complement, so
/// recognising a reflection is a sign check. The encoding is private;
/// callers construct and inspect values through [`rotation`](Self::rotation),
/// [`reflection`](Self::reflection) and [`kind`](Self::kind).
///
/// Whether an index is in range is a property of the cell type the value
/// is used with, not of the value itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRotation(i32);

impl CellRotation {
    /// The identity rotation (zero steps, no reflection).
    pub const IDENTITY: Self = Self(0);

    /// A pure rotation by `index` steps.
    pub const fn rotation(index: u8) -> Self {
        Self(index as i32)
    }

    /// A reflection composed with a rotation by `index` steps.
    pub const fn reflection(index: u8) -> Self {
        Self(!(index as i32))
    }

    /// Build from a decoded kind.
    pub const fn from_kind(kind: RotationKind) -> Self {
        match kind {
            RotationKind::Rotate(i) => Self::rotation(i),
            RotationKind::Reflect(i) => Self::reflection(i),
        }
    }

    /// Whether this element includes a reflection.
    pub const fn is_reflection(self) -> bool {
        self.0 < 0
    }

    /// The rotation index, with the reflection flag stripped.
    pub const fn index(self) -> u8 {
        if self.0 < 0 {
            (!self.0) as u8
        } else {
            self.0 as u8
        }
    }

    /// Decode into a [`RotationKind`].
    pub const fn kind(self) -> RotationKind {
        if self.is_reflection() {
            RotationKind::Reflect(self.index())
        } else {
            RotationKind::Rotate(self.index())
        }
    }
}

impl Default for CellRotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<RotationKind> for CellRotation {
    fn from(kind: RotationKind) -> Self {
        Self::from_kind(kind)
    }
}

impl fmt::Display for CellRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            RotationKind::Rotate(i) => write!(f, "R{i}"),
            RotationKind::Reflect(i) => write!(f, "~R{i}"),
        }
    }
}
