//! The twist descriptor reported when crossing between two cells.

/// How the local frame of a cell, seen across one of its faces, is twisted
/// relative to the neighbour's frame.
///
/// `sides` is the symmetry order of the face being crossed, which may be
/// smaller than the order of the cell itself: a hex prism's caps are
/// hexagons (`sides = 6`) while its side faces are quads (`sides = 4`).
/// `mirror` and `rotation` together select an element of that face's own
/// dihedral group.
///
/// The [`Default`] value carries no twist and no face order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Whether crossing the face reverses handedness.
    pub mirror: bool,
    /// Rotation index within the face's group, in `0..sides`.
    pub rotation: u8,
    /// Symmetry order of the face.
    pub sides: u8,
}

impl Connection {
    /// Number of sides reported for the boundary between two planar cells.
    pub const EDGE_SIDES: u8 = 2;

    /// Create a connection.
    pub const fn new(mirror: bool, rotation: u8, sides: u8) -> Self {
        Self {
            mirror,
            rotation,
            sides,
        }
    }

    /// Connection across the shared edge of two planar cells.
    ///
    /// An edge can only be kept or flipped, so the rotation is always zero.
    pub const fn edge(mirror: bool) -> Self {
        Self::new(mirror, 0, Self::EDGE_SIDES)
    }

    /// Whether this connection introduces no twist at all.
    pub const fn is_identity(&self) -> bool {
        !self.mirror && self.rotation == 0
    }
}
