//! Shared arithmetic for the dihedral group of a regular `n`-gon.
//!
//! Directions are indexed counter-clockwise. A rotation by `r` maps
//! direction `d` to `d + r`; a reflection at index `r` maps `d` to `r - d`.
//! Corner `c` sits between directions `c` and `c + 1`, so a reflection maps
//! it to `r - c - 1`. All results are taken modulo `n`.

use glam::{Mat4, Vec3, Vec4};
use smallvec::SmallVec;
use std::f32::consts::TAU;
use tessera_core::{CellRotation, RotationKind};

#[inline]
pub(crate) fn wrap(v: i32, n: u8) -> u8 {
    v.rem_euclid(n as i32) as u8
}

/// Compose `a` after `b`.
pub(crate) fn multiply(n: u8, a: CellRotation, b: CellRotation) -> CellRotation {
    let (a, b) = (a.kind(), b.kind());
    match (a, b) {
        (RotationKind::Rotate(a), RotationKind::Rotate(b)) => {
            CellRotation::rotation(wrap(a as i32 + b as i32, n))
        }
        (RotationKind::Rotate(a), RotationKind::Reflect(b)) => {
            CellRotation::reflection(wrap(a as i32 + b as i32, n))
        }
        (RotationKind::Reflect(a), RotationKind::Rotate(b)) => {
            CellRotation::reflection(wrap(a as i32 - b as i32, n))
        }
        (RotationKind::Reflect(a), RotationKind::Reflect(b)) => {
            CellRotation::rotation(wrap(a as i32 - b as i32, n))
        }
    }
}

pub(crate) fn invert(n: u8, a: CellRotation) -> CellRotation {
    match a.kind() {
        RotationKind::Rotate(r) => CellRotation::rotation(wrap(-(r as i32), n)),
        // Every reflection is its own inverse.
        RotationKind::Reflect(_) => a,
    }
}

pub(crate) fn rotate_index(n: u8, i: u8, rotation: CellRotation) -> u8 {
    match rotation.kind() {
        RotationKind::Rotate(r) => wrap(i as i32 + r as i32, n),
        RotationKind::Reflect(r) => wrap(r as i32 - i as i32, n),
    }
}

pub(crate) fn rotate_corner_index(n: u8, c: u8, rotation: CellRotation) -> u8 {
    match rotation.kind() {
        RotationKind::Rotate(r) => wrap(c as i32 + r as i32, n),
        RotationKind::Reflect(r) => wrap(r as i32 - c as i32 - 1, n),
    }
}

pub(crate) fn rotations(n: u8, include_reflections: bool) -> SmallVec<[CellRotation; 12]> {
    let mut out: SmallVec<[CellRotation; 12]> = (0..n).map(CellRotation::rotation).collect();
    if include_reflections {
        out.extend((0..n).map(CellRotation::reflection));
    }
    out
}

/// The rotation that takes direction `from` to `to`, mirrored or not.
pub(crate) fn solve(n: u8, from: u8, to: u8, mirror: bool) -> CellRotation {
    if mirror {
        CellRotation::reflection(wrap(to as i32 + from as i32, n))
    } else {
        CellRotation::rotation(wrap(to as i32 - from as i32, n))
    }
}

/// Spatial transform of a group element about +Z.
///
/// `base` is the angle (radians) of direction 0; reflections depend on it
/// because their mirror axis is pinned to the direction layout.
pub(crate) fn matrix(n: u8, rotation: CellRotation, base: f32) -> Mat4 {
    let step = TAU / n as f32;
    match rotation.kind() {
        RotationKind::Rotate(r) => Mat4::from_rotation_z(step * r as f32),
        RotationKind::Reflect(r) => {
            let (s, c) = (2.0 * base + step * r as f32).sin_cos();
            Mat4::from_cols(
                Vec4::new(c, s, 0.0, 0.0),
                Vec4::new(s, -c, 0.0, 0.0),
                Vec4::Z,
                Vec4::W,
            )
        }
    }
}

pub(crate) fn dir_vector(n: u8, dir: u8, base: f32) -> Vec3 {
    let (s, c) = (base + TAU * dir as f32 / n as f32).sin_cos();
    Vec3::new(c, s, 0.0)
}

/// Corner of a polygon with unit inradius diameter (edges 0.5 from centre).
pub(crate) fn corner_position(n: u8, corner: u8, base: f32) -> Vec3 {
    let half_step = std::f32::consts::PI / n as f32;
    let radius = 0.5 / half_step.cos();
    let (s, c) = (base + half_step * (2 * corner as u32 + 1) as f32).sin_cos();
    Vec3::new(c * radius, s * radius, 0.0)
}
