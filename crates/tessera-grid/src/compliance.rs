//! Cell-type and grid compliance test helpers.
//!
//! These functions verify that a `CellType` or `Grid` implementation
//! satisfies the invariants of its trait contract. Reused across every
//! cell type and grid test module.

use crate::defaults::follow_path;
use crate::grid::Grid;
use indexmap::IndexSet;
use tessera_core::{Cell, CellType, GridError};

const EPS: f32 = 1e-4;

// ── Cell types ─────────────────────────────────────────────────

/// Assert associativity, identity and inverse laws, and closure of the
/// full rotation set under `multiply`.
pub fn assert_group_laws(ct: &dyn CellType) {
    let all = ct.rotations(true);
    let set: IndexSet<_> = all.iter().copied().collect();
    assert_eq!(set.len(), all.len(), "{ct:?}: duplicate rotations");
    let id = ct.identity();
    assert!(set.contains(&id), "{ct:?}: identity missing");
    for &a in &all {
        assert_eq!(ct.multiply(id, a), a, "{ct:?}: identity * {a}");
        assert_eq!(ct.multiply(a, id), a, "{ct:?}: {a} * identity");
        assert_eq!(ct.multiply(a, ct.invert(a)), id, "{ct:?}: {a} * inverse");
        assert_eq!(ct.multiply(ct.invert(a), a), id, "{ct:?}: inverse * {a}");
        for &b in &all {
            let ab = ct.multiply(a, b);
            assert!(set.contains(&ab), "{ct:?}: {a} * {b} = {ab} not in group");
            for &c in &all {
                assert_eq!(
                    ct.multiply(ab, c),
                    ct.multiply(a, ct.multiply(b, c)),
                    "{ct:?}: associativity for {a}, {b}, {c}"
                );
            }
        }
    }
    // Pure rotations form a subgroup.
    let pure = ct.rotations(false);
    for &a in &pure {
        for &b in &pure {
            assert!(!ct.multiply(a, b).is_reflection(), "{ct:?}: {a} * {b} reflects");
        }
    }
}

/// Assert that `multiply` composes the action on directions and corners:
/// applying `multiply(a, b)` equals applying `b`, then `a`.
pub fn assert_action_composes(ct: &dyn CellType) {
    let all = ct.rotations(true);
    for &a in &all {
        for &b in &all {
            let ab = ct.multiply(a, b);
            for d in ct.cell_dirs() {
                assert_eq!(
                    ct.rotate_dir(d, ab),
                    ct.rotate_dir(ct.rotate_dir(d, b), a),
                    "{ct:?}: dir {d} under {a} * {b}"
                );
            }
            for c in ct.cell_corners() {
                assert_eq!(
                    ct.rotate_corner(c, ab),
                    ct.rotate_corner(ct.rotate_corner(c, b), a),
                    "{ct:?}: corner {c} under {a} * {b}"
                );
            }
        }
    }
}

/// Assert that `try_get_rotation` inverts `rotate_with_connection`, and
/// that unsupported configurations fail loudly on both sides.
pub fn assert_connection_round_trip(ct: &dyn CellType) {
    for d in ct.cell_dirs() {
        for r in ct.rotations(true) {
            match ct.rotate_with_connection(d, r) {
                Ok((d2, conn)) => {
                    assert_eq!(d2, ct.rotate_dir(d, r), "{ct:?}: {d} under {r}");
                    assert_eq!(
                        ct.try_get_rotation(d, d2, conn),
                        Ok(Some(r)),
                        "{ct:?}: round trip of {d} under {r} via {conn:?}"
                    );
                }
                Err(e) => assert!(
                    matches!(e, GridError::Unsupported { .. }),
                    "{ct:?}: {d} under {r} failed with {e}"
                ),
            }
        }
    }
}

/// Assert `invert_dir` is an involution wherever it is defined.
pub fn assert_invert_involution(ct: &dyn CellType) {
    for d in ct.cell_dirs() {
        if let Some(inv) = ct.invert_dir(d) {
            assert_ne!(inv, d, "{ct:?}: {d} is its own opposite");
            assert_eq!(ct.invert_dir(inv), Some(d), "{ct:?}: invert twice from {d}");
        }
    }
}

/// Assert that `matrix` agrees with the symbolic action, and is a group
/// homomorphism.
pub fn assert_matrix_consistent(ct: &dyn CellType) {
    let all = ct.rotations(true);
    for &r in &all {
        let m = ct.matrix(r);
        for d in ct.cell_dirs() {
            let got = m.transform_vector3(ct.dir_vector(d));
            let want = ct.dir_vector(ct.rotate_dir(d, r));
            assert!((got - want).length() < EPS, "{ct:?}: {r} moves {d} to {got}, want {want}");
        }
        for c in ct.cell_corners() {
            let got = m.transform_point3(ct.corner_position(c));
            let want = ct.corner_position(ct.rotate_corner(c, r));
            assert!((got - want).length() < EPS, "{ct:?}: {r} moves {c} to {got}, want {want}");
        }
        for &s in &all {
            assert!(
                ct.matrix(ct.multiply(r, s)).abs_diff_eq(m * ct.matrix(s), EPS),
                "{ct:?}: matrix({r} * {s})"
            );
        }
    }
    assert!(ct.matrix(ct.identity()).abs_diff_eq(glam::Mat4::IDENTITY, EPS));
}

/// Run all cell-type compliance checks.
pub fn run_cell_type_compliance(ct: &dyn CellType) {
    assert_group_laws(ct);
    assert_action_composes(ct);
    assert_connection_round_trip(ct);
    assert_invert_involution(ct);
    assert_matrix_consistent(ct);
}

// ── Grids ──────────────────────────────────────────────────────

/// Cells to probe: every cell of a finite grid, otherwise the in-grid
/// cells of a small window around the origin in both planar and cube
/// coordinates.
fn sample_cells(grid: &dyn Grid) -> Vec<Cell> {
    if let Ok(cells) = grid.cells() {
        return cells;
    }
    let mut sample = IndexSet::new();
    for x in -3..=3 {
        for y in -3..=3 {
            for c in [Cell::planar(x, y), Cell::hex(x, y)] {
                if grid.is_cell_in_grid(c) {
                    sample.insert(c);
                }
            }
        }
    }
    sample.into_iter().collect()
}

/// Assert every successful move lands in the grid and can be undone with
/// the reported inverse direction.
pub fn assert_moves_invertible(grid: &dyn Grid) {
    for cell in sample_cells(grid) {
        assert!(grid.is_cell_in_grid(cell), "{cell} enumerated but not in grid");
        for dir in grid.cell_dirs(cell) {
            let Some(m) = grid.try_move(cell, dir) else {
                continue;
            };
            assert!(grid.is_cell_in_grid(m.dest), "{cell} -{dir}-> {} left the grid", m.dest);
            let back = grid.try_move(m.dest, m.inverse_dir);
            assert_eq!(
                back.map(|b| b.dest),
                Some(cell),
                "{cell} -{dir}-> {} -{}-> back",
                m.dest,
                m.inverse_dir
            );
        }
    }
}

/// Assert `find_basic_path` returns hop sequences that reach their
/// destination.
pub fn assert_paths_valid(grid: &dyn Grid) {
    let cells = sample_cells(grid);
    let Some(&start) = cells.first() else {
        return;
    };
    for &dest in cells.iter().step_by(3) {
        match grid.find_basic_path(start, dest) {
            Ok(Some(path)) => assert_eq!(
                follow_path(grid, start, &path),
                Some(dest),
                "path {start} -> {dest} is broken: {path:?}"
            ),
            Ok(None) => {}
            Err(e) => assert!(
                matches!(e, GridError::Unsupported { .. }),
                "path {start} -> {dest}: {e}"
            ),
        }
    }
}

/// Assert dense indexing round-trips on finite grids and reports
/// `GridInfinite` otherwise.
pub fn assert_index_round_trip(grid: &dyn Grid) {
    let Ok(count) = grid.index_count() else {
        assert_eq!(grid.index_count(), Err(GridError::GridInfinite));
        assert!(!grid.is_finite());
        return;
    };
    let cells = grid.cells().expect("finite grid enumerates its cells");
    assert_eq!(cells.len(), count);
    let unique: IndexSet<_> = cells.iter().copied().collect();
    assert_eq!(unique.len(), count, "duplicate cells");
    for (i, &cell) in cells.iter().enumerate() {
        assert_eq!(grid.cell_by_index(i), Ok(Some(cell)), "cell_by_index disagrees with cells()");
        assert_eq!(grid.index(cell), Ok(Some(i)));
    }
    assert_eq!(grid.cell_by_index(count), Ok(None));
}

/// Assert every cell type reported by the grid is listed in `cell_types`.
pub fn assert_cell_types_listed(grid: &dyn Grid) {
    let listed = grid.cell_types();
    for cell in sample_cells(grid) {
        let ct = grid.cell_type(cell);
        assert!(
            listed.iter().any(|&l| *l == *ct),
            "{cell} has unlisted cell type {ct:?}"
        );
    }
}

/// Run all grid compliance checks.
pub fn run_grid_compliance(grid: &dyn Grid) {
    assert_moves_invertible(grid);
    assert_paths_valid(grid);
    assert_index_round_trip(grid);
    assert_cell_types_listed(grid);
}
