use std::sync::Arc;
use tessera_core::{Cell, CellRotation, GridError};
use tessera_grid::{
    BasisModifier, Bound, Grid, GridRef, SquareBound, SquareDir, SquareGrid, WrapModifier,
};

fn torus3() -> WrapModifier {
    let grid = SquareGrid::new(1.0, Some(SquareBound::from_size(3, 3))).unwrap();
    WrapModifier::square_torus(grid).unwrap()
}

#[test]
fn moving_right_wraps_then_continues() {
    let t = torus3();
    let right = SquareDir::Right.into();
    let a = t.try_move(Cell::planar(2, 0), right).unwrap();
    assert_eq!(a.dest, Cell::planar(0, 0));
    let b = t.try_move(a.dest, right).unwrap();
    assert_eq!(b.dest, Cell::planar(1, 0));
}

#[test]
fn a_full_lap_returns_home() {
    let t = torus3();
    for dir in SquareDir::ALL {
        let mut at = Cell::planar(1, 2);
        for _ in 0..3 {
            at = t.try_move(at, dir.into()).unwrap().dest;
        }
        assert_eq!(at, Cell::planar(1, 2), "lap towards {dir:?}");
    }
}

#[test]
fn transport_across_torus_wraps() {
    let t = torus3();
    // Two steps right in the source, replayed a quarter turn round: up.
    let r = CellRotation::rotation(1);
    let got = t
        .parallel_transport(&t, Cell::ORIGIN, Cell::planar(2, 0), Cell::planar(0, 2), r)
        .unwrap();
    assert_eq!(got, Some((Cell::planar(0, 1), r)));
}

#[test]
fn torus_stays_finite_and_indexed() {
    let t = torus3();
    assert!(t.is_finite());
    assert_eq!(t.index_count(), Ok(9));
    assert_eq!(t.index(Cell::planar(2, 1)), Ok(Some(5)));
    assert_eq!(t.unbounded().index_count(), Ok(9));
}

#[test]
fn basis_change_of_a_torus_keeps_wrapping() {
    let t: GridRef = Arc::new(torus3());
    let flat = BasisModifier::xz(t).unwrap();
    let m = flat.try_move(Cell::planar(0, 2), SquareDir::Up.into()).unwrap();
    assert_eq!(m.dest, Cell::planar(0, 0));
    let c = flat.cell_center(m.dest);
    assert_eq!((c.x, c.y, c.z), (0.5, 0.0, 0.5));
}

#[test]
fn restricting_a_torus_by_a_foreign_bound_fails() {
    let t = torus3();
    let hex = Bound::Hex(tessera_grid::HexBound::hexagon(1));
    assert!(matches!(
        t.bound_by(Some(&hex)),
        Err(GridError::BoundMismatch {
            expected: "square",
            found: "hex"
        })
    ));
}
