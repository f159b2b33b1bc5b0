//! Grids that wrap another grid and adapt part of its behaviour.

use crate::bound::Bound;
use crate::grid::{Grid, GridRef};
use std::sync::Arc;
use tessera_core::GridError;

/// A grid built on top of an underlying grid.
///
/// A modifier keeps its own configuration (a canonicalisation function, a
/// basis matrix) separate from the grid it wraps, so the same
/// configuration can be re-applied to a different underlying grid with
/// [`rebind`](Self::rebind). Bounded and unbounded variants of a modified
/// grid are produced this way.
pub trait Modifier: Grid + Sized {
    /// The grid being adapted.
    fn underlying(&self) -> &GridRef;

    /// The same modifier, with the same configuration, over `underlying`.
    fn rebind(&self, underlying: GridRef) -> Self;

    /// Restrict the underlying grid to `bound` and rebind onto the result.
    fn rebind_bounded(&self, bound: Option<&Bound>) -> Result<GridRef, GridError> {
        let underlying = self.underlying().bound_by(bound)?;
        Ok(Arc::new(self.rebind(underlying)))
    }
}
