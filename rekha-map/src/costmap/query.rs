//! Lookup seam between the scorer and the cache.

use super::tile::CostSample;
use crate::core::WorldPoint;

/// Anything that answers "what does the reference map hold at this point".
///
/// Lookups may build tiles on a miss, so they take `&mut self`.
pub trait CostQuery {
    /// Gamma-corrected intensity and direction at a world point.
    fn query(&mut self, point: WorldPoint) -> CostSample;
}

impl<Q: CostQuery + ?Sized> CostQuery for &mut Q {
    #[inline]
    fn query(&mut self, point: WorldPoint) -> CostSample {
        (**self).query(point)
    }
}
