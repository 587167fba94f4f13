use serde::{Deserialize, Serialize};
use crate::vector::Vec3;




/// Linear index of a grid entity (cell or side)
pub type ElementIndex = usize;




/// Local coordinates within an element's unit reference domain. Sides are
/// two-dimensional; their coordinates use components 0 and 1 and leave
/// component 2 at zero.
pub type Coords = Vec3;




/**
 * A sample point within a grid element: the element's linear index together
 * with local coordinates in the element's reference domain. Queries which
 * may fail to locate an element return `Option<Sample>` rather than a
 * sentinel index.
 */
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub element_index: ElementIndex,
    pub coords: Coords,
}




// ============================================================================
impl Sample {

    pub fn new(element_index: ElementIndex, coords: Coords) -> Self {
        Self { element_index, coords }
    }
}
