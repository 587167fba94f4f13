use crate::types::Coords;




/**
 * The unit cube [0,1]^3: reference element for grid cells.
 */
pub struct Cube;




/**
 * The unit square [0,1]^2: reference element for grid sides.
 */
pub struct Square;




// ============================================================================
impl Cube {

    pub const DIMENSION: usize = 3;

    /**
     * Whether the given local coordinates lie inside the reference domain.
     */
    pub fn contains(coords: Coords) -> bool {
        (0.0..=1.0).contains(&coords[0]) &&
        (0.0..=1.0).contains(&coords[1]) &&
        (0.0..=1.0).contains(&coords[2])
    }
}




// ============================================================================
impl Square {

    pub const DIMENSION: usize = 2;

    pub fn contains(coords: Coords) -> bool {
        (0.0..=1.0).contains(&coords[0]) &&
        (0.0..=1.0).contains(&coords[1])
    }
}
