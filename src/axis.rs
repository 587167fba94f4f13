use serde::{Deserialize, Serialize};
use crate::vector::Vector3;




/**
 * Identifier for a Cartesian axis
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    I,
    J,
    K,
}




// ============================================================================
impl Axis {

    pub fn index(self) -> usize {
        match self {
            Axis::I => 0,
            Axis::J => 1,
            Axis::K => 2,
        }
    }

    /**
     * Return the axis with the given index, which must be 0, 1, or 2.
     */
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Axis::I,
            1 => Axis::J,
            2 => Axis::K,
            _ => panic!("axis index {} out of range", index),
        }
    }
}




/**
 * Rotate a vector so the given world axis becomes local axis 0 (the face
 * normal), preserving the cyclic order of the remaining two components. The
 * local frame is referred to as (altitude, longitude, latitude).
 */
pub fn world_to_local<T: Copy>(axis: Axis, v: Vector3<T>) -> Vector3<T> {
    let a = axis.index();
    Vector3::new(v[a], v[(a + 1) % 3], v[(a + 2) % 3])
}




/**
 * Exact inverse of `world_to_local`: for every axis and every vector v,
 * `local_to_world(axis, world_to_local(axis, v)) == v`.
 */
pub fn local_to_world<T: Copy>(axis: Axis, v: Vector3<T>) -> Vector3<T> {
    let a = axis.index();
    Vector3::new(v[(2 * a) % 3], v[(2 * a + 1) % 3], v[(2 * a + 2) % 3])
}




/**
 * Map a local axis index (0 = normal, 1 = longitude, 2 = latitude) to the
 * corresponding world axis index.
 */
pub fn local_to_world_axis(axis: Axis, loc_index: usize) -> usize {
    (axis.index() + loc_index) % 3
}
