use crate::types::Coords;
use crate::vector::Vec3;




/**
 * Exact closest point on the axis-aligned box spanning [0, extents] on each
 * axis. Returns the closest point as local coordinates normalized to
 * [0, 1]^3, together with the squared distance from the query point to the
 * box. A point inside the box projects to itself at distance zero.
 */
pub fn project_on_box_at_origin(point: Vec3, extents: Vec3) -> (Coords, f64) {
    let mut coords = Coords::zeros();
    let mut dist_sq = 0.0;

    for a in 0..3 {
        let clamped = point[a].max(0.0).min(extents[a]);
        let delta = point[a] - clamped;

        dist_sq += delta * delta;
        coords[a] = clamped / extents[a];
    }
    (coords, dist_sq)
}




/**
 * Two-dimensional variant for side elements: closest point on the rectangle
 * spanning [0, extents] in the side's tangential plane. The returned
 * coordinates leave component 2 at zero.
 */
pub fn project_on_square_at_origin(point: (f64, f64), extents: (f64, f64)) -> (Coords, f64) {
    let c0 = point.0.max(0.0).min(extents.0);
    let c1 = point.1.max(0.0).min(extents.1);
    let d0 = point.0 - c0;
    let d1 = point.1 - c1;

    (Coords::new(c0 / extents.0, c1 / extents.1, 0.0), d0 * d0 + d1 * d1)
}
