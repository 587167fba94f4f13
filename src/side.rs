use serde::{Deserialize, Serialize};

use crate::axis::{local_to_world, local_to_world_axis, world_to_local, Axis};
use crate::closest_point::project_on_square_at_origin;
use crate::grid::Grid;
use crate::types::{Coords, ElementIndex, Sample};
use crate::vector::{IVec3, Matrix3, Matrix3x2, Vec3};




/**
 * A side of the grid: a planar face between two cells, or on the outer
 * envelope. A side is identified by the world axis of its normal together
 * with its origin vertex, expressed in the side's local frame (altitude
 * along the normal axis, then longitude and latitude on the two tangential
 * axes in cyclic order).
 *
 * The altitude ranges over [0, res] inclusive on the normal axis: 0 is the
 * lower boundary of the grid, res the upper boundary, anything in between an
 * interior side. Every side resolves to a well-defined inner and outer cell;
 * the two coincide on boundary sides.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Side {
    pub axis: Axis,
    pub origin: IVec3,
}




// ============================================================================
impl Side {

    pub fn new(axis: Axis, origin: IVec3) -> Self {
        Self { axis, origin }
    }

    pub fn is_lower_boundary(&self) -> bool {
        self.origin[0] == 0
    }

    pub fn is_upper_boundary(&self, grid: &Grid) -> bool {
        self.origin[0] == grid.res()[self.axis.index()]
    }

    pub fn is_boundary(&self, grid: &Grid) -> bool {
        self.is_lower_boundary() || self.is_upper_boundary(grid)
    }

    /**
     * The orientation sign of this side: -1 on the lower boundary, where
     * the outward normal points along the negative axis, +1 elsewhere.
     */
    fn orientation(&self) -> f64 {
        if self.is_lower_boundary() { -1.0 } else { 1.0 }
    }

    /**
     * Mirror the primary tangential coordinate on lower-boundary sides, so
     * the (normal, tangent1, tangent2) frame keeps a consistent outward
     * orientation on both ends of the grid.
     */
    fn mirror(&self, coord0: f64) -> f64 {
        if self.is_lower_boundary() { 1.0 - coord0 } else { coord0 }
    }
}




/*
 * Side numbering splits the index range in two: sides in [0, 3 cell_count)
 * are attached to the cell whose lower corner they touch (one per axis per
 * cell), and the remainder closes the grid with one extra row per axis at
 * the upper boundary. Within the boundary-closing range the per-axis
 * offsets (cumulative over the rows' sizes) locate the axis, and the
 * remainder encodes the tangential (longitude, latitude) coordinates.
 */
// ============================================================================
impl Grid {


    /**
     * Return the linear index of the given side. Inverse of `get_side`; an
     * exact bijection between valid sides and `[0, side_count)`.
     */
    pub fn side_index(&self, side: Side) -> ElementIndex {
        let alt_axis = local_to_world_axis(side.axis, 0);

        if side.origin[0] == self.res[alt_axis] {
            // Upper-boundary side
            let longitude = side.origin[1];
            let latitude = side.origin[2];

            let latitude_res = self.res[local_to_world_axis(side.axis, 2)];
            let lat_long = latitude_res * longitude + latitude;

            return 3 * self.cell_count()
                + (self.axis_offsets[side.axis.index()] + lat_long) as usize;
        }

        let cell_index = self.cell_index(local_to_world(side.axis, side.origin));
        side.axis.index() * self.cell_count() + cell_index
    }


    /**
     * Return the side with the given linear index.
     */
    pub fn get_side(&self, side_index: ElementIndex) -> Side {

        if side_index < 3 * self.cell_count() {
            let axis = Axis::from_index(side_index / self.cell_count());
            let cell_index = side_index - axis.index() * self.cell_count();
            let origin = world_to_local(axis, self.get_cell(cell_index));
            return Side::new(axis, origin);
        }

        let axis_side_index = (side_index - 3 * self.cell_count()) as i64;
        let axis = if axis_side_index < self.axis_offsets[1] {
            Axis::I
        } else if axis_side_index < self.axis_offsets[2] {
            Axis::J
        } else {
            Axis::K
        };

        let altitude = self.res[local_to_world_axis(axis, 0)];
        let latitude_res = self.res[local_to_world_axis(axis, 2)];

        let lat_long = axis_side_index - self.axis_offsets[axis.index()];
        let longitude = lat_long / latitude_res;
        let latitude = lat_long - longitude * latitude_res;

        Side::new(axis, IVec3::new(altitude, longitude, latitude))
    }


    /**
     * Map the dedicated enumeration over boundary sides only, with
     * `k = 2 * slot + border`, to the corresponding global side index.
     * `border` selects the lower (0) or upper (1) end of the slot's axis.
     */
    pub fn boundary_side_index(&self, boundary_side_index: usize) -> ElementIndex {
        let axis_side_index = (boundary_side_index / 2) as i64;
        let border = (boundary_side_index % 2) as i64;

        let axis = if axis_side_index < self.axis_offsets[1] {
            Axis::I
        } else if axis_side_index < self.axis_offsets[2] {
            Axis::J
        } else {
            Axis::K
        };

        let latitude_res = self.res[local_to_world_axis(axis, 2)];

        let lat_long = axis_side_index - self.axis_offsets[axis.index()];
        let longitude = lat_long / latitude_res;
        let latitude = lat_long - longitude * latitude_res;

        let altitude = border * self.res[axis.index()];

        self.side_index(Side::new(axis, IVec3::new(altitude, longitude, latitude)))
    }


    /**
     * Return an iterator which traverses the side descriptors in linear
     * index order.
     */
    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        (0..self.side_count()).map(move |n| self.get_side(n))
    }


    /**
     * World position of a sample point on a side. The primary tangential
     * coordinate is mirrored on lower-boundary sides so that lower and
     * upper faces traverse their plane with consistent outward orientation.
     */
    pub fn side_position(&self, s: Sample) -> Vec3 {
        let side = self.get_side(s.element_index);
        let coord0 = side.mirror(s.coords[0]);

        let local_pos = Vec3::new(
            side.origin[0] as f64,
            side.origin[1] as f64 + coord0,
            side.origin[2] as f64 + s.coords[1]);

        self.bounds_lo + local_to_world(side.axis, local_pos).mul_cw(self.cell_size)
    }


    /**
     * Deformation gradient of the side reference-to-world mapping: two
     * world-space columns spanning the side's tangential plane. The first
     * column's sign flips on lower-boundary sides (the same orientation
     * rule as `side_position`).
     */
    pub fn side_deformation_gradient(&self, side_index: ElementIndex) -> Matrix3x2 {
        let side = self.get_side(side_index);
        let sign = side.orientation();

        let c0 = local_to_world(side.axis, Vec3::new(0.0, sign, 0.0)).mul_cw(self.cell_size);
        let c1 = local_to_world(side.axis, Vec3::new(0.0, 0.0, 1.0)).mul_cw(self.cell_size);
        Matrix3x2::from_columns(c0, c1)
    }


    pub fn side_inner_inverse_deformation_gradient(&self, _side_index: ElementIndex) -> Matrix3 {
        self.cell_inverse_deformation_gradient()
    }


    pub fn side_outer_inverse_deformation_gradient(&self, _side_index: ElementIndex) -> Matrix3 {
        self.cell_inverse_deformation_gradient()
    }


    /**
     * The area of a side.
     */
    pub fn side_measure(&self, side_index: ElementIndex) -> f64 {
        let side = self.get_side(side_index);
        let long_axis = local_to_world_axis(side.axis, 1);
        let lat_axis = local_to_world_axis(side.axis, 2);
        self.cell_size[long_axis] * self.cell_size[lat_axis]
    }


    /**
     * Ratio of the side's area to the adjacent cell's volume: the
     * reciprocal of the cell size along the normal axis. Used when
     * weighting side integrals against cell volumes.
     */
    pub fn side_measure_ratio(&self, side_index: ElementIndex) -> f64 {
        let side = self.get_side(side_index);
        let alt_axis = local_to_world_axis(side.axis, 0);
        1.0 / self.cell_size[alt_axis]
    }


    /**
     * Unit normal of a side, pointing from the inner cell toward the outer
     * one; on boundary sides, out of the grid.
     */
    pub fn side_normal(&self, side_index: ElementIndex) -> Vec3 {
        let side = self.get_side(side_index);
        local_to_world(side.axis, Vec3::new(side.orientation(), 0.0, 0.0))
    }


    /**
     * Linear index of the cell on the inner (lower-altitude) flank of a
     * side. On the lower boundary the altitude clamps to 0, so the inner
     * cell coincides with the outer one there.
     */
    pub fn side_inner_cell_index(&self, side_index: ElementIndex) -> ElementIndex {
        let side = self.get_side(side_index);
        let inner_alt = if side.origin[0] == 0 { 0 } else { side.origin[0] - 1 };

        let origin = IVec3::new(inner_alt, side.origin[1], side.origin[2]);
        self.cell_index(local_to_world(side.axis, origin))
    }


    /**
     * Linear index of the cell on the outer (higher-altitude) flank of a
     * side, clamped onto the grid at the upper boundary.
     */
    pub fn side_outer_cell_index(&self, side_index: ElementIndex) -> ElementIndex {
        let side = self.get_side(side_index);
        let alt_axis = local_to_world_axis(side.axis, 0);

        let outer_alt = if side.origin[0] == self.res[alt_axis] {
            self.res[alt_axis] - 1
        } else {
            side.origin[0]
        };

        let origin = IVec3::new(outer_alt, side.origin[1], side.origin[2]);
        self.cell_index(local_to_world(side.axis, origin))
    }


    /**
     * Map side-local coordinates to cell-local coordinates of the inner
     * cell.
     */
    pub fn side_inner_cell_coords(&self, side_index: ElementIndex, side_coords: Coords) -> Coords {
        let side = self.get_side(side_index);

        let inner_alt = if side.is_lower_boundary() { 0.0 } else { 1.0 };
        let coord0 = side.mirror(side_coords[0]);

        local_to_world(side.axis, Vec3::new(inner_alt, coord0, side_coords[1]))
    }


    /**
     * Map side-local coordinates to cell-local coordinates of the outer
     * cell.
     */
    pub fn side_outer_cell_coords(&self, side_index: ElementIndex, side_coords: Coords) -> Coords {
        let side = self.get_side(side_index);
        let alt_axis = local_to_world_axis(side.axis, 0);

        let outer_alt = if side.origin[0] == self.res[alt_axis] { 1.0 } else { 0.0 };
        let coord0 = side.mirror(side_coords[0]);

        local_to_world(side.axis, Vec3::new(outer_alt, coord0, side_coords[1]))
    }


    /**
     * Project cell-local coordinates onto a side. Returns the side-local
     * coordinates if the sample lies exactly in the side's plane, or None
     * when the sample is off the plane (a valid silent result).
     */
    pub fn side_from_cell_coords(
        &self,
        side_index: ElementIndex,
        cell_index: ElementIndex,
        cell_coords: Coords,
    ) -> Option<Coords> {
        let side = self.get_side(side_index);
        let cell = self.get_cell(cell_index);

        if (side.origin[0] - cell[side.axis.index()]) as f64 != cell_coords[side.axis.index()] {
            return None;
        }

        let long_axis = local_to_world_axis(side.axis, 1);
        let lat_axis = local_to_world_axis(side.axis, 2);
        let long_coord = side.mirror(cell_coords[long_axis]);

        Some(Coords::new(long_coord, cell_coords[lat_axis], 0.0))
    }


    /**
     * Side-local coordinates of a world position. Unclamped: coordinates
     * outside [0,1]^2 signal that the position projects off this side.
     */
    pub fn side_coordinates(&self, side_index: ElementIndex, pos: Vec3) -> Coords {
        let side = self.get_side(side_index);

        let pos_loc = world_to_local(side.axis, (pos - self.bounds_lo).div_cw(self.cell_size))
            - Vec3::from(side.origin);

        Coords::new(side.mirror(pos_loc[1]), pos_loc[2], 0.0)
    }


    /**
     * Closest point on a side to a world position, as side-local
     * coordinates plus the squared world-space distance within the side's
     * plane.
     */
    pub fn side_closest_point(&self, side_index: ElementIndex, pos: Vec3) -> (Coords, f64) {
        let coords = self.side_coordinates(side_index, pos);
        let side = self.get_side(side_index);

        let loc_cell_size = world_to_local(side.axis, self.cell_size);
        let extents = (loc_cell_size[1], loc_cell_size[2]);

        project_on_square_at_origin(
            (coords[0] * extents.0, coords[1] * extents.1),
            extents)
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::collections::HashSet;

    use super::Side;
    use crate::axis::Axis;
    use crate::grid::Grid;
    use crate::types::Sample;
    use crate::vector::{IVec3, Vec3};

    fn anisotropic_grid() -> Grid {
        Grid::new(
            IVec3::new(2, 3, 4),
            Vec3::new(0.0, -1.0, 2.0),
            Vec3::new(1.0, 2.0, 4.0)).unwrap()
    }

    #[test]
    fn side_indexing_is_a_bijection() {
        let grid = anisotropic_grid();
        let mut seen = HashSet::new();

        for n in 0..grid.side_count() {
            let side = grid.get_side(n);

            assert_eq!(grid.side_index(side), n);
            assert!(seen.insert(side));
        }
        assert_eq!(seen.len(), grid.side_count());
    }

    #[test]
    fn every_valid_side_descriptor_is_enumerated() {
        let grid = anisotropic_grid();
        let enumerated: HashSet<_> = grid.sides().collect();

        let mut expected = 0;
        for a in 0..3 {
            let axis = Axis::from_index(a);
            let res_alt = grid.res()[a];
            let res_long = grid.res()[(a + 1) % 3];
            let res_lat = grid.res()[(a + 2) % 3];

            for alt in 0..=res_alt {
                for long in 0..res_long {
                    for lat in 0..res_lat {
                        assert!(enumerated.contains(&Side::new(axis, IVec3::new(alt, long, lat))));
                        expected += 1;
                    }
                }
            }
        }
        assert_eq!(enumerated.len(), expected);
    }

    #[test]
    fn boundary_enumeration_reaches_every_boundary_side_once() {
        let grid = anisotropic_grid();
        let mut seen = HashSet::new();

        for k in 0..grid.boundary_side_count() {
            let side_index = grid.boundary_side_index(k);
            let side = grid.get_side(side_index);

            assert!(side.is_boundary(&grid));
            assert!(seen.insert(side_index));
        }
        assert_eq!(seen.len(), grid.boundary_side_count());
    }

    #[test]
    fn boundary_sides_border_one_cell_and_interior_sides_two() {
        let grid = anisotropic_grid();

        for n in 0..grid.side_count() {
            let side = grid.get_side(n);
            let inner = grid.side_inner_cell_index(n);
            let outer = grid.side_outer_cell_index(n);

            if side.is_boundary(&grid) {
                assert_eq!(inner, outer);
            } else {
                let delta = grid.get_cell(outer) - grid.get_cell(inner);
                let mut expected = IVec3::new(0, 0, 0);
                expected[side.axis.index()] = 1;
                assert_eq!(delta, expected);
            }
        }
    }

    #[test]
    fn side_positions_agree_with_adjacent_cell_positions() {
        let grid = anisotropic_grid();
        let samples = [(0.0, 0.0), (1.0, 0.0), (0.25, 0.75), (0.5, 0.5)];

        for n in 0..grid.side_count() {
            for &(u, v) in &samples {
                let side_coords = Vec3::new(u, v, 0.0);
                let on_side = grid.side_position(Sample::new(n, side_coords));

                let inner = grid.side_inner_cell_index(n);
                let inner_coords = grid.side_inner_cell_coords(n, side_coords);
                let from_inner = grid.cell_position(Sample::new(inner, inner_coords));
                assert!((on_side - from_inner).squared_length() < 1e-24);

                let outer = grid.side_outer_cell_index(n);
                let outer_coords = grid.side_outer_cell_coords(n, side_coords);
                let from_outer = grid.cell_position(Sample::new(outer, outer_coords));
                assert!((on_side - from_outer).squared_length() < 1e-24);
            }
        }
    }

    #[test]
    fn normals_point_outward_on_the_boundary() {
        let grid = Grid::unit(IVec3::new(2, 2, 2)).unwrap();
        let center = Vec3::new(0.5, 0.5, 0.5);

        for n in 0..grid.side_count() {
            let normal = grid.side_normal(n);
            assert_eq!(normal.squared_length(), 1.0);

            let side = grid.get_side(n);
            if side.is_boundary(&grid) {
                let face_center = grid.side_position(Sample::new(n, Vec3::new(0.5, 0.5, 0.0)));
                assert!(normal.dot(face_center - center) > 0.0);
            }
        }
    }

    #[test]
    fn normals_agree_with_the_deformation_gradient_orientation() {
        let grid = anisotropic_grid();

        for n in 0..grid.side_count() {
            let normal = grid.side_normal(n);
            let gradient = grid.side_deformation_gradient(n);

            // tangent columns are orthogonal to the normal
            assert_eq!(gradient.column(0).dot(normal), 0.0);
            assert_eq!(gradient.column(1).dot(normal), 0.0);
        }
    }

    #[test]
    fn side_measures_multiply_the_tangential_cell_sizes() {
        let grid = anisotropic_grid();
        let size = grid.cell_size();

        for n in 0..grid.side_count() {
            let side = grid.get_side(n);
            let a = side.axis.index();

            let expected = size[(a + 1) % 3] * size[(a + 2) % 3];
            assert!(grid.side_measure(n) > 0.0);
            assert!((grid.side_measure(n) - expected).abs() < 1e-12);
            assert!((grid.side_measure_ratio(n) - 1.0 / size[a]).abs() < 1e-12);
        }
    }

    #[test]
    fn side_from_cell_coords_inverts_the_cell_coordinate_maps() {
        let grid = anisotropic_grid();
        let side_coords = Vec3::new(0.25, 0.75, 0.0);

        for n in 0..grid.side_count() {
            let inner = grid.side_inner_cell_index(n);
            let inner_coords = grid.side_inner_cell_coords(n, side_coords);
            assert_eq!(grid.side_from_cell_coords(n, inner, inner_coords), Some(side_coords));

            let outer = grid.side_outer_cell_index(n);
            let outer_coords = grid.side_outer_cell_coords(n, side_coords);
            assert_eq!(grid.side_from_cell_coords(n, outer, outer_coords), Some(side_coords));
        }
    }

    #[test]
    fn off_plane_samples_do_not_project_onto_a_side() {
        let grid = Grid::unit(IVec3::new(2, 2, 2)).unwrap();
        let side_index = grid.side_index(Side::new(Axis::I, IVec3::new(1, 0, 0)));
        let cell_index = grid.cell_index(IVec3::new(0, 0, 0));

        let off_plane = Vec3::new(0.5, 0.25, 0.75);
        assert_eq!(grid.side_from_cell_coords(side_index, cell_index, off_plane), None);
    }

    #[test]
    fn side_coordinates_invert_side_position() {
        let grid = anisotropic_grid();
        let side_coords = Vec3::new(0.25, 0.75, 0.0);

        for n in 0..grid.side_count() {
            let pos = grid.side_position(Sample::new(n, side_coords));
            let recovered = grid.side_coordinates(n, pos);
            assert!((recovered - side_coords).squared_length() < 1e-20);
        }
    }

    #[test]
    fn closest_point_on_a_side_measures_in_plane_distance() {
        let grid = Grid::unit(IVec3::new(1, 1, 1)).unwrap();
        let side_index = grid.side_index(Side::new(Axis::I, IVec3::new(0, 0, 0)));

        // In the plane of the side, past the far tangential corner
        let (coords, dist_sq) = grid.side_closest_point(side_index, Vec3::new(0.0, 2.0, 0.5));
        assert_eq!(coords[1], 0.5);
        assert!((dist_sq - 1.0).abs() < 1e-12);

        let (_, dist_sq) = grid.side_closest_point(side_index, Vec3::new(0.0, 0.5, 0.5));
        assert_eq!(dist_sq, 0.0);
    }
}
