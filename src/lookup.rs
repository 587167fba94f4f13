use log::trace;
use rayon::prelude::*;

use crate::closest_point::project_on_box_at_origin;
use crate::grid::Grid;
use crate::types::{Coords, ElementIndex, Sample};
use crate::vector::{IVec3, Vec3};




// ============================================================================
impl Grid {


    /**
     * Return the cell enclosing a world position, with the position's local
     * coordinates in that cell. The position is first clamped onto the
     * grid, so the query always succeeds; points outside the grid land in
     * the nearest boundary cell with local coordinates on its surface.
     */
    pub fn lookup(&self, pos: Vec3) -> Sample {
        let (cell, coords) = self.locate(pos);
        Sample::new(self.cell_index(cell), coords)
    }


    /**
     * Return the qualifying cell nearest to a world position, where
     * qualifying means the filter returns true for the cell's linear
     * index. The filter closure carries whatever data and target truth
     * value the caller needs.
     *
     * If the directly enclosing cell qualifies it is returned immediately.
     * Otherwise the search examines increasingly large neighborhoods of the
     * position, scaled per axis so the search radius stays isotropic in
     * world units on anisotropic grids, growing the radius geometrically
     * until a match is found or the radius would exceed `max_dist`. Returns
     * None when no qualifying cell exists within the capped radius.
     *
     * The search settles for the best match of the first round that yields
     * any match: a closer qualifying cell lying just outside that round's
     * neighborhood would be missed. This is intentional; callers needing an
     * anchor cell get one near-optimally, but the result is not guaranteed
     * to be the globally nearest qualifying cell.
     */
    pub fn lookup_filtered<F>(&self, pos: Vec3, max_dist: f64, filter: F) -> Option<Sample>
    where
        F: Fn(ElementIndex) -> bool
    {
        let (cell, coords) = self.locate(pos);
        let cell_index = self.cell_index(cell);

        if filter(cell_index) {
            return Some(Sample::new(cell_index, coords));
        }

        let loc_pos = (pos - self.bounds_lo).div_cw(self.cell_size);
        let clamped = Vec3::new(
            loc_pos[0].max(0.0).min(self.res[0] as f64),
            loc_pos[1].max(0.0).min(self.res[1] as f64),
            loc_pos[2].max(0.0).min(self.res[2] as f64));

        let min_cell_size = self.cell_size.min_component();
        let max_offset = (max_dist / min_cell_size).ceil();
        let scales = Vec3::new(
            min_cell_size / self.cell_size[0],
            min_cell_size / self.cell_size[1],
            min_cell_size / self.cell_size[2]);

        let mut offset = 0.5;

        // Iterate over increasingly large neighborhoods
        loop {
            let mut lo = IVec3::new(0, 0, 0);
            let mut hi = IVec3::new(0, 0, 0);

            for a in 0..3 {
                lo[a] = ((clamped[a] - offset * scales[a]).floor() as i64).max(0);
                hi[a] = ((clamped[a] + offset * scales[a]).floor() as i64 + 1).min(self.res[a]);
            }

            let mut closest_dist = min_cell_size * min_cell_size * offset * offset;
            let mut closest: Option<Sample> = None;

            for i in lo[0]..hi[0] {
                for j in lo[1]..hi[1] {
                    for k in lo[2]..hi[2] {
                        let ijk = IVec3::new(i, j, k);
                        let n = self.cell_index(ijk);

                        if filter(n) {
                            let rel = (loc_pos - Vec3::from(ijk)).mul_cw(self.cell_size);
                            let (c, dist) = project_on_box_at_origin(rel, self.cell_size);

                            if dist <= closest_dist {
                                closest_dist = dist;
                                closest = Some(Sample::new(n, c));
                            }
                        }
                    }
                }
            }

            if closest.is_some() {
                return closest;
            }

            trace!("no qualifying cell within search offset {}", offset);

            if offset >= max_offset {
                return None;
            }
            offset = (3.0 * offset).min(max_offset);
        }
    }


    /**
     * Batch form of `lookup_filtered`: one lane per query point, executed
     * in parallel. Sound because every lookup is a pure function of the
     * immutable grid.
     */
    pub fn lookup_filtered_many<F>(&self, points: &[Vec3], max_dist: f64, filter: F) -> Vec<Option<Sample>>
    where
        F: Fn(ElementIndex) -> bool + Sync
    {
        points
            .par_iter()
            .map(|&pos| self.lookup_filtered(pos, max_dist, &filter))
            .collect()
    }


    /**
     * Clamp a world position onto the grid and split it into the enclosing
     * cell and the fractional local coordinates.
     */
    fn locate(&self, pos: Vec3) -> (IVec3, Coords) {
        let loc_pos = (pos - self.bounds_lo).div_cw(self.cell_size);

        let mut cell = IVec3::new(0, 0, 0);
        let mut coords = Coords::zeros();

        for a in 0..3 {
            let x = loc_pos[a].max(0.0).min(self.res[a] as f64);
            let c = x.floor().min((self.res[a] - 1) as f64);

            cell[a] = c as i64;
            coords[a] = x - c;
        }
        (cell, coords)
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::cell::RefCell;
    use std::collections::HashSet;

    use crate::grid::Grid;
    use crate::types::Sample;
    use crate::vector::{IVec3, Vec3};

    fn two_cube() -> Grid {
        Grid::new(
            IVec3::new(2, 2, 2),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0)).unwrap()
    }

    #[test]
    fn direct_containment_returns_the_enclosing_cell() {
        let grid = two_cube();
        let sample = grid.lookup(Vec3::new(0.5, 0.5, 0.5));

        assert_eq!(grid.get_cell(sample.element_index), IVec3::new(0, 0, 0));
        assert_eq!(sample.coords, Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn points_outside_the_grid_clamp_to_the_boundary() {
        let grid = two_cube();
        let sample = grid.lookup(Vec3::new(-1.0, 0.5, 5.0));

        assert_eq!(grid.get_cell(sample.element_index), IVec3::new(0, 0, 1));
        assert_eq!(sample.coords, Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn qualifying_enclosing_cells_are_returned_without_searching() {
        let grid = two_cube();
        let pos = Vec3::new(0.5, 0.5, 0.5);

        let unfiltered = grid.lookup(pos);
        let filtered = grid.lookup_filtered(pos, 10.0, |_| true);

        assert_eq!(filtered, Some(unfiltered));
    }

    #[test]
    fn expanding_search_finds_the_only_qualifying_cell() {
        let grid = two_cube();
        let target = grid.cell_index(IVec3::new(1, 1, 1));
        let pos = Vec3::new(0.5, 0.5, 0.5);

        let sample = grid.lookup_filtered(pos, 10.0, |n| n == target).unwrap();
        assert_eq!(sample.element_index, target);
        assert_eq!(sample.coords, Vec3::new(0.0, 0.0, 0.0));

        // squared distance to the nearest corner of the unit cube [1,2]^3
        let (_, dist_sq) = grid.cell_closest_point(sample.element_index, pos);
        assert_eq!(dist_sq, 0.75);
    }

    #[test]
    fn the_search_radius_cap_is_honored() {
        let grid = Grid::new(
            IVec3::new(4, 1, 1),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 1.0, 1.0)).unwrap();

        let target = grid.cell_index(IVec3::new(3, 0, 0));
        let pos = Vec3::new(0.5, 0.5, 0.5);

        // the qualifying cell is 2.5 world units away
        assert_eq!(grid.lookup_filtered(pos, 1.0, |n| n == target), None);

        let sample = grid.lookup_filtered(pos, 10.0, |n| n == target).unwrap();
        assert_eq!(sample.element_index, target);

        let (_, dist_sq) = grid.cell_closest_point(target, pos);
        assert_eq!(dist_sq, 6.25);
    }

    #[test]
    fn no_qualifying_cell_yields_none() {
        let grid = two_cube();
        assert_eq!(grid.lookup_filtered(Vec3::new(0.5, 0.5, 0.5), 100.0, |_| false), None);
    }

    #[test]
    fn search_neighborhoods_are_isotropic_in_world_units() {

        // Cells are 1.0 long in x but 0.25 in y and z, so a search radius
        // of half a cell along x spans two whole rows of cells along y.
        let grid = Grid::new(
            IVec3::new(4, 4, 4),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 1.0, 1.0)).unwrap();

        let probed = RefCell::new(HashSet::new());
        let pos = Vec3::new(2.0, 0.5, 0.5);

        let result = grid.lookup_filtered(pos, 0.3, |n| {
            probed.borrow_mut().insert(grid.get_cell(n));
            false
        });
        assert_eq!(result, None);

        let probed = probed.into_inner();
        let xs: HashSet<_> = probed.iter().map(|c| c[0]).collect();
        let ys: HashSet<_> = probed.iter().map(|c| c[1]).collect();

        // The world-isotropic scaling keeps the x neighborhood at the two
        // cells flanking the query while the y neighborhood spans the grid.
        assert_eq!(xs, [1, 2].iter().copied().collect());
        assert_eq!(ys, [0, 1, 2, 3].iter().copied().collect());
    }

    #[test]
    fn batch_lookups_agree_with_sequential_lookups() {
        let grid = two_cube();
        let filter = |n: usize| n % 3 == 0;

        let points: Vec<_> = (0..50)
            .map(|n| Vec3::new(
                0.13 * n as f64 % 2.0,
                0.41 * n as f64 % 2.0,
                0.71 * n as f64 % 2.0))
            .collect();

        let batch = grid.lookup_filtered_many(&points, 5.0, filter);
        let sequential: Vec<Option<Sample>> = points
            .iter()
            .map(|&p| grid.lookup_filtered(p, 5.0, filter))
            .collect();

        assert_eq!(batch, sequential);
    }
}
