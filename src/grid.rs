use log::debug;
use serde::{Deserialize, Serialize};

use crate::closest_point::project_on_box_at_origin;
use crate::error::Error;
use crate::types::{Coords, ElementIndex, Sample};
use crate::vector::{IVec3, Matrix3, Vec3};




/**
 * A regular three-dimensional grid discretization of an axis-aligned box.
 * The grid is defined by a resolution (the number of cells on each axis) and
 * the box bounds, and is immutable once constructed: every geometric query
 * is a pure function of the descriptor, so queries may run concurrently on
 * any number of lanes with no synchronization.
 *
 * Cells are indexed row-major (the k index increases fastest). Sides (the
 * planar faces between cells, and on the outer envelope) have their own
 * bijective numbering; see the `side` module.
 *
 * The derived quantities (cell size, strides, per-axis side offsets) are
 * computed once here and stored as plain fields. The grid's immutability is
 * the invalidation contract: they are never recomputed.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub(crate) res: IVec3,
    pub(crate) bounds_lo: Vec3,
    pub(crate) bounds_hi: Vec3,
    pub(crate) cell_size: Vec3,
    pub(crate) strides: (i64, i64),
    pub(crate) axis_offsets: IVec3,
}




// ============================================================================
impl Grid {


    /**
     * Construct a grid with the given resolution, covering the box from
     * `bounds_lo` to `bounds_hi`. Fails if any resolution component is not
     * positive, or if the box has non-positive extent on any axis.
     */
    pub fn new(res: IVec3, bounds_lo: Vec3, bounds_hi: Vec3) -> Result<Self, Error> {

        if res[0] <= 0 || res[1] <= 0 || res[2] <= 0 {
            return Err(Error::ZeroResolution(res));
        }
        if bounds_hi[0] <= bounds_lo[0] ||
           bounds_hi[1] <= bounds_lo[1] ||
           bounds_hi[2] <= bounds_lo[2] {
            return Err(Error::DegenerateBounds(bounds_lo, bounds_hi));
        }

        let extents = bounds_hi - bounds_lo;
        let cell_size = extents.div_cw(Vec3::from(res));
        let strides = (res[1] * res[2], res[2]);

        // Cumulative sizes of the three upper-boundary side rows; locates
        // the axis of a side index in the boundary-closing range.
        let axis_dims = IVec3::new(
            res[1] * res[2],
            res[2] * res[0],
            res[0] * res[1]);
        let axis_offsets = IVec3::new(
            0,
            axis_dims[0],
            axis_dims[0] + axis_dims[1]);

        let grid = Self { res, bounds_lo, bounds_hi, cell_size, strides, axis_offsets };

        debug!(
            "constructed {}x{}x{} grid: {} cells, {} sides",
            res[0], res[1], res[2],
            grid.cell_count(),
            grid.side_count());

        Ok(grid)
    }


    /**
     * Construct a grid over the unit cube [0,1]^3.
     */
    pub fn unit(res: IVec3) -> Result<Self, Error> {
        Self::new(res, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }


    pub fn res(&self) -> IVec3 {
        self.res
    }


    /**
     * The lower corner of the grid's bounding box.
     */
    pub fn origin(&self) -> Vec3 {
        self.bounds_lo
    }


    pub fn extents(&self) -> Vec3 {
        self.bounds_hi - self.bounds_lo
    }


    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }


    pub fn cell_count(&self) -> usize {
        (self.res[0] * self.res[1] * self.res[2]) as usize
    }


    pub fn vertex_count(&self) -> usize {
        ((self.res[0] + 1) * (self.res[1] + 1) * (self.res[2] + 1)) as usize
    }


    pub fn edge_count(&self) -> usize {
        ((self.res[0] + 1) * (self.res[1] + 1) * self.res[2] +
         self.res[0] * (self.res[1] + 1) * (self.res[2] + 1) +
         (self.res[0] + 1) * self.res[1] * (self.res[2] + 1)) as usize
    }


    pub fn side_count(&self) -> usize {
        ((self.res[0] + 1) * self.res[1] * self.res[2] +
         self.res[0] * (self.res[1] + 1) * self.res[2] +
         self.res[0] * self.res[1] * (self.res[2] + 1)) as usize
    }


    pub fn boundary_side_count(&self) -> usize {
        (2 * self.res[1] * self.res[2] +
         self.res[0] * 2 * self.res[2] +
         self.res[0] * self.res[1] * 2) as usize
    }


    /**
     * Return the linear index of the cell with the given coordinates, in
     * row-major order. Inverse of `get_cell`; the mapping is an exact
     * bijection between valid coordinates and `[0, cell_count)`.
     */
    pub fn cell_index(&self, cell: IVec3) -> ElementIndex {
        (self.strides.0 * cell[0] + self.strides.1 * cell[1] + cell[2]) as usize
    }


    /**
     * Return the coordinates of the cell with the given linear index.
     */
    pub fn get_cell(&self, cell_index: ElementIndex) -> IVec3 {
        let index = cell_index as i64;
        let x = index / self.strides.0;
        let y = (index - self.strides.0 * x) / self.strides.1;
        let z = index - self.strides.0 * x - self.strides.1 * y;
        IVec3::new(x, y, z)
    }


    /**
     * Return an iterator which traverses the cell coordinates in linear
     * index order (row-major; the final index increases fastest).
     */
    pub fn cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        let res = self.res;

        (0..res[0]).flat_map(move |i| (0..res[1]).flat_map(move |j| {
            (0..res[2]).map(move |k| IVec3::new(i, j, k))
        }))
    }


    /**
     * World position of a sample point within a cell.
     */
    pub fn cell_position(&self, s: Sample) -> Vec3 {
        let cell = self.get_cell(s.element_index);
        self.bounds_lo + (Vec3::from(cell) + s.coords).mul_cw(self.cell_size)
    }


    /**
     * Deformation gradient of the cell reference-to-world mapping. Constant
     * over the whole grid: a regular grid has no curvature.
     */
    pub fn cell_deformation_gradient(&self) -> Matrix3 {
        Matrix3::diagonal(self.cell_size)
    }


    pub fn cell_inverse_deformation_gradient(&self) -> Matrix3 {
        Matrix3::diagonal(Vec3::new(
            1.0 / self.cell_size[0],
            1.0 / self.cell_size[1],
            1.0 / self.cell_size[2]))
    }


    /**
     * Local coordinates of a world position with respect to a cell. The
     * result is not clamped: coordinates outside [0,1]^3 signal that the
     * position lies outside this cell, which is a valid silent result.
     */
    pub fn cell_coordinates(&self, cell_index: ElementIndex, pos: Vec3) -> Coords {
        let uvw = (pos - self.bounds_lo).div_cw(self.cell_size);
        uvw - Vec3::from(self.get_cell(cell_index))
    }


    /**
     * Closest point on a cell to a world position, as local coordinates
     * plus the squared distance to the cell.
     */
    pub fn cell_closest_point(&self, cell_index: ElementIndex, pos: Vec3) -> (Coords, f64) {
        let corner = Vec3::from(self.get_cell(cell_index)).mul_cw(self.cell_size) + self.bounds_lo;
        project_on_box_at_origin(pos - corner, self.cell_size)
    }


    /**
     * The volume of a single cell.
     */
    pub fn cell_measure(&self) -> f64 {
        self.cell_size[0] * self.cell_size[1] * self.cell_size[2]
    }


    /**
     * Cells carry no orientation; only sides have a normal.
     */
    pub fn cell_normal(&self) -> Vec3 {
        Vec3::zeros()
    }
}
