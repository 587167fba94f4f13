//! Gridgeom is a geometric indexing and spatial-query engine for regular 3D
//! grid discretizations, of the kind consumed by finite-element style
//! integration layers. It provides a bijective numbering scheme over a
//! grid's cells and sides (the planar faces between cells and on the outer
//! envelope), exact geometric mappings per entity kind (position,
//! deformation gradient, measure, normal, closest point), and nearest-cell
//! lookups that may be constrained by an arbitrary caller predicate. Every
//! query is a pure function of an immutable grid descriptor, so queries run
//! concurrently on any number of lanes with no synchronization.

pub mod axis;
pub mod closest_point;
pub mod element;
pub mod error;
pub mod grid;
pub mod lookup;
pub mod side;
pub mod types;
pub mod vector;
