use std::error;
use std::fmt;

use crate::vector::{IVec3, Vec3};

#[derive(Debug)]

/**
 * Error to represent an invalid grid construction.
 */
pub enum Error {
    ZeroResolution(IVec3),
    DegenerateBounds(Vec3, Vec3),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            ZeroResolution(res) => writeln!(
                fmt,
                "grid resolution must be positive on each axis: ({} {} {})",
                res[0], res[1], res[2]
            ),
            DegenerateBounds(lo, hi) => writeln!(
                fmt,
                "grid bounds have non-positive extent: ({} {} {}) .. ({} {} {})",
                lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
            ),
        }
    }
}

impl error::Error for Error {}
