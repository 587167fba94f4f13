use std::collections::HashSet;
use std::time::Instant;

use gridgeom::grid::Grid;
use gridgeom::vector::{IVec3, Vec3};

const RES: i64 = 64;
const NUM_QUERIES: usize = 100_000;




fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    let grid = Grid::new(
        IVec3::new(RES, RES, RES),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 1.0)).unwrap();

    // Mark a thin spherical shell of cells as qualifying, so most lookups
    // have to run the expanding-ring search.
    let shell: HashSet<_> = grid
        .cells()
        .filter(|&cell| {
            let center = grid.cell_position(gridgeom::types::Sample::new(
                grid.cell_index(cell),
                Vec3::new(0.5, 0.5, 0.5)));
            let r = (center - Vec3::new(0.5, 0.5, 0.5)).squared_length().sqrt();
            (r - 0.35).abs() < 0.5 / RES as f64
        })
        .map(|cell| grid.cell_index(cell))
        .collect();

    log::info!("{} of {} cells qualify", shell.len(), grid.cell_count());

    let points: Vec<_> = (0..NUM_QUERIES)
        .map(|n| {
            let t = n as f64 / NUM_QUERIES as f64;
            Vec3::new(t, (t * 17.0) % 1.0, (t * 131.0) % 1.0)
        })
        .collect();

    let start = Instant::now();
    let samples = grid.lookup_filtered_many(&points, 1.0, |n| shell.contains(&n));
    let duration = start.elapsed().as_secs_f64();

    let found = samples.iter().filter(|s| s.is_some()).count();

    println!();
    println!("filtered nearest-cell lookup");
    println!("queries ............... {}", NUM_QUERIES);
    println!("matched ............... {}", found);
    println!("total ................. {}s", duration);
    println!("per query ............. {}us", duration / NUM_QUERIES as f64 * 1e6);
}
