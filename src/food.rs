use log::warn;
use rand::Rng;

use crate::snake::{Position, Snake};

/// Random draws tried before falling back to a board scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1024;

/// Picks a uniformly random cell the snake does not occupy.
///
/// Uses bounded rejection sampling. If every draw lands on the snake, the
/// first free cell in row-major order is used instead; a completely full
/// board yields the origin.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid_size: u16, occupied: &Snake) -> Position {
    let size = i32::from(grid_size);
    if size == 0 {
        return Position::new(0, 0);
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !occupied.occupies(candidate) {
            return candidate;
        }
    }

    first_free_cell(grid_size, occupied).unwrap_or_else(|| {
        warn!("no free cell for food on a {grid_size}x{grid_size} board");
        Position::new(0, 0)
    })
}

fn first_free_cell(grid_size: u16, occupied: &Snake) -> Option<Position> {
    let size = i32::from(grid_size);
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .find(|position| !occupied.occupies(*position))
}
