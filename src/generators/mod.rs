use rand::{SeedableRng, rngs::StdRng};

pub mod kruskal;

pub use kruskal::KruskalGenerator;

use crate::maze::Maze;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Where a generator stands after a call to `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Candidate walls remain.
    InProgress,
    /// The worklist is exhausted and the maze is perfect.
    Done,
}

/// Carves `maze` in one go. Returns the generator so callers can inspect the
/// opened walls.
pub fn generate_maze(maze: &mut Maze) -> KruskalGenerator {
    let mut generator = KruskalGenerator::new(maze);
    while generator.step(maze, usize::MAX) == GenerationStatus::InProgress {}
    generator
}
