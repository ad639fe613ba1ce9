use std::collections::VecDeque;

use crate::{
    generators::GenerationStatus,
    maze::{Edge, EdgeId, Maze},
};

/// Randomized Kruskal's algorithm, run a few merges at a time.
///
/// Candidates are the maze's wall records in ascending weight order. A candidate
/// whose two sides are already connected would close a cycle, so it is dropped
/// and its wall stays up. Any other candidate is knocked down and its two groups
/// are merged.
pub struct KruskalGenerator {
    /// Candidates not yet processed, lightest first.
    worklist: VecDeque<EdgeId>,
    /// Walls knocked down so far, in order.
    opened: Vec<EdgeId>,
}

impl KruskalGenerator {
    pub fn new(maze: &Maze) -> Self {
        KruskalGenerator {
            worklist: (0..maze.edges().len()).collect(),
            opened: Vec::with_capacity(maze.len().saturating_sub(1)),
        }
    }

    /// Performs up to `max_ops` merges. Dropping a cycle-forming candidate does
    /// not count against the budget.
    pub fn step(&mut self, maze: &mut Maze, max_ops: usize) -> GenerationStatus {
        let was_done = self.is_done();
        let mut merges = 0;
        while merges < max_ops {
            let Some(candidate) = self.worklist.pop_front() else {
                break;
            };
            let Edge { from, to, .. } = *maze.edge(candidate);

            // Already connected: knocking this wall down would create a loop
            if maze.same_set(from, to) {
                continue;
            }

            maze.open_wall(candidate);
            self.opened.push(candidate);
            merges += 1;
            tracing::trace!(
                "[kruskal] opened wall between {:?} and {:?}",
                maze.coord(from),
                maze.coord(to)
            );
        }

        if self.is_done() && !was_done {
            tracing::info!(
                "[kruskal] maze {}x{} carved: {} walls opened, {} left standing",
                maze.width(),
                maze.height(),
                self.opened.len(),
                maze.walls().len()
            );
        }
        self.status()
    }

    pub fn status(&self) -> GenerationStatus {
        if self.is_done() {
            GenerationStatus::Done
        } else {
            GenerationStatus::InProgress
        }
    }

    /// True exactly when the worklist is exhausted.
    pub fn is_done(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Candidates still waiting to be processed.
    pub fn remaining(&self) -> usize {
        self.worklist.len()
    }

    /// Walls knocked down so far, in the order they were opened.
    pub fn opened(&self) -> &[EdgeId] {
        &self.opened
    }
}
