use std::collections::{HashMap, HashSet, VecDeque};

use super::{NodeClass, Phase, Search, Solver, backtrack};
use crate::{
    error::MazeError,
    maze::{Maze, NodeId},
};

/// Breadth-first search with parent links for path reconstruction.
pub struct BreadthFirst {
    queue: VecDeque<NodeId>,
    /// Mirror of `queue` for membership checks.
    queued: HashSet<NodeId>,
    closed: HashSet<NodeId>,
    parents: HashMap<NodeId, NodeId>,
    /// Filled while backtracking, target first.
    path: Vec<NodeId>,
    on_path: HashSet<NodeId>,
    target: NodeId,
    phase: Phase,
}

impl BreadthFirst {
    pub fn new(maze: &mut Maze) -> Self {
        let origin = maze.origin();
        maze.set_visited(origin, true);
        BreadthFirst {
            queue: VecDeque::from([origin]),
            queued: HashSet::from([origin]),
            closed: HashSet::new(),
            parents: HashMap::new(),
            path: Vec::new(),
            on_path: HashSet::new(),
            target: maze.target(),
            phase: Phase::Searching,
        }
    }

    fn search_step(&mut self, maze: &mut Maze) -> Result<Phase, MazeError> {
        let Some(current) = self.queue.pop_front() else {
            return Err(MazeError::Inconsistent {
                solver: Solver::Bfs,
                reason: "queue emptied before reaching the target".to_string(),
            });
        };
        self.queued.remove(&current);

        if current == self.target {
            self.path.push(current);
            self.on_path.insert(current);
            self.phase = if current == maze.origin() {
                Phase::Done
            } else {
                Phase::Backtracking
            };
            return Ok(self.phase);
        }

        let neighbors = maze.passable_neighbors(current, false).collect::<Vec<_>>();
        for neighbor in neighbors {
            // Unvisited means neither closed nor queued yet
            self.parents.insert(neighbor, current);
            maze.set_visited(neighbor, true);
            self.closed.insert(neighbor);
            self.queued.insert(neighbor);
            self.queue.push_back(neighbor);
        }
        Ok(self.phase)
    }
}

impl Search for BreadthFirst {
    fn solver(&self) -> Solver {
        Solver::Bfs
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn advance(&mut self, maze: &mut Maze) -> Result<Phase, MazeError> {
        match self.phase {
            Phase::Searching => self.search_step(maze),
            Phase::Backtracking => {
                self.phase = backtrack(Solver::Bfs, maze, &mut self.path, &self.parents)?;
                if let Some(&added) = self.path.last() {
                    self.on_path.insert(added);
                }
                Ok(self.phase)
            }
            Phase::Done => Ok(self.phase),
        }
    }

    fn path(&self) -> Vec<NodeId> {
        self.path.iter().rev().copied().collect()
    }

    fn explored(&self) -> usize {
        self.closed.len()
    }

    fn class_of(&self, _maze: &Maze, id: NodeId) -> NodeClass {
        if self.on_path.contains(&id) {
            NodeClass::Path
        } else if self.queued.contains(&id) {
            NodeClass::Frontier
        } else if self.closed.contains(&id) {
            NodeClass::Expanded
        } else {
            NodeClass::Unvisited
        }
    }
}
