use std::collections::{HashMap, HashSet};

use super::{NodeClass, Phase, Search, Solver, backtrack};
use crate::{
    error::MazeError,
    maze::{Maze, NodeId},
};

/// Best-first search ranked by `f = g + h`, ties going to the smaller `h`.
///
/// `g` is the straight-line distance from the origin fixed when the maze was built,
/// not the length of the walked path, and an open node keeps the parent it was
/// first discovered from.
pub struct AStar {
    /// Discovered nodes in insertion order. Among equal candidates the earliest wins.
    open: Vec<NodeId>,
    in_open: HashSet<NodeId>,
    closed: HashSet<NodeId>,
    parents: HashMap<NodeId, NodeId>,
    /// Filled while backtracking, target first.
    path: Vec<NodeId>,
    on_path: HashSet<NodeId>,
    target: NodeId,
    phase: Phase,
}

impl AStar {
    pub fn new(maze: &mut Maze) -> Self {
        let origin = maze.origin();
        maze.set_visited(origin, true);
        AStar {
            open: vec![origin],
            in_open: HashSet::from([origin]),
            closed: HashSet::new(),
            parents: HashMap::new(),
            path: Vec::new(),
            on_path: HashSet::new(),
            target: maze.target(),
            phase: Phase::Searching,
        }
    }

    /// Index in `open` of the cheapest candidate.
    fn cheapest(&self, maze: &Maze) -> Option<usize> {
        self.open
            .iter()
            .enumerate()
            .min_by_key(|&(_, &id)| {
                let node = maze.node(id);
                (node.f_cost(), node.h_cost())
            })
            .map(|(index, _)| index)
    }

    fn search_step(&mut self, maze: &mut Maze) -> Result<Phase, MazeError> {
        let Some(index) = self.cheapest(maze) else {
            return Err(MazeError::Inconsistent {
                solver: Solver::AStar,
                reason: "open set emptied before reaching the target".to_string(),
            });
        };
        let current = self.open.remove(index);
        self.in_open.remove(&current);
        self.closed.insert(current);

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
            if self.closed.contains(&neighbor) || self.in_open.contains(&neighbor) {
                continue;
            }
            self.parents.insert(neighbor, current);
            self.in_open.insert(neighbor);
            self.open.push(neighbor);
        }
        Ok(self.phase)
    }
}

impl Search for AStar {
    fn solver(&self) -> Solver {
        Solver::AStar
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn advance(&mut self, maze: &mut Maze) -> Result<Phase, MazeError> {
        match self.phase {
            Phase::Searching => self.search_step(maze),
            Phase::Backtracking => {
                self.phase = backtrack(Solver::AStar, maze, &mut self.path, &self.parents)?;
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
        } else if self.in_open.contains(&id) {
            NodeClass::Frontier
        } else if self.closed.contains(&id) {
            NodeClass::Expanded
        } else {
            NodeClass::Unvisited
        }
    }
}
