use std::collections::HashSet;

use super::{NodeClass, Phase, Search, Solver};
use crate::{
    error::MazeError,
    maze::{Maze, NodeId},
};

/// Depth-first search over an explicit stack.
///
/// Ancestors never leave the stack before the target is found, so once the top of
/// the stack is the target the stack itself is the path and no backtracking phase
/// is needed.
pub struct DepthFirst {
    stack: Vec<NodeId>,
    on_stack: Vec<bool>,
    closed: HashSet<NodeId>,
    target: NodeId,
    phase: Phase,
}

impl DepthFirst {
    pub fn new(maze: &mut Maze) -> Self {
        let origin = maze.origin();
        maze.set_visited(origin, true);
        let mut on_stack = vec![false; maze.len()];
        on_stack[origin] = true;
        DepthFirst {
            stack: vec![origin],
            on_stack,
            closed: HashSet::new(),
            target: maze.target(),
            phase: Phase::Searching,
        }
    }
}

impl Search for DepthFirst {
    fn solver(&self) -> Solver {
        Solver::Dfs
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn advance(&mut self, maze: &mut Maze) -> Result<Phase, MazeError> {
        if self.phase == Phase::Done {
            return Ok(self.phase);
        }
        let Some(&current) = self.stack.last() else {
            return Err(MazeError::Inconsistent {
                solver: Solver::Dfs,
                reason: "stack emptied before reaching the target".to_string(),
            });
        };

        if current == self.target {
            self.phase = Phase::Done;
            return Ok(self.phase);
        }

        let next = maze.passable_neighbors(current, false).next();
        match next {
            Some(next) => {
                maze.set_visited(next, true);
                self.closed.insert(next);
                self.on_stack[next] = true;
                self.stack.push(next);
            }
            None => {
                // Dead end: back up one level
                self.stack.pop();
                self.on_stack[current] = false;
            }
        }
        Ok(self.phase)
    }

    fn path(&self) -> Vec<NodeId> {
        self.stack.clone()
    }

    fn explored(&self) -> usize {
        self.closed.len()
    }

    fn class_of(&self, _maze: &Maze, id: NodeId) -> NodeClass {
        if self.on_stack[id] {
            NodeClass::Path
        } else if self.closed.contains(&id) {
            NodeClass::Expanded
        } else {
            NodeClass::Unvisited
        }
    }
}
