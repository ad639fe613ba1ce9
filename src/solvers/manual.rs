use super::{NodeClass, Phase, Search, Solver};
use crate::{
    error::MazeError,
    maze::{Direction, Maze, NodeId},
};

/// A player walking the maze one move at a time. Any opened passage may be taken,
/// including back onto nodes already walked.
pub struct Manual {
    /// Where the player currently stands
    player: NodeId,
    origin: NodeId,
    target: NodeId,
    /// Every node moved onto, in order
    trail: Vec<NodeId>,
    phase: Phase,
}

impl Manual {
    pub fn new(maze: &mut Maze) -> Self {
        Manual {
            player: maze.origin(),
            origin: maze.origin(),
            target: maze.target(),
            trail: Vec::new(),
            phase: Phase::Searching,
        }
    }
}

impl Search for Manual {
    fn solver(&self) -> Solver {
        Solver::Manual
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn advance(&mut self, _maze: &mut Maze) -> Result<Phase, MazeError> {
        if self.player == self.target {
            self.phase = Phase::Done;
        }
        Ok(self.phase)
    }

    fn path(&self) -> Vec<NodeId> {
        std::iter::once(self.origin)
            .chain(self.trail.iter().copied())
            .collect()
    }

    fn explored(&self) -> usize {
        self.trail.len()
    }

    fn class_of(&self, maze: &Maze, id: NodeId) -> NodeClass {
        if id == self.player {
            NodeClass::Path
        } else if maze.node(id).is_visited() {
            NodeClass::Expanded
        } else {
            NodeClass::Unvisited
        }
    }

    fn move_player(&mut self, maze: &mut Maze, direction: Direction) -> Option<NodeId> {
        if self.phase == Phase::Done {
            return None;
        }
        let next = maze.neighbor(self.player, direction)?;
        // Walls still block the player, visited nodes do not
        if !maze.passable_neighbors(self.player, true).any(|n| n == next) {
            return None;
        }
        self.player = next;
        self.trail.push(next);
        maze.set_visited(next, true);
        // The run ends on arrival, later moves are refused
        if next == self.target {
            self.phase = Phase::Done;
        }
        Some(next)
    }

    fn player(&self) -> Option<NodeId> {
        Some(self.player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    /// A 3x1 corridor with both walls opened.
    fn corridor() -> Maze {
        let mut maze = Maze::build(3, 1, &mut get_rng(Some(9))).unwrap();
        let edges = maze.walls().iter().collect::<Vec<_>>();
        for edge in edges {
            maze.open_wall(edge);
        }
        maze
    }

    #[test]
    fn test_moves_through_open_passages() {
        let mut maze = corridor();
        let mut manual = Manual::new(&mut maze);
        assert_eq!(manual.move_player(&mut maze, Direction::Right), Some(1));
        // Going back onto a walked node is allowed
        assert_eq!(manual.move_player(&mut maze, Direction::Left), Some(0));
        assert_eq!(manual.move_player(&mut maze, Direction::Right), Some(1));
        assert_eq!(manual.explored(), 3);
        assert_eq!(manual.path(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_refused_moves_change_nothing() {
        let mut maze = Maze::build(2, 2, &mut get_rng(Some(9))).unwrap();
        let mut manual = Manual::new(&mut maze);
        // Boundary
        assert_eq!(manual.move_player(&mut maze, Direction::Left), None);
        assert_eq!(manual.move_player(&mut maze, Direction::Up), None);
        // Standing walls
        assert_eq!(manual.move_player(&mut maze, Direction::Right), None);
        assert_eq!(manual.move_player(&mut maze, Direction::Down), None);
        assert_eq!(manual.player(), Some(0));
        assert_eq!(manual.path(), vec![0]);
        assert!(maze.nodes().iter().all(|n| !n.is_visited()));
    }

    #[test]
    fn test_done_on_reaching_target() {
        let mut maze = corridor();
        let mut manual = Manual::new(&mut maze);
        assert_eq!(manual.advance(&mut maze).unwrap(), Phase::Searching);
        manual.move_player(&mut maze, Direction::Right);
        assert_eq!(manual.phase(), Phase::Searching);
        manual.move_player(&mut maze, Direction::Right);
        // Done as soon as the player arrives, before any advance
        assert_eq!(manual.phase(), Phase::Done);
        assert_eq!(manual.advance(&mut maze).unwrap(), Phase::Done);
        // No moves after the run ended
        assert_eq!(manual.move_player(&mut maze, Direction::Left), None);
        assert_eq!(manual.class_of(&maze, 1), NodeClass::Expanded);
        assert_eq!(manual.class_of(&maze, 2), NodeClass::Path);
    }
}
