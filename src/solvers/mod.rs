use std::{
    collections::HashMap,
    fmt,
    time::{Duration, Instant},
};

mod astar;
mod bfs;
mod dfs;
mod manual;

pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use manual::Manual;

use crate::{
    error::MazeError,
    generators::KruskalGenerator,
    maze::{Coord, Direction, Maze, NodeId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Dfs,
    Bfs,
    AStar,
    Manual,
}

impl Solver {
    /// The strategies that run on their own, without a player.
    pub const AUTOMATED: [Solver; 3] = [Solver::Dfs, Solver::Bfs, Solver::AStar];
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
            Solver::Manual => write!(f, "Manual"),
        }
    }
}

/// Search state machine. Manual runs go straight from `Searching` to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking for the target.
    Searching,
    /// Target found, walking parent links back to the origin.
    Backtracking,
    Done,
}

/// How a node should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Unvisited,
    /// Discovered but not expanded yet.
    Frontier,
    Expanded,
    /// On the current or final path.
    Path,
    Origin,
    Target,
}

/// One strategy's search state. `advance` does one elementary unit of work.
pub trait Search {
    fn solver(&self) -> Solver;

    fn phase(&self) -> Phase;

    fn advance(&mut self, maze: &mut Maze) -> Result<Phase, MazeError>;

    /// The path found so far, origin first.
    fn path(&self) -> Vec<NodeId>;

    /// Number of expanded nodes.
    fn explored(&self) -> usize;

    /// Classification of `id`, not accounting for the origin and target.
    fn class_of(&self, maze: &Maze, id: NodeId) -> NodeClass;

    /// Applies a player move. Automated strategies refuse every move.
    fn move_player(&mut self, _maze: &mut Maze, _direction: Direction) -> Option<NodeId> {
        None
    }

    fn player(&self) -> Option<NodeId> {
        None
    }
}

/// Walks one parent link back from the end of `path`, which runs target first.
/// Returns `Done` once the origin is appended.
fn backtrack(
    solver: Solver,
    maze: &Maze,
    path: &mut Vec<NodeId>,
    parents: &HashMap<NodeId, NodeId>,
) -> Result<Phase, MazeError> {
    let Some(&last) = path.last() else {
        return Err(MazeError::Inconsistent {
            solver,
            reason: "backtracking started without a target".to_string(),
        });
    };
    let Some(&parent) = parents.get(&last) else {
        return Err(MazeError::Inconsistent {
            solver,
            reason: format!("no parent recorded for {:?}", maze.coord(last)),
        });
    };
    path.push(parent);
    if parent == maze.origin() {
        Ok(Phase::Done)
    } else {
        Ok(Phase::Backtracking)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub solver: Solver,
    /// Origin first. For manual runs, every position the player stood on.
    pub path: Vec<Coord>,
    pub nodes_explored: usize,
    pub elapsed: Duration,
    /// False when the player gave up.
    pub solved: bool,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.solved {
            "MAZE SOLVED."
        } else {
            "RUN FORFEITED."
        };
        writeln!(f, "------------")?;
        writeln!(f, "{title}")?;
        writeln!(f, "------------")?;
        writeln!(f, "Pathfinder:     {}", self.solver)?;
        writeln!(f, "Nodes explored: {}", self.nodes_explored)?;
        writeln!(f, "Path length:    {}", self.path.len())?;
        writeln!(f, "Time elapsed:   {:.2}s", self.elapsed.as_secs_f64())?;
        write!(f, "------------")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Continuing,
    Completed(SearchReport),
}

/// Runs one strategy over a carved maze, a bounded number of steps at a time.
pub struct SearchEngine {
    search: Box<dyn Search>,
    started_at: Instant,
    /// Time from start until the target was reached.
    found_after: Option<Duration>,
    report: Option<SearchReport>,
}

impl SearchEngine {
    /// Starts `solver` at the maze origin. Fails if the maze is still being carved.
    pub fn start(
        solver: Solver,
        maze: &mut Maze,
        generator: &KruskalGenerator,
    ) -> Result<Self, MazeError> {
        if !generator.is_done() {
            return Err(MazeError::GenerationInProgress);
        }
        tracing::info!(
            "[search] starting {} from {:?} towards {:?}",
            solver,
            maze.coord(maze.origin()),
            maze.coord(maze.target())
        );
        Ok(SearchEngine {
            search: Self::fresh(solver, maze),
            started_at: Instant::now(),
            found_after: None,
            report: None,
        })
    }

    fn fresh(solver: Solver, maze: &mut Maze) -> Box<dyn Search> {
        maze.clear_visited();
        match solver {
            Solver::Dfs => Box::new(DepthFirst::new(maze)),
            Solver::Bfs => Box::new(BreadthFirst::new(maze)),
            Solver::AStar => Box::new(AStar::new(maze)),
            Solver::Manual => Box::new(Manual::new(maze)),
        }
    }

    /// Throws away all progress and starts the same strategy again.
    pub fn reset(&mut self, maze: &mut Maze) {
        self.search = Self::fresh(self.search.solver(), maze);
        self.started_at = Instant::now();
        self.found_after = None;
        self.report = None;
    }

    pub fn solver(&self) -> Solver {
        self.search.solver()
    }

    pub fn phase(&self) -> Phase {
        self.search.phase()
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn player(&self) -> Option<NodeId> {
        self.search.player()
    }

    /// Advances the search by up to `max_ops` steps.
    pub fn step(&mut self, maze: &mut Maze, max_ops: usize) -> Result<SearchStatus, MazeError> {
        let mut ops = 0;
        while ops < max_ops && self.search.phase() != Phase::Done {
            let phase = self.search.advance(maze)?;
            if phase != Phase::Searching && self.found_after.is_none() {
                let elapsed = self.started_at.elapsed();
                tracing::info!(
                    "[search] {} reached the target after {} expansions in {:?}",
                    self.search.solver(),
                    self.search.explored(),
                    elapsed
                );
                self.found_after = Some(elapsed);
            }
            ops += 1;
        }

        if self.search.phase() == Phase::Done {
            Ok(SearchStatus::Completed(self.finish(maze, true)))
        } else {
            Ok(SearchStatus::Continuing)
        }
    }

    fn finish(&mut self, maze: &Maze, solved: bool) -> SearchReport {
        if let Some(report) = &self.report {
            return report.clone();
        }
        let report = SearchReport {
            solver: self.search.solver(),
            path: self
                .search
                .path()
                .into_iter()
                .map(|id| maze.coord(id))
                .collect(),
            nodes_explored: self.search.explored(),
            elapsed: self.found_after.unwrap_or_else(|| self.elapsed()),
            solved,
        };
        tracing::info!(
            "[search] {} finished: solved={}, path length {}, {} nodes explored",
            report.solver,
            report.solved,
            report.path.len(),
            report.nodes_explored
        );
        self.report = Some(report.clone());
        report
    }

    /// Gives up on the run and reports the progress made so far.
    pub fn forfeit(&mut self, maze: &Maze) -> SearchReport {
        tracing::info!("[search] {} forfeited", self.search.solver());
        self.finish(maze, false)
    }

    /// Moves the player one node. Returns the new position, or `None` if a wall,
    /// the boundary or a non-manual strategy refused the move.
    pub fn move_player(&mut self, maze: &mut Maze, direction: Direction) -> Option<Coord> {
        let moved = self.search.move_player(maze, direction);
        if moved.is_none() {
            tracing::debug!("[search] move {:?} refused", direction);
        } else if self.search.phase() == Phase::Done && self.found_after.is_none() {
            let elapsed = self.elapsed();
            tracing::info!(
                "[search] player reached the target after {} moves in {:?}",
                self.search.explored(),
                elapsed
            );
            self.found_after = Some(elapsed);
        }
        moved.map(|id| maze.coord(id))
    }

    pub fn classify(&self, maze: &Maze, id: NodeId) -> NodeClass {
        if id == maze.origin() {
            NodeClass::Origin
        } else if id == maze.target() {
            NodeClass::Target
        } else {
            self.search.class_of(maze, id)
        }
    }
}
