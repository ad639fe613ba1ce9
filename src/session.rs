use rand::rngs::StdRng;

use crate::{
    error::MazeError,
    generators::{GenerationStatus, KruskalGenerator, get_rng},
    maze::{Coord, Direction, Maze},
    solvers::{NodeClass, Phase, SearchEngine, SearchReport, SearchStatus, Solver},
};

/// Everything one run of the program works on: the maze being carved or solved,
/// its generator and the search currently running, if any.
pub struct Session {
    /// Source of every maze in this session. Seeded sessions replay the same mazes.
    rng: StdRng,
    maze: Maze,
    generator: KruskalGenerator,
    search: Option<SearchEngine>,
}

impl Session {
    /// Creates a session with a fresh, fully walled maze waiting to be carved.
    pub fn new(width: u16, height: u16, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut rng = get_rng(seed);
        let maze = Maze::build(width, height, &mut rng)?;
        let generator = KruskalGenerator::new(&maze);
        Ok(Session {
            rng,
            maze,
            generator,
            search: None,
        })
    }

    /// Replaces the maze with a new one of the same size. Any search is dropped.
    pub fn regenerate(&mut self) -> Result<(), MazeError> {
        let maze = Maze::build(self.maze.width(), self.maze.height(), &mut self.rng)?;
        self.generator = KruskalGenerator::new(&maze);
        self.maze = maze;
        self.search = None;
        tracing::info!(
            "[session] new {}x{} maze requested",
            self.maze.width(),
            self.maze.height()
        );
        Ok(())
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn generator(&self) -> &KruskalGenerator {
        &self.generator
    }

    pub fn search(&self) -> Option<&SearchEngine> {
        self.search.as_ref()
    }

    pub fn is_generated(&self) -> bool {
        self.generator.is_done()
    }

    /// Whether a search is running and not finished yet.
    pub fn is_searching(&self) -> bool {
        self.search
            .as_ref()
            .is_some_and(|search| search.phase() != Phase::Done)
    }

    pub fn step_generation(&mut self, max_ops: usize) -> GenerationStatus {
        self.generator.step(&mut self.maze, max_ops)
    }

    /// Starts `solver` from the origin, replacing any previous search.
    pub fn start_search(&mut self, solver: Solver) -> Result<(), MazeError> {
        let search = SearchEngine::start(solver, &mut self.maze, &self.generator)?;
        self.search = Some(search);
        Ok(())
    }

    /// Advances the running search. Nothing changes when the maze is not carved
    /// yet or no search was started.
    pub fn step_search(&mut self, max_ops: usize) -> Result<SearchStatus, MazeError> {
        if !self.generator.is_done() {
            return Err(MazeError::GenerationInProgress);
        }
        let search = self.search.as_mut().ok_or(MazeError::NoActiveSearch)?;
        search.step(&mut self.maze, max_ops)
    }

    /// Moves the player. `Ok(None)` means the move was refused.
    pub fn move_player(&mut self, direction: Direction) -> Result<Option<Coord>, MazeError> {
        let search = self.search.as_mut().ok_or(MazeError::NoActiveSearch)?;
        Ok(search.move_player(&mut self.maze, direction))
    }

    /// Drops the running search and clears the visited marks. The maze is kept.
    pub fn reset_search(&mut self) {
        self.search = None;
        self.maze.clear_visited();
    }

    /// Ends the running search without reaching the target.
    pub fn forfeit(&mut self) -> Option<SearchReport> {
        let mut search = self.search.take()?;
        Some(search.forfeit(&self.maze))
    }

    pub fn classify(&self, coord: Coord) -> NodeClass {
        let Some(id) = self.maze.id(coord) else {
            return NodeClass::Unvisited;
        };
        match &self.search {
            Some(search) => search.classify(&self.maze, id),
            None if id == self.maze.origin() => NodeClass::Origin,
            None if id == self.maze.target() => NodeClass::Target,
            None => NodeClass::Unvisited,
        }
    }

    /// Where the player stands, in manual runs.
    pub fn player(&self) -> Option<Coord> {
        self.search
            .as_ref()
            .and_then(SearchEngine::player)
            .map(|id| self.maze.coord(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carved_session(width: u16, height: u16, seed: u64) -> Session {
        let mut session = Session::new(width, height, Some(seed)).unwrap();
        while session.step_generation(4) == GenerationStatus::InProgress {}
        session
    }

    #[test]
    fn test_rejects_empty_maze() {
        assert!(matches!(
            Session::new(0, 0, None),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_search_step_before_generation_is_refused() {
        let mut session = Session::new(6, 6, Some(1)).unwrap();
        session.step_generation(3);
        let walls = session.maze().walls().len();
        let remaining = session.generator().remaining();

        assert_eq!(
            session.start_search(Solver::Dfs),
            Err(MazeError::GenerationInProgress)
        );
        let err = session.step_search(5).unwrap_err();
        assert_eq!(err, MazeError::GenerationInProgress);
        assert!(err.is_recoverable());

        assert_eq!(session.maze().walls().len(), walls);
        assert_eq!(session.generator().remaining(), remaining);
        assert!(session.search().is_none());
    }

    #[test]
    fn test_step_without_search() {
        let mut session = carved_session(3, 3, 1);
        assert_eq!(session.step_search(1), Err(MazeError::NoActiveSearch));
        assert_eq!(
            session.move_player(Direction::Right),
            Err(MazeError::NoActiveSearch)
        );
    }

    #[test]
    fn test_full_run() {
        let mut session = carved_session(8, 5, 12);
        session.start_search(Solver::Bfs).unwrap();
        assert!(session.is_searching());
        let report = loop {
            if let SearchStatus::Completed(report) = session.step_search(3).unwrap() {
                break report;
            }
        };
        assert!(!session.is_searching());
        assert_eq!(report.path.first(), Some(&(0, 0)));
        assert_eq!(report.path.last(), Some(&(7, 4)));
        for &coord in &report.path[1..report.path.len() - 1] {
            assert_eq!(session.classify(coord), NodeClass::Path);
        }
        assert_eq!(session.classify((0, 0)), NodeClass::Origin);
        assert_eq!(session.classify((7, 4)), NodeClass::Target);

        session.reset_search();
        assert!(session.search().is_none());
        assert!(session.maze().nodes().iter().all(|n| !n.is_visited()));
    }

    #[test]
    fn test_manual_forfeit() {
        let mut session = carved_session(5, 5, 3);
        session.start_search(Solver::Manual).unwrap();
        assert_eq!(session.player(), Some((0, 0)));

        // The origin only has right and down neighbors, and at least one is open
        let moved = [Direction::Right, Direction::Down]
            .into_iter()
            .find_map(|direction| session.move_player(direction).unwrap());
        assert!(moved.is_some());
        assert_eq!(session.player(), moved);
        assert_eq!(session.step_search(1).unwrap(), SearchStatus::Continuing);

        let report = session.forfeit().unwrap();
        assert!(!report.solved);
        assert_eq!(report.path.len(), 2);
        assert_eq!(report.nodes_explored, 1);
        assert!(session.search().is_none());
        assert_eq!(session.forfeit(), None);
    }

    /// Solves with BFS, then starts a manual run and walks the player along that route.
    fn walk_bfs_route(session: &mut Session) -> Vec<Coord> {
        session.start_search(Solver::Bfs).unwrap();
        let route = loop {
            if let SearchStatus::Completed(report) = session.step_search(10).unwrap() {
                break report.path;
            }
        };

        session.start_search(Solver::Manual).unwrap();
        for pair in route.windows(2) {
            let direction = match (
                pair[1].0 as i32 - pair[0].0 as i32,
                pair[1].1 as i32 - pair[0].1 as i32,
            ) {
                (-1, 0) => Direction::Left,
                (1, 0) => Direction::Right,
                (0, -1) => Direction::Up,
                _ => Direction::Down,
            };
            assert_eq!(session.move_player(direction).unwrap(), Some(pair[1]));
        }
        route
    }

    #[test]
    fn test_player_cannot_leave_target() {
        let mut session = carved_session(6, 4, 21);
        let route = walk_bfs_route(&mut session);
        assert!(!session.is_searching());

        // The target is entered from somewhere, so walking back is open but refused
        for direction in Direction::ALL {
            assert_eq!(session.move_player(direction).unwrap(), None);
        }
        assert_eq!(session.player(), Some((5, 3)));

        match session.step_search(1).unwrap() {
            SearchStatus::Completed(report) => {
                assert!(report.solved);
                assert_eq!(report.path, route);
            }
            SearchStatus::Continuing => panic!("player reached the target"),
        }
    }

    #[test]
    fn test_manual_run_reaches_target() {
        let mut session = carved_session(6, 4, 21);
        let route = walk_bfs_route(&mut session);
        match session.step_search(1).unwrap() {
            SearchStatus::Completed(report) => {
                assert!(report.solved);
                assert_eq!(report.solver, Solver::Manual);
                assert_eq!(report.path, route);
            }
            SearchStatus::Continuing => panic!("player is on the target"),
        }
    }

    #[test]
    fn test_seeded_sessions_replay_mazes() {
        let mut a = carved_session(7, 7, 99);
        let mut b = carved_session(7, 7, 99);
        assert_eq!(a.generator().opened(), b.generator().opened());

        a.regenerate().unwrap();
        b.regenerate().unwrap();
        assert!(!a.is_generated());
        while a.step_generation(1) == GenerationStatus::InProgress {}
        while b.step_generation(100) == GenerationStatus::InProgress {}
        assert_eq!(a.generator().opened(), b.generator().opened());
        assert_eq!(
            a.maze().walls().iter().collect::<Vec<_>>(),
            b.maze().walls().iter().collect::<Vec<_>>()
        );
    }
}
