//! Terminal maze playground: mazes carved with randomized Kruskal, then solved
//! step by step with DFS, BFS, A* or by hand.

pub mod app;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod session;
pub mod solvers;

pub use error::MazeError;
pub use maze::{Coord, Direction, Maze};
pub use session::Session;
pub use solvers::{SearchReport, Solver};
