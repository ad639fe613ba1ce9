use crossterm::style::{Color, Stylize};

use std::fmt;

use crate::solvers::NodeClass;

/// Represents a cell of the drawn grid, which can be either a path or a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCell {
    Path(PathType),
    Wall,
}

impl GridCell {
    pub const EMPTY: GridCell = GridCell::Path(PathType::Empty);
    pub const WALL: GridCell = GridCell::Wall;
    pub const ROUTE: GridCell = GridCell::Path(PathType::Route);
    pub const START: GridCell = GridCell::Path(PathType::Start);
    pub const GOAL: GridCell = GridCell::Path(PathType::Goal);
    pub const PLAYER: GridCell = GridCell::Path(PathType::Player);
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

/// Represents different types of path cells in the maze.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum PathType {
    /// A node nothing has touched yet, or an open passage.
    #[default]
    Empty,
    /// Discovered by the search, waiting to be expanded.
    Frontier,
    /// Already expanded by the search or walked by the player.
    Expanded,
    /// Part of the current or final path.
    Route,
    /// The starting cell of the maze.
    Start,
    /// The goal or ending cell of the maze.
    Goal,
    /// The player's token.
    Player,
}

impl From<NodeClass> for GridCell {
    fn from(class: NodeClass) -> Self {
        let path = match class {
            NodeClass::Unvisited => PathType::Empty,
            NodeClass::Frontier => PathType::Frontier,
            NodeClass::Expanded => PathType::Expanded,
            NodeClass::Path => PathType::Route,
            NodeClass::Origin => PathType::Start,
            NodeClass::Target => PathType::Goal,
        };
        GridCell::Path(path)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            GridCell::Path(path) => match path {
                PathType::Empty => "  ".with(Color::Reset),
                PathType::Frontier => "+ ".with(Color::Cyan),
                PathType::Expanded => "* ".with(Color::Blue),
                PathType::Route => "🟨".with(Color::Yellow),
                PathType::Start => "🟩".with(Color::Green),
                PathType::Goal => "🟥".with(Color::Red),
                PathType::Player => "🟣".with(Color::Magenta),
            },
            GridCell::Wall => "⬜".with(Color::White),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
