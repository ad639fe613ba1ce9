use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use super::{cell::GridCell, frame::Frame};
use crate::{
    maze::{Coord, Direction},
    session::Session,
    solvers::NodeClass,
};

/// Draws a session's maze. Nodes sit at odd frame coordinates, the slots between
/// them hold walls or passages, and even-even slots are pillars.
#[derive(Default)]
pub struct Renderer {
    frame: Option<Frame>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame dimensions for a maze of `width` x `height` nodes:
    /// n nodes in each dimension -> n + 1 walls -> 2n + 1 total
    pub fn frame_size(width: u16, height: u16) -> (u16, u16) {
        (
            width.saturating_mul(2).saturating_add(1),
            height.saturating_mul(2).saturating_add(1),
        )
    }

    /// Forces a full redraw on the next `draw`.
    pub fn invalidate(&mut self) {
        if let Some(frame) = self.frame.as_mut() {
            frame.invalidate();
        }
    }

    /// Updates the frame from the session and returns it.
    pub fn compose(&mut self, session: &Session) -> &mut Frame {
        let maze = session.maze();
        let (width, height) = Self::frame_size(maze.width(), maze.height());
        // A new maze of another size needs a new frame
        if self
            .frame
            .as_ref()
            .is_some_and(|frame| (frame.width(), frame.height()) != (width, height))
        {
            self.frame = None;
        }
        let frame = self
            .frame
            .get_or_insert_with(|| Frame::new(width, height, GridCell::WALL));

        let player = session.player();
        for y in 0..height {
            for x in 0..width {
                let cell = if frame.is_boundary(x, y) {
                    GridCell::WALL
                } else {
                    Self::cell_at(session, player, x, y)
                };
                frame.set((x, y), cell);
            }
        }
        frame
    }

    /// The cell at an inner frame coordinate.
    fn cell_at(session: &Session, player: Option<Coord>, x: u16, y: u16) -> GridCell {
        let maze = session.maze();
        match (x % 2, y % 2) {
            (1, 1) => {
                let coord = (x / 2, y / 2);
                if player == Some(coord) {
                    GridCell::PLAYER
                } else {
                    session.classify(coord).into()
                }
            }
            // Slot between two nodes of a row
            (0, 1) => {
                let (left, right) = ((x / 2 - 1, y / 2), (x / 2, y / 2));
                match maze.id(left) {
                    Some(id) if !maze.does_wall_exist(id, Direction::Right) => {
                        Self::passage(session, left, right)
                    }
                    _ => GridCell::WALL,
                }
            }
            // Slot between two nodes of a column
            (1, 0) => {
                let (up, down) = ((x / 2, y / 2 - 1), (x / 2, y / 2));
                match maze.id(up) {
                    Some(id) if !maze.does_wall_exist(id, Direction::Down) => {
                        Self::passage(session, up, down)
                    }
                    _ => GridCell::WALL,
                }
            }
            _ => GridCell::WALL,
        }
    }

    /// An open passage is part of the route when both its ends are.
    fn passage(session: &Session, a: Coord, b: Coord) -> GridCell {
        let on_route = |coord| {
            matches!(
                session.classify(coord),
                NodeClass::Path | NodeClass::Origin | NodeClass::Target
            )
        };
        if on_route(a) && on_route(b) && session.search().is_some() {
            GridCell::ROUTE
        } else {
            GridCell::EMPTY
        }
    }

    /// Draws the cells that changed since the last call.
    pub fn draw<W: Write>(&mut self, out: &mut W, session: &Session) -> std::io::Result<()> {
        let frame = self.compose(session);
        for coord in frame.take_dirty() {
            queue!(
                out,
                cursor::MoveTo(coord.0.saturating_mul(GridCell::CELL_WIDTH), coord.1),
                style::Print(frame[coord])
            )?;
        }
        out.flush()
    }

    /// Prints `lines` below the maze, replacing what was there.
    pub fn print_status<W: Write>(
        &self,
        out: &mut W,
        session: &Session,
        lines: &[String],
    ) -> std::io::Result<()> {
        let maze = session.maze();
        let (_, height) = Self::frame_size(maze.width(), maze.height());
        queue!(
            out,
            cursor::MoveTo(0, height),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        for line in lines {
            queue!(
                out,
                style::PrintStyledContent(line.clone().with(Color::Green).attribute(Attribute::Bold)),
                style::Print("\r\n")
            )?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::GenerationStatus,
        solvers::{SearchStatus, Solver},
    };

    fn carved(width: u16, height: u16) -> Session {
        let mut session = Session::new(width, height, Some(5)).unwrap();
        while session.step_generation(10) == GenerationStatus::InProgress {}
        session
    }

    #[test]
    fn test_frame_size() {
        assert_eq!(Renderer::frame_size(3, 2), (7, 5));
        assert_eq!(Renderer::frame_size(u16::MAX, 1), (u16::MAX, 3));
    }

    #[test]
    fn test_uncarved_maze_is_all_walls_between_nodes() {
        let session = Session::new(3, 2, Some(1)).unwrap();
        let mut renderer = Renderer::new();
        let frame = renderer.compose(&session);
        assert_eq!(frame[(1, 1)], GridCell::START);
        assert_eq!(frame[(5, 3)], GridCell::GOAL);
        assert_eq!(frame[(3, 1)], GridCell::EMPTY);
        // Slots between nodes
        assert_eq!(frame[(2, 1)], GridCell::WALL);
        assert_eq!(frame[(3, 2)], GridCell::WALL);
    }

    #[test]
    fn test_open_passages_are_drawn() {
        let session = carved(1, 2);
        let mut renderer = Renderer::new();
        let frame = renderer.compose(&session);
        // The single wall of a 1x2 maze is always opened
        assert_eq!(frame[(1, 2)], GridCell::EMPTY);
    }

    #[test]
    fn test_solved_route_is_drawn() {
        let mut session = carved(1, 3);
        session.start_search(Solver::Bfs).unwrap();
        while let SearchStatus::Continuing = session.step_search(5).unwrap() {}
        let mut renderer = Renderer::new();
        let frame = renderer.compose(&session);
        assert_eq!(frame[(1, 3)], GridCell::ROUTE);
        assert_eq!(frame[(1, 2)], GridCell::ROUTE);
        assert_eq!(frame[(1, 4)], GridCell::ROUTE);
        assert_eq!(frame.take_dirty().len(), 3 * 7);
        // Nothing changed, nothing to redraw
        renderer.compose(&session);
        assert!(renderer.compose(&session).take_dirty().is_empty());
    }

    #[test]
    fn test_player_token() {
        let mut session = carved(2, 2);
        session.start_search(Solver::Manual).unwrap();
        let mut renderer = Renderer::new();
        assert_eq!(renderer.compose(&session)[(1, 1)], GridCell::PLAYER);
    }
}
