use super::{Coord, Direction, wall::EdgeId};

/// Linear index of a node, `y * width + x`.
pub type NodeId = usize;

/// A structural neighbor together with the wall record separating it from us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub node: NodeId,
    pub edge: EdgeId,
}

/// One cell of the maze.
#[derive(Debug, Clone)]
pub struct Node {
    /// Position of the node, origin at the top left corner.
    coord: Coord,
    /// Neighbor slots in `Direction::ALL` order. `None` faces the grid boundary.
    links: [Option<Link>; 4],
    /// Set while a search walks the maze, cleared when a new search starts.
    visited: bool,
    /// Distance from the origin, fixed when the maze is built.
    g_cost: u32,
    /// Distance to the target, fixed when the maze is built.
    h_cost: u32,
}

impl Node {
    pub(super) fn new(coord: Coord, g_cost: u32, h_cost: u32) -> Self {
        Node {
            coord,
            links: [None; 4],
            visited: false,
            g_cost,
            h_cost,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn x(&self) -> u16 {
        self.coord.0
    }

    pub fn y(&self) -> u16 {
        self.coord.1
    }

    /// The structural neighbor in `direction`, ignoring walls.
    pub fn link(&self, direction: Direction) -> Option<Link> {
        self.links[direction.index()]
    }

    /// All neighbor slots in left, right, up, down order.
    pub fn links(&self) -> impl Iterator<Item = (Direction, Option<Link>)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, self.links[direction.index()]))
    }

    pub(super) fn set_link(&mut self, direction: Direction, link: Link) {
        self.links[direction.index()] = Some(link);
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(super) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn g_cost(&self) -> u32 {
        self.g_cost
    }

    pub fn h_cost(&self) -> u32 {
        self.h_cost
    }

    /// Total cost used to rank A* candidates.
    pub fn f_cost(&self) -> u32 {
        self.g_cost + self.h_cost
    }
}
