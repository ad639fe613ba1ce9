pub mod connectivity;
pub mod node;
pub mod wall;

use rand::{Rng, seq::SliceRandom};

pub use connectivity::ConnectivitySets;
pub use node::{Link, Node, NodeId};
pub use wall::{Edge, EdgeId, WallSet};

use crate::error::MazeError;

/// Node coordinate `(x, y)`, origin at the top left corner.
pub type Coord = (u16, u16);

/// The four neighbor slots of a node. The order of `ALL` is the order in which
/// neighbors are examined everywhere, and decides search exploration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Octile-style distance between two coordinates, ignoring walls.
/// A diagonal step costs 14 and a straight step costs 10.
pub fn heuristic_distance(a: Coord, b: Coord) -> u32 {
    let dx = u32::from(a.0.abs_diff(b.0));
    let dy = u32::from(a.1.abs_diff(b.1));
    if dx > dy {
        14 * dy + 10 * (dx - dy)
    } else {
        14 * dx + 10 * (dy - dx)
    }
}

/// The maze grid: nodes, the wall records between them and the connectivity
/// groups carved so far.
pub struct Maze {
    width: u16,
    height: u16,
    nodes: Box<[Node]>,
    /// Every wall record, sorted by ascending weight. An `EdgeId` indexes here.
    edges: Box<[Edge]>,
    walls: WallSet,
    sets: ConnectivitySets,
    target: NodeId,
}

impl Maze {
    /// Builds a fully walled maze of `width` x `height` nodes.
    ///
    /// Every pair of adjacent nodes gets one wall record with a distinct random
    /// weight, and the records are sorted by weight once here.
    pub fn build<R: Rng + ?Sized>(width: u16, height: u16, rng: &mut R) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        // Weights are a permutation of 0..records, so every record needs a distinct u32
        let records = u32::try_from(Self::record_count(width, height))
            .map_err(|_| MazeError::InvalidDimensions { width, height })?;

        let origin = (0, 0);
        let target_coord = (width - 1, height - 1);
        let nodes = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|coord| {
                Node::new(
                    coord,
                    heuristic_distance(coord, origin),
                    heuristic_distance(coord, target_coord),
                )
            })
            .collect::<Vec<_>>();

        // Collect all adjacent pairs: each node with its right and bottom neighbor
        let ravel = |x: u16, y: u16| y as usize * width as usize + x as usize;
        let pairs = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .flat_map(|(x, y)| {
                [
                    (x + 1 < width).then(|| (ravel(x, y), ravel(x + 1, y))),
                    (y + 1 < height).then(|| (ravel(x, y), ravel(x, y + 1))),
                ]
            })
            .flatten()
            .collect::<Vec<_>>();

        // A shuffled permutation gives every record a distinct random weight
        let mut weights = (0..records).collect::<Vec<_>>();
        weights.shuffle(rng);

        let mut edges = pairs
            .into_iter()
            .zip(weights)
            .map(|((from, to), weight)| Edge { from, to, weight })
            .collect::<Vec<_>>();
        edges.sort_unstable_by_key(|edge| edge.weight);

        let mut maze = Maze {
            width,
            height,
            nodes: nodes.into_boxed_slice(),
            walls: WallSet::full(edges.len()),
            sets: ConnectivitySets::new(width as usize * height as usize),
            edges: edges.into_boxed_slice(),
            target: ravel(target_coord.0, target_coord.1),
        };
        maze.link_nodes();
        Ok(maze)
    }

    /// Number of adjacent node pairs, one wall record each.
    pub fn record_count(width: u16, height: u16) -> u64 {
        let (w, h) = (u64::from(width), u64::from(height));
        w.saturating_sub(1) * h + w * h.saturating_sub(1)
    }

    /// Wires up the mutual neighbor slots of every adjacent pair.
    fn link_nodes(&mut self) {
        for (edge_id, edge) in self.edges.iter().enumerate() {
            let horizontal = self.nodes[edge.from].y() == self.nodes[edge.to].y();
            let (forward, backward) = if horizontal {
                (Direction::Right, Direction::Left)
            } else {
                (Direction::Down, Direction::Up)
            };
            self.nodes[edge.from].set_link(
                forward,
                Link {
                    node: edge.to,
                    edge: edge_id,
                },
            );
            self.nodes[edge.to].set_link(
                backward,
                Link {
                    node: edge.from,
                    edge: edge_id,
                },
            );
        }
    }

    /// Returns the width of the maze in nodes.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the maze in nodes.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The top left node, where every search starts.
    pub fn origin(&self) -> NodeId {
        0
    }

    /// The bottom right node.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    pub fn id(&self, coord: Coord) -> Option<NodeId> {
        self.is_in_bounds(coord)
            .then(|| coord.1 as usize * self.width as usize + coord.0 as usize)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn coord(&self, id: NodeId) -> Coord {
        self.nodes[id].coord()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All wall records in ascending weight order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    /// The walls still standing.
    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    pub fn sets(&self) -> &ConnectivitySets {
        &self.sets
    }

    /// The structural neighbor of `id` in `direction`, regardless of walls.
    pub fn neighbor(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.nodes[id].link(direction).map(|link| link.node)
    }

    /// Neighbors reachable from `id` through an opened passage, in left, right, up,
    /// down order. Visited neighbors are skipped unless `ignore_visited` is set.
    pub fn passable_neighbors(
        &self,
        id: NodeId,
        ignore_visited: bool,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id]
            .links()
            .filter_map(|(_, link)| link)
            .filter(|link| !self.walls.contains(link.edge))
            .map(|link| link.node)
            .filter(move |&n| ignore_visited || !self.nodes[n].is_visited())
    }

    /// Whether a wall is drawn on the `direction` side of `id`. The grid boundary
    /// always counts as a wall.
    pub fn does_wall_exist(&self, id: NodeId, direction: Direction) -> bool {
        match self.nodes[id].link(direction) {
            Some(link) => self.walls.contains(link.edge),
            None => true,
        }
    }

    /// The standing wall record between `a` and `b`, if there is one.
    pub fn wall_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.nodes[a]
            .links()
            .filter_map(|(_, link)| link)
            .find(|link| link.node == b)
            .map(|link| link.edge)
            .filter(|&edge| self.walls.contains(edge))
    }

    /// Whether `a` and `b` are adjacent with no wall in between.
    pub fn is_open(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a]
            .links()
            .filter_map(|(_, link)| link)
            .any(|link| link.node == b && !self.walls.contains(link.edge))
    }

    /// Knocks down the wall `edge` and joins the groups on both sides of it.
    pub(crate) fn open_wall(&mut self, edge: EdgeId) -> bool {
        let Edge { from, to, .. } = self.edges[edge];
        if !self.walls.remove(edge) {
            return false;
        }
        self.sets.merge(from, to);
        true
    }

    pub fn same_set(&self, a: NodeId, b: NodeId) -> bool {
        self.sets.same(a, b)
    }

    pub(crate) fn set_visited(&mut self, id: NodeId, visited: bool) {
        self.nodes[id].set_visited(visited);
    }

    /// Marks every node unvisited. Walls and groups are kept.
    pub fn clear_visited(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.set_visited(false));
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Node;

    fn index(&self, index: Coord) -> &Self::Output {
        let id = index.1 as usize * self.width as usize + index.0 as usize;
        &self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn maze(width: u16, height: u16) -> Maze {
        Maze::build(width, height, &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Maze::build(0, 4, &mut rng).err(),
            Some(MazeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Maze::build(3, 0, &mut rng).is_err());
    }

    #[test]
    fn test_rejects_more_records_than_weights() {
        assert_eq!(Maze::record_count(5, 4), 4 * 4 + 5 * 3);
        assert_eq!(Maze::record_count(1, 1), 0);
        assert!(Maze::record_count(u16::MAX, u16::MAX) > u64::from(u32::MAX));

        // Refused before anything is allocated
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Maze::build(u16::MAX, u16::MAX, &mut rng).err(),
            Some(MazeError::InvalidDimensions {
                width: u16::MAX,
                height: u16::MAX
            })
        );
    }

    #[test]
    fn test_maze_indexing() {
        let maze = maze(5, 4);
        assert_eq!(maze[(2, 3)].coord(), (2, 3));
        assert_eq!((maze[(2, 3)].x(), maze[(2, 3)].y()), (2, 3));
        assert_eq!(maze.id((2, 3)), Some(17));
        assert_eq!(maze.id((5, 0)), None);
        assert_eq!(maze.target(), 19);
        assert_eq!(maze.coord(maze.target()), (4, 3));
    }

    #[test]
    fn test_one_record_per_adjacent_pair() {
        let maze = maze(5, 4);
        // 4 horizontal pairs per row, 3 vertical pairs per column
        assert_eq!(maze.edges().len(), 4 * 4 + 5 * 3);
        assert_eq!(maze.walls().len(), maze.edges().len());
        let mut weights = maze.edges().iter().map(|e| e.weight).collect::<Vec<_>>();
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
        weights.dedup();
        assert_eq!(weights.len(), maze.edges().len());

        for (i, a) in maze.edges().iter().enumerate() {
            for b in &maze.edges()[i + 1..] {
                assert!(!a.connects(b.from, b.to));
            }
        }
    }

    #[test]
    fn test_links_are_symmetric() {
        let maze = maze(6, 3);
        for id in 0..maze.len() {
            for (direction, link) in maze.node(id).links() {
                match link {
                    Some(link) => {
                        let back = maze.node(link.node).link(direction.opposite()).unwrap();
                        assert_eq!(back.node, id);
                        assert_eq!(back.edge, link.edge);
                        assert!(maze.edge(link.edge).connects(id, link.node));
                    }
                    None => assert!(maze.does_wall_exist(id, direction)),
                }
            }
        }
        // Corners only have two neighbors
        assert!(maze[(0, 0)].link(Direction::Left).is_none());
        assert!(maze[(0, 0)].link(Direction::Up).is_none());
        assert!(maze[(5, 2)].link(Direction::Right).is_none());
        assert!(maze[(5, 2)].link(Direction::Down).is_none());
    }

    #[test]
    fn test_heuristic_distance() {
        assert_eq!(heuristic_distance((0, 0), (4, 4)), 56);
        assert_eq!(heuristic_distance((1, 1), (4, 4)), 42);
        assert_eq!(heuristic_distance((0, 0), (3, 1)), 34);
        assert_eq!(heuristic_distance((2, 5), (2, 1)), 40);
        assert_eq!(heuristic_distance((3, 3), (3, 3)), 0);
    }

    #[test]
    fn test_costs_fixed_at_build() {
        let maze = maze(5, 5);
        let node = &maze[(1, 1)];
        assert_eq!(node.h_cost(), 42);
        assert_eq!(node.g_cost(), 14);
        assert_eq!(node.f_cost(), 56);
        assert_eq!(maze[(0, 0)].g_cost(), 0);
        assert_eq!(maze[(4, 4)].h_cost(), 0);
    }

    #[test]
    fn test_passable_neighbors_respect_walls_and_visits() {
        let mut maze = maze(3, 3);
        let center = maze.id((1, 1)).unwrap();
        assert_eq!(maze.passable_neighbors(center, false).count(), 0);

        // Open every wall around the center
        let links = maze
            .node(center)
            .links()
            .filter_map(|(_, link)| link)
            .collect::<Vec<_>>();
        for link in &links {
            assert!(maze.open_wall(link.edge));
        }
        // Fixed order: left, right, up, down
        let expected = [(0, 1), (2, 1), (1, 0), (1, 2)]
            .map(|c| maze.id(c).unwrap())
            .to_vec();
        assert_eq!(maze.passable_neighbors(center, false).collect::<Vec<_>>(), expected);

        let right = maze.id((2, 1)).unwrap();
        maze.set_visited(right, true);
        assert!(!maze.passable_neighbors(center, false).any(|n| n == right));
        assert_eq!(maze.passable_neighbors(center, true).collect::<Vec<_>>(), expected);

        maze.clear_visited();
        assert_eq!(maze.passable_neighbors(center, false).count(), 4);
    }

    #[test]
    fn test_wall_queries() {
        let mut maze = maze(2, 1);
        let (a, b) = (0, 1);
        let edge = maze.wall_between(a, b).unwrap();
        assert!(maze.does_wall_exist(a, Direction::Right));
        assert!(!maze.is_open(a, b));

        assert!(maze.open_wall(edge));
        assert!(!maze.open_wall(edge));
        assert!(!maze.does_wall_exist(a, Direction::Right));
        assert!(!maze.does_wall_exist(b, Direction::Left));
        assert!(maze.does_wall_exist(a, Direction::Left));
        assert!(maze.is_open(b, a));
        assert_eq!(maze.wall_between(a, b), None);
        assert!(maze.same_set(a, b));
    }
}
