use super::node::NodeId;

/// Index of a wall record, which is also its rank in ascending weight order.
pub type EdgeId = usize;

/// A wall record between two structurally adjacent nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The left or upper node of the pair.
    pub from: NodeId,
    /// The right or lower node of the pair.
    pub to: NodeId,
    /// Random weight, distinct across the maze.
    pub weight: u32,
}

impl Edge {
    /// Whether this record sits between `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// The wall records still standing. Starts full and only ever shrinks.
#[derive(Debug, Clone)]
pub struct WallSet {
    standing: Box<[bool]>,
    len: usize,
}

impl WallSet {
    /// A wall set where all `count` records stand.
    pub fn full(count: usize) -> Self {
        WallSet {
            standing: vec![true; count].into_boxed_slice(),
            len: count,
        }
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.standing.get(edge).copied().unwrap_or(false)
    }

    /// Knocks a wall down. Returns `false` if it was already open.
    pub fn remove(&mut self, edge: EdgeId) -> bool {
        match self.standing.get_mut(edge) {
            Some(standing) if *standing => {
                *standing = false;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    /// Number of walls still standing.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of records, standing or not.
    pub fn capacity(&self) -> usize {
        self.standing.len()
    }

    /// Ids of the standing records in ascending weight order.
    pub fn iter(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.standing
            .iter()
            .enumerate()
            .filter_map(|(id, &standing)| standing.then_some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_set_only_shrinks() {
        let mut walls = WallSet::full(3);
        assert_eq!(walls.len(), 3);
        assert!(walls.remove(1));
        // Removing the same wall again is a no-op
        assert!(!walls.remove(1));
        assert!(!walls.remove(7));
        assert_eq!(walls.len(), 2);
        assert_eq!(walls.capacity(), 3);
        assert_eq!(walls.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!walls.contains(1));
    }

    #[test]
    fn test_edge_connects_either_order() {
        let edge = Edge {
            from: 2,
            to: 3,
            weight: 10,
        };
        assert!(edge.connects(2, 3));
        assert!(edge.connects(3, 2));
        assert!(!edge.connects(2, 4));
    }
}
