use super::node::NodeId;

/// Partition of the nodes into groups joined by opened passages.
///
/// Each node starts in its own group, labelled with its linear index. Groups are
/// kept as a disjoint-set forest: the label of a node is the root of its tree.
#[derive(Debug, Clone)]
pub struct ConnectivitySets {
    parent: Vec<NodeId>,
    size: Vec<usize>,
    partitions: usize,
}

impl ConnectivitySets {
    pub fn new(len: usize) -> Self {
        ConnectivitySets {
            parent: (0..len).collect(),
            size: vec![1; len],
            partitions: len,
        }
    }

    /// The current label of `node`, shared by every node of its group.
    pub fn label(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while self.parent[current] != current {
            current = self.parent[current];
        }
        current
    }

    fn find(&mut self, node: NodeId) -> NodeId {
        if self.parent[node] != node {
            self.parent[node] = self.find(self.parent[node]);
        }
        self.parent[node]
    }

    /// Whether `a` and `b` are already connected.
    pub fn same(&self, a: NodeId, b: NodeId) -> bool {
        self.label(a) == self.label(b)
    }

    /// Joins the groups of `a` and `b`. Returns `false` if they were already one
    /// group, in which case nothing changes.
    pub fn merge(&mut self, a: NodeId, b: NodeId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return false;
        }

        // The bigger group absorbs the smaller one; on a tie `b` joins `a`.
        let (keep, absorb) = if self.size[root_b] > self.size[root_a] {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        self.parent[absorb] = keep;
        self.size[keep] += self.size[absorb];
        self.partitions -= 1;
        true
    }

    /// Number of nodes in the group of `node`.
    pub fn partition_size(&self, node: NodeId) -> usize {
        self.size[self.label(node)]
    }

    /// Number of distinct groups left.
    pub fn partitions(&self) -> usize {
        self.partitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_labels_are_linear_indices() {
        let sets = ConnectivitySets::new(4);
        assert!((0..4).all(|n| sets.label(n) == n));
        assert_eq!(sets.partitions(), 4);
        assert!(!sets.same(0, 1));
    }

    #[test]
    fn test_merge_joins_groups() {
        let mut sets = ConnectivitySets::new(5);
        assert!(sets.merge(0, 1));
        assert!(sets.merge(3, 4));
        assert!(sets.same(0, 1));
        assert!(!sets.same(1, 3));
        assert!(sets.merge(1, 4));
        assert!(sets.same(0, 3));
        assert_eq!(sets.partition_size(4), 4);
        assert_eq!(sets.partition_size(2), 1);
        assert_eq!(sets.partitions(), 2);
    }

    #[test]
    fn test_equal_sizes_keep_first_label() {
        let mut sets = ConnectivitySets::new(2);
        sets.merge(0, 1);
        assert_eq!(sets.label(1), 0);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut sets = ConnectivitySets::new(6);
        sets.merge(0, 1);
        sets.merge(1, 2);
        sets.merge(4, 5);
        assert!(sets.same(0, 2));

        let labels = (0..6).map(|n| sets.label(n)).collect::<Vec<_>>();
        let sizes = (0..6).map(|n| sets.partition_size(n)).collect::<Vec<_>>();

        assert!(!sets.merge(0, 2));
        assert!(!sets.merge(2, 0));

        assert_eq!((0..6).map(|n| sets.label(n)).collect::<Vec<_>>(), labels);
        assert_eq!(
            (0..6).map(|n| sets.partition_size(n)).collect::<Vec<_>>(),
            sizes
        );
        assert_eq!(sets.partitions(), 3);
    }
}
