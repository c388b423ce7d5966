//! Union-find over original node indices.
//!
//! Each contraction merges the absorbed super-node's set into the
//! survivor's. The set also remembers which original index currently names
//! the super-node, so the membership of any working-graph node can be
//! recovered once contraction stops.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    survivor: Vec<usize>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            survivor: (0..n).collect(),
        }
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the set holding `absorbed` into the set holding `survivor`.
    /// The merged set keeps `survivor`'s representative.
    pub(super) fn absorb(&mut self, survivor: usize, absorbed: usize) {
        let mut left = self.find(survivor);
        let kept = self.survivor[left];
        let mut right = self.find(absorbed);
        if left == right {
            return;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.survivor[left] = kept;
    }

    /// Returns the original index naming the super-node that holds `node`.
    pub(super) fn representative(&mut self, node: usize) -> usize {
        let root = self.find(node);
        self.survivor[root]
    }
}
