//! Minimum spanning tree radius of a star set.

use starmatch_core::Star;

/// Disjoint-set forest with path halving.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut a: usize) -> usize {
        while self.parent[a] != a {
            self.parent[a] = self.parent[self.parent[a]];
            a = self.parent[a];
        }
        a
    }

    /// Merge the sets of `a` and `b`; `false` if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        true
    }
}

/// Longest edge of the Euclidean minimum spanning tree over `stars`.
///
/// This is the smallest connection radius under which every star is
/// reachable from every other. Returns `0.0` for fewer than two stars.
///
/// Kruskal over all `n(n-1)/2` pairs, so `O(n² log n)`.
pub fn spanning_distance(stars: &[Star]) -> f64 {
    let n = stars.len();
    if n < 2 {
        return 0.0;
    }

    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((stars[i].distance_to(&stars[j]), i, j));
        }
    }
    edges.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut forest = UnionFind::new(n);
    let mut max_edge = 0.0_f64;
    let mut accepted = 0;
    for (dist, i, j) in edges {
        if !forest.union(i, j) {
            continue;
        }
        max_edge = max_edge.max(dist);
        accepted += 1;
        if accepted == n - 1 {
            break;
        }
    }
    max_edge
}
