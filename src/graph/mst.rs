use super::{Graph, NodeIndex};
use crate::{math::kbn_sum, point::Point, Error};
use rustc_hash::FxHashMap as HashMap;
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};
use tracing::debug;

/// A node waiting to join the tree, keyed by the cheapest known edge into it.
#[derive(Debug, Clone, Copy)]
struct PriorityQueueNode {
    weight: f64,
    node: NodeIndex,
}

impl PartialEq for PriorityQueueNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityQueueNode {}

impl PartialOrd for PriorityQueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityQueueNode {
    /// Ties on weight go to the lower node index so trees are reproducible.
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Rooted spanning tree, stored as parent → children.
///
/// Children are kept in the order they joined the tree. Nodes without
/// children have no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    root: NodeIndex,
    children: HashMap<NodeIndex, Vec<(NodeIndex, f64)>>,
    len: usize,
}

impl SpanningTree {
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn children(&self, node: NodeIndex) -> &[(NodeIndex, f64)] {
        self.children.get(&node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of nodes spanned, including the root.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, a tree contains at least its root.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// `(parent, child, weight)` for every tree edge.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.children.iter().flat_map(|(parent, children)| {
            children
                .iter()
                .map(move |(child, weight)| (*parent, *child, *weight))
        })
    }

    pub fn weight(&self) -> f64 {
        kbn_sum(self.edges().map(|(_, _, weight)| weight))
    }

    /// Build a tree by hand, without checking that it is one.
    #[cfg(test)]
    pub(crate) fn from_edges(
        root: NodeIndex,
        edges: impl IntoIterator<Item = (NodeIndex, NodeIndex, f64)>,
    ) -> Self {
        let mut children: HashMap<NodeIndex, Vec<(NodeIndex, f64)>> = HashMap::default();
        let mut len = 1;
        for (parent, child, weight) in edges {
            children.entry(parent).or_default().push((child, weight));
            len += 1;
        }
        Self {
            root,
            children,
            len,
        }
    }
}

/// Compute the MST of the component containing `root` with Prim's algorithm in O(E log(V)) time.
///
/// The heap has no decrease-key, so improving a node's best weight pushes a new entry and the
/// outdated one is skipped when it surfaces. A node's tree edge is only committed once the node is
/// settled, always under the parent that offered the cheapest edge.
///
/// Nodes outside the root's component are silently left out; compare [`SpanningTree::len`] with
/// [`Graph::len`] to detect that.
///
/// <https://en.wikipedia.org/wiki/Prim%27s_algorithm>
pub fn compute_mst<P: Point>(graph: &Graph<P>, root: NodeIndex) -> Result<SpanningTree, Error> {
    if root.index() >= graph.len() {
        return Err(Error::UnknownRoot(root.to_string()));
    }

    let mut best = vec![f64::INFINITY; graph.len()];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; graph.len()];
    let mut in_mst = vec![false; graph.len()];
    let mut node_priority_queue = BinaryHeap::new();

    // Kickstart MST with the root
    best[root.index()] = 0.;
    node_priority_queue.push(Reverse(PriorityQueueNode {
        weight: 0.,
        node: root,
    }));

    let mut children: HashMap<NodeIndex, Vec<(NodeIndex, f64)>> = HashMap::default();
    let mut len = 0;
    let mut stale = 0usize;
    while let Some(Reverse(PriorityQueueNode { weight, node })) = node_priority_queue.pop() {
        if in_mst[node.index()] || weight > best[node.index()] {
            stale += 1;
            continue;
        }
        in_mst[node.index()] = true;
        len += 1;
        if let Some(parent) = parent[node.index()] {
            children.entry(parent).or_default().push((node, weight));
        }
        if len == graph.len() {
            // Early stopping condition, MST already has all the nodes
            break;
        }

        for edge in graph.edges(node) {
            let to = edge.to.index();
            if in_mst[to] || edge.weight >= best[to] {
                continue;
            }
            best[to] = edge.weight;
            parent[to] = Some(node);
            node_priority_queue.push(Reverse(PriorityQueueNode {
                weight: edge.weight,
                node: edge.to,
            }));
        }
    }
    debug!(
        "MST spans {} of {} nodes, skipped {} outdated queue entries",
        len,
        graph.len(),
        stale
    );

    Ok(SpanningTree {
        root,
        children,
        len,
    })
}
