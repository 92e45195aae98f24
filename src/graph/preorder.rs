use super::{NodeIndex, SpanningTree};
use rustc_hash::FxHashSet as HashSet;

/// Walk `tree` depth-first from its root, recording each node before its children.
///
/// Children are visited in the order they were added to the tree. An explicit stack of
/// `(node, next child position)` replaces recursion so deep trees can't overflow the call stack.
pub fn preorder(tree: &SpanningTree) -> Vec<NodeIndex> {
    let root = tree.root();
    let mut order = Vec::with_capacity(tree.len());
    let mut visited = HashSet::default();
    visited.reserve(tree.len());

    visited.insert(root);
    order.push(root);
    let mut dfs = vec![(root, 0)];
    while let Some(&(head, position)) = dfs.last() {
        match tree.children(head).get(position) {
            Some(&(child, _)) => {
                let top = dfs.len() - 1;
                dfs[top].1 += 1;
                if visited.insert(child) {
                    order.push(child);
                    dfs.push((child, 0));
                }
            }
            None => {
                dfs.pop();
            }
        }
    }
    order
}
