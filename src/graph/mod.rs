/// Complete weighted graph over the input points
pub mod complete;
/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Depth-first [preorder](https://en.wikipedia.org/wiki/Tree_traversal#Pre-order,_NLR) walk of a spanning tree
pub mod preorder;
/// Approximate the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;

pub use complete::{Edge, Graph, NodeIndex};
pub use mst::{compute_mst, SpanningTree};
pub use preorder::preorder;
pub use tsp::{hamiltonian_cycle, path_length, Tour};
