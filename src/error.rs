/// Errors that can occur while building a tour.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No points were given, so there is nothing to visit.
    #[error("point list is empty")]
    EmptyInput,

    /// Two input points share the same identity.
    #[error("point {0} appears more than once")]
    DuplicatePoint(String),

    /// A node index beyond the end of the graph.
    #[error("node {0} is not part of the graph")]
    UnknownNode(usize),

    /// The requested root is not one of the input points.
    #[error("root point {0} is not part of the input")]
    UnknownRoot(String),

    /// A metric produced a weight that cannot be used in a spanning tree.
    #[error("invalid edge weight {weight} between nodes {from} and {to}")]
    InvalidWeight { from: usize, to: usize, weight: f64 },

    /// The spanning tree could not reach every point from the root.
    #[error("graph is disconnected: reached {reached} of {total} points from the root")]
    Disconnected { reached: usize, total: usize },

    /// Solver configuration could not be parsed or is inconsistent.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
