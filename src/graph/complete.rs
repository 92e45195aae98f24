use crate::{
    point::{Metric, Point},
    Error,
};
use rayon::prelude::*;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::fmt;
use tracing::debug;

/// Dense index assigned to a point when it enters a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weighted connection to a neighbouring node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeIndex,
    pub weight: f64,
}

/// Undirected weighted graph keyed by point identity.
///
/// Every edge is registered on both of its endpoints, so the neighbours of a
/// node can always be read from that node alone.
#[derive(Debug, Clone)]
pub struct Graph<'a, P: Point> {
    points: &'a [P],
    index: HashMap<P::Id, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
}

impl<'a, P: Point> Graph<'a, P> {
    /// Ingest points without any edges.
    ///
    /// Fails if the list is empty or two points share an identity.
    pub fn new(points: &'a [P]) -> Result<Self, Error> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut index = HashMap::default();
        index.reserve(points.len());
        for (i, point) in points.iter().enumerate() {
            if index.insert(point.id(), NodeIndex(i)).is_some() {
                return Err(Error::DuplicatePoint(format!("{:?}", point.id())));
            }
        }

        Ok(Self {
            points,
            index,
            adjacency: vec![vec![]; points.len()],
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &'a [P] {
        self.points
    }

    pub fn point(&self, node: NodeIndex) -> Option<&'a P> {
        self.points.get(node.0)
    }

    pub fn index_of(&self, id: P::Id) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.len()).map(NodeIndex)
    }

    /// Edges materialized so far from `node`, in insertion order.
    ///
    /// Empty for nodes that aren't part of the graph.
    pub fn edges(&self, node: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(node.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.edges(from)
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight)
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.weight(from, to).is_some()
    }

    /// Connect two nodes with the weight given by `metric`.
    ///
    /// Returns `false` without touching the graph for self loops and for pairs that are already connected.
    pub fn add_edge<M: Metric<P>>(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        metric: &M,
    ) -> Result<bool, Error> {
        let (Some(a), Some(b)) = (self.point(from), self.point(to)) else {
            return Err(Error::UnknownNode(from.0.max(to.0)));
        };
        if from == to || self.has_edge(from, to) {
            return Ok(false);
        }
        let weight = checked_weight(from, to, metric.distance(a, b))?;
        self.insert_edge(from, to, weight);
        Ok(true)
    }

    /// Materialize an edge between every pair of distinct nodes that isn't connected yet.
    ///
    /// Returns the number of edges added. All weights are checked before any edge is
    /// inserted, so on error the graph is left as it was.
    pub fn complete<M: Metric<P>>(&mut self, metric: &M) -> Result<usize, Error> {
        debug!("Completing graph over {} points", self.len());
        let mut missing = vec![];
        let mut neighbours = HashSet::default();
        for i in 0..self.len() {
            neighbours.clear();
            neighbours.extend(self.adjacency[i].iter().map(|edge| edge.to));
            for j in i + 1..self.len() {
                let (from, to) = (NodeIndex(i), NodeIndex(j));
                if neighbours.contains(&to) {
                    continue;
                }
                let weight = checked_weight(
                    from,
                    to,
                    metric.distance(&self.points[i], &self.points[j]),
                )?;
                missing.push((from, to, weight));
            }
        }

        let added = missing.len();
        for (from, to, weight) in missing {
            self.insert_edge(from, to, weight);
        }
        debug!("Materialized {} edges", added);
        Ok(added)
    }

    /// Same as [`Graph::complete`], with distances computed on the rayon thread pool.
    ///
    /// Each worker owns one row of pairs. Rows are merged in order afterwards, so the
    /// adjacency lists come out identical to the serial version.
    pub fn complete_parallel<M>(&mut self, metric: &M) -> Result<usize, Error>
    where
        P: Sync,
        M: Metric<P> + Sync,
    {
        debug!("Completing graph over {} points in parallel", self.len());
        let points = self.points;
        let adjacency = &self.adjacency;
        let rows = (0..points.len())
            .into_par_iter()
            .map(|i| {
                let neighbours = adjacency[i]
                    .iter()
                    .map(|edge| edge.to)
                    .collect::<HashSet<_>>();
                (i + 1..points.len())
                    .filter(|j| !neighbours.contains(&NodeIndex(*j)))
                    .map(|j| (NodeIndex(j), metric.distance(&points[i], &points[j])))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        for (i, row) in rows.iter().enumerate() {
            for &(to, weight) in row {
                checked_weight(NodeIndex(i), to, weight)?;
            }
        }

        let mut added = 0;
        for (i, row) in rows.into_iter().enumerate() {
            for (to, weight) in row {
                self.insert_edge(NodeIndex(i), to, weight);
                added += 1;
            }
        }
        debug!("Materialized {} edges", added);
        Ok(added)
    }

    fn insert_edge(&mut self, from: NodeIndex, to: NodeIndex, weight: f64) {
        self.adjacency[from.0].push(Edge { to, weight });
        self.adjacency[to.0].push(Edge { to: from, weight });
    }
}

fn checked_weight(from: NodeIndex, to: NodeIndex, weight: f64) -> Result<f64, Error> {
    if weight.is_finite() && weight >= 0. {
        Ok(weight)
    } else {
        Err(Error::InvalidWeight {
            from: from.0,
            to: to.0,
            weight,
        })
    }
}
