use super::{Graph, NodeIndex};
use crate::{
    math::kbn_sum,
    point::{Metric, Point},
    Error,
};
use rustc_hash::FxHashSet as HashSet;
use std::hash::Hash;
use tracing::warn;

/// Shortcut a walk into a closed cycle: keep the first visit of every stop, then return to the start.
///
/// A preorder walk of a tree never revisits a node, so normally nothing is dropped.
pub fn hamiltonian_cycle<T>(path: &[T]) -> Result<Vec<T>, Error>
where
    T: Copy + Eq + Hash,
{
    let first = *path.first().ok_or(Error::EmptyInput)?;

    let mut visited = HashSet::default();
    visited.reserve(path.len());
    let mut cycle = Vec::with_capacity(path.len() + 1);
    cycle.extend(path.iter().copied().filter(|stop| visited.insert(*stop)));
    if cycle.len() != path.len() {
        warn!(
            "Walk revisited {} stops, dropped them from the cycle",
            path.len() - cycle.len()
        );
    }
    cycle.push(first);
    Ok(cycle)
}

/// Length of the path through `stops` in order.
pub fn path_length<'p, P, M>(stops: impl IntoIterator<Item = &'p P>, metric: &M) -> f64
where
    P: 'p,
    M: Metric<P>,
{
    let mut stops = stops.into_iter();
    let Some(mut previous) = stops.next() else {
        return 0.;
    };
    kbn_sum(stops.map(|stop| {
        let distance = metric.distance(previous, stop);
        previous = stop;
        distance
    }))
}

/// A closed tour: starts and ends at the same point and visits every other point once in between.
#[derive(Debug, Clone)]
pub struct Tour<'a, P> {
    points: &'a [P],
    order: Vec<NodeIndex>,
    length: f64,
    tree_weight: f64,
}

impl<'a, P> Tour<'a, P> {
    /// Legs are measured with the weights stored in `graph`, the same ones the tree was built from.
    /// `metric` only covers legs the graph has no edge for, like the return leg of a single point tour.
    pub(crate) fn new<M: Metric<P>>(
        graph: &Graph<'a, P>,
        order: Vec<NodeIndex>,
        tree_weight: f64,
        metric: &M,
    ) -> Result<Self, Error>
    where
        P: Point,
    {
        let legs = order
            .windows(2)
            .map(|leg| match graph.weight(leg[0], leg[1]) {
                Some(weight) => Ok(weight),
                None => match (graph.point(leg[0]), graph.point(leg[1])) {
                    (Some(a), Some(b)) => Ok(metric.distance(a, b)),
                    _ => Err(Error::UnknownNode(leg[0].index().max(leg[1].index()))),
                },
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            points: graph.points(),
            order,
            length: kbn_sum(legs),
            tree_weight,
        })
    }

    /// Visited points in order, the starting point included twice.
    pub fn points(&self) -> impl Iterator<Item = &'a P> + '_ {
        let points = self.points;
        self.order.iter().map(move |node| &points[node.index()])
    }

    pub fn ids(&self) -> Vec<P::Id>
    where
        P: Point,
    {
        self.points().map(Point::id).collect()
    }

    /// Indices into the input slice.
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total length including the closing leg back to the start.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Weight of the spanning tree the tour was derived from.
    ///
    /// For a metric, `length() <= 2 * tree_weight()`.
    pub fn tree_weight(&self) -> f64 {
        self.tree_weight
    }
}
