//! Approximate [metric TSP](https://en.wikipedia.org/wiki/Travelling_salesman_problem#Metric) tours
//! by shortcutting a preorder walk of a minimum spanning tree.
//!
//! For distances that are symmetric and obey the triangle inequality the tour is at most
//! twice as long as the optimal one.

use tracing::{debug, info};

mod config;
mod error;
/// Graph, spanning tree and tour construction
pub mod graph;
pub mod math;
pub mod point;

pub use config::SolverConfig;
pub use error::Error;
pub use graph::Tour;
pub use point::{Chebyshev, City, Euclidean, Manhattan, Metric, MetricKind, Point};

use graph::{compute_mst, hamiltonian_cycle, preorder, Graph, NodeIndex};

/// Knobs for [`solve_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions<Id> {
    /// Identity of the point the tour starts and ends at, else the first point
    pub root: Option<Id>,
    /// Compute pairwise distances on the rayon thread pool
    pub parallel: bool,
}

impl<Id> Default for SolveOptions<Id> {
    fn default() -> Self {
        Self {
            root: None,
            parallel: false,
        }
    }
}

/// Closed tour through every point, starting and ending at the first one.
pub fn solve<'a, P, M>(points: &'a [P], metric: &M) -> Result<Tour<'a, P>, Error>
where
    P: Point + Sync,
    M: Metric<P> + Sync,
{
    solve_with(points, metric, SolveOptions::default())
}

/// Closed tour through every point.
///
/// Fails before doing any work if the list is empty, an identity repeats, or the root isn't
/// one of the points.
pub fn solve_with<'a, P, M>(
    points: &'a [P],
    metric: &M,
    options: SolveOptions<P::Id>,
) -> Result<Tour<'a, P>, Error>
where
    P: Point + Sync,
    M: Metric<P> + Sync,
{
    let mut graph = Graph::new(points)?;
    let root = match options.root {
        Some(id) => graph
            .index_of(id)
            .ok_or_else(|| Error::UnknownRoot(format!("{id:?}")))?,
        None => NodeIndex::new(0),
    };

    if options.parallel {
        graph.complete_parallel(metric)?;
    } else {
        graph.complete(metric)?;
    }
    tour_from_graph(&graph, root, metric)
}

/// Closed tour over a graph whose edges the caller already materialized.
///
/// Fails with [`Error::Disconnected`] unless every point can be reached from `root`.
pub fn tour_from_graph<'a, P, M>(
    graph: &Graph<'a, P>,
    root: NodeIndex,
    metric: &M,
) -> Result<Tour<'a, P>, Error>
where
    P: Point,
    M: Metric<P>,
{
    debug!("Computing minimum spanning tree");
    let tree = compute_mst(graph, root)?;
    if tree.len() != graph.len() {
        return Err(Error::Disconnected {
            reached: tree.len(),
            total: graph.len(),
        });
    }

    debug!("Walking tree in preorder");
    let walk = preorder(&tree);

    debug!("Shortcutting walk into a cycle");
    let cycle = hamiltonian_cycle(&walk)?;

    let tour = Tour::new(graph, cycle, tree.weight(), metric)?;
    info!(
        "Tour through {} points has length {:.3} (spanning tree weight {:.3})",
        graph.len(),
        tour.length(),
        tour.tree_weight()
    );
    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rustc_hash::FxHashSet as HashSet;

    fn unit_square() -> [City; 4] {
        [
            City::new(0, 0., 0.),
            City::new(1, 0., 1.),
            City::new(2, 1., 1.),
            City::new(3, 1., 0.),
        ]
    }

    fn random_cities(rng: &mut StdRng, n: u32) -> Vec<City> {
        (0..n)
            .map(|id| City::new(id, rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
            .collect()
    }

    /// Shortest closed tour by trying every permutation, only for tiny inputs.
    fn optimal_length(cities: &[City]) -> f64 {
        fn permute(rest: &mut Vec<City>, path: &mut Vec<City>, best: &mut f64) {
            if rest.is_empty() {
                let mut closed = path.clone();
                closed.push(path[0]);
                *best = best.min(graph::path_length(&closed, &Euclidean));
                return;
            }
            for i in 0..rest.len() {
                let city = rest.remove(i);
                path.push(city);
                permute(rest, path, best);
                path.pop();
                rest.insert(i, city);
            }
        }
        let mut best = f64::INFINITY;
        permute(&mut cities[1..].to_vec(), &mut vec![cities[0]], &mut best);
        best
    }

    #[test]
    fn unit_square_tour_is_optimal() {
        let cities = unit_square();
        let tour = solve(&cities, &Euclidean).unwrap();
        assert_eq!(tour.ids(), [0, 1, 2, 3, 0]);
        assert_eq!(tour.tree_weight(), 3.);
        assert_eq!(tour.length(), 4.);
    }

    #[test]
    fn single_point_tour_returns_to_itself() {
        let cities = [City::new(9, 4., 2.)];
        let tour = solve(&cities, &Euclidean).unwrap();
        assert_eq!(tour.ids(), [9, 9]);
        assert_eq!(tour.length(), 0.);
    }

    #[test]
    fn two_point_tour_goes_there_and_back() {
        let cities = [City::new(0, 0., 0.), City::new(1, 3., 4.)];
        let tour = solve(&cities, &Euclidean).unwrap();
        assert_eq!(tour.ids(), [0, 1, 0]);
        assert_eq!(tour.length(), 10.);
    }

    #[test]
    fn tour_starts_at_requested_root() {
        let cities = unit_square();
        let tour = solve_with(
            &cities,
            &Euclidean,
            SolveOptions {
                root: Some(2),
                parallel: false,
            },
        )
        .unwrap();
        assert_eq!(tour.ids(), [2, 1, 0, 3, 2]);
        assert_eq!(tour.length(), 4.);
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            solve::<City, _>(&[], &Euclidean).unwrap_err(),
            Error::EmptyInput
        );
        let duplicated = [City::new(5, 0., 0.), City::new(6, 1., 1.), City::new(5, 2., 2.)];
        assert_eq!(
            solve(&duplicated, &Euclidean).unwrap_err(),
            Error::DuplicatePoint("5".to_string())
        );
        let cities = unit_square();
        assert_eq!(
            solve_with(
                &cities,
                &Euclidean,
                SolveOptions {
                    root: Some(17),
                    parallel: false,
                },
            )
            .unwrap_err(),
            Error::UnknownRoot("17".to_string())
        );
    }

    #[test]
    fn tour_length_and_tree_weight_share_the_graph_weights() {
        let cities = unit_square();
        let mut graph = Graph::new(&cities).unwrap();
        graph.complete(&Euclidean).unwrap();

        let unrelated = |_: &City, _: &City| 100.;
        let tour = tour_from_graph(&graph, NodeIndex::new(0), &unrelated).unwrap();
        assert_eq!(tour.tree_weight(), 3.);
        assert_eq!(tour.length(), 4.);
        assert!(tour.length() <= 2. * tour.tree_weight());
    }

    #[test]
    fn disconnected_graph_is_reported() {
        let cities = unit_square();
        let mut graph = Graph::new(&cities).unwrap();
        graph
            .add_edge(NodeIndex::new(0), NodeIndex::new(1), &Euclidean)
            .unwrap();
        graph
            .add_edge(NodeIndex::new(2), NodeIndex::new(3), &Euclidean)
            .unwrap();
        assert_eq!(
            tour_from_graph(&graph, NodeIndex::new(0), &Euclidean).unwrap_err(),
            Error::Disconnected {
                reached: 2,
                total: 4
            }
        );
    }

    #[test]
    fn tours_visit_every_point_once_within_twice_the_tree() {
        let mut rng = StdRng::seed_from_u64(2024);
        for n in [1, 2, 3, 5, 17, 64, 150] {
            let cities = random_cities(&mut rng, n);
            for metric in [MetricKind::Euclidean, MetricKind::Manhattan, MetricKind::Chebyshev] {
                let tour = solve(&cities, &metric).unwrap();
                let ids = tour.ids();
                assert_eq!(ids.len(), n as usize + 1);
                assert_eq!(ids.first(), ids.last());
                let distinct = ids[..n as usize].iter().collect::<HashSet<_>>();
                assert_eq!(distinct.len(), n as usize);
                assert!(tour.length() <= 2. * tour.tree_weight() + 1e-6);
            }
        }
    }

    #[test]
    fn tours_are_within_twice_the_optimum() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..5 {
            let cities = random_cities(&mut rng, 7);
            let tour = solve(&cities, &Euclidean).unwrap();
            let optimal = optimal_length(&cities);
            assert!(tour.length() >= optimal - 1e-6);
            assert!(tour.length() <= 2. * optimal + 1e-6);
        }
    }

    #[test]
    fn solving_is_deterministic_and_parallel_agrees() {
        let mut rng = StdRng::seed_from_u64(5);
        let cities = random_cities(&mut rng, 80);
        let first = solve(&cities, &Euclidean).unwrap();
        let second = solve(&cities, &Euclidean).unwrap();
        let parallel = solve_with(
            &cities,
            &Euclidean,
            SolveOptions {
                root: None,
                parallel: true,
            },
        )
        .unwrap();
        assert_eq!(first.ids(), second.ids());
        assert_eq!(first.ids(), parallel.ids());
        assert_eq!(first.length(), parallel.length());
    }

    #[test]
    fn points_at_the_same_position_are_distinct_stops() {
        let cities = [City::new(1, 0., 0.), City::new(2, 0., 0.), City::new(3, 1., 0.)];
        let tour = solve(&cities, &Euclidean).unwrap();
        assert_eq!(tour.len(), 4);
        assert_eq!(tour.length(), 2.);
    }
}
