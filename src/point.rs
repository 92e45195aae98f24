use serde::{Deserialize, Serialize};
use std::{fmt::Debug, hash::Hash};

/// Identity contract for anything that can be visited by a tour.
///
/// Identity is independent of position: two points at the same coordinates
/// with different ids are different stops.
pub trait Point {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// A symmetric distance function satisfying the triangle inequality.
///
/// The 2x bound on the tour length only holds when the metric really is one;
/// this is not verified.
pub trait Metric<P: ?Sized> {
    fn distance(&self, a: &P, b: &P) -> f64;
}

impl<P, F> Metric<P> for F
where
    P: ?Sized,
    F: Fn(&P, &P) -> f64,
{
    fn distance(&self, a: &P, b: &P) -> f64 {
        self(a, b)
    }
}

/// A city on the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

impl Point for City {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Straight line distance
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Metric<City> for Euclidean {
    fn distance(&self, a: &City, b: &City) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }
}

/// Taxicab distance
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Metric<City> for Manhattan {
    fn distance(&self, a: &City, b: &City) -> f64 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }
}

/// Largest per-axis difference
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl Metric<City> for Chebyshev {
    fn distance(&self, a: &City, b: &City) -> f64 {
        (a.x - b.x).abs().max((a.y - b.y).abs())
    }
}

/// Runtime selection of one of the built-in metrics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl Metric<City> for MetricKind {
    fn distance(&self, a: &City, b: &City) -> f64 {
        match self {
            MetricKind::Euclidean => Euclidean.distance(a, b),
            MetricKind::Manhattan => Manhattan.distance(a, b),
            MetricKind::Chebyshev => Chebyshev.distance(a, b),
        }
    }
}
