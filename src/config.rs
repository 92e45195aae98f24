use serde::{Deserialize, Serialize};

use crate::{
    graph::Tour,
    point::{City, MetricKind},
    solve_with, Error, SolveOptions,
};

/// Solver settings for [`City`] inputs, as read from a JSON config file or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Id of the city the tour starts from, else the first city
    pub root: Option<u32>,
    pub metric: MetricKind,
    /// Compute pairwise distances on all cores
    pub parallel: bool,
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|err| Error::InvalidConfig(err.to_string()))
    }

    pub fn options(&self) -> SolveOptions<u32> {
        SolveOptions {
            root: self.root,
            parallel: self.parallel,
        }
    }

    pub fn solve<'a>(&self, cities: &'a [City]) -> Result<Tour<'a, City>, Error> {
        solve_with(cities, &self.metric, self.options())
    }
}
