pub mod engine;
pub mod fallback;
pub mod route_search;

use std::time::Duration;

use crate::domain::types::GeoPoint;

/// One farm offered to the routing layer for a single day.
#[derive(Debug, Clone)]
pub struct DaySite {
    pub farm_id: String,
    pub location: GeoPoint,
    pub available_head: u64,
}

/// A single day's capacitated routing problem. Node 0 is the depot; node `i`
/// (i >= 1) is the i-th candidate site. Distances are integer metres.
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    pub distance_m: Vec<Vec<i64>>,
    pub demands: Vec<u64>,
    pub vehicles: usize,
    pub vehicle_capacity: u64,
    pub max_stops: usize,
    pub vehicle_fixed_cost_m: i64,
}

impl RoutingProblem {
    pub fn customers(&self) -> usize {
        self.demands.len().saturating_sub(1)
    }
}

/// Ordered node visits per vehicle, depot omitted, plus total travel.
#[derive(Debug, Clone)]
pub struct SolvedRoutes {
    pub routes: Vec<Vec<usize>>,
    pub travel_m: i64,
}

/// The routing collaborator seam. `None` covers both infeasibility and a
/// blown budget; callers recover with the greedy fallback and never surface
/// either condition.
pub trait RouteSolver: Send + Sync {
    fn solve(&self, problem: &RoutingProblem, budget: Duration) -> Option<SolvedRoutes>;
}
