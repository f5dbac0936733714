use std::collections::{HashMap, HashSet};

use crate::domain::types::PlanRequest;

/// Mutable per-farm planning state. Head is kept as a real so the weekly
/// decline can deplete fractionally; the solver sees the floored value.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteState {
    pub remaining_head: f64,
    pub mean_weight_kg: f64,
}

impl SiteState {
    /// Head count offered to the routing layer.
    pub fn offerable_head(&self) -> u64 {
        self.remaining_head.floor().max(0.0) as u64
    }
}

/// Tracks which planning week each farm has already been visited in. A farm
/// appears in at most one day per week bucket.
#[derive(Debug, Default, Clone)]
pub struct VisitLedger {
    visited: HashMap<String, HashSet<u32>>,
}

impl VisitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self, farm_id: &str, week: u32) -> bool {
        self.visited
            .get(farm_id)
            .is_some_and(|weeks| weeks.contains(&week))
    }

    pub fn mark(&mut self, farm_id: &str, week: u32) {
        self.visited
            .entry(farm_id.to_string())
            .or_default()
            .insert(week);
    }
}

/// Build the initial per-farm state from a request.
pub fn initial_states(request: &PlanRequest) -> HashMap<String, SiteState> {
    request
        .farms
        .iter()
        .map(|farm| {
            (
                farm.id.clone(),
                SiteState {
                    remaining_head: farm.available_pigs as f64,
                    mean_weight_kg: farm.initial_weight_kg.unwrap_or(request.avg_pig_weight_kg),
                },
            )
        })
        .collect()
}
