use crate::solver::route_search::Visit;
use crate::solver::RoutingProblem;

/// Cheapest-path first solution: each vehicle repeatedly extends to the
/// nearest unrouted customer that still fits its remaining capacity and stop
/// budget, then hands over to the next vehicle.
///
/// Customers no vehicle could absorb are appended to the last segment; the
/// capacity penalty steers the search toward repairing them, and a tour that
/// stays infeasible ends in the greedy fallback.
pub(crate) fn cheapest_extension_tour(problem: &RoutingProblem) -> Vec<Visit> {
    let mut remaining: Vec<usize> = (1..problem.demands.len()).collect();
    let mut visits = Vec::with_capacity(problem.demands.len() + problem.vehicles);

    for vehicle in 0..problem.vehicles {
        let mut current = 0usize;
        let mut load = 0u64;
        let mut stops = 0usize;

        while stops < problem.max_stops {
            let next = remaining
                .iter()
                .copied()
                .filter(|&node| load + problem.demands[node] <= problem.vehicle_capacity)
                .min_by_key(|&node| problem.distance_m[current][node]);

            let Some(node) = next else { break };
            remaining.retain(|&n| n != node);

            load += problem.demands[node];
            stops += 1;
            current = node;
            visits.push(Visit {
                node,
                demand: problem.demands[node],
                is_separator: false,
            });
        }

        if vehicle + 1 < problem.vehicles {
            visits.push(Visit::separator());
        }
    }

    for node in remaining {
        visits.push(Visit {
            node,
            demand: problem.demands[node],
            is_separator: false,
        });
    }

    visits
}
