use itertools::Itertools;

use crate::config::constant::{CAPACITY_PENALTY_M, STOP_CAP_PENALTY_M};
use crate::solver::route_search::Visit;
use crate::solver::RoutingProblem;

/// Total travel of the giant tour in metres, including the depot legs of
/// every vehicle (separators sit at the depot).
pub(crate) fn tour_travel_m(visits: &[Visit], dm: &[Vec<i64>]) -> i64 {
    let Some(first) = visits.first() else {
        return 0;
    };
    let last = visits.last().unwrap();

    let mut total = dm[0][first.node] + dm[last.node][0];
    for (a, b) in visits.iter().tuple_windows() {
        total += dm[a.node][b.node];
    }
    total
}

/// Load and stop count per vehicle segment, in tour order. Empty segments
/// are included so vehicle accounting stays index-aligned.
pub(crate) fn segment_loads(visits: &[Visit]) -> Vec<(u64, usize)> {
    let mut segments = vec![];
    let mut load = 0u64;
    let mut stops = 0usize;

    for visit in visits {
        if visit.is_separator {
            segments.push((load, stops));
            load = 0;
            stops = 0;
        } else {
            load += visit.demand;
            stops += 1;
        }
    }
    segments.push((load, stops));
    segments
}

/// Penalised objective: travel metres plus the per-vehicle fixed cost for
/// every non-empty segment, plus large penalties for capacity overloads and
/// stop-cap violations. An infeasible tour can never outscore a feasible one.
pub(crate) fn tour_fitness(visits: &[Visit], problem: &RoutingProblem) -> f64 {
    let travel = tour_travel_m(visits, &problem.distance_m);

    let mut penalty = 0i64;
    let mut vehicles_used = 0i64;
    for (load, stops) in segment_loads(visits) {
        if load > problem.vehicle_capacity {
            penalty += (load - problem.vehicle_capacity) as i64 * CAPACITY_PENALTY_M;
        }
        if stops > problem.max_stops {
            penalty += (stops - problem.max_stops) as i64 * STOP_CAP_PENALTY_M;
        }
        if stops > 0 {
            vehicles_used += 1;
        }
    }

    (travel + vehicles_used * problem.vehicle_fixed_cost_m + penalty) as f64
}

/// Whether every segment respects capacity and the stop cap.
pub(crate) fn is_feasible(visits: &[Visit], problem: &RoutingProblem) -> bool {
    segment_loads(visits)
        .iter()
        .all(|&(load, stops)| load <= problem.vehicle_capacity && stops <= problem.max_stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constant::{MAX_STOPS_PER_ROUTE, VEHICLE_FIXED_COST_M};

    fn problem() -> RoutingProblem {
        // Depot plus three sites on a line, 1 km apart.
        let dm = vec![
            vec![0, 1000, 2000, 3000],
            vec![1000, 0, 1000, 2000],
            vec![2000, 1000, 0, 1000],
            vec![3000, 2000, 1000, 0],
        ];
        RoutingProblem {
            distance_m: dm,
            demands: vec![0, 100, 150, 200],
            vehicles: 2,
            vehicle_capacity: 250,
            max_stops: MAX_STOPS_PER_ROUTE,
            vehicle_fixed_cost_m: VEHICLE_FIXED_COST_M,
        }
    }

    fn customer(node: usize, demand: u64) -> Visit {
        Visit {
            node,
            demand,
            is_separator: false,
        }
    }

    #[test]
    fn travel_closes_both_vehicle_loops() {
        let visits = vec![
            customer(1, 100),
            customer(2, 150),
            Visit::separator(),
            customer(3, 200),
        ];
        // Loop 1: 0-1-2-0 = 1000 + 1000 + 2000; loop 2: 0-3-0 = 6000.
        assert_eq!(tour_travel_m(&visits, &problem().distance_m), 10_000);
    }

    #[test]
    fn segments_split_on_separators() {
        let visits = vec![
            customer(1, 100),
            Visit::separator(),
            Visit::separator(),
            customer(2, 150),
            customer(3, 200),
        ];
        assert_eq!(segment_loads(&visits), vec![(100, 1), (0, 0), (350, 2)]);
    }

    #[test]
    fn feasible_tour_pays_travel_plus_vehicles() {
        let p = problem();
        let visits = vec![
            customer(1, 100),
            customer(2, 150),
            Visit::separator(),
            customer(3, 200),
        ];
        assert!(is_feasible(&visits, &p));
        assert_eq!(
            tour_fitness(&visits, &p),
            (10_000 + 2 * VEHICLE_FIXED_COST_M) as f64
        );
    }

    #[test]
    fn overload_dominates_any_travel_saving() {
        let p = problem();
        // Everything on one truck: 450 head on a 250-capacity vehicle.
        let overloaded = vec![
            customer(1, 100),
            customer(2, 150),
            customer(3, 200),
            Visit::separator(),
        ];
        let split = vec![
            customer(1, 100),
            customer(2, 150),
            Visit::separator(),
            customer(3, 200),
        ];
        assert!(!is_feasible(&overloaded, &p));
        assert!(tour_fitness(&overloaded, &p) > tour_fitness(&split, &p));
    }

    #[test]
    fn fourth_stop_is_penalised() {
        let mut p = problem();
        p.demands = vec![0, 10, 10, 10, 10];
        p.distance_m = vec![vec![1000; 5]; 5];
        for i in 0..5 {
            p.distance_m[i][i] = 0;
        }
        let visits: Vec<Visit> = (1..=4).map(|n| customer(n, 10)).collect();
        assert!(!is_feasible(&visits, &p));
    }
}
