use std::cmp::max;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::constant::{MAX_STOPS_PER_ROUTE, VEHICLE_FIXED_COST_M};
use crate::distance::geodesic::haversine_km;
use crate::distance::matrix::metre_matrix;
use crate::domain::types::{GeoPoint, RouteStop, TruckRoute};
use crate::solver::{fallback, DaySite, RouteSolver, RoutingProblem, SolvedRoutes};

/// Route one day's candidate sites against the slaughterhouse depot.
///
/// Sizes the fleet at the minimum that can move the day's tonnage, hands the
/// problem to the routing collaborator under the given wall-clock budget and
/// extracts truck routes from its answer; a collaborator that produces no
/// feasible solution is silently replaced by the greedy fallback.
pub fn route_day(
    sites: &[DaySite],
    depot: GeoPoint,
    truck_capacity: u64,
    daily_cap: u64,
    solver: &dyn RouteSolver,
    budget: Duration,
) -> Vec<TruckRoute> {
    if sites.is_empty() || daily_cap == 0 {
        return vec![];
    }

    let mut locations = Vec::with_capacity(sites.len() + 1);
    locations.push(depot);
    locations.extend(sites.iter().map(|s| s.location));

    let mut demands = Vec::with_capacity(sites.len() + 1);
    demands.push(0);
    demands.extend(sites.iter().map(|s| s.available_head));

    let total_demand: u64 = sites.iter().map(|s| s.available_head).sum();
    let movable = total_demand.min(daily_cap);
    let vehicles = min_vehicles(movable, truck_capacity);

    let problem = RoutingProblem {
        distance_m: metre_matrix(&locations),
        demands,
        vehicles,
        vehicle_capacity: truck_capacity,
        max_stops: MAX_STOPS_PER_ROUTE,
        vehicle_fixed_cost_m: VEHICLE_FIXED_COST_M,
    };

    debug!(
        sites = sites.len(),
        vehicles,
        movable,
        "solving one-day routing problem"
    );

    match solver.solve(&problem, budget) {
        Some(solved) => extract_trucks(&solved, sites, depot, truck_capacity, daily_cap),
        None => {
            info!("routing solver produced no feasible day plan, using greedy fallback");
            fallback::greedy_day(sites, depot, truck_capacity, daily_cap)
        }
    }
}

/// `V_min = max(1, ceil(min(total demand, daily cap) / Q))`. The fixed
/// vehicle cost already pushes the solver below this bound when fewer trucks
/// suffice, so the fleet is never grown iteratively.
fn min_vehicles(movable_head: u64, truck_capacity: u64) -> usize {
    max(1, movable_head.div_ceil(truck_capacity)) as usize
}

/// Walk each solved vehicle route depot-to-depot and turn it into pickups.
///
/// Head at each stop is clamped by the site inventory, the truck's remaining
/// capacity and the slaughterhouse's remaining daily intake. Nodes beyond the
/// stop cap or with nothing left to give are passed through: they still shape
/// the polyline but emit no stop. Trucks that end up with no stops are
/// dropped and ids are reassigned 1-based in emission order.
fn extract_trucks(
    solved: &SolvedRoutes,
    sites: &[DaySite],
    depot: GeoPoint,
    truck_capacity: u64,
    daily_cap: u64,
) -> Vec<TruckRoute> {
    let mut trucks = vec![];
    let mut day_collected = 0u64;

    for nodes in &solved.routes {
        if nodes.is_empty() {
            continue;
        }

        let mut load = 0u64;
        let mut stops = vec![];
        for &node in nodes {
            let site = &sites[node - 1];
            let head = site
                .available_head
                .min(truck_capacity - load)
                .min(daily_cap - day_collected);

            if head > 0 && stops.len() < MAX_STOPS_PER_ROUTE {
                stops.push(RouteStop {
                    farm_id: site.farm_id.clone(),
                    pigs: head,
                });
                load += head;
                day_collected += head;
            }
        }

        if stops.is_empty() {
            continue;
        }

        let mut distance_km = 0.0;
        let mut previous = depot;
        for &node in nodes {
            distance_km += haversine_km(previous, sites[node - 1].location);
            previous = sites[node - 1].location;
        }
        distance_km += haversine_km(previous, depot);

        trucks.push(TruckRoute {
            id: trucks.len() as u32 + 1,
            stops,
            distance_km,
        });
    }

    trucks
}
