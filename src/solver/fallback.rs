use tracing::debug;

use crate::config::constant::MAX_STOPS_PER_ROUTE;
use crate::distance::geodesic::haversine_km;
use crate::domain::types::{GeoPoint, RouteStop, TruckRoute};
use crate::solver::DaySite;

/// Deterministic greedy assignment used when the routing collaborator finds
/// no feasible solution.
///
/// Sites are drained nearest-first. A truck closes when it is full, carries
/// the maximum number of stops, or the slaughterhouse's daily intake is
/// reached; a site whose inventory exceeds the truck capacity is split across
/// consecutive trucks. Guarantees progress, not optimality.
pub fn greedy_day(
    sites: &[DaySite],
    depot: GeoPoint,
    truck_capacity: u64,
    daily_cap: u64,
) -> Vec<TruckRoute> {
    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.sort_by(|&a, &b| {
        haversine_km(depot, sites[a].location).total_cmp(&haversine_km(depot, sites[b].location))
    });

    let mut trucks: Vec<TruckRoute> = vec![];
    let mut day_collected = 0u64;
    let mut load = 0u64;
    let mut stops: Vec<RouteStop> = vec![];
    let mut stop_locations: Vec<GeoPoint> = vec![];

    let close_route = |stops: &mut Vec<RouteStop>,
                           stop_locations: &mut Vec<GeoPoint>,
                           trucks: &mut Vec<TruckRoute>| {
        if stops.is_empty() {
            return;
        }
        let mut distance_km = 0.0;
        let mut previous = depot;
        for location in stop_locations.drain(..) {
            distance_km += haversine_km(previous, location);
            previous = location;
        }
        distance_km += haversine_km(previous, depot);

        trucks.push(TruckRoute {
            id: trucks.len() as u32 + 1,
            stops: std::mem::take(stops),
            distance_km,
        });
    };

    'sites: for index in order {
        let site = &sites[index];
        let mut available = site.available_head;

        while available > 0 {
            if day_collected >= daily_cap {
                break 'sites;
            }

            let head = available
                .min(truck_capacity - load)
                .min(daily_cap - day_collected);

            stops.push(RouteStop {
                farm_id: site.farm_id.clone(),
                pigs: head,
            });
            stop_locations.push(site.location);
            load += head;
            day_collected += head;
            available -= head;

            if load == truck_capacity || stops.len() == MAX_STOPS_PER_ROUTE {
                close_route(&mut stops, &mut stop_locations, &mut trucks);
                load = 0;
            }
        }
    }

    close_route(&mut stops, &mut stop_locations, &mut trucks);

    debug!(
        trucks = trucks.len(),
        head = day_collected,
        "greedy fallback assignment complete"
    );
    trucks
}
