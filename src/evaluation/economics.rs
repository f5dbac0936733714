use std::collections::HashMap;

use crate::config::constant::TRUCK_COST_PRORATE_DAYS;
use crate::domain::types::{DayRecord, TruckRoute};
use crate::evaluation::penalty::weight_penalty;

/// Economic parameters of one request, extracted once for the evaluator.
#[derive(Debug, Clone)]
pub struct EconomicParams {
    pub truck_capacity: u64,
    pub avg_pig_weight_kg: f64,
    pub price_per_kg: f64,
    pub truck_cost_per_week: f64,
    pub trip_cost_per_km: f64,
}

/// Round to 2 decimals. Applied at emission only; everything upstream runs
/// at full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Account one day's routes against the start-of-day weight snapshot.
///
/// Consumes full-precision truck distances and emits the rounded record:
/// revenue scaled by the weight penalty of the delivered mean, per-truck trip
/// cost weighted by load ratio, and the 7-day prorate of the weekly truck
/// cost per vehicle used.
pub fn evaluate_day(
    date: String,
    trucks: Vec<TruckRoute>,
    weights: &HashMap<String, f64>,
    params: &EconomicParams,
) -> DayRecord {
    let total_head: u64 = trucks.iter().map(|t| t.total_pigs()).sum();

    let total_kg: f64 = trucks
        .iter()
        .flat_map(|t| t.stops.iter())
        .map(|stop| {
            let weight = weights
                .get(&stop.farm_id)
                .copied()
                .unwrap_or(params.avg_pig_weight_kg);
            stop.pigs as f64 * weight
        })
        .sum();

    let mean_weight = if total_head > 0 {
        total_kg / total_head as f64
    } else {
        params.avg_pig_weight_kg
    };

    let revenue = total_kg * params.price_per_kg * (1.0 - weight_penalty(mean_weight));

    let trip_cost: f64 = trucks
        .iter()
        .map(|truck| {
            let head = truck.total_pigs();
            if head == 0 || truck.distance_km <= 0.0 {
                return 0.0;
            }
            let load_ratio = head as f64 / params.truck_capacity as f64;
            truck.distance_km * params.trip_cost_per_km * load_ratio
        })
        .sum();

    let truck_cost = trucks.len() as f64 * (params.truck_cost_per_week / TRUCK_COST_PRORATE_DAYS);
    let net_profit = revenue - trip_cost - truck_cost;
    let total_distance: f64 = trucks.iter().map(|t| t.distance_km).sum();

    let trucks = trucks
        .into_iter()
        .map(|t| TruckRoute {
            distance_km: round2(t.distance_km),
            ..t
        })
        .collect();

    DayRecord {
        date,
        total_kg: round2(total_kg),
        revenue_eur: round2(revenue),
        trucks,
        total_distance_km: round2(total_distance),
        trip_cost_eur: round2(trip_cost),
        truck_cost_eur: round2(truck_cost),
        net_profit_eur: round2(net_profit),
    }
}
