use crate::domain::types::{DayRecord, PlanSummary};
use crate::evaluation::economics::round2;

/// Roll the emitted day records up into the horizon summary. Operates on the
/// already-rounded records, so re-applying it to a result's days reproduces
/// the result's summary.
pub fn summarize(days: &[DayRecord]) -> PlanSummary {
    let total_revenue: f64 = days.iter().map(|d| d.revenue_eur).sum();
    let total_trip_cost: f64 = days.iter().map(|d| d.trip_cost_eur).sum();
    let total_truck_cost: f64 = days.iter().map(|d| d.truck_cost_eur).sum();
    let total_net_profit: f64 = days.iter().map(|d| d.net_profit_eur).sum();
    let total_distance: f64 = days.iter().map(|d| d.total_distance_km).sum();
    let total_pigs: u64 = days.iter().map(|d| d.total_pigs()).sum();

    let profit_margin = if total_revenue > 0.0 {
        total_net_profit / total_revenue * 100.0
    } else {
        0.0
    };

    let max_trucks = days.iter().map(|d| d.trucks.len()).max().unwrap_or(0) as u32;
    let avg_trucks = if days.is_empty() {
        0.0
    } else {
        days.iter().map(|d| d.trucks.len()).sum::<usize>() as f64 / days.len() as f64
    };

    let (cost_per_pig, revenue_per_pig) = if total_pigs > 0 {
        (
            (total_trip_cost + total_truck_cost) / total_pigs as f64,
            total_revenue / total_pigs as f64,
        )
    } else {
        (0.0, 0.0)
    };

    PlanSummary {
        total_days: days.len() as u32,
        total_revenue_euros: round2(total_revenue),
        total_fuel_cost_euros: round2(total_trip_cost),
        total_truck_cost_euros: round2(total_truck_cost),
        total_net_profit_euros: round2(total_net_profit),
        profit_margin_percent: round2(profit_margin),
        total_pigs_collected: total_pigs,
        total_distance_km: round2(total_distance),
        max_trucks_per_day: max_trucks,
        avg_trucks_per_day: round2(avg_trucks),
        cost_per_pig_euros: round2(cost_per_pig),
        revenue_per_pig_euros: round2(revenue_per_pig),
    }
}
