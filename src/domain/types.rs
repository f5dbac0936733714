use serde::{Deserialize, Serialize};

use crate::config::constant::{
    DEFAULT_AVG_PIG_WEIGHT_KG, DEFAULT_FUEL_COST_PER_KM, DEFAULT_NUM_DAYS,
    DEFAULT_PLANNING_DAYS_PER_WEEK, DEFAULT_PRICE_PER_KG, DEFAULT_TRUCK_CAPACITY,
    DEFAULT_TRUCK_COST_PER_WEEK, DEFAULT_WEEKLY_DECLINE_RATE, DEFAULT_WEEKLY_WEIGHT_GAIN_KG,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub available_pigs: u64,
    pub max_capacity: u64,
    /// Starting live weight for this farm; falls back to the request-wide
    /// average when absent.
    #[serde(default)]
    pub initial_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slaughterhouse {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub daily_capacity: u64,
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub farms: Vec<Farm>,
    pub slaughterhouse: Slaughterhouse,
    #[serde(default = "default_truck_capacity")]
    pub truck_capacity: u64,
    #[serde(default = "default_num_days")]
    pub num_days: u32,
    #[serde(default = "default_planning_days_per_week")]
    pub planning_days_per_week: u32,
    #[serde(default = "default_avg_pig_weight_kg")]
    pub avg_pig_weight_kg: f64,
    #[serde(default = "default_price_per_kg")]
    pub price_per_kg: f64,
    #[serde(default = "default_truck_cost_per_week")]
    pub truck_cost_per_week: f64,
    #[serde(default = "default_fuel_cost_per_km")]
    pub fuel_cost_per_km: f64,
    /// Economic cost per km; when absent the fuel cost doubles as the trip
    /// cost rate.
    #[serde(default)]
    pub cost_per_km: Option<f64>,
    #[serde(default = "default_weekly_weight_gain_kg")]
    pub weekly_weight_gain_kg: f64,
    #[serde(default = "default_weekly_decline_rate")]
    pub weekly_decline_rate: f64,
}

impl PlanRequest {
    pub fn trip_cost_per_km(&self) -> f64 {
        self.cost_per_km.unwrap_or(self.fuel_cost_per_km)
    }
}

fn default_truck_capacity() -> u64 {
    DEFAULT_TRUCK_CAPACITY
}
fn default_num_days() -> u32 {
    DEFAULT_NUM_DAYS
}
fn default_planning_days_per_week() -> u32 {
    DEFAULT_PLANNING_DAYS_PER_WEEK
}
fn default_avg_pig_weight_kg() -> f64 {
    DEFAULT_AVG_PIG_WEIGHT_KG
}
fn default_price_per_kg() -> f64 {
    DEFAULT_PRICE_PER_KG
}
fn default_truck_cost_per_week() -> f64 {
    DEFAULT_TRUCK_COST_PER_WEEK
}
fn default_fuel_cost_per_km() -> f64 {
    DEFAULT_FUEL_COST_PER_KM
}
fn default_weekly_weight_gain_kg() -> f64 {
    DEFAULT_WEEKLY_WEIGHT_GAIN_KG
}
fn default_weekly_decline_rate() -> f64 {
    DEFAULT_WEEKLY_DECLINE_RATE
}

/// One pickup at a farm. Wire format matches the original API: `{id, pigs}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(rename = "id")]
    pub farm_id: String,
    pub pigs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckRoute {
    pub id: u32,
    #[serde(rename = "route")]
    pub stops: Vec<RouteStop>,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

impl TruckRoute {
    pub fn total_pigs(&self) -> u64 {
        self.stops.iter().map(|s| s.pigs).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(rename = "timedatestamp")]
    pub date: String,
    #[serde(rename = "totalKg")]
    pub total_kg: f64,
    #[serde(rename = "totalEuros")]
    pub revenue_eur: f64,
    pub trucks: Vec<TruckRoute>,
    #[serde(rename = "totalDistanceKm")]
    pub total_distance_km: f64,
    #[serde(rename = "fuelCostEuros")]
    pub trip_cost_eur: f64,
    #[serde(rename = "truckCostEuros")]
    pub truck_cost_eur: f64,
    #[serde(rename = "netProfitEuros")]
    pub net_profit_eur: f64,
}

impl DayRecord {
    pub fn total_pigs(&self) -> u64 {
        self.trucks.iter().map(|t| t.total_pigs()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_days: u32,
    pub total_revenue_euros: f64,
    pub total_fuel_cost_euros: f64,
    pub total_truck_cost_euros: f64,
    pub total_net_profit_euros: f64,
    pub profit_margin_percent: f64,
    pub total_pigs_collected: u64,
    pub total_distance_km: f64,
    pub max_trucks_per_day: u32,
    pub avg_trucks_per_day: f64,
    pub cost_per_pig_euros: f64,
    pub revenue_per_pig_euros: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub id: String,
    pub days: Vec<DayRecord>,
    pub summary: PlanSummary,
}
