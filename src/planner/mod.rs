use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{Days, Utc};
use tracing::{debug, info, span, Level};
use uuid::Uuid;

use crate::config::constant::{
    MAX_NUM_DAYS, MAX_PLANNING_DAYS_PER_WEEK, SOLVER_TIME_BUDGET_SECS,
};
use crate::domain::state::{initial_states, SiteState, VisitLedger};
use crate::domain::types::{PlanRequest, PlanResult};
use crate::error::PlanError;
use crate::evaluation::economics::{evaluate_day, EconomicParams};
use crate::evaluation::summary::summarize;
use crate::solver::engine::route_day;
use crate::solver::route_search::LocalSearchSolver;
use crate::solver::{DaySite, RouteSolver};

/// Reject a request before any state is built. Violations never reach the
/// planning loop.
pub fn validate(request: &PlanRequest) -> Result<(), PlanError> {
    if request.farms.is_empty() {
        return Err(PlanError::InvalidInput(
            "at least one farm is required".into(),
        ));
    }
    if request.truck_capacity == 0 {
        return Err(PlanError::InvalidInput(
            "truck_capacity must be at least 1".into(),
        ));
    }
    if request.num_days == 0 || request.num_days > MAX_NUM_DAYS {
        return Err(PlanError::InvalidInput(format!(
            "num_days must be in 1..={MAX_NUM_DAYS}"
        )));
    }
    if request.planning_days_per_week == 0
        || request.planning_days_per_week > MAX_PLANNING_DAYS_PER_WEEK
    {
        return Err(PlanError::InvalidInput(format!(
            "planning_days_per_week must be in 1..={MAX_PLANNING_DAYS_PER_WEEK}"
        )));
    }

    let non_negative = [
        ("avg_pig_weight_kg", request.avg_pig_weight_kg),
        ("price_per_kg", request.price_per_kg),
        ("truck_cost_per_week", request.truck_cost_per_week),
        ("fuel_cost_per_km", request.fuel_cost_per_km),
        ("cost_per_km", request.cost_per_km.unwrap_or(0.0)),
        ("weekly_weight_gain_kg", request.weekly_weight_gain_kg),
    ];
    for (field, value) in non_negative {
        if value < 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "{field} must not be negative"
            )));
        }
    }

    if !(0.0..=1.0).contains(&request.weekly_decline_rate) {
        return Err(PlanError::InvalidInput(
            "weekly_decline_rate must be in 0..=1".into(),
        ));
    }

    Ok(())
}

/// Drives the multi-day collection plan: owns the per-request site state and
/// visit ledger, routes each day through the solver collaborator, and rolls
/// the horizon up into a [`PlanResult`].
pub struct Planner {
    solver: Box<dyn RouteSolver>,
}

impl Default for Planner {
    fn default() -> Self {
        Planner::new(Box::new(LocalSearchSolver::default()))
    }
}

impl Planner {
    pub fn new(solver: Box<dyn RouteSolver>) -> Self {
        Planner { solver }
    }

    pub fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        self.plan_until(request, None)
    }

    /// Plan the full horizon, stopping early when `deadline` passes. The
    /// deadline is checked at day boundaries only: the result of a cut run is
    /// an error carrying the fully completed days, never a partial day.
    pub fn plan_until(
        &self,
        request: &PlanRequest,
        deadline: Option<Instant>,
    ) -> Result<PlanResult, PlanError> {
        validate(request)?;

        let span = span!(
            Level::INFO,
            "plan",
            farms = request.farms.len(),
            days = request.num_days
        );
        let _guard = span.enter();

        let params = EconomicParams {
            truck_capacity: request.truck_capacity,
            avg_pig_weight_kg: request.avg_pig_weight_kg,
            price_per_kg: request.price_per_kg,
            truck_cost_per_week: request.truck_cost_per_week,
            trip_cost_per_km: request.trip_cost_per_km(),
        };

        let mut states = initial_states(request);
        let mut ledger = VisitLedger::new();

        let days_per_week = request.planning_days_per_week;
        let daily_weight_gain = request.weekly_weight_gain_kg / days_per_week as f64;
        let start_date = Utc::now().date_naive();
        let horizon = request.num_days;
        let mut days = Vec::with_capacity(horizon as usize);

        for t in 0..horizon {
            if let Some(dl) = deadline {
                if Instant::now() >= dl {
                    info!(completed = days.len(), "deadline hit, aborting horizon");
                    return Err(PlanError::DeadlineExceeded { completed: days });
                }
            }

            let week = t / days_per_week;

            // A planning week opens: part of the standing inventory leaves
            // through other channels before it can be collected.
            if t > 0 && t % days_per_week == 0 && request.weekly_decline_rate > 0.0 {
                for state in states.values_mut() {
                    if state.remaining_head > 0.0 {
                        state.remaining_head *= 1.0 - request.weekly_decline_rate;
                    }
                }
            }

            let weights: HashMap<String, f64> = states
                .iter()
                .map(|(id, state)| (id.clone(), state.mean_weight_kg))
                .collect();

            let sites = admissible_sites(request, &states, &ledger, week);

            let trucks = if sites.is_empty() {
                vec![]
            } else {
                route_day(
                    &sites,
                    request.slaughterhouse.location,
                    request.truck_capacity,
                    request.slaughterhouse.daily_capacity,
                    self.solver.as_ref(),
                    day_budget(deadline, horizon - t),
                )
            };

            let date = start_date
                .checked_add_days(Days::new(t as u64))
                .unwrap_or(start_date)
                .format("%Y-%m-%d")
                .to_string();
            let record = evaluate_day(date, trucks, &weights, &params);

            for truck in &record.trucks {
                for stop in &truck.stops {
                    if let Some(state) = states.get_mut(&stop.farm_id) {
                        state.remaining_head = (state.remaining_head - stop.pigs as f64).max(0.0);
                    }
                    ledger.mark(&stop.farm_id, week);
                }
            }

            for state in states.values_mut() {
                if state.remaining_head > 0.0 {
                    state.mean_weight_kg += daily_weight_gain;
                }
            }

            debug!(
                day = t,
                pigs = record.total_pigs(),
                trucks = record.trucks.len(),
                "day planned"
            );
            days.push(record);
        }

        let summary = summarize(&days);
        info!(
            total_pigs = summary.total_pigs_collected,
            net_profit = summary.total_net_profit_euros,
            "plan complete"
        );

        Ok(PlanResult {
            id: Uuid::new_v4().to_string(),
            days,
            summary,
        })
    }
}

/// Farms that can still give at least one whole head and have not been
/// visited in this planning week.
fn admissible_sites(
    request: &PlanRequest,
    states: &HashMap<String, SiteState>,
    ledger: &VisitLedger,
    week: u32,
) -> Vec<DaySite> {
    request
        .farms
        .iter()
        .filter_map(|farm| {
            let state = &states[&farm.id];
            let head = state.offerable_head();
            (head >= 1 && !ledger.visited(&farm.id, week)).then(|| DaySite {
                farm_id: farm.id.clone(),
                location: farm.location,
                available_head: head,
            })
        })
        .collect()
}

/// Per-day solver budget: the standing 15 s, shrunk pro-rata over the
/// remaining days when an external deadline applies.
fn day_budget(deadline: Option<Instant>, remaining_days: u32) -> Duration {
    let standing = Duration::from_secs(SOLVER_TIME_BUDGET_SECS);
    match deadline {
        None => standing,
        Some(dl) => {
            let left = dl.saturating_duration_since(Instant::now());
            standing.min(left / remaining_days.max(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DayRecord, Farm, GeoPoint, Slaughterhouse};
    use crate::evaluation::economics::round2;
    use std::collections::HashSet;

    fn farm(id: &str, lat: f64, lng: f64, pigs: u64) -> Farm {
        Farm {
            id: id.into(),
            name: format!("Granja {id}"),
            location: GeoPoint { lat, lng },
            available_pigs: pigs,
            max_capacity: pigs.max(500),
            initial_weight_kg: None,
        }
    }

    fn request(farms: Vec<Farm>, daily_capacity: u64) -> PlanRequest {
        PlanRequest {
            farms,
            slaughterhouse: Slaughterhouse {
                id: "sh-1".into(),
                name: "Matadero Central".into(),
                location: GeoPoint { lat: 40.42, lng: -3.70 },
                daily_capacity,
                max_capacity: 10 * daily_capacity.max(1),
            },
            truck_capacity: 250,
            num_days: 5,
            planning_days_per_week: 5,
            avg_pig_weight_kg: 110.0,
            price_per_kg: 2.2,
            truck_cost_per_week: 2000.0,
            fuel_cost_per_km: 0.35,
            cost_per_km: None,
            weekly_weight_gain_kg: 0.0,
            weekly_decline_rate: 0.0,
        }
    }

    fn collected_per_farm(days: &[DayRecord]) -> HashMap<String, u64> {
        let mut totals: HashMap<String, u64> = HashMap::new();
        for day in days {
            for truck in &day.trucks {
                for stop in &truck.stops {
                    *totals.entry(stop.farm_id.clone()).or_default() += stop.pigs;
                }
            }
        }
        totals
    }

    fn assert_invariants(result: &crate::domain::types::PlanResult, request: &PlanRequest) {
        let weeks = request.planning_days_per_week;
        let mut visited: HashMap<String, HashSet<u32>> = HashMap::new();

        for (t, day) in result.days.iter().enumerate() {
            let mut day_head = 0;
            for truck in &day.trucks {
                assert!(truck.total_pigs() <= request.truck_capacity, "capacity");
                assert!(truck.stops.len() <= 3, "stop cap");
                day_head += truck.total_pigs();
            }
            assert!(
                day_head <= request.slaughterhouse.daily_capacity,
                "daily cap"
            );

            let week = t as u32 / weeks;
            for truck in &day.trucks {
                for stop in &truck.stops {
                    assert!(
                        visited.entry(stop.farm_id.clone()).or_default().insert(week)
                            || collected_in_same_day(day, &stop.farm_id),
                        "farm {} visited twice in week {week}",
                        stop.farm_id
                    );
                }
            }
        }

        let collected = collected_per_farm(&result.days);
        for farm in &request.farms {
            let total = collected.get(&farm.id).copied().unwrap_or(0);
            assert!(total <= farm.available_pigs, "conservation");
        }
    }

    // A farm split across trucks within one day counts as a single visit.
    fn collected_in_same_day(day: &DayRecord, farm_id: &str) -> bool {
        day.trucks
            .iter()
            .flat_map(|t| t.stops.iter())
            .filter(|s| s.farm_id == farm_id)
            .count()
            > 1
    }

    #[test]
    fn single_small_site_is_collected_once_per_week() {
        let mut req = request(vec![farm("f1", 40.4, -3.7, 200)], 300);
        req.slaughterhouse.location = GeoPoint { lat: 40.5, lng: -3.7 };

        let result = Planner::default().plan(&req).unwrap();
        assert_eq!(result.days.len(), 5);

        let day0 = &result.days[0];
        assert_eq!(day0.trucks.len(), 1);
        assert_eq!(day0.total_pigs(), 200);
        assert!((day0.trucks[0].distance_km - 22.24).abs() < 0.02);

        // The weekly ledger blocks the farm for the rest of the week.
        for day in &result.days[1..] {
            assert!(day.trucks.is_empty());
            assert_eq!(day.revenue_eur, 0.0);
        }

        assert_eq!(result.summary.total_pigs_collected, 200);
        assert_invariants(&result, &req);
    }

    #[test]
    fn three_madrid_farms_share_two_trucks() {
        let req = request(
            vec![
                farm("robles", 40.4168, -3.7038, 150),
                farm("encinar", 40.4250, -3.6900, 200),
                farm("vista", 40.4100, -3.7200, 100),
            ],
            500,
        );

        let result = Planner::default().plan(&req).unwrap();
        let day0 = &result.days[0];

        assert_eq!(day0.trucks.len(), 2);
        assert_eq!(day0.total_pigs(), 450);
        assert_eq!(day0.total_kg, 49_500.0);
        // 110 kg mean sits in the ideal band: no penalty.
        assert_eq!(day0.revenue_eur, 108_900.0);

        let collected = collected_per_farm(&result.days);
        assert_eq!(collected["robles"], 150);
        assert_eq!(collected["encinar"], 200);
        assert_eq!(collected["vista"], 100);

        for day in &result.days[1..] {
            assert!(day.trucks.is_empty());
        }
        assert_invariants(&result, &req);
    }

    #[test]
    fn daily_cap_saturation_splits_a_big_farm() {
        let mut req = request(vec![farm("big", 40.45, -3.70, 500)], 100);
        req.truck_capacity = 50;
        req.num_days = 3;

        let result = Planner::default().plan(&req).unwrap();
        let day0 = &result.days[0];

        assert_eq!(day0.total_pigs(), 100);
        assert_eq!(day0.trucks.len(), 2);
        for truck in &day0.trucks {
            assert_eq!(truck.total_pigs(), 50);
        }

        // Blocked by the weekly ledger for the remaining horizon.
        assert!(result.days[1].trucks.is_empty());
        assert!(result.days[2].trucks.is_empty());
        assert_invariants(&result, &req);
    }

    #[test]
    fn heavy_herd_pays_the_extreme_weight_penalty() {
        let mut req = request(
            vec![
                farm("robles", 40.4168, -3.7038, 150),
                farm("encinar", 40.4250, -3.6900, 200),
                farm("vista", 40.4100, -3.7200, 100),
            ],
            500,
        );
        req.avg_pig_weight_kg = 122.0;

        let result = Planner::default().plan(&req).unwrap();
        let day0 = &result.days[0];

        assert_eq!(day0.total_kg, round2(450.0 * 122.0));
        assert_eq!(day0.revenue_eur, round2(450.0 * 122.0 * 2.2 * 0.8));
    }

    #[test]
    fn weight_grows_daily_until_collection() {
        // Day cap 100 and a nearer rival keep the far farm waiting: it is cut
        // off on day 0, collected on day 1 and day 6, gaining 0.4 kg/day.
        let mut req = request(
            vec![
                farm("near", 40.41, -3.70, 200),
                farm("far", 40.48, -3.70, 200),
            ],
            100,
        );
        req.slaughterhouse.location = GeoPoint { lat: 40.40, lng: -3.70 };
        req.truck_capacity = 100;
        req.num_days = 7;
        req.weekly_weight_gain_kg = 2.0;

        let result = Planner::default().plan(&req).unwrap();

        // Day 0: only the near farm fits under the cap.
        let day0 = collected_per_farm(&result.days[0..1]);
        assert_eq!(day0.get("near"), Some(&100));
        assert_eq!(day0.get("far"), None);

        // Day 1: the far farm, already one day of growth in.
        let day1 = &result.days[1];
        assert_eq!(day1.total_pigs(), 100);
        assert_eq!(day1.total_kg, round2(100.0 * (110.0 + 0.4)));

        // Days 2-4: everyone is ledger-blocked.
        for day in &result.days[2..5] {
            assert!(day.trucks.is_empty());
        }

        // Day 5 opens week 1: the near farm wins the cap again; day 6
        // delivers the far farm at six days of growth.
        let day5 = collected_per_farm(&result.days[5..6]);
        assert_eq!(day5.get("near"), Some(&100));
        let day6 = &result.days[6];
        assert_eq!(day6.total_pigs(), 100);
        assert_eq!(day6.total_kg, round2(100.0 * (110.0 + 6.0 * 0.4)));

        assert_eq!(result.summary.total_pigs_collected, 400);
        assert_invariants(&result, &req);
    }

    #[test]
    fn weekly_decline_erodes_uncollected_inventory() {
        let mut req = request(vec![farm("f1", 40.45, -3.70, 3)], 1);
        req.truck_capacity = 1;
        req.planning_days_per_week = 1;
        req.num_days = 4;
        req.weekly_decline_rate = 0.5;

        let result = Planner::default().plan(&req).unwrap();

        // Day 0 takes 1 of 3. Day 1 opens a new week: 2 * 0.5 = 1 remains and
        // is taken. Days 2-3 find nothing.
        assert_eq!(result.days[0].total_pigs(), 1);
        assert_eq!(result.days[1].total_pigs(), 1);
        assert!(result.days[2].trucks.is_empty());
        assert!(result.days[3].trucks.is_empty());
        assert_eq!(result.summary.total_pigs_collected, 2);
    }

    #[test]
    fn weekly_cadence_reopens_farms_every_bucket() {
        let mut req = request(vec![farm("f1", 40.45, -3.70, 1000)], 100);
        req.truck_capacity = 100;
        req.planning_days_per_week = 2;
        req.num_days = 10;

        let result = Planner::default().plan(&req).unwrap();

        // One 100-head pickup on the first day of each 2-day bucket.
        for (t, day) in result.days.iter().enumerate() {
            if t % 2 == 0 {
                assert_eq!(day.total_pigs(), 100, "day {t}");
            } else {
                assert!(day.trucks.is_empty(), "day {t}");
            }
        }
        assert_eq!(result.summary.total_pigs_collected, 500);
        assert_invariants(&result, &req);
    }

    #[test]
    fn summary_is_reproducible_from_the_emitted_days() {
        let req = request(
            vec![
                farm("robles", 40.4168, -3.7038, 150),
                farm("encinar", 40.4250, -3.6900, 200),
            ],
            500,
        );
        let result = Planner::default().plan(&req).unwrap();
        assert_eq!(summarize(&result.days), result.summary);
    }

    #[test]
    fn empty_farm_list_is_rejected() {
        let req = request(vec![], 500);
        let err = Planner::default().plan(&req).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let base = || request(vec![farm("f1", 40.45, -3.70, 100)], 500);

        let mut req = base();
        req.num_days = 0;
        assert!(matches!(validate(&req), Err(PlanError::InvalidInput(_))));

        let mut req = base();
        req.num_days = 31;
        assert!(matches!(validate(&req), Err(PlanError::InvalidInput(_))));

        let mut req = base();
        req.planning_days_per_week = 8;
        assert!(matches!(validate(&req), Err(PlanError::InvalidInput(_))));

        let mut req = base();
        req.truck_capacity = 0;
        assert!(matches!(validate(&req), Err(PlanError::InvalidInput(_))));

        let mut req = base();
        req.price_per_kg = -0.1;
        assert!(matches!(validate(&req), Err(PlanError::InvalidInput(_))));

        let mut req = base();
        req.weekly_decline_rate = 1.5;
        assert!(matches!(validate(&req), Err(PlanError::InvalidInput(_))));

        assert!(validate(&base()).is_ok());
    }

    #[test]
    fn expired_deadline_returns_completed_days_only() {
        let req = request(vec![farm("f1", 40.45, -3.70, 100)], 500);
        let err = Planner::default()
            .plan_until(&req, Some(Instant::now()))
            .unwrap_err();

        match err {
            PlanError::DeadlineExceeded { completed } => assert!(completed.is_empty()),
            other => panic!("expected DeadlineExceeded, got {other:?}"),
        }
    }

    #[test]
    fn plan_ids_are_unique() {
        let req = request(vec![farm("f1", 40.45, -3.70, 10)], 500);
        let planner = Planner::default();
        let a = planner.plan(&req).unwrap();
        let b = planner.plan(&req).unwrap();
        assert_ne!(a.id, b.id);
    }
}
