pub mod constant {
    // Request defaults; a 20 t trailer carries roughly 181 pigs of 110 kg.
    pub const DEFAULT_TRUCK_CAPACITY: u64 = 181;
    pub const DEFAULT_NUM_DAYS: u32 = 10;
    pub const DEFAULT_PLANNING_DAYS_PER_WEEK: u32 = 5;
    pub const DEFAULT_AVG_PIG_WEIGHT_KG: f64 = 110.0;
    pub const DEFAULT_PRICE_PER_KG: f64 = 1.56;
    pub const DEFAULT_TRUCK_COST_PER_WEEK: f64 = 2000.0;
    pub const DEFAULT_FUEL_COST_PER_KM: f64 = 0.35;
    pub const DEFAULT_WEEKLY_WEIGHT_GAIN_KG: f64 = 0.0;
    pub const DEFAULT_WEEKLY_DECLINE_RATE: f64 = 0.15;

    pub const MAX_NUM_DAYS: u32 = 30;
    pub const MAX_PLANNING_DAYS_PER_WEEK: u32 = 7;

    /// Hard cap on pickup stops per truck route.
    pub const MAX_STOPS_PER_ROUTE: usize = 3;

    /// Per-vehicle fixed cost in the routing objective, in metres: the
    /// expected maximum travel a saved vehicle could ever be worth. Any
    /// plausible route-length delta stays below this, so the search prefers
    /// fewer trucks and breaks ties by shorter travel.
    pub const VEHICLE_FIXED_COST_M: i64 = 500_000;

    /// Fitness penalty per head of capacity overload, in metres. Must dwarf
    /// both travel and the vehicle fixed cost so an overloaded tour never
    /// beats a feasible one.
    pub const CAPACITY_PENALTY_M: i64 = 10_000_000;

    /// Fitness penalty per stop beyond MAX_STOPS_PER_ROUTE, in metres.
    pub const STOP_CAP_PENALTY_M: i64 = 10_000_000;

    /// Wall-clock budget for one day's routing solve.
    pub const SOLVER_TIME_BUDGET_SECS: u64 = 15;
    pub const SOLVER_MAX_ITERATIONS: usize = 2_000;
    pub const SOLVER_SEED: u64 = 67;
    pub const SOLVER_TABU_LEN: usize = 12;

    /// The weekly truck cost prorates over calendar days (Cw / 7), while the
    /// visit cadence runs on planning weeks of `planning_days_per_week` days.
    /// The two conventions are independent on purpose.
    pub const TRUCK_COST_PRORATE_DAYS: f64 = 7.0;
}
