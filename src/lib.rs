//! Multi-day pig collection planner.
//!
//! Plans the collection of pigs from distributed farms to a single
//! slaughterhouse over a planning horizon: a capacitated per-day routing
//! solver with a greedy fallback, a weekly visit cadence with inventory
//! decline and live-weight growth, and an economic evaluation of every day
//! (penalty-adjusted revenue, load-weighted trip cost, prorated truck cost).
//!
//! # Example
//!
//! ```no_run
//! use pigroute::domain::types::PlanRequest;
//! use pigroute::planner::Planner;
//!
//! let request: PlanRequest = serde_json::from_str("...").unwrap();
//! let result = Planner::default().plan(&request).unwrap();
//! println!("net profit: {:.2}", result.summary.total_net_profit_euros);
//! ```

pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod planner;
pub mod solver;
pub mod transport;

pub use domain::types::{PlanRequest, PlanResult};
pub use error::PlanError;
pub use planner::Planner;
