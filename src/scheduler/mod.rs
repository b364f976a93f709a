//! The placement engine and its quality metrics.
//!
//! # Algorithm
//!
//! `GreedyScheduler` is a greedy randomized heuristic: registrations are
//! processed in input order, each shuffles the primary periods and falls
//! back to the overflow band, and the first free room wins. It is not
//! optimal and does not backtrack; demands that find no capacity are
//! reported as shortfalls, never as errors.
//!
//! # KPI
//!
//! `TimetableKpi` computes fill rate, per-group and per-teacher placed
//! hours, and per-room utilization.

mod greedy;
mod kpi;

pub use greedy::{GreedyScheduler, TimetableRequest};
pub use kpi::TimetableKpi;
