//! Scenario catalog for the classified-ads API and the runner executing it.

mod cases;
mod check;
mod runner;
mod scenario;

pub use check::{CheckFailure, CheckResult};
pub use runner::SuiteRunner;
pub use scenario::{Scenario, ScenarioFilter, ScenarioGroup, ScenarioOutcome};
