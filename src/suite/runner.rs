use std::time::Instant;

use tracing::{info, warn};

use crate::api::AdsApi;
use crate::fixtures::FixtureRegistry;
use crate::report::{RunReport, ScenarioResult};

use super::cases::{Session, execute};
use super::scenario::{ScenarioFilter, ScenarioOutcome};

/// Runs scenarios one after another against a single API, then cleans up
/// every item the run created.
pub struct SuiteRunner<A> {
    api: A,
    seller_base: i64,
}

impl<A: AdsApi> SuiteRunner<A> {
    pub fn new(api: A, seller_base: i64) -> Self {
        Self { api, seller_base }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn run(&self, filter: &ScenarioFilter) -> RunReport {
        let started = Instant::now();
        let mut registry = FixtureRegistry::new();
        let mut results = Vec::new();

        info!(seller_base = self.seller_base, "starting run");

        for scenario in filter.select() {
            let scenario_started = Instant::now();
            let mut session = Session {
                api: &self.api,
                registry: &mut registry,
                seller_base: self.seller_base,
            };
            let outcome = execute(scenario, &mut session).await;
            let duration_ms = scenario_started.elapsed().as_millis() as u64;

            match &outcome {
                ScenarioOutcome::Passed => info!(code = scenario.code(), duration_ms, "passed"),
                ScenarioOutcome::Skipped(reason) => {
                    info!(code = scenario.code(), %reason, "skipped")
                }
                ScenarioOutcome::Failed(reason) => {
                    warn!(code = scenario.code(), %reason, "failed")
                }
            }

            results.push(ScenarioResult {
                code: scenario.code(),
                title: scenario.title(),
                group: scenario.group(),
                outcome,
                duration_ms,
            });
        }

        let cleanup = registry.drain_and_cleanup(&self.api).await;
        if !cleanup.is_complete() {
            warn!(
                attempted = cleanup.attempted(),
                deleted = cleanup.deleted(),
                "cleanup left items behind"
            );
        }

        RunReport::new(results, cleanup, started.elapsed())
    }
}
