//! Bookkeeping for items created during a run.
//!
//! A [`FixtureRegistry`] lives for one test session. Scenarios record every
//! identifier they create; once all scenarios have finished the runner hands
//! the registry to [`FixtureRegistry::drain_and_cleanup`], which consumes it,
//! so nothing can be recorded after cleanup has started.

use serde::Serialize;
use tracing::{info, warn};

use crate::api::AdsApi;
use crate::extract::ResourceId;

#[derive(Debug, Default)]
pub struct FixtureRegistry {
    ids: Vec<ResourceId>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an identifier. Duplicates are kept.
    pub fn record(&mut self, id: ResourceId) {
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ResourceId] {
        &self.ids
    }

    /// Issue one deletion per recorded identifier, in recording order.
    ///
    /// Each attempt is independent: a rejected or failed deletion is logged
    /// and the pass moves on to the next entry.
    pub async fn drain_and_cleanup<A>(self, api: &A) -> CleanupReport
    where
        A: AdsApi + ?Sized,
    {
        info!(count = self.ids.len(), "cleaning up test data");

        let mut outcomes = Vec::with_capacity(self.ids.len());
        for id in self.ids {
            let status = match api.delete_item(id.as_str()).await {
                Ok(response) if response.is_success() => CleanupStatus::Deleted {
                    status: response.status,
                },
                Ok(response) => {
                    warn!(%id, status = response.status, "service refused to delete fixture");
                    CleanupStatus::Rejected {
                        status: response.status,
                        body: response.body_preview(200).to_string(),
                    }
                }
                Err(err) => {
                    warn!(%id, error = %err, "failed to delete fixture");
                    CleanupStatus::Failed {
                        error: err.to_string(),
                    }
                }
            };
            outcomes.push(CleanupOutcome { id, status });
        }

        CleanupReport { outcomes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CleanupStatus {
    Deleted { status: u16 },
    Rejected { status: u16, body: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    pub id: ResourceId,
    #[serde(flatten)]
    pub status: CleanupStatus,
}

impl CleanupOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self.status, CleanupStatus::Deleted { .. })
    }
}

/// Per-entry result of a cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub outcomes: Vec<CleanupOutcome>,
}

impl CleanupReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn deleted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_deleted()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CleanupOutcome> {
        self.outcomes.iter().filter(|o| !o.is_deleted())
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(CleanupOutcome::is_deleted)
    }
}
