//! Functional test suite for the classified-ads HTTP API.
//!
//! [`suite::SuiteRunner`] runs the scenario catalog against an
//! [`api::AdsApi`] implementation, records every item it creates in a
//! [`fixtures::FixtureRegistry`] and deletes them once the run is over.
//! Identifiers are read out of creation responses by [`extract::extract_id`].

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod fixtures;
pub mod http;
pub mod report;
pub mod suite;
pub mod telemetry;

pub use error::{ClientError, ConfigError, ReportError};
pub use extract::{CreationResponse, ResourceId, extract_id};
pub use fixtures::{CleanupReport, FixtureRegistry};
