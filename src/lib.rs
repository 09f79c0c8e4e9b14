//! Spatial and temporal thermal comfort analysis.
//!
//! Gridded time × point environmental parameters go into an
//! [`EnvironmentStore`](domain::EnvironmentStore), a pluggable comfort model
//! turns them into a prediction grid, and the metrics module aggregates that
//! grid into spatial thermal autonomy and heterogeneity figures.

pub mod comfort;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod schedule;
pub mod telemetry;

pub use error::{ComfortError, Result};
