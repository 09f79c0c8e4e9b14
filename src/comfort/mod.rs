//! # Comfort Module
//!
//! Computes per-cell comfort predictions from an environment:
//!
//! - **model**: the seam to the external comfort-index function
//! - **engine**: kind dispatch, input assembly and result caching
//! - **prediction**: continuous and categorical prediction grids
//! - **device**: personal comfort devices acting on the environment

pub mod device;
pub mod engine;
pub mod model;
pub mod prediction;

pub use device::{DeviceEffect, DeviceKind, PersonalComfortDevice};
pub use engine::{ComfortEngine, ComfortIndexKind};
pub use model::{ComfortInputs, ComfortModel, PhysiologicalParams};
pub use prediction::{discretize, ComfortPrediction, ComfortState, NEUTRAL_BAND};
