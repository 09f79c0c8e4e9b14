//! # Environment Store
//!
//! Holds the named parameter grids of one simulated space. The first grid
//! inserted fixes the time × point shape; every later grid must match it.

use indexmap::IndexMap;
use ndarray::{Array3, ArrayView2, Axis};
use std::path::Path;
use tracing::debug;

use super::{GridShape, ParameterGrid};
use crate::error::{ComfortError, Result};
use crate::io::loader;

/// Well-known parameter names used by the comfort models.
pub mod names {
    pub const AIR_TEMPERATURE: &str = "air_temperature";
    pub const MEAN_RADIANT_TEMPERATURE: &str = "mean_radiant_temperature";
    pub const RELATIVE_HUMIDITY: &str = "relative_humidity";
    pub const AIR_VELOCITY: &str = "air_velocity";
}

/// Named parameter grids sharing one shape, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentStore {
    shape: Option<GridShape>,
    parameters: IndexMap<String, ParameterGrid>,
}

impl EnvironmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace a named grid.
    ///
    /// The first call fixes the environment shape. A grid of any other shape
    /// is rejected with [`ComfortError::ShapeMismatch`] and the store is left
    /// exactly as it was. Replacing an existing name keeps its original
    /// position in [`list_parameters`](Self::list_parameters).
    pub fn set_parameter(&mut self, name: impl Into<String>, grid: ParameterGrid) -> Result<()> {
        let name = name.into();
        let found = GridShape::of(&grid.view());

        match self.shape {
            Some(expected) if expected != found => {
                return Err(ComfortError::ShapeMismatch {
                    name,
                    expected,
                    found,
                });
            }
            Some(_) => {}
            None => {
                debug!(parameter = %name, shape = %found, "environment shape established");
                self.shape = Some(found);
            }
        }

        let replaced = self.parameters.insert(name.clone(), grid).is_some();
        debug!(parameter = %name, replaced, "parameter stored");
        Ok(())
    }

    /// Read a header-less delimited grid file and store it under `name`.
    pub fn load_parameter(&mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let grid = loader::load_grid(path.as_ref())?;
        self.set_parameter(name, grid)
    }

    pub fn get_parameter(&self, name: &str) -> Result<&ParameterGrid> {
        self.parameters
            .get(name)
            .ok_or_else(|| ComfortError::KeyNotFound(name.to_string()))
    }

    /// Like [`get_parameter`](Self::get_parameter) but reports the name as a
    /// missing model input instead of an unknown key.
    pub fn require(&self, name: &str) -> Result<ArrayView2<'_, f64>> {
        self.parameters
            .get(name)
            .map(|g| g.view())
            .ok_or_else(|| ComfortError::MissingParameter(name.to_string()))
    }

    /// Parameter names in insertion order.
    pub fn list_parameters(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn shape(&self) -> Option<GridShape> {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Stack every grid into a parameter × time × point tensor.
    ///
    /// Built on demand from the stored grids in insertion order; `None` while
    /// the store is empty.
    pub fn stacked(&self) -> Option<Array3<f64>> {
        if self.parameters.is_empty() {
            return None;
        }
        let views: Vec<ArrayView2<'_, f64>> = self.parameters.values().map(|g| g.view()).collect();
        // All grids share one shape, so stacking cannot fail.
        ndarray::stack(Axis(0), &views).ok()
    }
}
