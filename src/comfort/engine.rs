//! # Comfort Engine
//!
//! Turns the parameter grids of an [`EnvironmentStore`] into a time × point
//! comfort prediction by calling the injected model for the selected
//! [`ComfortIndexKind`].

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use super::model::{ComfortInputs, ComfortModel, PhysiologicalParams};
use super::prediction::{discretize, ComfortPrediction};
use crate::domain::{names, EnvironmentStore, GridShape};
use crate::error::{ComfortError, Result};

/// Which comfort index the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ComfortIndexKind {
    #[strum(serialize = "PMV")]
    #[serde(rename = "PMV", alias = "pmv")]
    Pmv,
    #[serde(alias = "adaptive")]
    Adaptive,
}

impl ComfortIndexKind {
    /// Parameters that must be present in the environment before computing.
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            ComfortIndexKind::Pmv => &[
                names::AIR_TEMPERATURE,
                names::MEAN_RADIANT_TEMPERATURE,
                names::RELATIVE_HUMIDITY,
            ],
            ComfortIndexKind::Adaptive => &[names::AIR_TEMPERATURE, names::MEAN_RADIANT_TEMPERATURE],
        }
    }
}

pub struct ComfortEngine {
    kind: ComfortIndexKind,
    model: Box<dyn ComfortModel>,
    params: PhysiologicalParams,
    prediction: Option<ComfortPrediction>,
}

impl ComfortEngine {
    pub fn new(kind: ComfortIndexKind, model: Box<dyn ComfortModel>, params: PhysiologicalParams) -> Self {
        Self {
            kind,
            model,
            params,
            prediction: None,
        }
    }

    pub fn pmv(model: impl ComfortModel + 'static) -> Self {
        Self::new(ComfortIndexKind::Pmv, Box::new(model), PhysiologicalParams::default())
    }

    pub fn with_params(mut self, params: PhysiologicalParams) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> ComfortIndexKind {
        self.kind
    }

    pub fn params(&self) -> &PhysiologicalParams {
        &self.params
    }

    /// Compute a prediction for the current environment snapshot.
    ///
    /// With `continuous == false` the raw scores are banded into `{-1, 0, 1}`.
    /// The result replaces any earlier prediction held by the engine.
    pub fn compute(&mut self, env: &EnvironmentStore, continuous: bool) -> Result<&ComfortPrediction> {
        let scores = match self.kind {
            ComfortIndexKind::Pmv => self.evaluate_pmv(env)?,
            ComfortIndexKind::Adaptive => {
                return Err(ComfortError::NotImplemented(self.kind.to_string()));
            }
        };

        let prediction = if continuous {
            ComfortPrediction::Continuous(scores)
        } else {
            ComfortPrediction::Categorical(discretize(&scores.view()))
        };

        info!(
            kind = %self.kind,
            model = self.model.name(),
            shape = %prediction.shape(),
            continuous,
            "comfort prediction computed"
        );

        Ok(self.prediction.insert(prediction))
    }

    /// The most recent prediction.
    pub fn get_prediction(&self) -> Result<&ComfortPrediction> {
        self.prediction.as_ref().ok_or(ComfortError::NotComputed)
    }

    fn evaluate_pmv(&self, env: &EnvironmentStore) -> Result<Array2<f64>> {
        for name in self.kind.required_parameters() {
            if !env.contains(name) {
                return Err(ComfortError::MissingParameter(name.to_string()));
            }
        }

        let air_temperature = env.require(names::AIR_TEMPERATURE)?;
        let expected = GridShape::of(&air_temperature);

        // A stored velocity grid (e.g. after a fan ran) wins over the constant.
        let constant_velocity;
        let relative_air_velocity = if env.contains(names::AIR_VELOCITY) {
            env.require(names::AIR_VELOCITY)?
        } else {
            constant_velocity = Array2::from_elem(expected.as_tuple(), self.params.relative_air_velocity_ms);
            constant_velocity.view()
        };

        let inputs = ComfortInputs {
            air_temperature,
            mean_radiant_temperature: env.require(names::MEAN_RADIANT_TEMPERATURE)?,
            relative_humidity: env.require(names::RELATIVE_HUMIDITY)?,
            relative_air_velocity,
        };

        let scores = self.model.evaluate(&inputs, &self.params);
        let found = GridShape::of(&scores.view());
        if found != expected {
            return Err(ComfortError::ShapeMismatch {
                name: format!("{} model output", self.model.name()),
                expected,
                found,
            });
        }

        Ok(scores)
    }
}
