use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;
use validator::{Validate, ValidationError};

use crate::comfort::{ComfortEngine, ComfortIndexKind, ComfortModel, PhysiologicalParams};
use crate::domain::names;
use crate::metrics::DEFAULT_AREA_THRESHOLD;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[validate(nested)]
    pub comfort: ComfortConfig,
    #[validate(nested)]
    pub metrics: MetricsConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub parameters: Vec<ParameterSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSource {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ComfortConfig {
    #[serde(default = "default_index")]
    pub index: ComfortIndexKind,
    #[serde(default = "default_true")]
    pub continuous: bool,
    /// Precomputed prediction grid, one row per timestep
    pub prediction_path: Option<PathBuf>,
    #[serde(default)]
    #[validate(nested)]
    pub physiology: PhysiologicalParams,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_band"))]
pub struct MetricsConfig {
    #[serde(default = "default_area_threshold")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub area_threshold: f64,
    pub band_lower: f64,
    pub band_upper: f64,
    #[serde(default = "default_heterogeneity_parameter")]
    pub heterogeneity_parameter: String,
    #[serde(default)]
    pub occupied_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub format: String,
    pub directory: PathBuf,
}

impl ComfortConfig {
    /// Engine for the configured index and physiology around an external model.
    pub fn engine(&self, model: Box<dyn ComfortModel>) -> ComfortEngine {
        ComfortEngine::new(self.index, model, self.physiology)
    }
}

fn default_index() -> ComfortIndexKind {
    ComfortIndexKind::Pmv
}

fn default_true() -> bool {
    true
}

fn default_area_threshold() -> f64 {
    DEFAULT_AREA_THRESHOLD
}

fn default_heterogeneity_parameter() -> String {
    names::AIR_TEMPERATURE.to_string()
}

fn validate_band(metrics: &MetricsConfig) -> Result<(), ValidationError> {
    if metrics.band_lower < metrics.band_upper {
        Ok(())
    } else {
        Err(ValidationError::new("band_lower must be below band_upper"))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::extract(
            Figment::new()
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("COMFORT__").split("__")),
        )
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::extract(Figment::new().merge(Toml::string(toml)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
