//! One configured analysis run over a loaded environment.
//!
//! The comfort prediction comes from an injected model when one is supplied,
//! and from the precomputed PMV grid at `comfort.prediction_path` otherwise.
//! The prediction is resolved before anything is written, so a rejected
//! configuration leaves the export directory untouched.

use ndarray::{ArrayView2, Axis};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::comfort::{discretize, ComfortEngine, ComfortIndexKind, ComfortModel, ComfortPrediction};
use crate::config::Config;
use crate::domain::EnvironmentStore;
use crate::error::{ComfortError, Result};
use crate::io::{export_grid, export_report, load_grid, load_grid_with_shape, ExportFormat};
use crate::metrics::{
    spatial_autonomy, temperature_range_classification, AutonomySummary, HeterogeneitySummary,
    MetricsReport,
};
use crate::schedule::{OccupancySchedule, YEAR_HOURS};

pub const REPORT_FILE: &str = "metrics.json";

pub struct Analysis<'a> {
    config: &'a Config,
    engine: Option<ComfortEngine>,
}

impl<'a> Analysis<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, engine: None }
    }

    /// Compute predictions with `model`, using the configured index and physiology.
    pub fn with_model(mut self, model: impl ComfortModel + 'static) -> Self {
        self.engine = Some(self.config.comfort.engine(Box::new(model)));
        self
    }

    pub fn run(&mut self, env: &EnvironmentStore) -> Result<MetricsReport> {
        let config = self.config;
        let prediction = self.prediction(env)?;

        let directory = &config.export.directory;
        fs::create_dir_all(directory)?;
        let mut report = MetricsReport::default();

        let parameter = &config.metrics.heterogeneity_parameter;
        if env.contains(parameter) {
            let grid = env.require(parameter)?;
            report.heterogeneity = Some(HeterogeneitySummary::calculate(parameter.as_str(), &grid)?);

            let bands = temperature_range_classification(&grid, config.metrics.band_lower, config.metrics.band_upper)?
                .mapv(f64::from);
            export(&bands.view(), &config.export.format, directory, "temperature_bands")?;
        } else {
            warn!(parameter = %parameter, "heterogeneity parameter not loaded, skipping");
        }

        if let Some(prediction) = prediction {
            let mut scores = prediction.scores();
            let mut occupied_only = false;
            if config.metrics.occupied_only {
                if scores.nrows() >= YEAR_HOURS {
                    scores = OccupancySchedule::office_year().filter_rows(&scores.view());
                    occupied_only = true;
                } else {
                    warn!(
                        timesteps = scores.nrows(),
                        "prediction shorter than a full year, using every timestep"
                    );
                }
            }

            let result = spatial_autonomy(&scores.view(), config.metrics.area_threshold)?;
            let hourly = result.hourly_autonomy.view().insert_axis(Axis(1));
            export(&hourly, &config.export.format, directory, "hourly_autonomy")?;
            report.autonomy = Some(AutonomySummary::from_result(
                &result,
                config.metrics.area_threshold,
                occupied_only,
            ));
        }

        export_report(&report, &directory.join(REPORT_FILE))?;
        info!(%report, "analysis complete");
        Ok(report)
    }

    fn prediction(&mut self, env: &EnvironmentStore) -> Result<Option<ComfortPrediction>> {
        let config = self.config;
        let comfort = &config.comfort;

        if let Some(engine) = self.engine.as_mut() {
            if comfort.prediction_path.is_some() {
                warn!("comfort model supplied, ignoring prediction_path");
            }
            return engine.compute(env, comfort.continuous).cloned().map(Some);
        }

        // A precomputed grid holds PMV scores; nothing else can be produced.
        if comfort.index != ComfortIndexKind::Pmv {
            return Err(ComfortError::NotImplemented(comfort.index.to_string()));
        }

        let Some(path) = &comfort.prediction_path else {
            warn!("no comfort model or prediction grid configured, skipping spatial autonomy");
            return Ok(None);
        };

        debug!(
            path = %path.display(),
            clothing_clo = comfort.physiology.clothing_clo,
            "physiology only applies to an injected model"
        );
        let grid = match env.shape() {
            Some(shape) => load_grid_with_shape(path, shape)?,
            None => load_grid(path)?,
        };
        Ok(Some(if comfort.continuous {
            ComfortPrediction::Continuous(grid)
        } else {
            ComfortPrediction::Categorical(discretize(&grid.view()))
        }))
    }
}

/// Export a grid, tolerating an unknown format tag.
fn export(grid: &ArrayView2<'_, f64>, tag: &str, directory: &Path, stem: &str) -> Result<()> {
    let extension = ExportFormat::parse_tag(tag).map_or("out", |f| f.extension());
    let path = directory.join(format!("{stem}.{extension}"));
    match export_grid(grid, tag, &path) {
        Err(e) if !e.is_fatal() => Ok(()),
        other => other,
    }
}
