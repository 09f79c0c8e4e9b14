use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    annual_point_heterogeneity, hourly_spatial_heterogeneity, thi_area, thi_point,
    SpatialAutonomyResult,
};
use crate::error::Result;

/// Heterogeneity summary of one parameter grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeterogeneitySummary {
    pub parameter: String,
    /// THI over area (2 decimals)
    pub thi_area: f64,
    /// THI over points (1 decimal)
    pub thi_point: f64,
    /// Spatial range per timestep
    pub hourly_spatial: Vec<f64>,
    /// Temporal range per point
    pub annual_point: Vec<f64>,
}

impl HeterogeneitySummary {
    pub fn calculate(parameter: impl Into<String>, grid: &ArrayView2<'_, f64>) -> Result<Self> {
        Ok(Self {
            parameter: parameter.into(),
            thi_area: thi_area(grid)?,
            thi_point: thi_point(grid)?,
            hourly_spatial: hourly_spatial_heterogeneity(grid)?.to_vec(),
            annual_point: annual_point_heterogeneity(grid)?.to_vec(),
        })
    }
}

/// Autonomy summary, without the cell mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutonomySummary {
    pub area_threshold: f64,
    pub annual_autonomy: f64,
    pub hourly_autonomy: Vec<f64>,
    /// Whether only occupied hours were considered
    pub occupied_only: bool,
}

impl AutonomySummary {
    pub fn from_result(result: &SpatialAutonomyResult, area_threshold: f64, occupied_only: bool) -> Self {
        Self {
            area_threshold,
            annual_autonomy: result.annual_autonomy,
            hourly_autonomy: result.hourly_autonomy.to_vec(),
            occupied_only,
        }
    }
}

/// Everything one analysis run reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heterogeneity: Option<HeterogeneitySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<AutonomySummary>,
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metrics:")?;
        if let Some(h) = &self.heterogeneity {
            write!(
                f,
                " {} THI_area={:.2}, THI_point={:.1}",
                h.parameter, h.thi_area, h.thi_point
            )?;
        }
        if let Some(a) = &self.autonomy {
            write!(
                f,
                " sTA={:.2} (area>{:.2}{})",
                a.annual_autonomy,
                a.area_threshold,
                if a.occupied_only { ", occupied" } else { "" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::spatial_autonomy;
    use ndarray::arr2;

    #[test]
    fn test_report_serializes_without_empty_sections() {
        let grid = arr2(&[[20.0, 22.0], [21.0, 25.0]]);
        let report = MetricsReport {
            heterogeneity: Some(HeterogeneitySummary::calculate("air_temperature", &grid.view()).unwrap()),
            autonomy: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["heterogeneity"]["thi_area"], 3.0);
        assert_eq!(json["heterogeneity"]["annual_point"], serde_json::json!([1.0, 3.0]));
        assert!(json.get("autonomy").is_none());
    }

    #[test]
    fn test_display() {
        let prediction = arr2(&[[0.0, 0.0], [0.0, 1.0]]);
        let result = spatial_autonomy(&prediction.view(), 0.8).unwrap();
        let report = MetricsReport {
            heterogeneity: None,
            autonomy: Some(AutonomySummary::from_result(&result, 0.8, true)),
        };

        assert_eq!(report.to_string(), "Metrics: sTA=0.50 (area>0.80, occupied)");
    }
}
