//! Spatial thermal autonomy (sTA).

use ndarray::{Array1, Array2, ArrayView2};
use tracing::debug;

use super::round_to;
use crate::comfort::NEUTRAL_BAND;
use crate::domain::{GridAxis, GridShape};
use crate::error::{ComfortError, Result};

/// Share of points that must be comfortable for a timestep to count.
pub const DEFAULT_AREA_THRESHOLD: f64 = 0.8;

/// Autonomy figures derived together from one comfort snapshot.
///
/// `hourly_autonomy[t]` is the mean of `comfort_mask[t, ..]`, and
/// `annual_autonomy` is the share of timesteps whose hourly value is strictly
/// above the area threshold, rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialAutonomyResult {
    pub annual_autonomy: f64,
    pub hourly_autonomy: Array1<f64>,
    pub comfort_mask: Array2<bool>,
}

impl SpatialAutonomyResult {
    pub fn from_mask(comfort_mask: Array2<bool>, area_threshold: f64) -> Result<Self> {
        let shape = GridShape::of(&comfort_mask.view());
        if shape.timesteps == 0 {
            return Err(ComfortError::EmptyGrid(GridAxis::Time.name()));
        }

        let hourly_autonomy = comfort_mask
            .mapv(|comfortable| if comfortable { 1.0 } else { 0.0 })
            .mean_axis(GridAxis::Point.axis())
            .ok_or(ComfortError::EmptyGrid(GridAxis::Point.name()))?;

        let autonomous = hourly_autonomy.iter().filter(|&&a| a > area_threshold).count();
        let annual_autonomy = round_to(autonomous as f64 / shape.timesteps as f64, 2);

        debug!(
            shape = %shape,
            area_threshold,
            autonomous,
            annual_autonomy,
            "spatial autonomy computed"
        );

        Ok(Self {
            annual_autonomy,
            hourly_autonomy,
            comfort_mask,
        })
    }

    pub fn shape(&self) -> GridShape {
        GridShape::of(&self.comfort_mask.view())
    }

    /// Number of comfortable cells at each timestep.
    pub fn comfortable_points(&self) -> Array1<usize> {
        self.comfort_mask
            .map_axis(GridAxis::Point.axis(), |row| row.iter().filter(|&&c| c).count())
    }
}

/// Mark cells with `|score| <= 0.5` comfortable and aggregate them.
pub fn spatial_autonomy(prediction: &ArrayView2<'_, f64>, area_threshold: f64) -> Result<SpatialAutonomyResult> {
    let mask = prediction.mapv(|score| score.abs() <= NEUTRAL_BAND);
    SpatialAutonomyResult::from_mask(mask, area_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2};

    #[test]
    fn test_all_neutral_is_fully_autonomous() {
        let prediction = Array2::<f64>::zeros((24, 10));
        let result = spatial_autonomy(&prediction.view(), DEFAULT_AREA_THRESHOLD).unwrap();

        assert_eq!(result.annual_autonomy, 1.0);
        assert!(result.hourly_autonomy.iter().all(|&a| a == 1.0));
        assert!(result.comfort_mask.iter().all(|&c| c));
    }

    #[test]
    fn test_all_uncomfortable_has_no_autonomy() {
        let prediction = Array2::from_elem((24, 10), 2.0);
        let result = spatial_autonomy(&prediction.view(), DEFAULT_AREA_THRESHOLD).unwrap();

        assert_eq!(result.annual_autonomy, 0.0);
        assert!(result.hourly_autonomy.iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_mask_aggregation() {
        let mask = arr2(&[[1, 1, 1, 0], [1, 0, 0, 0]]).mapv(|v| v == 1);
        let result = SpatialAutonomyResult::from_mask(mask, 0.5).unwrap();

        assert_eq!(result.hourly_autonomy, arr1(&[0.75, 0.25]));
        assert_eq!(result.annual_autonomy, 0.5);
        assert_eq!(result.comfortable_points(), arr1(&[3, 1]));
    }

    #[test]
    fn test_threshold_is_strict() {
        // Both timesteps have exactly half the points comfortable.
        let prediction = arr2(&[[0.0, 1.0], [0.5, -0.8]]);
        let result = spatial_autonomy(&prediction.view(), 0.5).unwrap();

        assert_eq!(result.hourly_autonomy, arr1(&[0.5, 0.5]));
        assert_eq!(result.annual_autonomy, 0.0);
    }

    #[test]
    fn test_band_edges_are_comfortable() {
        let prediction = arr2(&[[0.5, -0.5, 0.50001]]);
        let result = spatial_autonomy(&prediction.view(), 0.5).unwrap();
        assert_eq!(result.comfort_mask, arr2(&[[true, true, false]]));
    }

    #[test]
    fn test_annual_autonomy_rounds_half_to_even() {
        // 1 of 8 timesteps autonomous: 0.125 rounds to 0.12.
        let mut prediction = Array2::from_elem((8, 2), 3.0);
        prediction.row_mut(0).fill(0.0);
        let result = spatial_autonomy(&prediction.view(), 0.8).unwrap();
        assert_eq!(result.annual_autonomy, 0.12);
    }

    #[test]
    fn test_hourly_matches_mask_mean() {
        let prediction = arr2(&[[0.1, 0.9, -0.2], [1.5, -1.5, 0.0], [0.3, 0.3, 0.3]]);
        let result = spatial_autonomy(&prediction.view(), 0.6).unwrap();

        for (t, row) in result.comfort_mask.rows().into_iter().enumerate() {
            let mean = row.iter().filter(|&&c| c).count() as f64 / row.len() as f64;
            assert_eq!(result.hourly_autonomy[t], mean);
        }
        // t=0 (2/3) and t=2 (3/3) beat 0.6.
        assert_eq!(result.annual_autonomy, 0.67);
    }

    #[test]
    fn test_empty_grids_are_rejected() {
        let no_time = Array2::<f64>::zeros((0, 4));
        assert!(matches!(
            spatial_autonomy(&no_time.view(), 0.8),
            Err(ComfortError::EmptyGrid("time"))
        ));

        let no_points = Array2::<f64>::zeros((4, 0));
        assert!(matches!(
            spatial_autonomy(&no_points.view(), 0.8),
            Err(ComfortError::EmptyGrid("point"))
        ));
    }
}
