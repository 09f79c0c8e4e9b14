//! Heterogeneity: the range (max - min) of a parameter along one axis.
//!
//! NaN cells are skipped; a lane with no finite value yields NaN.

use ndarray::{Array1, ArrayView2};
use statrs::statistics::{Data, Median};

use super::round_to;
use crate::domain::{GridAxis, GridShape};
use crate::error::{ComfortError, Result};

/// Range of every lane after collapsing `reduce`.
fn ranges(grid: &ArrayView2<'_, f64>, reduce: GridAxis) -> Result<Array1<f64>> {
    if reduce.len_in(GridShape::of(grid)) == 0 {
        return Err(ComfortError::EmptyGrid(reduce.name()));
    }

    Ok(grid.map_axis(reduce.axis(), |lane| {
        let (lo, hi) = lane
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo <= hi {
            hi - lo
        } else {
            f64::NAN
        }
    }))
}

fn median(values: &Array1<f64>, kept: GridAxis) -> Result<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return Err(ComfortError::EmptyGrid(kept.name()));
    }
    Ok(Data::new(finite).median())
}

/// Spatial range at each timestep; one value per timestep.
pub fn hourly_spatial_heterogeneity(grid: &ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    ranges(grid, GridAxis::Point)
}

/// Temporal range at each point; one value per point.
pub fn annual_point_heterogeneity(grid: &ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    ranges(grid, GridAxis::Time)
}

/// Median over timesteps of the spatial range, to 2 decimals.
pub fn thi_area(grid: &ArrayView2<'_, f64>) -> Result<f64> {
    let spread = hourly_spatial_heterogeneity(grid)?;
    Ok(round_to(median(&spread, GridAxis::Time)?, 2))
}

/// Median over points of the temporal range, to 1 decimal.
pub fn thi_point(grid: &ArrayView2<'_, f64>) -> Result<f64> {
    let spread = annual_point_heterogeneity(grid)?;
    Ok(round_to(median(&spread, GridAxis::Point)?, 1))
}
