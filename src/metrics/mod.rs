//! # Metrics Module
//!
//! Pure aggregations over time × point grids. Every reduction names the axis
//! it collapses; nothing here keeps state between calls.
//!
//! - **autonomy**: spatial thermal autonomy from a comfort prediction
//! - **heterogeneity**: per-axis ranges and the THI medians
//! - **banding**: three-way classification of raw values against limits
//! - **offset**: SET-predicted sensation offsets and the five offset classes
//! - **report**: serializable summaries for export

pub mod autonomy;
pub mod banding;
pub mod heterogeneity;
pub mod offset;
pub mod report;

pub use autonomy::{spatial_autonomy, SpatialAutonomyResult, DEFAULT_AREA_THRESHOLD};
pub use banding::temperature_range_classification;
pub use heterogeneity::{annual_point_heterogeneity, hourly_spatial_heterogeneity, thi_area, thi_point};
pub use offset::{
    classify_offsets, offset_class, personal_mean_offset, sensation_offset, set_to_tsv, SET_TSV_COEFFICIENTS,
};
pub use report::{AutonomySummary, HeterogeneitySummary, MetricsReport};

/// Round to `decimals` places, ties to even (numpy `round` semantics).
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(4.25, 1), 4.2);
        assert_eq!(round_to(0.666_666, 2), 0.67);
    }
}
