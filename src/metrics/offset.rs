//! Thermal sensation offsets.
//!
//! The offset is the gap between a recorded thermal sensation vote (TSV) and
//! the vote predicted from standard effective temperature (SET) by a cubic
//! fit to the ASHRAE Global Thermal Comfort Database II. Each spatial point is
//! treated as one occupant: its personal offset is the mean over time, and
//! that mean falls into one of five offset classes.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::debug;

use crate::domain::{GridAxis, GridShape};
use crate::error::{ComfortError, Result};

/// Cubic SET → TSV coefficients, constant term first.
pub const SET_TSV_COEFFICIENTS: [f64; 4] = [-13.58271, 1.36316, -0.04643, 0.00056];

/// Upper edges of the offset classes -2, -1, 0 and 1. Each edge is inclusive;
/// anything above the last edge is class 2.
const OFFSET_CLASS_EDGES: [f64; 4] = [-1.5, -0.5, 0.5, 1.5];

/// Thermal sensation vote predicted from a standard effective temperature.
pub fn set_to_tsv(set: f64) -> f64 {
    SET_TSV_COEFFICIENTS
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * set + c)
}

/// Recorded minus predicted vote, cell by cell.
pub fn sensation_offset(tsv: &ArrayView2<'_, f64>, set: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let expected = GridShape::of(tsv);
    let found = GridShape::of(set);
    if expected != found {
        return Err(ComfortError::ShapeMismatch {
            name: "standard effective temperature".to_string(),
            expected,
            found,
        });
    }

    let mut offset = set.mapv(set_to_tsv);
    offset.zip_mut_with(tsv, |predicted, &recorded| *predicted = recorded - *predicted);
    Ok(offset)
}

/// Mean offset of every point over time.
pub fn personal_mean_offset(offset: &ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    if offset.nrows() == 0 {
        return Err(ComfortError::EmptyGrid(GridAxis::Time.name()));
    }
    offset
        .mean_axis(GridAxis::Time.axis())
        .ok_or(ComfortError::EmptyGrid(GridAxis::Time.name()))
}

/// Five-way class of a personal offset, from -2 (runs cold) to 2 (runs warm).
///
/// `None` for NaN.
pub fn offset_class(offset: f64) -> Option<i8> {
    if offset.is_nan() {
        return None;
    }
    let below = OFFSET_CLASS_EDGES.iter().filter(|&&edge| offset > edge).count();
    Some(below as i8 - 2)
}

pub fn classify_offsets(offsets: &ArrayView1<'_, f64>) -> Array1<Option<i8>> {
    let classes = offsets.mapv(offset_class);
    debug!(
        points = classes.len(),
        unclassified = classes.iter().filter(|c| c.is_none()).count(),
        "offset classes assigned"
    );
    classes
}
