use ndarray::{Array2, ArrayView2};

use crate::error::{ComfortError, Result};

/// Classify each cell against a `[lower, upper]` band.
///
/// `v <= lower` is -1, `v >= upper` is 1 and anything strictly between is 0.
/// The band must satisfy `lower < upper`; NaN cells fall in the middle band.
pub fn temperature_range_classification(
    grid: &ArrayView2<'_, f64>,
    lower: f64,
    upper: f64,
) -> Result<Array2<i8>> {
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(ComfortError::InvalidBand { lower, upper });
    }

    Ok(grid.mapv(|v| {
        if v <= lower {
            -1
        } else if v >= upper {
            1
        } else {
            0
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_classification() {
        let grid = arr2(&[[18.0, 20.0, 21.0], [24.0, 26.0, 30.0]]);
        let bands = temperature_range_classification(&grid.view(), 20.0, 26.0).unwrap();
        assert_eq!(bands, arr2(&[[-1, -1, 0], [0, 1, 1]]));
    }

    #[rstest]
    #[case(26.0, 20.0)]
    #[case(22.0, 22.0)]
    #[case(f64::NAN, 22.0)]
    fn test_invalid_band_is_rejected(#[case] lower: f64, #[case] upper: f64) {
        let grid = arr2(&[[21.0]]);
        assert!(matches!(
            temperature_range_classification(&grid.view(), lower, upper),
            Err(ComfortError::InvalidBand { .. })
        ));
    }

    proptest! {
        #[test]
        fn bands_are_exhaustive(v in -100.0f64..100.0, lower in -50.0f64..0.0, width in 0.1f64..50.0) {
            let upper = lower + width;
            let grid = arr2(&[[v]]);
            let band = temperature_range_classification(&grid.view(), lower, upper).unwrap()[[0, 0]];

            let expected = if v <= lower { -1 } else if v >= upper { 1 } else { 0 };
            prop_assert_eq!(band, expected);
        }
    }
}
