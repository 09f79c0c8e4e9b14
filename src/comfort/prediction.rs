use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::domain::GridShape;

/// Half-width of the neutral comfort band.
pub const NEUTRAL_BAND: f64 = 0.5;

/// Categorical thermal state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComfortState {
    TooCold,
    Neutral,
    TooWarm,
}

impl ComfortState {
    /// Band a continuous score. The closed interval `[-0.5, 0.5]` is neutral;
    /// a NaN score compares false everywhere and lands there too.
    pub fn from_score(score: f64) -> Self {
        if score > NEUTRAL_BAND {
            ComfortState::TooWarm
        } else if score < -NEUTRAL_BAND {
            ComfortState::TooCold
        } else {
            ComfortState::Neutral
        }
    }

    pub fn label(self) -> i8 {
        match self {
            ComfortState::TooCold => -1,
            ComfortState::Neutral => 0,
            ComfortState::TooWarm => 1,
        }
    }
}

/// Band every cell of a score grid into `{-1, 0, 1}`.
pub fn discretize(scores: &ArrayView2<'_, f64>) -> Array2<i8> {
    scores.mapv(|s| ComfortState::from_score(s).label())
}

/// Time × point comfort result of one engine run.
#[derive(Debug, Clone, PartialEq)]
pub enum ComfortPrediction {
    Continuous(Array2<f64>),
    Categorical(Array2<i8>),
}

impl ComfortPrediction {
    pub fn shape(&self) -> GridShape {
        match self {
            ComfortPrediction::Continuous(g) => GridShape::of(&g.view()),
            ComfortPrediction::Categorical(g) => GridShape::of(&g.view()),
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, ComfortPrediction::Continuous(_))
    }

    /// Cell values as floats, the form the metrics consume.
    pub fn scores(&self) -> Array2<f64> {
        match self {
            ComfortPrediction::Continuous(g) => g.clone(),
            ComfortPrediction::Categorical(g) => g.mapv(f64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 0)]
    #[case(-0.5, 0)]
    #[case(0.0, 0)]
    #[case(0.51, 1)]
    #[case(-0.51, -1)]
    #[case(3.0, 1)]
    #[case(-3.0, -1)]
    #[case(f64::NAN, 0)]
    fn test_band_boundaries(#[case] score: f64, #[case] expected: i8) {
        assert_eq!(ComfortState::from_score(score).label(), expected);
    }

    #[test]
    fn test_discretize_grid() {
        let scores = arr2(&[[-1.2, -0.5, 0.2], [0.5, 0.7, 2.0]]);
        assert_eq!(discretize(&scores.view()), arr2(&[[-1, 0, 0], [0, 1, 1]]));
    }

    #[test]
    fn test_categorical_scores_as_floats() {
        let pred = ComfortPrediction::Categorical(arr2(&[[-1, 0], [1, 0]]));
        assert!(!pred.is_continuous());
        assert_eq!(pred.shape(), GridShape::new(2, 2));
        assert_eq!(pred.scores(), arr2(&[[-1.0, 0.0], [1.0, 0.0]]));
    }

    proptest! {
        #[test]
        fn bands_are_exhaustive_and_disjoint(score in -10.0f64..10.0) {
            let warm = score > 0.5;
            let cold = score < -0.5;
            let neutral = (-0.5..=0.5).contains(&score);
            prop_assert_eq!(warm as u8 + cold as u8 + neutral as u8, 1);

            let label = ComfortState::from_score(score).label();
            prop_assert!(label == -1 || label == 0 || label == 1);
            prop_assert_eq!(label == 1, warm);
            prop_assert_eq!(label == -1, cold);
        }
    }
}
