//! Seam to the external thermal-comfort model.
//!
//! The physiological model itself lives outside this crate. The engine hands
//! it whole time × point grids and expects a same-shaped grid back.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fixed physiological inputs applied uniformly to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PhysiologicalParams {
    /// Clothing insulation (clo)
    #[validate(range(min = 0.0, max = 2.0))]
    pub clothing_clo: f64,
    /// Metabolic rate (met)
    #[validate(range(min = 0.8, max = 4.0))]
    pub metabolic_rate_met: f64,
    /// Relative air velocity (m/s)
    #[validate(range(min = 0.0, max = 2.0))]
    pub relative_air_velocity_ms: f64,
}

impl Default for PhysiologicalParams {
    fn default() -> Self {
        Self {
            clothing_clo: 0.5,
            metabolic_rate_met: 1.2,
            relative_air_velocity_ms: 0.1,
        }
    }
}

/// Vectorized model inputs, all sharing the environment shape.
#[derive(Debug, Clone)]
pub struct ComfortInputs<'a> {
    pub air_temperature: ArrayView2<'a, f64>,
    pub mean_radiant_temperature: ArrayView2<'a, f64>,
    pub relative_humidity: ArrayView2<'a, f64>,
    pub relative_air_velocity: ArrayView2<'a, f64>,
}

impl ComfortInputs<'_> {
    pub fn dim(&self) -> (usize, usize) {
        self.air_temperature.dim()
    }
}

/// A comfort-index function evaluated once per full grid.
pub trait ComfortModel {
    fn name(&self) -> &str {
        "external"
    }

    fn evaluate(&self, inputs: &ComfortInputs<'_>, params: &PhysiologicalParams) -> Array2<f64>;
}

impl<F> ComfortModel for F
where
    F: Fn(&ComfortInputs<'_>, &PhysiologicalParams) -> Array2<f64>,
{
    fn evaluate(&self, inputs: &ComfortInputs<'_>, params: &PhysiologicalParams) -> Array2<f64> {
        self(inputs, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn operative_temperature(i: &ComfortInputs<'_>, _: &PhysiologicalParams) -> Array2<f64> {
        (&i.air_temperature + &i.mean_radiant_temperature) / 2.0
    }

    #[test]
    fn test_plain_function_is_a_model() {
        let ta = arr2(&[[20.0, 22.0]]);
        let tr = arr2(&[[21.0, 23.0]]);
        let rh = arr2(&[[50.0, 50.0]]);
        let vr = arr2(&[[0.1, 0.1]]);
        let inputs = ComfortInputs {
            air_temperature: ta.view(),
            mean_radiant_temperature: tr.view(),
            relative_humidity: rh.view(),
            relative_air_velocity: vr.view(),
        };

        let model = operative_temperature;
        let out = model.evaluate(&inputs, &PhysiologicalParams::default());
        assert_eq!(out, arr2(&[[20.5, 22.5]]));
        assert_eq!(model.name(), "external");
    }

    #[test]
    fn test_default_params_validate() {
        assert!(PhysiologicalParams::default().validate().is_ok());

        let bad = PhysiologicalParams {
            clothing_clo: -1.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
