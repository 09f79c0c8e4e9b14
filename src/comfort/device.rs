//! Personal comfort devices.
//!
//! A device nudges the environment at every cell where the occupant's
//! preference asks for it. Preferences are signed: negative wants cooler,
//! positive wants warmer, and the magnitude scales the device effect.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use crate::domain::{names, EnvironmentStore, GridShape};
use crate::error::{ComfortError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Heater,
    Cooler,
    Fan,
}

impl DeviceKind {
    /// Whether the device runs for a given preference.
    pub fn engages(self, preference: f64) -> bool {
        match self {
            DeviceKind::Heater => preference > 0.0,
            DeviceKind::Cooler | DeviceKind::Fan => preference < 0.0,
        }
    }
}

/// Change per unit of preference magnitude, one field per parameter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceEffect {
    #[serde(default)]
    pub air_temperature: f64,
    #[serde(default)]
    pub relative_humidity: f64,
    #[serde(default)]
    pub mean_radiant_temperature: f64,
    #[serde(default)]
    pub air_velocity: f64,
}

impl DeviceEffect {
    fn deltas(&self) -> [(&'static str, f64); 4] {
        [
            (names::AIR_TEMPERATURE, self.air_temperature),
            (names::RELATIVE_HUMIDITY, self.relative_humidity),
            (names::MEAN_RADIANT_TEMPERATURE, self.mean_radiant_temperature),
            (names::AIR_VELOCITY, self.air_velocity),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalComfortDevice {
    pub kind: DeviceKind,
    /// Rated power (W)
    pub power_w: u32,
    pub effect: DeviceEffect,
}

impl PersonalComfortDevice {
    pub fn new(kind: DeviceKind, power_w: u32, effect: DeviceEffect) -> Self {
        Self { kind, power_w, effect }
    }

    /// Effect weight per cell: `|preference|` where the device engages, 0 elsewhere.
    pub fn usage(&self, preference: &ArrayView2<'_, f64>) -> Array2<f64> {
        preference.mapv(|p| if self.kind.engages(p) { p.abs() } else { 0.0 })
    }

    /// Add the weighted effect to every affected parameter grid.
    ///
    /// Every parameter with a non-zero effect must already be stored. On any
    /// error the environment is left unchanged.
    pub fn apply(&self, env: &mut EnvironmentStore, preference: &ArrayView2<'_, f64>) -> Result<()> {
        let found = GridShape::of(preference);
        if let Some(expected) = env.shape() {
            if expected != found {
                return Err(ComfortError::ShapeMismatch {
                    name: "comfort preference".to_string(),
                    expected,
                    found,
                });
            }
        }

        let usage = self.usage(preference);
        let mut updated = Vec::new();
        for (name, delta) in self.effect.deltas() {
            if delta == 0.0 {
                continue;
            }
            let current = env
                .get_parameter(name)
                .map_err(|_| ComfortError::MissingParameter(name.to_string()))?;
            updated.push((name, current + &usage.mapv(|w| w * delta)));
        }

        let engaged = usage.iter().filter(|&&w| w > 0.0).count();
        for (name, grid) in updated {
            env.set_parameter(name, grid)?;
        }

        info!(kind = %self.kind, power_w = self.power_w, engaged, "comfort device applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use rstest::rstest;

    fn environment() -> EnvironmentStore {
        let mut env = EnvironmentStore::new();
        env.set_parameter(names::AIR_TEMPERATURE, arr2(&[[22.0, 26.0], [20.0, 24.0]]))
            .unwrap();
        env.set_parameter(names::AIR_VELOCITY, arr2(&[[0.1, 0.1], [0.1, 0.1]]))
            .unwrap();
        env
    }

    fn preference() -> Array2<f64> {
        arr2(&[[0.0, -1.0], [2.0, -0.5]])
    }

    #[rstest]
    #[case(DeviceKind::Heater, 1.0, true)]
    #[case(DeviceKind::Heater, -1.0, false)]
    #[case(DeviceKind::Cooler, -1.0, true)]
    #[case(DeviceKind::Cooler, 1.0, false)]
    #[case(DeviceKind::Fan, -0.2, true)]
    #[case(DeviceKind::Fan, 0.0, false)]
    #[case(DeviceKind::Heater, f64::NAN, false)]
    fn test_engagement(#[case] kind: DeviceKind, #[case] preference: f64, #[case] expected: bool) {
        assert_eq!(kind.engages(preference), expected);
    }

    #[test]
    fn test_heater_warms_where_warmth_is_wanted() {
        let mut env = environment();
        let heater = PersonalComfortDevice::new(
            DeviceKind::Heater,
            200,
            DeviceEffect {
                air_temperature: 1.5,
                ..Default::default()
            },
        );

        heater.apply(&mut env, &preference().view()).unwrap();
        assert_eq!(
            env.get_parameter(names::AIR_TEMPERATURE).unwrap(),
            &arr2(&[[22.0, 26.0], [23.0, 24.0]])
        );
    }

    #[test]
    fn test_fan_scales_with_preference_magnitude() {
        let mut env = environment();
        let fan = PersonalComfortDevice::new(
            DeviceKind::Fan,
            40,
            DeviceEffect {
                air_velocity: 0.4,
                ..Default::default()
            },
        );

        fan.apply(&mut env, &preference().view()).unwrap();
        let velocity = env.get_parameter(names::AIR_VELOCITY).unwrap();
        assert_eq!(velocity[[0, 0]], 0.1);
        assert!((velocity[[0, 1]] - 0.5).abs() < 1e-12);
        assert_eq!(velocity[[1, 0]], 0.1);
        assert!((velocity[[1, 1]] - 0.3).abs() < 1e-12);
        assert_eq!(env.get_parameter(names::AIR_TEMPERATURE).unwrap()[[0, 1]], 26.0);
    }

    #[test]
    fn test_missing_parameter_leaves_environment_unchanged() {
        let mut env = environment();
        let cooler = PersonalComfortDevice::new(
            DeviceKind::Cooler,
            500,
            DeviceEffect {
                air_temperature: -2.0,
                relative_humidity: -5.0,
                ..Default::default()
            },
        );

        let err = cooler.apply(&mut env, &preference().view()).unwrap_err();
        assert!(matches!(err, ComfortError::MissingParameter(ref name) if name == names::RELATIVE_HUMIDITY));
        assert_eq!(
            env.get_parameter(names::AIR_TEMPERATURE).unwrap(),
            &arr2(&[[22.0, 26.0], [20.0, 24.0]])
        );
    }

    #[test]
    fn test_preference_shape_must_match() {
        let mut env = environment();
        let heater = PersonalComfortDevice::new(DeviceKind::Heater, 200, DeviceEffect::default());
        let err = heater.apply(&mut env, &arr2(&[[1.0, 1.0, 1.0]]).view()).unwrap_err();
        assert!(matches!(err, ComfortError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!("FAN".parse::<DeviceKind>().unwrap(), DeviceKind::Fan);
        assert_eq!(DeviceKind::Cooler.to_string(), "cooler");
    }
}
