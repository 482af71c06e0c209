#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ArrayGeometry;
use crate::error::{Error, InvalidParameter};

/// speed of sound in air at about 20°C, in m/s
pub const DEFAULT_PROPAGATION_SPEED: f64 = 343.0;

/// lowest value a response can have, in dB
pub const DEFAULT_FLOOR_DB: f64 = -50.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// in m/s
    pub propagation_speed: f64,

    /// nulls and everything quieter than this gets clamped to it
    ///
    /// there is no upper clamp
    pub floor_db: f64,
}
impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            propagation_speed: DEFAULT_PROPAGATION_SPEED,
            floor_db: DEFAULT_FLOOR_DB,
        }
    }
}
impl EngineConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.propagation_speed.is_finite() && self.propagation_speed > 0.0) {
            return Err(InvalidParameter::PropagationSpeed(self.propagation_speed).into());
        }
        if !self.floor_db.is_finite() {
            return Err(InvalidParameter::Floor(self.floor_db).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConfig {
    /// look angles relative to the steering direction, in degrees
    pub angle_bounds: [f64; 2],

    /// number of samples along the angle axis
    pub angle_resolution: usize,

    /// in Hz
    pub frequency_bounds: [f64; 2],

    /// number of samples along the frequency axis
    pub frequency_resolution: usize,
}
impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            angle_bounds: [-90.0, 90.0],
            angle_resolution: 256,
            frequency_bounds: [0.0, 20_000.0],
            frequency_resolution: 256,
        }
    }
}

/// quantization of the spacing slider
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpacingConfig {
    /// in meters
    pub min: f64,
    pub max: f64,
    pub step: f64,
}
impl Default for SpacingConfig {
    fn default() -> Self {
        SpacingConfig {
            min: 0.005,
            max: 0.4,
            step: 0.005,
        }
    }
}
impl SpacingConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min.is_finite() && self.min > 0.0) {
            return Err(InvalidParameter::Spacing(self.min).into());
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(InvalidParameter::Spacing(self.step).into());
        }
        if !(self.max.is_finite() && self.min <= self.max) {
            return Err(InvalidParameter::AxisBounds { min: self.min, max: self.max }.into());
        }
        Ok(())
    }

    /// highest slider index, the slider goes from 0 to this inclusive
    pub fn max_index(&self) -> usize {
        ((self.max - self.min) / self.step).round() as usize
    }

    pub fn spacing_at(&self, index: usize) -> f64 {
        self.min + index.min(self.max_index()) as f64 * self.step
    }

    pub fn index_of(&self, spacing: f64) -> usize {
        let index = ((spacing - self.min) / self.step).round();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(self.max_index())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewConfig {
    pub engine: EngineConfig,
    pub axes: AxisConfig,
    pub spacing: SpacingConfig,

    /// range of the element count slider, inclusive
    pub element_bounds: [usize; 2],

    /// geometry shown before the first slider interaction
    pub initial_geometry: ArrayGeometry,

    /// stride used while a slider is dragged, the full resolution is drawn on release
    pub draft_stride: usize,
}
impl ViewConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.draft_stride < 1 {
            return Err(InvalidParameter::Stride(self.draft_stride).into());
        }
        let [min, max] = self.element_bounds;
        if min < 1 {
            return Err(InvalidParameter::ElementCount(min).into());
        }
        if min > max {
            return Err(InvalidParameter::AxisBounds {
                min: min as f64,
                max: max as f64,
            }
            .into());
        }
        self.engine.validate()?;
        self.spacing.validate()?;
        self.initial_geometry.validate()
    }
}
impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            engine: EngineConfig::default(),
            axes: AxisConfig::default(),
            spacing: SpacingConfig::default(),
            element_bounds: [2, 30],
            initial_geometry: ArrayGeometry::default(),
            draft_stride: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_slider_round_trip() {
        let config = SpacingConfig::default();
        assert_eq!(config.max_index(), 79);
        for i in 0..=config.max_index() {
            assert_eq!(config.index_of(config.spacing_at(i)), i);
        }
    }

    #[test]
    fn spacing_slider_clamps() {
        let config = SpacingConfig::default();
        assert_eq!(config.index_of(0.0), 0);
        assert_eq!(config.index_of(1.0), config.max_index());
        assert_eq!(config.index_of(0.015), 2);
        approx::assert_relative_eq!(config.spacing_at(1000), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn propagation_speed_must_be_positive() {
        assert!(EngineConfig::default().validate().is_ok());
        let config = EngineConfig {
            propagation_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidParameter(InvalidParameter::PropagationSpeed(0.0)))
        );
    }

    #[test]
    fn floor_must_be_finite() {
        let config = EngineConfig {
            floor_db: f64::NEG_INFINITY,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidParameter(InvalidParameter::Floor(f64::NEG_INFINITY)))
        );
        let config = EngineConfig {
            floor_db: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn spacing_config_validation() {
        assert!(SpacingConfig::default().validate().is_ok());
        let no_step = SpacingConfig {
            step: 0.0,
            ..Default::default()
        };
        assert_eq!(no_step.validate(), Err(Error::InvalidParameter(InvalidParameter::Spacing(0.0))));
        let zero_min = SpacingConfig {
            min: 0.0,
            ..Default::default()
        };
        assert!(zero_min.validate().is_err());
        let reversed = SpacingConfig {
            min: 0.5,
            max: 0.1,
            step: 0.005,
        };
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn view_config_validation() {
        assert!(ViewConfig::default().validate().is_ok());
        let no_elements = ViewConfig {
            element_bounds: [0, 30],
            ..Default::default()
        };
        assert_eq!(
            no_elements.validate(),
            Err(Error::InvalidParameter(InvalidParameter::ElementCount(0)))
        );
        let reversed = ViewConfig {
            element_bounds: [10, 3],
            ..Default::default()
        };
        assert!(reversed.validate().is_err());
    }
}
