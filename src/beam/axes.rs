#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::AxisConfig;
use crate::error::{Error, InvalidParameter};
use crate::utils::{linspace, strided};

/// Angle and frequency axes of a beamspectrum
///
/// Built once from an `AxisConfig` and never regenerated with other bounds,
/// lower resolutions are taken with `strided()`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Axes {
    /// ascending, in radians
    angles: Vec<f64>,

    /// ascending, in Hz
    frequencies: Vec<f64>,
}

impl Axes {
    pub fn new(config: &AxisConfig) -> Result<Self, Error> {
        let [a_min, a_max] = config.angle_bounds;
        let [f_min, f_max] = config.frequency_bounds;
        validate_bounds(a_min, a_max)?;
        validate_bounds(f_min, f_max)?;
        if f_min < 0.0 {
            return Err(InvalidParameter::Frequency(f_min).into());
        }
        if config.angle_resolution < 1 {
            return Err(InvalidParameter::Resolution(config.angle_resolution).into());
        }
        if config.frequency_resolution < 1 {
            return Err(InvalidParameter::Resolution(config.frequency_resolution).into());
        }

        Ok(Axes {
            angles: linspace(a_min.to_radians(), a_max.to_radians(), config.angle_resolution),
            frequencies: linspace(f_min, f_max, config.frequency_resolution),
        })
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// every `stride`-th sample of both axes, beginning with the first one
    ///
    /// returns (frequencies, angles)
    pub fn strided(&self, stride: usize) -> Result<(Vec<f64>, Vec<f64>), Error> {
        if stride < 1 {
            return Err(InvalidParameter::Stride(stride).into());
        }
        Ok((strided(&self.frequencies, stride), strided(&self.angles, stride)))
    }
}

fn validate_bounds(min: f64, max: f64) -> Result<(), Error> {
    if !(min.is_finite() && max.is_finite() && min <= max) {
        return Err(InvalidParameter::AxisBounds { min, max }.into());
    }
    Ok(())
}
