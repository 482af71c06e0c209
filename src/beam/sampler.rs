//! ## Example
//! ```
//! use beamviz::beam::ArrayGeometry;
//! use beamviz::beam::config::DEFAULT_PROPAGATION_SPEED;
//! use beamviz::beam::sampler::compute_response;
//!
//! fn main() {
//!     let geometry = ArrayGeometry::new(8, 0.02);
//!     let angles = vec![-0.5, 0.0, 0.5];
//!
//!     let row = compute_response(&geometry, DEFAULT_PROPAGATION_SPEED, 4_000.0, &angles).unwrap();
//!
//!     // broadside is always 0dB
//!     assert_eq!(row[1], 0.0);
//! }
//! ```

use std::f64::consts::PI;

use rustfft::num_complex::Complex;

use super::config::EngineConfig;
use super::{ArrayGeometry, ResponseRow};
use crate::error::{Error, InvalidParameter};

/// magnitudes below this are treated as exact nulls and skip the logarithm
pub const MIN_MAGNITUDE: f64 = 1e-12;

/// computes the normalized delay-and-sum response of a uniform linear array, in dB
#[derive(Clone, Debug, Default)]
pub struct Sampler {
    config: EngineConfig,
}

impl Sampler {
    pub fn new(config: EngineConfig) -> Self {
        Sampler { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// response for a single frequency `freq` in Hz across `angles` in radians
    pub fn response(
        &self,
        geometry: &ArrayGeometry,
        freq: f64,
        angles: &[f64],
    ) -> Result<ResponseRow, Error> {
        self.config.validate()?;
        geometry.validate()?;
        validate_frequency(freq)?;
        validate_angles(angles)?;

        Ok(self.response_unchecked(geometry, freq, angles))
    }

    /// inputs have to be validated already
    pub(crate) fn response_unchecked(
        &self,
        geometry: &ArrayGeometry,
        freq: f64,
        angles: &[f64],
    ) -> ResponseRow {
        log::trace!(
            "sampling {} angles at {}Hz for M = {}, d = {}m, aperture {}m",
            angles.len(),
            freq,
            geometry.element_count,
            geometry.spacing,
            geometry.aperture()
        );

        angles
            .iter()
            .map(|angle| {
                let magnitude = array_factor(geometry, self.config.propagation_speed, freq, *angle);
                to_db(magnitude, self.config.floor_db)
            })
            .collect()
    }
}

/// same as `Sampler::response()` with the default floor of -50dB
pub fn compute_response(
    geometry: &ArrayGeometry,
    propagation_speed: f64,
    freq: f64,
    angles: &[f64],
) -> Result<ResponseRow, Error> {
    Sampler::new(EngineConfig {
        propagation_speed,
        ..Default::default()
    })
    .response(geometry, freq, angles)
}

/// normalized magnitude of the coherent sum of all elements, in range (0..=1)
///
/// the first element sits at the origin so a single element always has magnitude 1
fn array_factor(geometry: &ArrayGeometry, propagation_speed: f64, freq: f64, angle: f64) -> f64 {
    let sin = angle.sin();
    let mut sum: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for m in 0..geometry.element_count {
        let position = m as f64 * geometry.spacing;
        let delay = position * sin / propagation_speed;
        let phase = 2.0 * PI * freq * delay;
        sum += Complex { re: phase.cos(), im: phase.sin() };
    }

    sum.norm() / geometry.element_count as f64
}

fn to_db(magnitude: f64, floor_db: f64) -> f64 {
    if magnitude < MIN_MAGNITUDE {
        // -240dB, the lowest level that is resolved
        return floor_db.max(20.0 * MIN_MAGNITUDE.log10());
    }
    let db = 20.0 * magnitude.log10();
    if db < floor_db {
        floor_db
    } else {
        db
    }
}

pub(crate) fn validate_frequency(freq: f64) -> Result<(), Error> {
    if !(freq.is_finite() && freq >= 0.0) {
        return Err(InvalidParameter::Frequency(freq).into());
    }
    Ok(())
}

pub(crate) fn validate_angles(angles: &[f64]) -> Result<(), Error> {
    if angles.is_empty() {
        return Err(InvalidParameter::EmptyAngleAxis.into());
    }
    if let Some(angle) = angles.iter().find(|a| !a.is_finite()) {
        return Err(InvalidParameter::Angle(*angle).into());
    }
    Ok(())
}
