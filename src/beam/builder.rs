//! ## Example
//! ```
//! use beamviz::beam::ArrayGeometry;
//! use beamviz::beam::builder::Builder;
//! use beamviz::beam::config::EngineConfig;
//!
//! fn main() {
//!     let builder = Builder::new(EngineConfig::default());
//!
//!     let frequencies = vec![0.0, 5_000.0, 10_000.0];
//!     let angles = vec![-1.0, 0.0, 1.0];
//!     let spectrum = builder.build(&ArrayGeometry::new(10, 0.015), &frequencies, &angles).unwrap();
//!
//!     // row 0 belongs to 10kHz
//!     assert_eq!(spectrum.dimensions(), (3, 3));
//! }
//! ```

use super::config::EngineConfig;
use super::sampler::{validate_angles, validate_frequency, Sampler};
use super::{ArrayGeometry, ResponseRow, Spectrum};
use crate::error::{Error, InvalidParameter};

/// assembles a `Spectrum` out of one response per frequency
#[derive(Clone, Debug, Default)]
pub struct Builder {
    sampler: Sampler,
}

impl Builder {
    pub fn new(config: EngineConfig) -> Self {
        Builder {
            sampler: Sampler::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.sampler.config()
    }

    /// builds the whole spectrum
    ///
    /// `frequencies` has to be ascending, it is consumed from the highest frequency to the lowest
    pub fn build(
        &self,
        geometry: &ArrayGeometry,
        frequencies: &[f64],
        angles: &[f64],
    ) -> Result<Spectrum, Error> {
        self.validate(geometry, frequencies, angles)?;

        let rows: Vec<ResponseRow> = frequencies
            .iter()
            .rev()
            .map(|freq| self.sampler.response_unchecked(geometry, *freq, angles))
            .collect();

        Ok(self.finish(geometry, rows))
    }

    /// same as `build()` but gives up as soon as `keep_going` returns false
    ///
    /// `keep_going` is asked before every row, `Ok(None)` means the spectrum was abandoned
    pub fn build_until<F>(
        &self,
        geometry: &ArrayGeometry,
        frequencies: &[f64],
        angles: &[f64],
        keep_going: F,
    ) -> Result<Option<Spectrum>, Error>
    where
        F: Fn() -> bool,
    {
        self.validate(geometry, frequencies, angles)?;

        let mut rows: Vec<ResponseRow> = Vec::with_capacity(frequencies.len());
        for freq in frequencies.iter().rev() {
            if !keep_going() {
                log::debug!("abandoned spectrum after {} of {} rows", rows.len(), frequencies.len());
                return Ok(None);
            }
            rows.push(self.sampler.response_unchecked(geometry, *freq, angles));
        }

        Ok(Some(self.finish(geometry, rows)))
    }

    fn finish(&self, geometry: &ArrayGeometry, rows: Vec<ResponseRow>) -> Spectrum {
        let spectrum = Spectrum::from_rows(rows);
        log::debug!(
            "built {:?} spectrum for M = {}, d = {}m",
            spectrum.dimensions(),
            geometry.element_count,
            geometry.spacing
        );
        spectrum
    }

    fn validate(&self, geometry: &ArrayGeometry, frequencies: &[f64], angles: &[f64]) -> Result<(), Error> {
        self.sampler.config().validate()?;
        geometry.validate()?;
        validate_angles(angles)?;

        if frequencies.is_empty() {
            return Err(InvalidParameter::EmptyFrequencyAxis.into());
        }
        for freq in frequencies.iter() {
            validate_frequency(*freq)?;
        }
        if frequencies.windows(2).any(|w| w[0] > w[1]) {
            return Err(InvalidParameter::UnorderedFrequencyAxis.into());
        }
        Ok(())
    }
}

/// same as `Builder::build()` with the default floor of -50dB
pub fn build_spectrum(
    geometry: &ArrayGeometry,
    propagation_speed: f64,
    frequencies: &[f64],
    angles: &[f64],
) -> Result<Spectrum, Error> {
    Builder::new(EngineConfig {
        propagation_speed,
        ..Default::default()
    })
    .build(geometry, frequencies, angles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::config::DEFAULT_PROPAGATION_SPEED;
    use crate::beam::sampler::compute_response;
    use crate::utils::{linspace, strided};
    use std::cell::Cell;

    const V: f64 = DEFAULT_PROPAGATION_SPEED;

    fn angles() -> Vec<f64> {
        linspace(-90_f64.to_radians(), 90_f64.to_radians(), 64)
    }

    #[test]
    fn rows_are_descending_in_frequency() {
        let geometry = ArrayGeometry::new(10, 0.015);
        let frequencies = [0.0, 5_000.0, 10_000.0];
        let angles = angles();
        let spectrum = build_spectrum(&geometry, V, &frequencies, &angles).unwrap();

        assert_eq!(spectrum.dimensions(), (3, angles.len()));
        assert_eq!(
            spectrum.row(0).unwrap(),
            compute_response(&geometry, V, 10_000.0, &angles).unwrap().as_slice()
        );
        assert_eq!(
            spectrum.row(1).unwrap(),
            compute_response(&geometry, V, 5_000.0, &angles).unwrap().as_slice()
        );
        assert_eq!(
            spectrum.row(2).unwrap(),
            compute_response(&geometry, V, 0.0, &angles).unwrap().as_slice()
        );
    }

    #[test]
    fn deterministic() {
        let geometry = ArrayGeometry::new(17, 0.123);
        let frequencies = linspace(0.0, 20_000.0, 32);
        let a = build_spectrum(&geometry, V, &frequencies, &angles()).unwrap();
        let b = build_spectrum(&geometry, V, &frequencies, &angles()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strided_axes_match_full_resolution() {
        let geometry = ArrayGeometry::new(8, 0.05);
        let frequencies = linspace(0.0, 20_000.0, 33);
        let angles = linspace(-90_f64.to_radians(), 90_f64.to_radians(), 65);
        let full = build_spectrum(&geometry, V, &frequencies, &angles).unwrap();

        let coarse_frequencies = strided(&frequencies, 2);
        let coarse_angles = strided(&angles, 2);
        let coarse = build_spectrum(&geometry, V, &coarse_frequencies, &coarse_angles).unwrap();
        assert_eq!(coarse.dimensions(), (17, 33));

        // row i of the coarse grid is frequency index 32 - 2i of the full one
        for (r, row) in coarse.rows().iter().enumerate() {
            let full_row = full.row(2 * r).unwrap();
            for (c, value) in row.iter().enumerate() {
                assert_eq!(*value, full_row[2 * c]);
            }
        }
    }

    #[test]
    fn floor_holds_everywhere() {
        // 1715Hz puts the two elements half a wavelength apart, a null at 90°
        let geometry = ArrayGeometry::new(2, 0.1);
        let spectrum = build_spectrum(&geometry, V, &[0.0, 857.5, 1_715.0], &angles()).unwrap();
        assert!(spectrum.values().all(|db| db >= -50.0 && !db.is_nan()));
        assert_eq!(spectrum.min(), -50.0);
    }

    #[test]
    fn rejects_invalid_axes() {
        let geometry = ArrayGeometry::new(4, 0.01);
        assert_eq!(
            build_spectrum(&geometry, V, &[], &angles()),
            Err(Error::InvalidParameter(InvalidParameter::EmptyFrequencyAxis))
        );
        assert_eq!(
            build_spectrum(&geometry, V, &[100.0], &[]),
            Err(Error::InvalidParameter(InvalidParameter::EmptyAngleAxis))
        );
        assert_eq!(
            build_spectrum(&geometry, V, &[100.0, 50.0], &angles()),
            Err(Error::InvalidParameter(InvalidParameter::UnorderedFrequencyAxis))
        );
        assert_eq!(
            build_spectrum(&geometry, V, &[-1.0, 50.0], &angles()),
            Err(Error::InvalidParameter(InvalidParameter::Frequency(-1.0)))
        );
    }

    #[test]
    fn rejects_invalid_geometry() {
        let frequencies = [0.0, 1_000.0];
        assert!(build_spectrum(&ArrayGeometry::new(0, 0.01), V, &frequencies, &angles())
            .unwrap_err()
            .is_invalid_parameter());
        assert!(build_spectrum(&ArrayGeometry::new(3, -0.01), V, &frequencies, &angles())
            .unwrap_err()
            .is_invalid_parameter());
        assert!(build_spectrum(&ArrayGeometry::new(3, 0.01), 0.0, &frequencies, &angles())
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn build_until_matches_build() {
        let builder = Builder::default();
        let frequencies = linspace(0.0, 8_000.0, 9);
        let finished = builder
            .build_until(&ArrayGeometry::default(), &frequencies, &angles(), || true)
            .unwrap();
        assert_eq!(finished, Some(builder.build(&ArrayGeometry::default(), &frequencies, &angles()).unwrap()));
    }

    #[test]
    fn abandoned_build_returns_nothing() {
        let builder = Builder::default();
        let rows_left = Cell::new(3usize);
        let result = builder
            .build_until(&ArrayGeometry::default(), &linspace(0.0, 1_000.0, 10), &angles(), || {
                let left = rows_left.get();
                rows_left.set(left.saturating_sub(1));
                left > 0
            })
            .unwrap();
        assert!(result.is_none());
    }
}
