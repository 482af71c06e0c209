/// response of the array at a single frequency
pub mod sampler;

/// stacks responses of many frequencies into a `Spectrum`
pub mod builder;

/// fixed angle and frequency axes
pub mod axes;

/// configs for `sampler::Sampler`, `builder::Builder` and `stream::Stream`
pub mod config;

/// interactive abstraction over the builder with resolution switching
pub mod stream;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidParameter};

/// dB values of a single frequency, one per angle
pub type ResponseRow = Vec<f64>;

/// Uniform linear array
///
/// Element `m` sits at `m * spacing` meters for `m` in `0..element_count`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayGeometry {
    pub element_count: usize,

    /// distance between neighbouring elements, in meters
    pub spacing: f64,
}

impl ArrayGeometry {
    pub fn new(element_count: usize, spacing: f64) -> Self {
        ArrayGeometry { element_count, spacing }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.element_count < 1 {
            return Err(InvalidParameter::ElementCount(self.element_count).into());
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(InvalidParameter::Spacing(self.spacing).into());
        }
        Ok(())
    }

    /// distance between the first and the last element
    pub fn aperture(&self) -> f64 {
        self.element_count.saturating_sub(1) as f64 * self.spacing
    }
}

impl Default for ArrayGeometry {
    fn default() -> Self {
        ArrayGeometry { element_count: 10, spacing: 0.015 }
    }
}

/// 2D grid of dB values
///
/// Rows are frequencies in descending order, so row 0 belongs to the highest frequency.
/// Columns are angles in ascending order.
///
/// ```text
///  f_max  | row 0
///         | ...
///  f_min  | row rows-1
///         +----------------
///          a_min ...  a_max
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spectrum {
    rows: Vec<ResponseRow>,
    columns: usize,
}

impl Spectrum {
    /// every row needs to have the same, non zero length
    pub(crate) fn from_rows(rows: Vec<ResponseRow>) -> Self {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        debug_assert!(rows.iter().all(|r| r.len() == columns));
        Spectrum { rows, columns }
    }

    pub fn rows(&self) -> &[ResponseRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// (rows, columns), which is (frequencies, angles)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns)
    }

    pub fn min(&self) -> f64 {
        self.values().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }

    pub fn into_rows(self) -> Vec<ResponseRow> {
        self.rows
    }
}

/// A spectrum together with the request that produced it
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// increases with every request, newer frames supersede older ones
    pub generation: u64,
    pub geometry: ArrayGeometry,
    pub stride: usize,
    pub spectrum: Spectrum,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_validation() {
        assert!(ArrayGeometry::new(1, 0.01).validate().is_ok());
        assert_eq!(
            ArrayGeometry::new(0, 0.01).validate(),
            Err(Error::InvalidParameter(InvalidParameter::ElementCount(0)))
        );
        assert_eq!(
            ArrayGeometry::new(4, 0.0).validate(),
            Err(Error::InvalidParameter(InvalidParameter::Spacing(0.0)))
        );
        assert!(ArrayGeometry::new(4, -0.01).validate().is_err());
        assert!(ArrayGeometry::new(4, f64::NAN).validate().is_err());
    }

    #[test]
    fn aperture() {
        assert_eq!(ArrayGeometry::new(1, 0.5).aperture(), 0.0);
        assert_eq!(ArrayGeometry::new(5, 0.25).aperture(), 1.0);
    }

    #[test]
    fn spectrum_accessors() {
        let spectrum = Spectrum::from_rows(vec![vec![0.0, -3.0, -50.0], vec![-6.0, -1.0, 0.0]]);
        assert_eq!(spectrum.dimensions(), (2, 3));
        assert_eq!(spectrum.get(0, 2), Some(-50.0));
        assert_eq!(spectrum.get(2, 0), None);
        assert_eq!(spectrum.row(1), Some(&[-6.0, -1.0, 0.0][..]));
        assert_eq!(spectrum.min(), -50.0);
        assert_eq!(spectrum.max(), 0.0);
        assert_eq!(spectrum.into_rows()[1], vec![-6.0, -1.0, 0.0]);
    }
}
