//! tick labels for rendering a `Spectrum`
//!
//! Grid indices are mapped back to the axis values they were sampled at.
//! Both axes are evenly spaced, so a linear spline through the first and
//! the last sample is exact for every index in between.

use splines::{Interpolation, Key, Spline};

use crate::beam::Spectrum;
use crate::utils::linspace;

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// column or row index for axis ticks, dB value for colorbar ticks
    pub position: f64,

    /// degrees, Hz or normalized colorbar value
    pub value: f64,

    pub label: String,
}

/// `count` ticks along the columns of a spectrum built from `angles` (radians), labelled in degrees
pub fn angle_ticks(angles: &[f64], count: usize) -> Vec<Tick> {
    index_ticks(angles, count, false)
        .into_iter()
        .map(|(position, value)| {
            let degrees = value.to_degrees();
            Tick {
                position,
                value: degrees,
                label: format!("{:.1}", degrees),
            }
        })
        .collect()
}

/// `count` ticks along the rows of a spectrum built from the ascending `frequencies`
///
/// row 0 is the highest frequency
pub fn frequency_ticks(frequencies: &[f64], count: usize) -> Vec<Tick> {
    index_ticks(frequencies, count, true)
        .into_iter()
        .map(|(position, value)| Tick {
            position,
            value,
            label: format!("{:.0}", value),
        })
        .collect()
}

/// `count` ticks evenly spread from the lowest to the highest dB value of `spectrum`
///
/// labels are renormalized to (0..=1), a flat spectrum is labelled 0 everywhere
pub fn colorbar_ticks(spectrum: &Spectrum, count: usize) -> Vec<Tick> {
    let (min, max) = (spectrum.min(), spectrum.max());
    if !(min.is_finite() && max.is_finite()) {
        return Vec::new();
    }

    let normalize = if max > min {
        Some(linear_spline((min, 0.0), (max, 1.0)))
    } else {
        log::debug!("flat spectrum at {}dB, colorbar is labelled 0", min);
        None
    };

    linspace(min, max, count)
        .into_iter()
        .map(|db| {
            let value = match &normalize {
                Some(spline) => spline.clamped_sample(db).unwrap_or(0.0),
                None => 0.0,
            };
            Tick {
                position: db,
                value,
                label: format!("{:.2}", value),
            }
        })
        .collect()
}

/// (index, axis value) pairs for `count` evenly spread indices
fn index_ticks(axis: &[f64], count: usize, reversed: bool) -> Vec<(f64, f64)> {
    let (first, last) = match (axis.first(), axis.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };
    let last_index = (axis.len() - 1) as f64;

    // grid rows run from the highest frequency to the lowest
    let (start, end) = if reversed { (last, first) } else { (first, last) };
    if axis.len() == 1 {
        return linspace(0.0, 0.0, count).into_iter().map(|i| (i, start)).collect();
    }

    let spline = linear_spline((0.0, start), (last_index, end));
    linspace(0.0, last_index, count)
        .into_iter()
        .map(|i| (i, spline.clamped_sample(i).unwrap_or(start)))
        .collect()
}

fn linear_spline(from: (f64, f64), to: (f64, f64)) -> Spline<f64, f64> {
    Spline::from_vec(vec![
        Key::new(from.0, from.1, Interpolation::Linear),
        Key::new(to.0, to.1, Interpolation::Linear),
    ])
}
