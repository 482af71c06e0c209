//! errors reported by the engine
//!
//! Directional nulls are not errors, they are clamped to the display floor.
//! Everything here is a caller mistake and is reported before any computation starts.

use std::error;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// a parameter or axis handed to the engine is out of its domain
    InvalidParameter(InvalidParameter),

    /// the background worker thread has stopped and can not take requests anymore
    WorkerDisconnected,
}

impl Error {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter(_))
    }
}

impl From<InvalidParameter> for Error {
    fn from(parameter: InvalidParameter) -> Self {
        Error::InvalidParameter(parameter)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(parameter) => write!(f, "invalid parameter: {}", parameter),
            Error::WorkerDisconnected => write!(f, "background worker disconnected"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidParameter(parameter) => Some(parameter),
            Error::WorkerDisconnected => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InvalidParameter {
    /// element count must be at least 1
    ElementCount(usize),
    /// element spacing must be positive and finite, in meters
    Spacing(f64),
    /// propagation speed must be positive and finite, in m/s
    PropagationSpeed(f64),
    /// display floor must be finite, in dB
    Floor(f64),
    /// frequencies must be finite and not negative, in Hz
    Frequency(f64),
    /// angles must be finite, in radians
    Angle(f64),
    EmptyAngleAxis,
    EmptyFrequencyAxis,
    /// frequencies are consumed in reverse, so they have to be passed in ascending
    UnorderedFrequencyAxis,
    /// stride must be at least 1
    Stride(usize),
    /// axis resolution must be at least 1
    Resolution(usize),
    /// lower bound must not exceed the upper bound
    AxisBounds { min: f64, max: f64 },
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementCount(m) => write!(f, "element count {} is less than 1", m),
            Self::Spacing(d) => write!(f, "element spacing {} m is not positive", d),
            Self::PropagationSpeed(v) => write!(f, "propagation speed {} m/s is not positive", v),
            Self::Floor(db) => write!(f, "display floor {} dB is not finite", db),
            Self::Frequency(freq) => write!(f, "frequency {} Hz is negative or not finite", freq),
            Self::Angle(a) => write!(f, "angle {} rad is not finite", a),
            Self::EmptyAngleAxis => write!(f, "angle axis is empty"),
            Self::EmptyFrequencyAxis => write!(f, "frequency axis is empty"),
            Self::UnorderedFrequencyAxis => write!(f, "frequency axis is not ascending"),
            Self::Stride(res) => write!(f, "stride {} is less than 1", res),
            Self::Resolution(res) => write!(f, "axis resolution {} is less than 1", res),
            Self::AxisBounds { min, max } => write!(f, "axis bounds [{}, {}] are reversed or not finite", min, max),
        }
    }
}

impl error::Error for InvalidParameter {}
