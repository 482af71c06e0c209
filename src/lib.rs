//! Beamviz is a simple library that computes beamspectra of uniform linear microphone arrays
//!
//! A beamspectrum is the normalized response of a broadside steered delay-and-sum
//! beamformer over angle and frequency, in dB and clamped to a display floor.
//!
//! Rendering is left to the frontend, this crate only computes the grid and
//! the numbers needed to label it.
//!
//!# Code Example with stream
//!```
//!use beamviz::beam::{config::ViewConfig, stream::Stream};
//!
//!fn main() {
//!    let mut stream = Stream::new(ViewConfig::default()).unwrap();
//!
//!    // while the slider is dragged the spectrum is drawn at a lower resolution
//!    let draft = stream.drag_element_count(16).unwrap();
//!    assert_eq!(draft.stride, 4);
//!
//!    // and once more at full resolution when it is released
//!    let frame = stream.release().unwrap();
//!    assert_eq!(frame.spectrum.dimensions(), (256, 256));
//!
//!    /*
//!    hand frame.spectrum to the renderer ...
//!    */
//!}
//!```

/// array response and beamspectrum computation
pub mod beam;

pub mod error;

pub mod utils;

/// axis and colorbar labels
#[cfg(feature = "labels")]
pub mod labels;

/// background recomputation that discards superseded results
#[cfg(feature = "worker")]
pub mod worker;

pub use error::{Error, InvalidParameter};
