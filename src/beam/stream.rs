//! # How it works
//! ```text
//!     ┌──────────────────────────┐
//!     │  slider of the frontend  │
//!     └──────────────────────────┘
//!           |            |
//!   drag_*()|            | release()
//!           ↓            ↓
//! ┌───────────────────┐        ┌─────────────┐
//! │      Stream       │ -----> |   Builder   |
//! |  draft | full res │ <----- |             |
//! └───────────────────┘        └─────────────┘
//!           |
//!           | `Frame` with the spectrum and its generation
//!           ↓
//!     ┌─────────────────────────┐
//!     │ renderer of the frontend│
//!     └─────────────────────────┘
//! ```
//!
//! While a slider is dragged the spectrum is drawn with `ViewConfig::draft_stride`,
//! so it keeps up with the slider. Once it is released it is drawn once more at full resolution.

use super::axes::Axes;
use super::builder::Builder;
use super::config::ViewConfig;
use super::{ArrayGeometry, Frame};
use crate::error::Error;

/// holds the current geometry and redraws it on every change
#[derive(Debug)]
pub struct Stream {
    config: ViewConfig,
    axes: Axes,
    builder: Builder,
    geometry: ArrayGeometry,
    generation: u64,
}

impl Stream {
    pub fn new(config: ViewConfig) -> Result<Self, Error> {
        config.validate()?;

        let axes = Axes::new(&config.axes)?;
        Ok(Self {
            builder: Builder::new(config.engine.clone()),
            geometry: config.initial_geometry,
            generation: 0,
            axes,
            config,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn geometry(&self) -> ArrayGeometry {
        self.geometry
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// generation of the last drawn frame, 0 if nothing got drawn yet
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// element count slider moved, clamped to `config.element_bounds`
    pub fn drag_element_count(&mut self, element_count: usize) -> Result<Frame, Error> {
        let [min, max] = self.config.element_bounds;
        let geometry = ArrayGeometry {
            element_count: element_count.max(min).min(max),
            ..self.geometry
        };
        self.draw_geometry(geometry, self.config.draft_stride)
    }

    /// spacing slider moved to `index`, see `SpacingConfig::spacing_at()`
    pub fn drag_spacing_index(&mut self, index: usize) -> Result<Frame, Error> {
        let geometry = ArrayGeometry {
            spacing: self.config.spacing.spacing_at(index),
            ..self.geometry
        };
        self.draw_geometry(geometry, self.config.draft_stride)
    }

    /// slider index of the current spacing
    pub fn spacing_index(&self) -> usize {
        self.config.spacing.index_of(self.geometry.spacing)
    }

    /// any slider got released, draws at full resolution
    pub fn release(&mut self) -> Result<Frame, Error> {
        self.draw(1)
    }

    /// draws the current geometry with every `stride`-th sample of both axes
    pub fn draw(&mut self, stride: usize) -> Result<Frame, Error> {
        self.draw_geometry(self.geometry, stride)
    }

    /// `geometry` only becomes the current one once it got drawn
    fn draw_geometry(&mut self, geometry: ArrayGeometry, stride: usize) -> Result<Frame, Error> {
        let (frequencies, angles) = self.axes.strided(stride)?;
        let spectrum = self.builder.build(&geometry, &frequencies, &angles)?;

        self.geometry = geometry;
        self.generation += 1;
        Ok(Frame {
            generation: self.generation,
            geometry,
            stride,
            spectrum,
        })
    }
}
