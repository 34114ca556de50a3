// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Plane struct, which describes a relationship between
//! a grid of pixels with an origin at 0,0 in the upper left, and a
//! rectangle on the complex plane sampled every `step` along both
//! axes.

use crate::complex::Complex;
use crate::errors::BuildError;

/// Describes the column and row of a pixel.  Column 0 is `x_min`, row 0
/// is `y_max`: the y axis is inverted with respect to the complex plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// A sampled rectangle of the complex plane, and the pixel grid that
/// samples it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    step: f64,
    width: usize,
    height: usize,
}

/// Number of samples along an axis running from `min` to `max` at
/// `step`.  Sums the absolute bounds, so the count is only a true tiling
/// for rectangles that straddle the origin; descriptors rely on this
/// exact rule.
fn samples(min: f64, max: f64, step: f64) -> usize {
    ((min.abs() + max.abs()) / step + 1.0) as usize
}

/// Whether a `width` x `height` RGB image can be allocated and
/// addressed with `u32` coordinates.
fn fits_an_image(width: usize, height: usize) -> bool {
    let max = u32::MAX as usize;
    width > 0
        && height > 0
        && width <= max
        && height <= max
        && width
            .checked_mul(height)
            .and_then(|len| len.checked_mul(3))
            .is_some()
}

impl Plane {
    /// Constructor.  When `dimensions` is `None` the width and height
    /// are derived from the rectangle and the step so that one pixel
    /// sits on each sampled point.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        step: f64,
        dimensions: Option<(usize, usize)>,
    ) -> Result<Plane, BuildError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(BuildError::InvalidStep(step));
        }

        let finite = x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite();
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(BuildError::InvalidRectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }

        let (width, height) = dimensions.unwrap_or_else(|| {
            (samples(x_min, x_max, step), samples(y_min, y_max, step))
        });
        if !fits_an_image(width, height) {
            return Err(BuildError::InvalidDimensions(width, height));
        }

        Ok(Plane {
            x_min,
            x_max,
            y_min,
            y_max,
            step,
            width,
            height,
        })
    }

    /// Left edge of the rectangle.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right edge of the rectangle.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom edge of the rectangle.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top edge of the rectangle.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Distance between adjacent samples, on both axes.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of pixel columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the plane has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Given a pixel, return the point of the complex plane it samples.
    pub fn pixel_to_point(&self, pixel: Pixel) -> Complex {
        Complex::new(
            self.x_min + self.step * (pixel.0 as f64),
            self.y_max - self.step * (pixel.1 as f64),
        )
    }
}
