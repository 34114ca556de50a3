#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal renderer
//!
//! Julia and Mandelbrot sets are drawn by taking every point of a
//! rectangle of the complex plane, sampled on a regular grid, and
//! repeatedly applying an iteration rule to it.  The number of steps it
//! takes the orbit to leave the disc of radius 2, its "divergence
//! index", picks the color of the pixel; points whose orbit never
//! leaves are painted black.
//!
//! A `Fractal` describes what to draw.  `GridFill` computes the
//! divergence index of every pixel in parallel, splitting the columns
//! of the image across scoped threads, and `PixelGrid` turns the
//! indices into colors.  The `descriptor` module saves a `Fractal` as a
//! small text file and reads it back, so that a rendering can be
//! reproduced or zoomed into later.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod color;
pub mod complex;
pub mod descriptor;
pub mod errors;
pub mod fractal;
pub mod grid;
pub mod pixels;
pub mod planes;

pub use color::ColorPolicy;
pub use complex::Complex;
pub use errors::{BuildError, DescriptorError, ParseComplexError};
pub use fractal::{Fractal, FractalConfig, JuliaRule, Kind, Quadrant};
pub use grid::{DivergenceGrid, GridFill};
pub use pixels::PixelGrid;
pub use planes::{Pixel, Plane};
