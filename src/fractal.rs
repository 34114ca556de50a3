// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fractal description: which iteration rule, which rectangle of
//! the complex plane, how finely it is sampled, and how it is colored.
//!
//! A `Fractal` is assembled from a `FractalConfig` whose fields are all
//! optional; unset fields fall back to the defaults below, and the
//! result is validated once and never changes afterwards.

use image::Rgb;

use crate::color::ColorPolicy;
use crate::complex::Complex;
use crate::errors::BuildError;
use crate::grid::{DivergenceGrid, GridFill};
use crate::pixels::PixelGrid;
use crate::planes::Plane;

/// Escape radius shared by both iteration rules.
pub const RADIUS: f64 = 2.0;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATION: u32 = 1000;

/// Default distance between samples.
pub const DEFAULT_STEP: f64 = 0.00075;

/// Coefficients of the Julia iteration `z' = alpha·z² + beta·z + constant`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JuliaRule {
    /// The constant added at every step.
    pub constant: Complex,
    /// Coefficient of `z²`.
    pub alpha: Complex,
    /// Coefficient of `z`.
    pub beta: Complex,
}

impl JuliaRule {
    fn apply(&self, z: Complex) -> Complex {
        self.alpha * (z * z) + z * self.beta + self.constant
    }
}

impl Default for JuliaRule {
    /// `z² + 0`.
    fn default() -> Self {
        JuliaRule {
            constant: Complex::ZERO,
            alpha: Complex::ONE,
            beta: Complex::ZERO,
        }
    }
}

/// The iteration rule of a fractal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    /// Iterate the rule starting from the sampled point.
    Julia(JuliaRule),
    /// Iterate `z² + c` from zero, where `c` is the sampled point.
    Mandelbrot,
}

impl Kind {
    /// The token naming this kind in descriptor files.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Julia(_) => "JULIA",
            Kind::Mandelbrot => "MANDELBROT",
        }
    }

    fn default_rectangle(&self) -> (f64, f64, f64, f64) {
        match self {
            Kind::Julia(_) => (-1.0, 1.0, -1.0, 1.0),
            Kind::Mandelbrot => (-2.0, 1.0, -1.0, 1.0),
        }
    }

    fn default_file_name(&self) -> &'static str {
        match self {
            Kind::Julia(_) => "Julia",
            Kind::Mandelbrot => "Mandelbrot",
        }
    }
}

/// One quarter of the plane rectangle, used to zoom in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Quadrant {
    /// Upper left quarter.
    TopLeft,
    /// Upper right quarter.
    TopRight,
    /// Lower left quarter.
    BottomLeft,
    /// Lower right quarter.
    BottomRight,
}

/// Builder-style configuration.  Every field is optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FractalConfig {
    /// Julia-only: the constant of the iteration rule.
    pub complex_constant: Option<Complex>,
    /// Julia-only: the `(alpha, beta)` coefficients of the iteration rule.
    pub iteration_function: Option<(Complex, Complex)>,
    /// Iteration cap, default 1000.
    pub max_iteration: Option<u32>,
    /// Sample spacing, default 0.00075.
    pub discrete_step: Option<f64>,
    /// Left edge of the rectangle.
    pub x_min: Option<f64>,
    /// Right edge of the rectangle.
    pub x_max: Option<f64>,
    /// Bottom edge of the rectangle.
    pub y_min: Option<f64>,
    /// Top edge of the rectangle.
    pub y_max: Option<f64>,
    /// Image width.  Derived with the height unless both are given.
    pub image_width: Option<usize>,
    /// Image height.  Derived with the width unless both are given.
    pub image_height: Option<usize>,
    /// Name of the rendered file, without extension.
    pub file_name: Option<String>,
    /// `(alpha, beta, gamma)` of the color function, default `(20, 1, 1)`.
    pub color_function: Option<(f32, f32, f32)>,
}

impl FractalConfig {
    /// Sets the Julia constant.
    pub fn complex_constant(mut self, constant: Complex) -> Self {
        self.complex_constant = Some(constant);
        self
    }

    /// Sets the Julia iteration coefficients.
    pub fn iteration_function(mut self, alpha: Complex, beta: Complex) -> Self {
        self.iteration_function = Some((alpha, beta));
        self
    }

    /// Sets the iteration cap.
    pub fn max_iteration(mut self, max_iteration: u32) -> Self {
        self.max_iteration = Some(max_iteration);
        self
    }

    /// Sets the sample spacing.
    pub fn discrete_step(mut self, step: f64) -> Self {
        self.discrete_step = Some(step);
        self
    }

    /// Sets the whole rectangle.
    pub fn rectangle(mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        self.x_min = Some(x_min);
        self.x_max = Some(x_max);
        self.y_min = Some(y_min);
        self.y_max = Some(y_max);
        self
    }

    /// Sets the image size.
    pub fn image_size(mut self, width: usize, height: usize) -> Self {
        self.image_width = Some(width);
        self.image_height = Some(height);
        self
    }

    /// Sets the file name.
    pub fn file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Sets the color function parameters.
    pub fn color_function(mut self, alpha: f32, beta: f32, gamma: f32) -> Self {
        self.color_function = Some((alpha, beta, gamma));
        self
    }

    /// Builds a Julia set.
    pub fn julia(self) -> Result<Fractal, BuildError> {
        let defaults = JuliaRule::default();
        let (alpha, beta) = self
            .iteration_function
            .unwrap_or((defaults.alpha, defaults.beta));
        let rule = JuliaRule {
            constant: self.complex_constant.unwrap_or(defaults.constant),
            alpha,
            beta,
        };
        self.build(Kind::Julia(rule))
    }

    /// Builds the Mandelbrot set.  Julia-only fields are ignored.
    pub fn mandelbrot(self) -> Result<Fractal, BuildError> {
        self.build(Kind::Mandelbrot)
    }

    /// Builds a fractal of the given kind.  The Julia rule carried by
    /// `kind` wins over `complex_constant` and `iteration_function`.
    pub fn build(self, kind: Kind) -> Result<Fractal, BuildError> {
        let max_iteration = self.max_iteration.unwrap_or(DEFAULT_MAX_ITERATION);
        if max_iteration == 0 {
            return Err(BuildError::ZeroIterations);
        }

        let (x_min, x_max, y_min, y_max) = kind.default_rectangle();
        let dimensions = match (self.image_width, self.image_height) {
            (Some(width), Some(height)) => Some((width, height)),
            _ => None,
        };
        let plane = Plane::new(
            self.x_min.unwrap_or(x_min),
            self.x_max.unwrap_or(x_max),
            self.y_min.unwrap_or(y_min),
            self.y_max.unwrap_or(y_max),
            self.discrete_step.unwrap_or(DEFAULT_STEP),
            dimensions,
        )?;

        let file_name = self
            .file_name
            .unwrap_or_else(|| kind.default_file_name().to_string());
        if file_name.contains(|c: char| c == '\n' || c == '\r') {
            return Err(BuildError::InvalidFileName(file_name));
        }

        let color = match self.color_function {
            Some((alpha, beta, gamma)) => ColorPolicy::new(alpha, beta, gamma),
            None => ColorPolicy::default(),
        };
        if !(color.alpha.is_finite() && color.beta.is_finite() && color.gamma.is_finite()) {
            return Err(BuildError::InvalidColor(color.alpha, color.beta, color.gamma));
        }

        Ok(Fractal {
            kind,
            max_iteration,
            plane,
            file_name,
            color,
        })
    }
}

/// A validated, immutable fractal description.
#[derive(Clone, Debug, PartialEq)]
pub struct Fractal {
    kind: Kind,
    max_iteration: u32,
    plane: Plane,
    file_name: String,
    color: ColorPolicy,
}

impl Fractal {
    /// The Julia set of `z² + constant` with every other parameter
    /// defaulted.
    pub fn julia(constant: Complex) -> Result<Fractal, BuildError> {
        FractalConfig::default().complex_constant(constant).julia()
    }

    /// The Mandelbrot set with every parameter defaulted.
    pub fn mandelbrot() -> Result<Fractal, BuildError> {
        FractalConfig::default().mandelbrot()
    }

    /// The iteration rule.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The iteration cap.  `max_iteration - 1` is the index of points
    /// that never escape.
    pub fn max_iteration(&self) -> u32 {
        self.max_iteration
    }

    /// The sampled rectangle and pixel grid.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Number of pixel columns.
    pub fn width(&self) -> usize {
        self.plane.width()
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.plane.height()
    }

    /// Name of the rendered file, without extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The color function parameters.
    pub fn color(&self) -> &ColorPolicy {
        &self.color
    }

    /// The escape-time count of a single point: the number of times the
    /// rule was applied before the orbit left the disc of radius
    /// `RADIUS`, capped at `max_iteration - 1`.
    pub fn compute_divergence(&self, z: Complex) -> u32 {
        let limit = self.max_iteration - 1;
        let mut iteration = 0;
        match &self.kind {
            Kind::Julia(rule) => {
                let mut zn = z;
                while iteration < limit && zn.modulus() <= RADIUS {
                    zn = rule.apply(zn);
                    iteration += 1;
                }
            }
            Kind::Mandelbrot => {
                let mut zn = Complex::ZERO;
                while iteration < limit && zn.modulus() <= RADIUS {
                    zn = zn * zn + z;
                    iteration += 1;
                }
            }
        }
        iteration
    }

    /// The color of a pixel with the given divergence index.
    pub fn color_from_divergence(&self, index: u32) -> Rgb<u8> {
        self.color.color(index, self.max_iteration)
    }

    /// Computes the divergence index of every pixel with the default
    /// granularity.
    pub fn divergence_grid(&self) -> DivergenceGrid {
        GridFill::default().fill(self)
    }

    /// Computes and colors every pixel.
    pub fn render(&self) -> PixelGrid {
        PixelGrid::paint(&self.divergence_grid(), self)
    }

    /// The same fractal restricted to one quarter of its rectangle,
    /// sampled twice as finely so the image keeps its size.
    pub fn zoom(&self, quadrant: Quadrant) -> Result<Fractal, BuildError> {
        let p = &self.plane;
        let x_mid = (p.x_min() + p.x_max()) / 2.0;
        let y_mid = (p.y_min() + p.y_max()) / 2.0;
        let (x_min, x_max) = match quadrant {
            Quadrant::TopLeft | Quadrant::BottomLeft => (p.x_min(), x_mid),
            Quadrant::TopRight | Quadrant::BottomRight => (x_mid, p.x_max()),
        };
        let (y_min, y_max) = match quadrant {
            Quadrant::TopLeft | Quadrant::TopRight => (y_mid, p.y_max()),
            Quadrant::BottomLeft | Quadrant::BottomRight => (p.y_min(), y_mid),
        };
        FractalConfig::default()
            .max_iteration(self.max_iteration)
            .discrete_step(p.step() / 2.0)
            .rectangle(x_min, x_max, y_min, y_max)
            .image_size(p.width(), p.height())
            .file_name(self.file_name.clone())
            .color_function(self.color.alpha, self.color.beta, self.color.gamma)
            .build(self.kind)
    }
}
