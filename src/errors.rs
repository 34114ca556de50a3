// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for fractal construction and descriptor handling.

use failure::Fail;
use std::io;

/// Raised when a `FractalConfig` cannot be turned into a `Fractal`.
/// All of these are caught before any grid work is scheduled.
#[derive(Debug, Fail, PartialEq)]
pub enum BuildError {
    /// The maximum iteration count must be at least one.
    #[fail(display = "maximum iteration must be positive")]
    ZeroIterations,

    /// The discrete step must be a finite, strictly positive number.
    #[fail(display = "discrete step must be finite and positive, got {}", _0)]
    InvalidStep(f64),

    /// The plane rectangle is inverted, empty or not finite.
    #[fail(
        display = "invalid plane rectangle [{}, {}] x [{}, {}]",
        x_min, x_max, y_min, y_max
    )]
    InvalidRectangle {
        /// Left edge.
        x_min: f64,
        /// Right edge.
        x_max: f64,
        /// Bottom edge.
        y_min: f64,
        /// Top edge.
        y_max: f64,
    },

    /// The image would have no columns or no rows, or is too large to
    /// allocate.
    #[fail(display = "image dimensions out of range, got {}x{}", _0, _1)]
    InvalidDimensions(usize, usize),

    /// The color function parameters must all be finite.
    #[fail(display = "color function must be finite, got ({}, {}, {})", _0, _1, _2)]
    InvalidColor(f32, f32, f32),

    /// File names are stored on a single descriptor line.
    #[fail(display = "file name must not contain line breaks: {:?}", _0)]
    InvalidFileName(String),
}

/// Raised when a descriptor cannot be read back into a `Fractal`.
#[derive(Debug, Fail)]
pub enum DescriptorError {
    /// The first line names neither of the supported fractal kinds.
    #[fail(display = "unknown fractal kind {:?}", _0)]
    UnknownKind(String),

    /// The text ended before the named field.
    #[fail(display = "descriptor ended before field '{}'", _0)]
    MissingField(&'static str),

    /// A field was present but could not be parsed as its type.
    #[fail(display = "could not parse field '{}' from {:?}", field, value)]
    InvalidField {
        /// Name of the field being read.
        field: &'static str,
        /// The offending line.
        value: String,
    },

    /// Non-empty lines follow the last field.
    #[fail(display = "unexpected content after last field: {:?}", _0)]
    TrailingContent(String),

    /// Every field parsed, but the values do not describe a valid fractal.
    #[fail(display = "descriptor describes an invalid fractal: {}", _0)]
    Build(#[cause] BuildError),

    /// The descriptor file could not be read or written.
    #[fail(display = "descriptor i/o failure: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<BuildError> for DescriptorError {
    fn from(err: BuildError) -> Self {
        DescriptorError::Build(err)
    }
}

impl From<io::Error> for DescriptorError {
    fn from(err: io::Error) -> Self {
        DescriptorError::Io(err)
    }
}

/// Raised when a string is not of the form `"<re> <im>"`.
#[derive(Debug, Fail, PartialEq)]
#[fail(display = "expected two floating point values, got {:?}", _0)]
pub struct ParseComplexError(pub String);
