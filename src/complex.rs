// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An immutable complex number with the exact textual form used by
//! descriptor files.  Arithmetic is delegated to `num`; equality is
//! exact, component by component, with no tolerance.

use num::complex::Complex64;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::errors::ParseComplexError;

/// A point on the complex plane.  Every operation returns a new value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Complex(Complex64);

impl Complex {
    /// The complex number 0.
    pub const ZERO: Complex = Complex(Complex64 { re: 0.0, im: 0.0 });
    /// The complex number 1.
    pub const ONE: Complex = Complex(Complex64 { re: 1.0, im: 0.0 });
    /// The complex number i.
    pub const I: Complex = Complex(Complex64 { re: 0.0, im: 1.0 });

    /// Returns `re + i * im`.
    pub fn new(re: f64, im: f64) -> Self {
        Complex(Complex64::new(re, im))
    }

    /// The real part.
    pub fn re(&self) -> f64 {
        self.0.re
    }

    /// The imaginary part.
    pub fn im(&self) -> f64 {
        self.0.im
    }

    /// Returns `re - i * im`.
    pub fn conjugate(&self) -> Self {
        Complex(self.0.conj())
    }

    /// `sqrt(re² + im²)`, not `hypot`: points on the escape radius must
    /// compare exactly as this formula rounds.
    pub fn modulus(&self) -> f64 {
        (self.0.re * self.0.re + self.0.im * self.0.im).sqrt()
    }

    /// `atan2(im, re)`, in radians.
    pub fn argument(&self) -> f64 {
        self.0.arg()
    }

    /// Parses the `"<re> <im>"` form, returning `None` unless exactly two
    /// floating point values are present.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, addend: Complex) -> Complex {
        Complex(self.0 + addend.0)
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, subtrahend: Complex) -> Complex {
        Complex(self.0 - subtrahend.0)
    }
}

// (ac - bd) + (ad + bc)i, as num computes it.
impl Mul for Complex {
    type Output = Complex;
    fn mul(self, factor: Complex) -> Complex {
        Complex(self.0 * factor.0)
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex(-self.0)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.0.re, self.0.im)
    }
}

impl FromStr for Complex {
    type Err = ParseComplexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseComplexError(s.to_string());
        let mut tokens = s.split_whitespace();
        let re = tokens.next().and_then(|t| t.parse::<f64>().ok());
        let im = tokens.next().and_then(|t| t.parse::<f64>().ok());
        match (re, im, tokens.next()) {
            (Some(re), Some(im), None) => Ok(Complex::new(re, im)),
            _ => Err(err()),
        }
    }
}
