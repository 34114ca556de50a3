// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The colored image of a fractal, ready to be handed to an encoder.

use image::{Rgb, RgbImage};

use crate::color::pack;
use crate::fractal::Fractal;
use crate::grid::DivergenceGrid;

/// An RGB buffer of the same shape as the divergence grid it was painted
/// from.  Pixel `(i, j)` is column `i`, row `j`, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    image: RgbImage,
}

impl PixelGrid {
    /// Colors every cell of `grid` with the color policy of `fractal`.
    pub fn paint(grid: &DivergenceGrid, fractal: &Fractal) -> PixelGrid {
        let mut image = RgbImage::new(grid.width() as u32, grid.height() as u32);
        for (i, column) in grid.columns().enumerate() {
            for (j, index) in column.iter().enumerate() {
                image.put_pixel(i as u32, j as u32, fractal.color_from_divergence(*index));
            }
        }
        PixelGrid { image }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// The color at column `i`, row `j`.  Panics when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Rgb<u8> {
        *self.image.get_pixel(i as u32, j as u32)
    }

    /// The color at column `i`, row `j`, packed as `0xRRGGBB`.  Panics
    /// when out of bounds.
    pub fn rgb(&self, i: usize, j: usize) -> u32 {
        pack(self.get(i, j))
    }

    /// Borrows the underlying image buffer.
    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    /// Gives up the underlying image buffer.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
