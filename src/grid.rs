// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The divergence grid and the fork/join fill that computes it.
//!
//! The column range of the image is split in half, recursively, until
//! a range is narrower than `width / divisions` or the splits have
//! produced one range per CPU; each such range is then computed
//! directly.  Every split hands the left half to a new scoped thread
//! and keeps the right half, then waits for both, so at most one thread
//! per range is ever alive.  Because the
//! grid is stored column-major, each range owns one contiguous slice of
//! the buffer, carved off with `split_at_mut`: no two tasks can ever
//! write the same cell, and no locking is needed.

use itertools::iproduct;
use log::{debug, trace};
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fractal::Fractal;
use crate::planes::Pixel;

/// Divergence indices for every pixel of a fractal, `width` columns of
/// `height` rows.  Column `i`, row `j` samples the point
/// `x_min + step·i + (y_max - step·j)i`.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl DivergenceGrid {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The divergence index at column `i`, row `j`.  Panics when out of
    /// bounds, like slice indexing.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        assert!(i < self.width && j < self.height, "cell out of bounds");
        self.cells[i * self.height + j]
    }

    /// Iterates over the columns, left to right.  Each column runs from
    /// the top row to the bottom one.
    pub fn columns(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.height)
    }

    /// The raw column-major buffer.
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }
}

/// Granularity of the parallel fill.  The fill stops splitting once a
/// column range is narrower than `width / divisions`, and never runs
/// more ranges at once than the next power of two above the CPU count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridFill {
    divisions: usize,
}

impl Default for GridFill {
    fn default() -> Self {
        GridFill { divisions: 8 }
    }
}

impl GridFill {
    /// A fill that splits down to ranges of about `width / divisions`
    /// columns.  Zero is treated as one.
    pub fn new(divisions: usize) -> Self {
        GridFill {
            divisions: divisions.max(1),
        }
    }

    /// One division per logical CPU.
    pub fn per_cpu() -> Self {
        GridFill::new(num_cpus::get())
    }

    /// The configured number of divisions.
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Computes the divergence index of every pixel of `fractal`,
    /// splitting the work across the logical CPUs.
    pub fn fill(&self, fractal: &Fractal) -> DivergenceGrid {
        self.fill_on(fractal, num_cpus::get()).0
    }

    /// Fills the grid splitting across at most `cpus` ranges at once.
    /// Also returns the number of threads spawned.
    fn fill_on(&self, fractal: &Fractal, cpus: usize) -> (DivergenceGrid, usize) {
        let (width, height) = (fractal.width(), fractal.height());
        let threshold = width / self.divisions;
        let max_depth = cpus.max(1).next_power_of_two().trailing_zeros() as usize;
        debug!(
            "filling {}x{} divergence grid, leaves under {} columns, {} levels of threads",
            width, height, threshold, max_depth
        );

        let mut cells = vec![0_u32; width * height];
        let task = Task {
            fractal,
            height,
            threshold,
            max_depth,
            spawned: AtomicUsize::new(0),
        };
        task.compute(0, 0, &mut cells);
        let spawned = task.spawned.load(Ordering::SeqCst);

        debug!(
            "filled {}x{} divergence grid with {} threads",
            width, height, spawned
        );
        let grid = DivergenceGrid {
            width,
            height,
            cells,
        };
        (grid, spawned)
    }
}

struct Task<'a> {
    fractal: &'a Fractal,
    height: usize,
    threshold: usize,
    max_depth: usize,
    spawned: AtomicUsize,
}

impl<'a> Task<'a> {
    /// Fills `cells`, the columns starting at `from`, `depth` splits
    /// below the whole image.
    fn compute(&self, from: usize, depth: usize, cells: &mut [u32]) {
        let columns = cells.len() / self.height;
        if columns <= 1 || columns < self.threshold || depth >= self.max_depth {
            self.compute_directly(from, columns, cells);
            return;
        }

        let middle = columns / 2;
        let (left, right) = cells.split_at_mut(middle * self.height);
        let joined = crossbeam::scope(|spawner| {
            self.spawned.fetch_add(1, Ordering::SeqCst);
            spawner.spawn(move |_| self.compute(from, depth + 1, left));
            self.compute(from + middle, depth + 1, right);
        });
        if let Err(cause) = joined {
            panic::resume_unwind(cause);
        }
    }

    fn compute_directly(&self, from: usize, columns: usize, cells: &mut [u32]) {
        trace!("computing columns {}..{}", from, from + columns);
        let plane = self.fractal.plane();
        let pixels = iproduct!(from..from + columns, 0..self.height);
        for (cell, (i, j)) in cells.iter_mut().zip(pixels) {
            *cell = self.fractal.compute_divergence(plane.pixel_to_point(Pixel(i, j)));
        }
    }
}
