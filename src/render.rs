// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel grid scheduler.
//!
//! Every pixel is an independent unit of work, but the cost of a unit
//! varies from a single iteration (far outside the set) to the full
//! iteration cap (inside it, or close to its border).  Handing each
//! thread a fixed band of the image therefore leaves most threads idle
//! while the one holding the set's interior grinds on.  The default
//! schedule instead flattens the whole N×N grid into one queue and
//! lets each worker take a single pixel at a time.
//!
//! The queue is the iterator over the buffer's cells.  Every `&mut`
//! cell comes out of it exactly once, so no two workers can ever
//! touch the same cell; the mutex only decides who gets the next one.

use std::iter::Enumerate;
use std::slice::IterMut;
use std::str::FromStr;
use std::sync::Mutex;

use crate::config::Grid;
use crate::escape::escape_time;
use crate::error::RenderError;
use crate::planes::{Pixel, PlaneMapper};

type CellQueue<'a> = Mutex<Enumerate<IterMut<'a, u32>>>;

/// How the pixels of the grid are handed out to worker threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// One shared queue, one pixel at a time.
    Dynamic,
    /// One contiguous, equally sized band of pixels per thread.
    Static,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Dynamic
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dynamic" => Ok(Schedule::Dynamic),
            "static" => Ok(Schedule::Static),
            _ => Err(format!("unknown schedule '{}'", s)),
        }
    }
}

/// The finished iteration counts for every pixel, row-major.  Only a
/// completed render ever produces one of these.
#[derive(Clone, Debug, PartialEq)]
pub struct Iterations {
    size: usize,
    cells: Vec<u32>,
}

impl Iterations {
    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, N*N.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a grid with no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The iteration count at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.size + x]
    }

    /// All counts in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }
}

/// Reserves a zeroed buffer of `len` cells, failing instead of
/// aborting when the memory isn't there.
pub(crate) fn allocate<T: Copy + Default>(len: usize) -> Result<Vec<T>, RenderError> {
    let mut buffer: Vec<T> = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| RenderError::Allocation(len))?;
    buffer.resize(len, T::default());
    Ok(buffer)
}

/// Renders the escape-time counts of a `Grid`.  Once built, this
/// object is read-only and shared by reference with every worker.
pub struct Renderer {
    grid: Grid,
    plane: PlaneMapper,
}

impl Renderer {
    /// Checks the grid and builds the plane mapping for it.
    pub fn new(grid: Grid) -> Result<Self, RenderError> {
        grid.validate()?;
        let plane = PlaneMapper::new(&grid)?;
        Ok(Renderer { grid, plane })
    }

    /// The parameters this renderer was built with.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The unit of work: map one offset to its sample and iterate it.
    #[inline]
    fn evaluate(&self, offset: usize) -> u32 {
        let point = self.plane.pixel_to_point(&self.plane.pixel(offset));
        escape_time(point, self.grid.max_iterations, self.grid.threshold)
    }

    fn allocate(&self) -> Result<Vec<u32>, RenderError> {
        let len = self
            .grid
            .cells()
            .ok_or(RenderError::Allocation(std::usize::MAX))?;
        debug!("allocating {} iteration cells", len);
        allocate(len)
    }

    fn finish(&self, cells: Vec<u32>) -> Iterations {
        // Every count is at least 1, so a zero is a cell nobody wrote.
        debug_assert!(cells.iter().all(|&v| v != 0));
        Iterations {
            size: self.grid.size,
            cells,
        }
    }

    /// Renders on the calling thread, in row-major order.
    pub fn render_single(&self) -> Result<Iterations, RenderError> {
        let mut cells = self.allocate()?;
        for row in 0..self.grid.size {
            for column in 0..self.grid.size {
                let offset = self.plane.offset(&Pixel(column, row));
                cells[offset] = self.evaluate(offset);
            }
        }
        Ok(self.finish(cells))
    }

    /// Renders on `threads` scoped worker threads using the given
    /// schedule.  Returns only after every worker has joined.
    pub fn render(&self, threads: usize, schedule: Schedule) -> Result<Iterations, RenderError> {
        let threads = threads.max(1);
        let mut cells = self.allocate()?;
        debug!(
            "rendering {}x{} with {} threads, {:?} schedule",
            self.grid.size, self.grid.size, threads, schedule
        );
        match schedule {
            Schedule::Dynamic => self.fill_dynamic(&mut cells, threads)?,
            Schedule::Static => self.fill_static(&mut cells, threads)?,
        }
        debug!("all workers joined");
        Ok(self.finish(cells))
    }

    fn fill_dynamic(&self, cells: &mut [u32], threads: usize) -> Result<(), RenderError> {
        let queue: CellQueue = Mutex::new(cells.iter_mut().enumerate());
        crossbeam::scope(|spawner| {
            for _ in 0..threads {
                let queue = &queue;
                spawner.spawn(move |_| loop {
                    let next = match queue.lock() {
                        Ok(mut queue) => queue.next(),
                        Err(_) => None,
                    };
                    match next {
                        Some((offset, cell)) => *cell = self.evaluate(offset),
                        None => break,
                    }
                });
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)
    }

    fn fill_static(&self, cells: &mut [u32], threads: usize) -> Result<(), RenderError> {
        let band = ((cells.len() + threads - 1) / threads).max(1);
        let regions: Vec<&mut [u32]> = cells.chunks_mut(band).collect();
        crossbeam::scope(|spawner| {
            for (index, region) in regions.into_iter().enumerate() {
                let start = index * band;
                spawner.spawn(move |_| {
                    for (k, cell) in region.iter_mut().enumerate() {
                        *cell = self.evaluate(start + k);
                    }
                });
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn renderer(size: usize) -> Renderer {
        Renderer::new(Grid::new(size).unwrap()).unwrap()
    }

    #[test]
    fn buffer_covers_grid_within_cap() {
        let r = renderer(37);
        let it = r.render(4, Schedule::Dynamic).unwrap();
        assert_eq!(it.size(), 37);
        assert_eq!(it.len(), 37 * 37);
        let cap = r.grid().max_iterations;
        assert!(it.as_slice().iter().all(|&v| v >= 1 && v <= cap));
    }

    #[test]
    fn thread_count_does_not_change_output() {
        let r = renderer(64);
        let reference = r.render_single().unwrap();
        for threads in &[1, 2, 3, 8, 17] {
            assert_eq!(r.render(*threads, Schedule::Dynamic).unwrap(), reference);
            assert_eq!(r.render(*threads, Schedule::Static).unwrap(), reference);
        }
    }

    #[test]
    fn more_threads_than_pixels() {
        let r = renderer(2);
        let reference = r.render_single().unwrap();
        assert_eq!(r.render(16, Schedule::Static).unwrap(), reference);
        assert_eq!(r.render(16, Schedule::Dynamic).unwrap(), reference);
    }

    #[test]
    fn zero_threads_means_one() {
        let r = renderer(8);
        assert_eq!(r.render(0, Schedule::Dynamic).unwrap(), r.render_single().unwrap());
    }

    #[test]
    fn center_pixel_is_in_the_set() {
        let r = renderer(100);
        let it = r.render(4, Schedule::Dynamic).unwrap();
        assert_eq!(it.get(50, 50), r.grid().max_iterations);
        // Left edge, real part -2 at the top corner: |-2-2i| > 2.
        assert_eq!(it.get(0, 0), 1);
    }

    #[test]
    fn single_pixel_grid() {
        let r = renderer(1);
        let it = r.render(3, Schedule::Dynamic).unwrap();
        assert_eq!(it.len(), 1);
        let expected = escape_time(Complex::new(-2.0, -2.0), 1000, 2.0);
        assert_eq!(it.get(0, 0), expected);
    }

    #[test]
    fn cells_match_the_evaluator() {
        let r = renderer(9);
        let it = r.render(2, Schedule::Dynamic).unwrap();
        let plane = PlaneMapper::new(r.grid()).unwrap();
        for y in 0..9 {
            for x in 0..9 {
                let c = plane.pixel_to_point(&Pixel(x, y));
                assert_eq!(it.get(x, y), escape_time(c, 1000, 2.0));
            }
        }
    }

    #[test]
    fn edited_grids_are_refused() {
        let mut uncapped = Grid::new(8).unwrap();
        uncapped.max_iterations = 0;
        match Renderer::new(uncapped) {
            Err(RenderError::ZeroIterations) => {}
            Err(e) => panic!("unexpected {}", e),
            Ok(_) => panic!("zero iteration cap accepted"),
        }

        let mut oversize = Grid::new(8).unwrap();
        oversize.size = 200_000;
        match Renderer::new(oversize) {
            Err(RenderError::SizeTooLarge(200_000, _)) => {}
            Err(e) => panic!("unexpected {}", e),
            Ok(_) => panic!("oversize grid accepted"),
        }
    }

    #[test]
    fn impossible_allocation_is_reported() {
        match allocate::<u32>(std::usize::MAX) {
            Err(RenderError::Allocation(n)) => assert_eq!(n, std::usize::MAX),
            other => panic!("unexpected {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn schedule_parses() {
        assert_eq!("dynamic".parse::<Schedule>().unwrap(), Schedule::Dynamic);
        assert_eq!("static".parse::<Schedule>().unwrap(), Schedule::Static);
        assert!("guided".parse::<Schedule>().is_err());
        assert_eq!(Schedule::default(), Schedule::Dynamic);
    }
}
