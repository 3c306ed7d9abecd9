use std::hash::Hasher;

use metrohash::MetroHash64;

use crate::{error::Result, Error};

/// smallest row for which the seeded pattern is worth looking at.
pub const MIN_SIZE: usize = 20;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub fn alive() -> Self {
        Self { alive: true }
    }

    pub fn dead() -> Self {
        Self { alive: false }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// the cell as a single bit, as used in neighborhood codes.
    pub fn bit(&self) -> u8 {
        self.alive as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Self { alive }
    }
}

/// One generation: a fixed-length ring of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Seeds a row of `size` dead cells with a single live cell at `size / 2`.
    pub fn seed(size: usize) -> Result<Self> {
        Self::seed_with_min(size, MIN_SIZE)
    }

    /// Same as [`Row::seed`] with a caller-chosen minimum size.
    ///
    /// The effective minimum is never below one cell, the seed needs somewhere to live.
    pub fn seed_with_min(size: usize, min_size: usize) -> Result<Self> {
        let min = min_size.max(1);
        if size < min {
            return Err(Error::InsufficientSize { size, min });
        }

        let mut cells = vec![Cell::dead(); size];
        cells[size / 2] = Cell::alive();
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn alive_count(&self) -> usize {
        self.iter().filter(Cell::is_alive).count()
    }

    /// indices of every live cell, in order.
    pub fn alive_indices(&self) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.is_alive().then_some(index))
            .collect()
    }

    /// Digest of the cell states, stable across runs and platforms.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::new();
        hasher.write_usize(self.len());
        for cell in self.iter() {
            hasher.write_u8(cell.bit());
        }
        hasher.finish()
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl FromIterator<bool> for Row {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        iter.into_iter().map(Cell::from).collect::<Vec<_>>().into()
    }
}
