//! Square play-field split into discrete cells.

use serde::{Deserialize, Serialize};

use super::state::Cell;

/// Pixel-space rectangle covered by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Largest supported number of cells along one side of the grid
pub const MAX_CELLS_PER_SIDE: u32 = 1024;

/// Fixed-size square grid: `field_size` pixels per side, `grid_unit` pixels per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    field_size: u32,
    grid_unit: u32,
}

impl Grid {
    /// Callers are expected to have validated that `grid_unit` divides `field_size`
    pub fn new(field_size: u32, grid_unit: u32) -> Self {
        Self {
            field_size,
            grid_unit,
        }
    }

    pub fn field_size(&self) -> u32 {
        self.field_size
    }

    pub fn grid_unit(&self) -> u32 {
        self.grid_unit
    }

    /// Number of cells along one side, capped at [`MAX_CELLS_PER_SIDE`]
    /// and zero for a zero grid unit
    pub fn cell_count(&self) -> i32 {
        let count = self
            .field_size
            .checked_div(self.grid_unit)
            .unwrap_or(0)
            .min(MAX_CELLS_PER_SIDE);
        i32::try_from(count).unwrap_or(0)
    }

    pub fn total_cells(&self) -> usize {
        let side = usize::try_from(self.cell_count()).unwrap_or(0);
        side * side
    }

    /// Check if a cell lies within `[0, cell_count)` on both axes
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        let n = self.cell_count();
        cell.col >= 0 && cell.col < n && cell.row >= 0 && cell.row < n
    }

    pub fn to_pixel(&self, cell: Cell) -> PixelRect {
        let unit = self.grid_unit as i32;
        PixelRect {
            x: cell.col * unit,
            y: cell.row * unit,
            width: self.grid_unit,
            height: self.grid_unit,
        }
    }

    /// Starting cell of a fresh snake
    pub fn center(&self) -> Cell {
        let half = self.cell_count() / 2;
        Cell::new(half, half)
    }

    /// All cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let n = self.cell_count();
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell::new(col, row)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(400, 20)
    }
}
