use crate::types::{GridBounds, Rect, Shape};

/// Which cells of the grid are covered by at least one shape.
///
/// Stored as a flat row-major vector indexed by `y * width + x`. The map is
/// rebuilt from the shape collection for every query and never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    bounds: GridBounds,
    cells: Vec<bool>,
}

impl OccupancyMap {
    pub fn empty(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: vec![false; bounds.cell_count() as usize],
        }
    }

    /// Marks every cell covered by `shapes`. Cells falling outside the grid
    /// are skipped rather than rejected; bounds are enforced by callers.
    pub fn build<S: Shape>(shapes: &[S], bounds: GridBounds) -> Self {
        let mut map = Self::empty(bounds);
        for shape in shapes {
            map.mark(&shape.rect());
        }
        map
    }

    fn mark(&mut self, rect: &Rect) {
        let x_end = rect.right().min(self.bounds.width as u64) as u32;
        let y_end = rect.bottom().min(self.bounds.height as u64) as u32;
        for y in rect.y..y_end {
            let row = self.index(0, y);
            for x in rect.x..x_end {
                self.cells[row + x as usize] = true;
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.bounds.width as usize + x as usize
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Cells outside the grid read as occupied.
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        if x >= self.bounds.width || y >= self.bounds.height {
            return true;
        }
        self.cells[self.index(x, y)]
    }

    /// True if the whole footprint of `rect` is inside the grid and unoccupied.
    pub fn is_region_free(&self, rect: &Rect) -> bool {
        if !self.bounds.contains(rect) {
            return false;
        }
        (rect.y..rect.y + rect.height).all(|y| {
            let row = self.index(rect.x, y);
            !self.cells[row..row + rect.width as usize].contains(&true)
        })
    }

    pub fn occupied_cells(&self) -> u64 {
        self.cells.iter().filter(|&&c| c).count() as u64
    }

    pub fn free_cells(&self) -> u64 {
        self.bounds.cell_count() - self.occupied_cells()
    }

    /// The map as `height` rows of `width` cells, `[y][x]`.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.bounds.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}
