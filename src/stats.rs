use serde::Serialize;

use crate::types::{GridBounds, Rect, Shape};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutStats {
    pub placed_count: usize,
    pub unplaced_count: usize,
    pub placed_area: u64,
    pub unplaced_area: u64,
    /// Share of all shapes that ended up on the grid, rounded percent.
    pub placement_efficiency: u32,
    pub grid_utilization_percent: f64,
}

impl LayoutStats {
    pub fn compute<S: Shape>(placed: &[S], unplaced: &[S], bounds: GridBounds) -> Self {
        let total = placed.len() + unplaced.len();
        let placement_efficiency = if total == 0 {
            0
        } else {
            (placed.len() as f64 / total as f64 * 100.0).round() as u32
        };

        // Committed shapes are disjoint, so their clipped areas sum to the
        // number of occupied cells.
        let occupied: u64 = placed.iter().map(|s| clipped_area(&s.rect(), bounds)).sum();
        let grid_utilization_percent =
            (occupied as f64 / bounds.cell_count() as f64 * 100.0).min(100.0);

        Self {
            placed_count: placed.len(),
            unplaced_count: unplaced.len(),
            placed_area: placed.iter().map(|s| s.area()).sum(),
            unplaced_area: unplaced.iter().map(|s| s.area()).sum(),
            placement_efficiency,
            grid_utilization_percent,
        }
    }
}

fn clipped_area(rect: &Rect, bounds: GridBounds) -> u64 {
    let w = rect.right().min(bounds.width as u64).saturating_sub(rect.x as u64);
    let h = rect.bottom().min(bounds.height as u64).saturating_sub(rect.y as u64);
    w * h
}
