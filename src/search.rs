use crate::occupancy::OccupancyMap;
use crate::types::{GridBounds, Position, Rect, Shape, Size};

/// Ranks a free slot: lower is better. Top-most wins, then left-most.
fn score(pos: Position) -> (u32, u32) {
    (pos.y, pos.x)
}

/// Finds the free top-left slot for a `size` block, preferring the top-most
/// then left-most cell. Returns `None` when no slot fits.
///
/// A zero-sized `size` also yields `None`. That is malformed input rather
/// than a full grid; call [`Size::validate`] first to tell the two apart, as
/// [`crate::packer::auto_place`] does.
///
/// Every integer position is tried against an occupancy map rebuilt from
/// `existing`, so callers placing several shapes must pass the collection
/// including earlier placements.
pub fn find_best_position<S: Shape>(
    size: Size,
    existing: &[S],
    bounds: GridBounds,
) -> Option<Position> {
    if size.width == 0 || size.height == 0 || !size.fits_in(&bounds) {
        return None;
    }

    let occupancy = OccupancyMap::build(existing, bounds);
    let mut best: Option<Position> = None;

    for y in 0..=bounds.height - size.height {
        for x in 0..=bounds.width - size.width {
            let pos = Position::new(x, y);
            if best.is_some_and(|b| score(b) <= score(pos)) {
                continue;
            }
            if occupancy.is_region_free(&Rect::at(pos, size)) {
                best = Some(pos);
            }
        }
    }

    best
}
