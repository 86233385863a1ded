use serde::Serialize;

use crate::error::InputError;
use crate::overlap::check_layout;
use crate::search::find_best_position;
use crate::types::{GridBounds, Shape};

/// Outcome of a batch placement. `placed` holds the committed collection
/// (the original target shapes followed by new placements in placement
/// order); `unplaced` holds the candidates that found no room, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackResult<S> {
    pub placed: Vec<S>,
    pub unplaced: Vec<S>,
}

/// Greedy packer over one grid. Holds the working copy of the committed
/// collection; each successful placement is added to it before the next
/// search runs.
#[derive(Debug, Clone)]
pub struct Packer<S> {
    bounds: GridBounds,
    committed: Vec<S>,
}

impl<S: Shape> Packer<S> {
    /// `committed` is assumed to be in bounds and non-overlapping; use
    /// [`auto_place`] to have that checked.
    pub fn new(bounds: GridBounds, committed: Vec<S>) -> Self {
        Self { bounds, committed }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn committed(&self) -> &[S] {
        &self.committed
    }

    pub fn into_placed(self) -> Vec<S> {
        self.committed
    }

    /// Places one shape in the best free slot and commits it. Returns the
    /// placed copy, or `None` if there was no room.
    pub fn place(&mut self, shape: &S) -> Option<S> {
        let size = shape.rect().size();
        let pos = find_best_position(size, &self.committed, self.bounds)?;
        let placed = shape.placed_at(pos);
        tracing::debug!(size = %size, x = pos.x, y = pos.y, "placed shape");
        self.committed.push(placed.clone());
        Some(placed)
    }

    /// Places `shapes` largest-area first. Equal areas keep their input order.
    pub fn place_all(mut self, shapes: &[S]) -> PackResult<S> {
        let mut order: Vec<&S> = shapes.iter().collect();
        // `sort_by` is stable.
        order.sort_by(|a, b| b.area().cmp(&a.area()));

        let mut unplaced = Vec::new();
        for shape in order {
            if self.place(shape).is_none() {
                tracing::debug!(size = %shape.rect().size(), "no room for shape");
                unplaced.push(shape.clone());
            }
        }

        tracing::info!(
            grid = %self.bounds,
            attempted = shapes.len(),
            unplaced = unplaced.len(),
            "auto placement finished"
        );

        PackResult {
            placed: self.committed,
            unplaced,
        }
    }
}

/// Moves every shape of `source` into free space of `target`.
///
/// Checks the inputs first: each candidate must have a non-zero size and the
/// target collection must be in bounds and non-overlapping. Candidates that do
/// not fit end up in `unplaced`; that is not an error.
pub fn auto_place<S: Shape>(
    source: &[S],
    target: &[S],
    bounds: GridBounds,
) -> Result<PackResult<S>, InputError> {
    for (i, shape) in source.iter().enumerate() {
        shape.rect().validate().map_err(|e| e.in_shape("source", i))?;
    }
    check_layout("target", target, bounds)?;

    Ok(Packer::new(bounds, target.to_vec()).place_all(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::rects_overlap;
    use crate::types::{Rect, TaggedShape};

    fn grid(w: u32, h: u32) -> GridBounds {
        GridBounds::new(w, h).unwrap()
    }

    /// Validates a packed collection:
    /// 1. Every shape lies inside the grid
    /// 2. No two shapes overlap
    fn assert_layout_valid<S: Shape>(shapes: &[S], bounds: GridBounds) {
        for (i, s) in shapes.iter().enumerate() {
            let r = s.rect();
            assert!(
                bounds.contains(&r),
                "shape {i} ({r}) exceeds grid {bounds}"
            );
        }
        for i in 0..shapes.len() {
            for j in (i + 1)..shapes.len() {
                let a = shapes[i].rect();
                let b = shapes[j].rect();
                assert!(!rects_overlap(&a, &b), "shape {i} ({a}) overlaps shape {j} ({b})");
            }
        }
    }

    fn candidates(sizes: &[(u32, u32)]) -> Vec<Rect> {
        sizes.iter().map(|&(w, h)| Rect::new(0, 0, w, h)).collect()
    }

    #[test]
    fn test_no_sources_returns_target_unchanged() {
        let target = vec![Rect::new(0, 0, 3, 3), Rect::new(5, 5, 2, 2)];
        let result = auto_place(&[], &target, grid(10, 10)).unwrap();
        assert_eq!(result.placed, target);
        assert!(result.unplaced.is_empty());
    }

    #[test]
    fn test_largest_area_placed_first() {
        let source = candidates(&[(2, 2), (4, 4)]);
        let result = auto_place(&source, &[], grid(10, 10)).unwrap();
        assert_eq!(result.placed[0], Rect::new(0, 0, 4, 4));
        assert_eq!(result.placed[1], Rect::new(4, 0, 2, 2));
        assert_layout_valid(&result.placed, grid(10, 10));
    }

    #[test]
    fn test_equal_areas_keep_input_order() {
        let source = vec![
            TaggedShape::new(Rect::new(0, 0, 2, 3)).with_meta("id", 1),
            TaggedShape::new(Rect::new(0, 0, 3, 2)).with_meta("id", 2),
            TaggedShape::new(Rect::new(0, 0, 1, 6)).with_meta("id", 3),
        ];
        let result = auto_place(&source, &[], grid(10, 10)).unwrap();
        let ids: Vec<_> = result.placed.iter().map(|s| s.meta["id"].clone()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unplaced_shapes_are_returned_unchanged() {
        let target = vec![Rect::new(0, 0, 10, 8)];
        let source = vec![Rect::new(3, 4, 5, 5), Rect::new(1, 1, 4, 2)];
        let result = auto_place(&source, &target, grid(10, 10)).unwrap();
        assert_eq!(result.placed, vec![Rect::new(0, 0, 10, 8), Rect::new(0, 8, 4, 2)]);
        assert_eq!(result.unplaced, vec![Rect::new(3, 4, 5, 5)]);
    }

    #[test]
    fn test_placed_and_unplaced_partition_sources() {
        let source = candidates(&[(6, 6), (5, 5), (4, 4), (3, 3), (2, 2), (1, 1), (7, 2)]);
        let target = vec![Rect::new(0, 0, 2, 2)];
        let result = auto_place(&source, &target, grid(10, 10)).unwrap();
        assert_eq!(
            result.placed.len() - target.len() + result.unplaced.len(),
            source.len()
        );
        assert_eq!(&result.placed[..target.len()], &target[..]);
        assert_layout_valid(&result.placed, grid(10, 10));
    }

    #[test]
    fn test_deterministic() {
        let source = candidates(&[(3, 2), (2, 3), (4, 1), (1, 4), (2, 2), (5, 3), (3, 5)]);
        let target = vec![Rect::new(2, 2, 3, 3)];
        let first = auto_place(&source, &target, grid(9, 7)).unwrap();
        let second = auto_place(&source, &target, grid(9, 7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metadata_carried_to_placement() {
        let source = vec![TaggedShape::new(Rect::new(7, 7, 2, 2)).with_meta("color", "darkblue")];
        let result = auto_place(&source, &[], grid(10, 10)).unwrap();
        assert_eq!(result.placed[0].rect, Rect::new(0, 0, 2, 2));
        assert_eq!(result.placed[0].meta["color"], "darkblue");
    }

    #[test]
    fn test_rejects_zero_sized_candidate() {
        let source = candidates(&[(2, 2), (0, 3)]);
        let err = auto_place(&source, &[], grid(10, 10)).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidShape { collection: "source", index: 1, .. }
        ));
    }

    #[test]
    fn test_rejects_overlapping_target() {
        let target = vec![Rect::new(0, 0, 4, 4), Rect::new(3, 3, 4, 4)];
        let err = auto_place(&candidates(&[(1, 1)]), &target, grid(10, 10)).unwrap_err();
        assert!(matches!(err, InputError::Overlap { first: 0, second: 1, .. }));
    }

    #[test]
    fn test_packer_place_commits_each_shape() {
        let mut packer = Packer::new(grid(4, 4), vec![]);
        let shape = Rect::new(0, 0, 2, 2);
        assert_eq!(packer.place(&shape), Some(Rect::new(0, 0, 2, 2)));
        assert_eq!(packer.place(&shape), Some(Rect::new(2, 0, 2, 2)));
        assert_eq!(packer.place(&shape), Some(Rect::new(0, 2, 2, 2)));
        assert_eq!(packer.place(&shape), Some(Rect::new(2, 2, 2, 2)));
        assert_eq!(packer.place(&shape), None);
        assert_eq!(packer.committed().len(), 4);
        assert_eq!(packer.bounds(), grid(4, 4));

        let placed = packer.into_placed();
        assert_eq!(placed.len(), 4);
        assert_layout_valid(&placed, grid(4, 4));
    }

    /// 30 mixed candidates on a 30x20 grid with a few locked shapes already in it.
    #[test]
    fn test_mixed_batch_stays_valid() {
        let bounds = grid(30, 20);
        let target = vec![
            Rect::new(0, 0, 6, 4),
            Rect::new(12, 3, 5, 5),
            Rect::new(25, 10, 5, 10),
            Rect::new(4, 14, 8, 3),
        ];
        let mut sizes = Vec::new();
        for i in 0..30u32 {
            sizes.push((1 + i % 5, 1 + (i * 7) % 4));
        }
        let source = candidates(&sizes);

        let result = auto_place(&source, &target, bounds).unwrap();
        assert_layout_valid(&result.placed, bounds);
        assert_eq!(
            result.placed.len() - target.len() + result.unplaced.len(),
            source.len()
        );

        let placed_area: u64 = result.placed.iter().map(|r| r.area()).sum();
        assert!(placed_area <= bounds.cell_count());
    }
}
