use crate::error::InputError;
use crate::types::{GridBounds, Rect, Shape};

/// True if the two rectangles share at least one cell. Rectangles that only
/// touch along an edge do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    (a.x as u64) < b.right()
        && a.right() > b.x as u64
        && (a.y as u64) < b.bottom()
        && a.bottom() > b.y as u64
}

/// True if `candidate` lies inside the grid and overlaps none of `existing`.
pub fn is_position_valid<S: Shape>(candidate: &Rect, existing: &[S], bounds: GridBounds) -> bool {
    if !bounds.contains(candidate) {
        return false;
    }
    !existing.iter().any(|e| rects_overlap(candidate, &e.rect()))
}

/// Checks that a committed collection is well formed: non-zero sizes, every
/// shape inside the grid, and no two shapes sharing a cell.
pub fn check_layout<S: Shape>(
    collection: &'static str,
    shapes: &[S],
    bounds: GridBounds,
) -> Result<(), InputError> {
    for (i, shape) in shapes.iter().enumerate() {
        let rect = shape.rect();
        rect.validate().map_err(|e| e.in_shape(collection, i))?;
        if !bounds.contains(&rect) {
            return Err(InputError::OutOfBounds {
                rect,
                grid_width: bounds.width,
                grid_height: bounds.height,
            }
            .in_shape(collection, i));
        }
    }

    for i in 0..shapes.len() {
        for j in (i + 1)..shapes.len() {
            let a = shapes[i].rect();
            let b = shapes[j].rect();
            if rects_overlap(&a, &b) {
                return Err(InputError::Overlap {
                    first: i,
                    second: j,
                    a,
                    b,
                });
            }
        }
    }

    Ok(())
}
