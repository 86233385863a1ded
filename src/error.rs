use thiserror::Error;

use crate::types::Rect;

/// Malformed input. Failing to find room for a shape is not an error; it is
/// reported as data (`None` or the unplaced list).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("grid {width}x{height} is too large, at most {max_cells} cells are supported")]
    GridTooLarge {
        width: u32,
        height: u32,
        max_cells: u64,
    },

    #[error("shape dimensions must be non-zero, got {width}x{height}")]
    EmptyShape { width: u32, height: u32 },

    #[error("{collection} shape {index}: {source}")]
    InvalidShape {
        collection: &'static str,
        index: usize,
        #[source]
        source: Box<InputError>,
    },

    #[error("shape {rect} lies outside the {grid_width}x{grid_height} grid")]
    OutOfBounds {
        rect: Rect,
        grid_width: u32,
        grid_height: u32,
    },

    #[error("shape {first} ({a}) overlaps shape {second} ({b})")]
    Overlap {
        first: usize,
        second: usize,
        a: Rect,
        b: Rect,
    },
}

impl InputError {
    /// Tags an error with the collection and position of the shape that caused it.
    pub fn in_shape(self, collection: &'static str, index: usize) -> Self {
        InputError::InvalidShape {
            collection,
            index,
            source: Box::new(self),
        }
    }
}
