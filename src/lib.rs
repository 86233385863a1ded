//! Packs axis-aligned rectangles into free space of a cell grid.
//!
//! The engine is a set of pure functions: [`overlap`] checks, an
//! [`occupancy`] map rebuilt per query, a top-left-first slot [`search`], and
//! the largest-area-first batch driver in [`packer`].

pub mod api;
pub mod error;
pub mod occupancy;
pub mod overlap;
pub mod packer;
pub mod render;
pub mod search;
pub mod stats;
pub mod types;

pub use error::InputError;
pub use packer::{PackResult, Packer, auto_place};
pub use search::find_best_position;
pub use types::{GridBounds, Position, Rect, Shape, Size, TaggedShape};
