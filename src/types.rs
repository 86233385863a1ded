use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::InputError;

/// Dimensions of the cell grid shapes are packed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct GridBounds {
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize)]
struct RawBounds {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    height: u32,
}

impl TryFrom<RawBounds> for GridBounds {
    type Error = InputError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        GridBounds::new(raw.width, raw.height)
    }
}

/// Largest grid accepted, in cells (4096x4096). The search and the occupancy
/// map allocate and scan every cell, so larger grids are rejected up front.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

impl GridBounds {
    pub fn new(width: u32, height: u32) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::EmptyGrid { width, height });
        }
        if width as u64 * height as u64 > MAX_GRID_CELLS {
            return Err(InputError::GridTooLarge {
                width,
                height,
                max_cells: MAX_GRID_CELLS,
            });
        }
        Ok(Self { width, height })
    }

    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if every cell of `rect` lies inside the grid.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.right() <= self.width as u64 && rect.bottom() <= self.height as u64
    }
}

impl std::fmt::Display for GridBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.width == 0 || self.height == 0 {
            return Err(InputError::EmptyShape {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn fits_in(&self, bounds: &GridBounds) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Top-left cell of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned block of cells covering `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, deserialize_with = "deserialize_u32_from_number")]
    pub x: u32,
    #[serde(default, deserialize_with = "deserialize_u32_from_number")]
    pub y: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(pos: Position, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn area(&self) -> u64 {
        self.size().area()
    }

    // Edges are widened so shapes near u32::MAX cannot wrap around.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn validate(&self) -> Result<(), InputError> {
        self.size().validate()
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ ({}, {})", self.width, self.height, self.x, self.y)
    }
}

/// Anything the engine can place: it only needs the geometry, and must be able
/// to produce a copy of itself moved to a new top-left cell.
pub trait Shape: Clone {
    fn rect(&self) -> Rect;

    /// A copy at `pos`, keeping size and any other data untouched.
    fn placed_at(&self, pos: Position) -> Self;

    fn area(&self) -> u64 {
        self.rect().area()
    }
}

impl Shape for Rect {
    fn rect(&self) -> Rect {
        *self
    }

    fn placed_at(&self, pos: Position) -> Self {
        Rect::at(pos, self.size())
    }
}

/// A rectangle plus whatever extra fields the caller attached (colour, id, ...).
/// The extra fields are carried through placement verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedShape {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl TaggedShape {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            meta: Map::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

impl Shape for TaggedShape {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn placed_at(&self, pos: Position) -> Self {
        Self {
            rect: self.rect.placed_at(pos),
            meta: self.meta.clone(),
        }
    }
}

/// Accepts JSON integers and integral floats (`5.0`); rejects negatives,
/// fractions and anything that does not fit in a `u32`.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    let n = match &value {
        Value::Number(n) => n,
        other => {
            return Err(D::Error::custom(format!(
                "expected a non-negative integer, got {other}"
            )));
        }
    };

    if let Some(u) = n.as_u64() {
        return u32::try_from(u)
            .map_err(|_| D::Error::custom(format!("{u} is too large for a grid coordinate")));
    }
    if let Some(i) = n.as_i64() {
        return Err(D::Error::custom(format!("expected a non-negative integer, got {i}")));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        Some(f) => Err(D::Error::custom(format!(
            "expected a non-negative integer, got {f}"
        ))),
        None => Err(D::Error::custom("expected a non-negative integer")),
    }
}
