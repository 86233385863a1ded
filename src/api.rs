//! JSON documents accepted by the server and by `grid_packer --input`.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::overlap::check_layout;
use crate::packer::auto_place;
use crate::search::find_best_position;
use crate::stats::LayoutStats;
use crate::types::{GridBounds, Position, Size, TaggedShape};

#[derive(Debug, Deserialize, Serialize)]
pub struct AutoPlaceRequest {
    pub grid: GridBounds,
    #[serde(default)]
    pub target: Vec<TaggedShape>,
    #[serde(default)]
    pub shapes: Vec<TaggedShape>,
}

#[derive(Debug, Serialize)]
pub struct AutoPlaceResponse {
    pub placed: Vec<TaggedShape>,
    pub unplaced: Vec<TaggedShape>,
    pub stats: LayoutStats,
}

impl AutoPlaceRequest {
    pub fn run(&self) -> Result<AutoPlaceResponse, InputError> {
        let result = auto_place(&self.shapes, &self.target, self.grid)?;
        let stats = LayoutStats::compute(&result.placed, &result.unplaced, self.grid);
        Ok(AutoPlaceResponse {
            placed: result.placed,
            unplaced: result.unplaced,
            stats,
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FindPositionRequest {
    pub grid: GridBounds,
    #[serde(default)]
    pub target: Vec<TaggedShape>,
    pub shape: Size,
}

#[derive(Debug, Serialize)]
pub struct FindPositionResponse {
    pub position: Option<Position>,
}

impl FindPositionRequest {
    pub fn run(&self) -> Result<FindPositionResponse, InputError> {
        self.shape.validate()?;
        check_layout("target", &self.target, self.grid)?;
        Ok(FindPositionResponse {
            position: find_best_position(self.shape, &self.target, self.grid),
        })
    }
}
