use serde::Serialize;

use crate::config::Algorithm;
use crate::ir::Node;

/// Minimal axis-aligned rectangle containing every laid-out node box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Repositioned copies of the input nodes plus their extent. The originals
/// stay untouched so the editor can keep them for undo.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub bounds: BoundingBox,
}

/// Selector output: the suggested strategy and a sentence the dialog can show
/// before the user commits.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub algorithm: Algorithm,
    pub reason: String,
}
