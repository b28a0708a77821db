use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 48.0,
        }
    }
}

/// A workflow node as supplied by the diagram editor. `position` is the
/// top-left corner of the node box; the layout engine treats the input value
/// as untrusted and always writes a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Icon/label tag carried through untouched; never read by layout.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub size: Size,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: String::new(),
            position: Point::default(),
            size: Size::default(),
        }
    }
}

/// A directed connection between two nodes. Endpoints referencing unknown
/// node ids are dropped during graph construction, not treated as fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "fromNodeId")]
    pub from: String,
    #[serde(rename = "toNodeId")]
    pub to: String,
}

impl Connection {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
