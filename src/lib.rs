#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod ir;
pub mod layout;

pub use config::{
    Algorithm, Alignment, Direction, ForceConfig, LayoutConfig, SelectorConfig, load_config,
};
pub use error::LayoutError;
pub use graph::GraphModel;
pub use ir::{Connection, Node, Point, Size};
pub use layout::{BoundingBox, LayoutResult, Recommendation, compute_layout, recommend};

#[cfg(feature = "cli")]
pub use cli::run;
