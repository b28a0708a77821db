mod circular;
mod force;
mod grid;
mod hierarchy;
mod ranking;
mod selector;
pub(crate) mod types;

pub use selector::recommend;
pub use types::*;

use crate::config::{Algorithm, LayoutConfig};
use crate::error::LayoutError;
use crate::graph::GraphModel;
use crate::ir::{Connection, Node, Point, Size};
use hierarchy::RankedVariant;

/// Entry point for the diagram editor: validates the config, builds the
/// graph model once, dispatches to the requested (or auto-selected)
/// algorithm and returns repositioned copies of the nodes plus their
/// bounding box. The input slices are never modified.
pub fn compute_layout(
    nodes: &[Node],
    connections: &[Connection],
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    config.validate()?;

    // An empty diagram is a valid no-op, not an error.
    if nodes.is_empty() {
        return Ok(LayoutResult {
            nodes: Vec::new(),
            bounds: BoundingBox::default(),
        });
    }

    let graph = GraphModel::build(nodes, connections)?;
    let algorithm = match config.algorithm {
        Some(algorithm) => algorithm,
        None => {
            let recommendation = recommend(&graph, &config.selector);
            tracing::debug!(
                algorithm = recommendation.algorithm.token(),
                reason = recommendation.reason.as_str(),
                "auto-selected layout algorithm"
            );
            recommendation.algorithm
        }
    };

    let sizes: Vec<Size> = nodes.iter().map(|node| node.size).collect();
    let positions = match algorithm {
        Algorithm::Hierarchical => {
            hierarchy::compute_ranked_layout(&graph, &sizes, config, RankedVariant::Hierarchical)
        }
        Algorithm::Tree => {
            hierarchy::compute_ranked_layout(&graph, &sizes, config, RankedVariant::Tree)
        }
        Algorithm::Layered => {
            hierarchy::compute_ranked_layout(&graph, &sizes, config, RankedVariant::Layered)
        }
        Algorithm::ForceDirected => force::compute_force_layout(&graph, &sizes, config, false).0,
        Algorithm::Organic => force::compute_force_layout(&graph, &sizes, config, true).0,
        Algorithm::Circular => circular::compute_circular_layout(&graph, &sizes, config),
        Algorithm::Grid => grid::compute_grid_layout(&sizes, config),
    };

    let mut placed = nodes.to_vec();
    for (node, position) in placed.iter_mut().zip(positions) {
        node.position = position;
    }
    let bounds = bounding_box(&placed);

    Ok(LayoutResult {
        nodes: placed,
        bounds,
    })
}

/// Converts simulated centers to top-left positions, shifted so the
/// drawing's minimum corner sits at `padding`. Shared by the strategies that
/// compute in free space (force, circular).
fn normalize_to_padding(centers: &[(f32, f32)], sizes: &[Size], padding: f32) -> Vec<Point> {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    for (center, size) in centers.iter().zip(sizes) {
        min_x = min_x.min(center.0 - size.width / 2.0);
        min_y = min_y.min(center.1 - size.height / 2.0);
    }
    centers
        .iter()
        .zip(sizes)
        .map(|(center, size)| {
            Point::new(
                center.0 - size.width / 2.0 - min_x + padding,
                center.1 - size.height / 2.0 - min_y + padding,
            )
        })
        .collect()
}

fn bounding_box(nodes: &[Node]) -> BoundingBox {
    let mut bounds = BoundingBox {
        min_x: f32::INFINITY,
        min_y: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        max_y: f32::NEG_INFINITY,
    };
    for node in nodes {
        bounds.min_x = bounds.min_x.min(node.position.x);
        bounds.min_y = bounds.min_y.min(node.position.y);
        bounds.max_x = bounds.max_x.max(node.position.x + node.size.width);
        bounds.max_y = bounds.max_y.max(node.position.y + node.size.height);
    }
    bounds
}
