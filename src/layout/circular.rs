use std::collections::VecDeque;

use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::ir::{Point, Size};

/// Single-ring layout: breadth-first order from the lowest-degree root keeps
/// connected neighbors adjacent on the ring, which keeps chords short. The
/// radius grows with node count so adjacent slots never overlap.
pub(super) fn compute_circular_layout(
    graph: &GraphModel,
    sizes: &[Size],
    config: &LayoutConfig,
) -> Vec<Point> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Vec::new();
    }
    if node_count == 1 {
        return vec![Point::new(config.padding, config.padding)];
    }

    let order = ring_order(graph);

    let max_extent = sizes
        .iter()
        .map(|size| size.width.max(size.height))
        .fold(0.0f32, f32::max);
    // The chord between adjacent slots must fit the widest node plus the
    // configured gap; the chord is shorter than the arc, so sizing by it
    // keeps the arc bound satisfied too.
    let half_angle = std::f32::consts::PI / node_count as f32;
    let radius = ((max_extent + config.node_spacing) / (2.0 * half_angle.sin()))
        .max(config.level_spacing);

    let mut centers = vec![(0.0f32, 0.0f32); node_count];
    let step = std::f32::consts::TAU / node_count as f32;
    for (slot, &node) in order.iter().enumerate() {
        // Start at twelve o'clock, clockwise.
        let angle = slot as f32 * step - std::f32::consts::FRAC_PI_2;
        centers[node] = (radius * angle.cos(), radius * angle.sin());
    }

    super::normalize_to_padding(&centers, sizes, config.padding)
}

/// BFS over undirected adjacency. Traversal restarts at the next unvisited
/// lowest-degree node so disconnected components still land on the one ring.
fn ring_order(graph: &GraphModel) -> Vec<usize> {
    let node_count = graph.node_count();
    let mut order = Vec::with_capacity(node_count);
    let mut visited = vec![false; node_count];

    let mut root_starts = graph.roots.clone();
    root_starts.sort_by_key(|&node| (graph.degree(node), node));

    let mut queue = VecDeque::new();
    while order.len() < node_count {
        let start = root_starts
            .iter()
            .copied()
            .find(|&node| !visited[node])
            .or_else(|| {
                (0..node_count)
                    .filter(|&node| !visited[node])
                    .min_by_key(|&node| (graph.degree(node), node))
            });
        let Some(start) = start else {
            break;
        };
        visited[start] = true;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &next in graph.out_edges[node].iter().chain(graph.in_edges[node].iter()) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }

    order
}
