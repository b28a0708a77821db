use crate::config::{Alignment, Direction, LayoutConfig};
use crate::graph::GraphModel;
use crate::ir::{Point, Size};

use super::ranking;

/// The three rank-based strategies share rank assignment, ordering and
/// coordinate math; they differ in how multi-parent nodes are ordered and how
/// disconnected components are tiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RankedVariant {
    Hierarchical,
    /// Orders every node under its first discovered parent only.
    Tree,
    /// Tiles components as full-width bands along the rank axis.
    Layered,
}

pub(super) fn compute_ranked_layout(
    graph: &GraphModel,
    sizes: &[Size],
    config: &LayoutConfig,
    variant: RankedVariant,
) -> Vec<Point> {
    let ranks = ranking::assign_ranks(graph);
    let mut positions = vec![Point::default(); graph.node_count()];

    // Components are laid out independently, then tiled so they cannot
    // overlap: side by side for hierarchical/tree, stacked rank bands for
    // layered.
    let component_gap = config.node_spacing * 2.0;
    let mut cross_cursor = 0.0f32;
    let mut along_cursor = 0.0f32;

    for members in &graph.components {
        let mut buckets = ranking::rank_buckets(&ranks, members);
        ranking::order_rank_nodes(
            graph,
            &mut buckets,
            config.ordering_passes,
            variant == RankedVariant::Tree,
        );

        let component = place_component(sizes, config, &buckets);
        let (cross_offset, along_offset) = match variant {
            RankedVariant::Layered => (0.0, along_cursor),
            _ => (cross_cursor, 0.0),
        };

        for &(node, cross, along) in &component.entries {
            let (x, y) = match config.direction {
                Direction::TopBottom => (cross + cross_offset, along + along_offset),
                Direction::LeftRight => (along + along_offset, cross + cross_offset),
            };
            positions[node] = Point::new(x + config.padding, y + config.padding);
        }

        cross_cursor += component.cross_extent + component_gap;
        along_cursor += component.along_extent + config.level_spacing;
    }

    positions
}

struct PlacedComponent {
    /// `(node, cross, along)` top-left coordinates in rank space.
    entries: Vec<(usize, f32, f32)>,
    cross_extent: f32,
    along_extent: f32,
}

/// Coordinate assignment for one ordered component. The cross axis packs
/// node extents separated by `node_spacing`; each rank occupies a band as
/// thick as its tallest node and consecutive bands are `level_spacing` apart,
/// so oversized nodes can never bleed into the next rank. Shorter ranks are
/// shifted against the widest rank per `alignment`.
fn place_component(
    sizes: &[Size],
    config: &LayoutConfig,
    buckets: &[Vec<usize>],
) -> PlacedComponent {
    let cross_of = |node: usize| match config.direction {
        Direction::TopBottom => sizes[node].width,
        Direction::LeftRight => sizes[node].height,
    };
    let along_of = |node: usize| match config.direction {
        Direction::TopBottom => sizes[node].height,
        Direction::LeftRight => sizes[node].width,
    };

    let rank_cross: Vec<f32> = buckets
        .iter()
        .map(|bucket| {
            let extents: f32 = bucket.iter().map(|&n| cross_of(n)).sum();
            let gaps = bucket.len().saturating_sub(1) as f32 * config.node_spacing;
            extents + gaps
        })
        .collect();
    let max_cross = rank_cross.iter().copied().fold(0.0f32, f32::max);

    let mut entries = Vec::new();
    let mut along_cursor = 0.0f32;
    let mut along_extent = 0.0f32;

    for (rank_idx, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty() {
            continue;
        }
        let band = bucket
            .iter()
            .map(|&n| along_of(n))
            .fold(0.0f32, f32::max);
        let mut cross_cursor = match config.alignment {
            Alignment::Start => 0.0,
            Alignment::Center => (max_cross - rank_cross[rank_idx]) / 2.0,
            Alignment::End => max_cross - rank_cross[rank_idx],
        };
        for &node in bucket {
            // Center each node inside its rank band.
            let along = along_cursor + (band - along_of(node)) / 2.0;
            entries.push((node, cross_cursor, along));
            cross_cursor += cross_of(node) + config.node_spacing;
        }
        along_extent = along_cursor + band;
        along_cursor += band + config.level_spacing;
    }

    PlacedComponent {
        entries,
        cross_extent: max_cross,
        along_extent,
    }
}
