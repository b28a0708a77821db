use crate::config::LayoutConfig;
use crate::ir::{Point, Size};

/// Connection-agnostic packing: input order, row-major, near-square. Cells
/// are sized by the largest node so every row and column lines up.
pub(super) fn compute_grid_layout(sizes: &[Size], config: &LayoutConfig) -> Vec<Point> {
    let node_count = sizes.len();
    if node_count == 0 {
        return Vec::new();
    }

    let columns = (node_count as f32).sqrt().ceil().max(1.0) as usize;
    let max_width = sizes.iter().map(|s| s.width).fold(0.0f32, f32::max);
    let max_height = sizes.iter().map(|s| s.height).fold(0.0f32, f32::max);
    let cell_width = max_width + config.node_spacing;
    let cell_height = max_height + config.node_spacing;

    sizes
        .iter()
        .enumerate()
        .map(|(idx, size)| {
            let column = idx % columns;
            let row = idx / columns;
            Point::new(
                config.padding + column as f32 * cell_width + (max_width - size.width) / 2.0,
                config.padding + row as f32 * cell_height + (max_height - size.height) / 2.0,
            )
        })
        .collect()
}
