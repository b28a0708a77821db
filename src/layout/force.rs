use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::ir::{Point, Size};

pub(super) struct ForceStats {
    pub iterations: usize,
    pub converged: bool,
}

/// Iterative spring-embedder: inverse-square repulsion between every node
/// pair, spring attraction along every edge, damped velocity integration.
/// Runs until the largest per-node displacement drops below the convergence
/// threshold or the iteration cap is hit, whichever comes first.
///
/// Initial placement is derived from a hash of each node id, not wall-clock
/// randomness, so identical input always produces identical output. The
/// `clustered` flag is the organic variant: components start grouped around
/// centroids spread on a ring instead of sharing one cloud.
pub(super) fn compute_force_layout(
    graph: &GraphModel,
    sizes: &[Size],
    config: &LayoutConfig,
    clustered: bool,
) -> (Vec<Point>, ForceStats) {
    let node_count = graph.node_count();
    if node_count == 0 {
        return (
            Vec::new(),
            ForceStats {
                iterations: 0,
                converged: true,
            },
        );
    }

    let force = &config.force;
    let rest_length = config.node_spacing + config.level_spacing;
    let mut centers = initial_positions(graph, rest_length, clustered);
    let mut velocities = vec![(0.0f32, 0.0f32); node_count];

    let mut stats = ForceStats {
        iterations: 0,
        converged: false,
    };

    for _ in 0..force.max_iterations {
        let mut forces = vec![(0.0f32, 0.0f32); node_count];

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let mut dx = centers[i].0 - centers[j].0;
                let mut dy = centers[i].1 - centers[j].1;
                if dx.abs() < f32::EPSILON && dy.abs() < f32::EPSILON {
                    // Coincident centers have no direction; nudge by index so
                    // the pair separates the same way every run.
                    dx = 0.01 * (j - i) as f32;
                    dy = 0.017;
                }
                let dist = (dx * dx + dy * dy).sqrt().max(force.min_distance);
                let magnitude = force.repulsion_strength / (dist * dist);
                let fx = magnitude * dx / dist;
                let fy = magnitude * dy / dist;
                forces[i].0 += fx;
                forces[i].1 += fy;
                forces[j].0 -= fx;
                forces[j].1 -= fy;
            }
        }

        for &(from, to) in &graph.edges {
            if from == to {
                continue;
            }
            let dx = centers[to].0 - centers[from].0;
            let dy = centers[to].1 - centers[from].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-3);
            let magnitude = force.spring_strength * (dist - rest_length);
            let fx = magnitude * dx / dist;
            let fy = magnitude * dy / dist;
            forces[from].0 += fx;
            forces[from].1 += fy;
            forces[to].0 -= fx;
            forces[to].1 -= fy;
        }

        let mut max_displacement = 0.0f32;
        for i in 0..node_count {
            velocities[i].0 = (velocities[i].0 + forces[i].0) * force.damping;
            velocities[i].1 = (velocities[i].1 + forces[i].1) * force.damping;
            centers[i].0 += velocities[i].0;
            centers[i].1 += velocities[i].1;
            let displacement = velocities[i].0.hypot(velocities[i].1);
            max_displacement = max_displacement.max(displacement);
        }

        stats.iterations += 1;
        if max_displacement < force.convergence_threshold {
            stats.converged = true;
            break;
        }
    }

    if !stats.converged {
        tracing::warn!(
            iterations = stats.iterations,
            "force layout hit the iteration cap before converging"
        );
    }

    (
        super::normalize_to_padding(&centers, sizes, config.padding),
        stats,
    )
}

/// Deterministic scatter: node id -> FNV-1a -> splitmix64 -> unit square,
/// scaled so the cloud has room for every node at rest length.
fn initial_positions(graph: &GraphModel, rest_length: f32, clustered: bool) -> Vec<(f32, f32)> {
    let node_count = graph.node_count();
    let spread = (node_count as f32).sqrt() * rest_length;

    if !clustered || graph.components.len() <= 1 {
        return (0..node_count)
            .map(|idx| {
                let (u, v) = unit_pair(graph.id(idx));
                (u * spread, v * spread)
            })
            .collect();
    }

    // Organic seeding: one centroid per component on a ring, members
    // jittered around their centroid so clusters stay visually grouped.
    let mut centers = vec![(0.0f32, 0.0f32); node_count];
    let component_count = graph.components.len();
    let ring_radius = spread.max(rest_length);
    for (component_idx, members) in graph.components.iter().enumerate() {
        let angle = std::f32::consts::TAU * component_idx as f32 / component_count as f32;
        let centroid = (ring_radius * angle.cos(), ring_radius * angle.sin());
        let local_spread = (members.len() as f32).sqrt() * rest_length * 0.5;
        for &member in members {
            let (u, v) = unit_pair(graph.id(member));
            centers[member] = (
                centroid.0 + (u - 0.5) * local_spread,
                centroid.1 + (v - 0.5) * local_spread,
            );
        }
    }
    centers
}

fn unit_pair(id: &str) -> (f32, f32) {
    let mut state = fnv1a(id.as_bytes());
    let u = to_unit(splitmix64(&mut state));
    let v = to_unit(splitmix64(&mut state));
    (u, v)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn to_unit(value: u64) -> f32 {
    (value >> 40) as f32 / (1u64 << 24) as f32
}
