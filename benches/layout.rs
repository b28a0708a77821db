use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flowgraph_layout::{Algorithm, Connection, LayoutConfig, Node, compute_layout};
use std::hint::black_box;

/// Chain backbone plus deterministic long-range shortcuts, the same shape
/// the layout dialog sees on large generated workflows.
fn dense_graph(nodes: usize, extra_edges: usize) -> (Vec<Node>, Vec<Connection>) {
    let node_list: Vec<Node> = (0..nodes).map(|i| Node::new(&format!("n{i}"))).collect();
    let mut connections: Vec<Connection> = (0..nodes.saturating_sub(1))
        .map(|i| Connection::new(&format!("n{i}"), &format!("n{}", i + 1)))
        .collect();
    let mut count = 0usize;
    'outer: for i in 0..nodes {
        for j in (i + 2)..nodes {
            if count >= extra_edges {
                break 'outer;
            }
            connections.push(Connection::new(&format!("n{i}"), &format!("n{j}")));
            count += 1;
        }
    }
    (node_list, connections)
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &(label, nodes, extra) in &[("small", 10usize, 5usize), ("medium", 60, 40), ("large", 150, 120)] {
        let (node_list, connections) = dense_graph(nodes, extra);
        for algorithm in Algorithm::ALL {
            let config = LayoutConfig {
                algorithm: Some(algorithm),
                ..LayoutConfig::default()
            };
            group.bench_function(BenchmarkId::new(algorithm.token(), label), |b| {
                b.iter(|| {
                    compute_layout(black_box(&node_list), black_box(&connections), &config)
                        .unwrap()
                });
            });
        }
    }
    group.finish();
}

fn bench_auto_selection(c: &mut Criterion) {
    let (node_list, connections) = dense_graph(60, 40);
    let config = LayoutConfig::default();
    c.bench_function("layout/auto", |b| {
        b.iter(|| compute_layout(black_box(&node_list), black_box(&connections), &config).unwrap());
    });
}

criterion_group!(benches, bench_algorithms, bench_auto_selection);
criterion_main!(benches);
