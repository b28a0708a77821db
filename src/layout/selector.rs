use crate::config::{Algorithm, SelectorConfig};
use crate::graph::GraphModel;

use super::types::Recommendation;

/// Recommends the strategy that best fits the graph's shape, with a sentence
/// the dialog can show before the user commits. Decision table, first match
/// wins; the degenerate guard runs first so a lone node or an edgeless set
/// never falls into the structural rows.
pub fn recommend(graph: &GraphModel, config: &SelectorConfig) -> Recommendation {
    if graph.node_count() <= 1 || graph.edge_count() == 0 {
        return pick(
            Algorithm::Grid,
            "No connection structure to follow; a grid keeps every node visible.".to_string(),
        );
    }

    if !graph.has_cycle {
        if graph.is_forest() {
            return pick(
                Algorithm::Tree,
                "No cycles and at most one parent per node; a tree layout preserves the branching."
                    .to_string(),
            );
        }
        if graph.components.len() == 1 {
            return pick(
                Algorithm::Hierarchical,
                "A single connected flow without cycles reads best as ordered levels.".to_string(),
            );
        }
        return pick(
            Algorithm::Layered,
            format!(
                "{} disconnected flows without cycles; layered bands keep them apart.",
                graph.components.len()
            ),
        );
    }

    let density = graph.density();
    if density > config.density_threshold {
        pick(
            Algorithm::ForceDirected,
            format!(
                "Cyclic and dense ({density:.1} connections per node); a force simulation untangles it best."
            ),
        )
    } else {
        pick(
            Algorithm::Organic,
            "Cyclic but sparse; organic placement keeps related nodes grouped.".to_string(),
        )
    }
}

fn pick(algorithm: Algorithm, reason: String) -> Recommendation {
    Recommendation { algorithm, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Connection, Node};

    fn graph(ids: &[&str], pairs: &[(&str, &str)]) -> GraphModel {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(id)).collect();
        let connections: Vec<Connection> = pairs
            .iter()
            .map(|(from, to)| Connection::new(from, to))
            .collect();
        GraphModel::build(&nodes, &connections).unwrap()
    }

    fn recommend_default(graph: &GraphModel) -> Recommendation {
        recommend(graph, &SelectorConfig::default())
    }

    #[test]
    fn isolated_node_gets_grid() {
        let g = graph(&["only"], &[]);
        assert_eq!(recommend_default(&g).algorithm, Algorithm::Grid);
    }

    #[test]
    fn edgeless_nodes_get_grid() {
        let g = graph(&["a", "b", "c"], &[]);
        assert_eq!(recommend_default(&g).algorithm, Algorithm::Grid);
    }

    #[test]
    fn chain_gets_tree() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")],
        );
        assert_eq!(recommend_default(&g).algorithm, Algorithm::Tree);
    }

    #[test]
    fn diamond_gets_hierarchical() {
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert_eq!(recommend_default(&g).algorithm, Algorithm::Hierarchical);
    }

    #[test]
    fn disconnected_diamonds_get_layered() {
        let g = graph(
            &["a", "b", "c", "d", "e", "f", "g", "h"],
            &[
                ("a", "b"),
                ("a", "c"),
                ("b", "d"),
                ("c", "d"),
                ("e", "f"),
                ("e", "g"),
                ("f", "h"),
                ("g", "h"),
            ],
        );
        assert_eq!(recommend_default(&g).algorithm, Algorithm::Layered);
    }

    #[test]
    fn sparse_cycle_gets_organic() {
        // 3 nodes, 3 edges: density 1.0, at or below the 1.5 threshold.
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let recommendation = recommend_default(&g);
        assert_eq!(recommendation.algorithm, Algorithm::Organic);
        assert!(!recommendation.reason.is_empty());
    }

    #[test]
    fn dense_cycle_gets_force_directed() {
        let g = graph(
            &["a", "b", "c"],
            &[
                ("a", "b"),
                ("b", "c"),
                ("c", "a"),
                ("a", "c"),
                ("b", "a"),
                ("c", "b"),
            ],
        );
        // 6 edges over 3 nodes: density 2.0.
        assert_eq!(recommend_default(&g).algorithm, Algorithm::ForceDirected);
    }

    #[test]
    fn density_threshold_is_configurable() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let config = SelectorConfig {
            density_threshold: 0.5,
        };
        assert_eq!(recommend(&g, &config).algorithm, Algorithm::ForceDirected);
    }
}
