use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::{Algorithm, Alignment, Direction, LayoutConfig, load_config};
use crate::error::LayoutError;
use crate::graph::GraphModel;
use crate::ir::{Connection, Node};
use crate::layout::{compute_layout, recommend};

#[derive(Parser, Debug)]
#[command(
    name = "fgl",
    version,
    about = "Automatic graph layout for workflow diagrams"
)]
pub struct Args {
    /// Input graph JSON ({"nodes": [...], "connections": [...]}) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the laid-out graph. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Layout algorithm; omitted means auto-selection
    #[arg(short = 'a', long = "algorithm")]
    pub algorithm: Option<String>,

    /// Rank direction for hierarchical layouts (TB or LR)
    #[arg(short = 'd', long = "direction")]
    pub direction: Option<String>,

    /// Minimum gap between sibling nodes, px
    #[arg(long = "nodeSpacing")]
    pub node_spacing: Option<f32>,

    /// Gap between ranks or rings, px
    #[arg(long = "levelSpacing")]
    pub level_spacing: Option<f32>,

    /// Margin from the layout origin, px
    #[arg(long = "padding")]
    pub padding: Option<f32>,

    /// Cross-axis alignment of shorter ranks
    #[arg(long = "alignment", value_enum)]
    pub alignment: Option<AlignmentArg>,

    /// Print the recommended algorithm and its reason, then exit
    #[arg(long = "recommend")]
    pub recommend: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AlignmentArg {
    Start,
    Center,
    End,
}

impl From<AlignmentArg> for Alignment {
    fn from(value: AlignmentArg) -> Self {
        match value {
            AlignmentArg::Start => Alignment::Start,
            AlignmentArg::Center => Alignment::Center,
            AlignmentArg::End => Alignment::End,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    connections: Vec<Connection>,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args)?;

    let input = read_input(args.input.as_deref())?;
    let document: GraphDocument = serde_json::from_str(&input)?;

    if args.recommend {
        let graph = GraphModel::build(&document.nodes, &document.connections)?;
        let recommendation = recommend(&graph, &config.selector);
        println!(
            "{}: {}",
            recommendation.algorithm.token(),
            recommendation.reason
        );
        return Ok(());
    }

    let result = compute_layout(&document.nodes, &document.connections, &config)?;
    let json = serde_json::to_string_pretty(&result)?;
    write_output(&json, args.output.as_deref())?;
    Ok(())
}

fn apply_overrides(config: &mut LayoutConfig, args: &Args) -> Result<()> {
    if let Some(token) = args.algorithm.as_deref() {
        let algorithm = Algorithm::from_token(token)
            .ok_or_else(|| LayoutError::UnknownAlgorithm(token.to_string()))?;
        config.algorithm = Some(algorithm);
    }
    if let Some(token) = args.direction.as_deref() {
        config.direction = Direction::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("unknown direction: {token:?} (expected TB or LR)"))?;
    }
    if let Some(v) = args.node_spacing {
        config.node_spacing = v;
    }
    if let Some(v) = args.level_spacing {
        config.level_spacing = v;
    }
    if let Some(v) = args.padding {
        config.padding = v;
    }
    if let Some(v) = args.alignment {
        config.alignment = v.into();
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            if io::stdin().is_terminal() {
                return Err(anyhow::anyhow!(
                    "no input file given and stdin is a terminal (use --input or pipe JSON in)"
                ));
            }
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_graph_document() {
        let input = r#"{
            "nodes": [
                {"id": "start", "type": "trigger", "position": {"x": 0, "y": 0}},
                {"id": "end", "size": {"width": 80, "height": 40}}
            ],
            "connections": [
                {"fromNodeId": "start", "toNodeId": "end"}
            ]
        }"#;
        let document: GraphDocument = serde_json::from_str(input).unwrap();
        assert_eq!(document.nodes.len(), 2);
        assert_eq!(document.nodes[0].kind, "trigger");
        assert_eq!(document.nodes[1].size.width, 80.0);
        assert_eq!(document.connections.len(), 1);
    }

    #[test]
    fn unknown_algorithm_flag_is_an_error() {
        let mut config = LayoutConfig::default();
        let args = Args {
            input: None,
            output: None,
            config: None,
            algorithm: Some("dagre".to_string()),
            direction: None,
            node_spacing: None,
            level_spacing: None,
            padding: None,
            alignment: None,
            recommend: false,
        };
        let err = apply_overrides(&mut config, &args).unwrap_err();
        assert!(err.to_string().contains("dagre"));
    }
}
