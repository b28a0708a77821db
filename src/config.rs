use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Axis assignment for rank-based layouts: `TB` stacks ranks top-to-bottom,
/// `LR` left-to-right. Ignored by force, circular and grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "LR")]
    LeftRight,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" => Some(Self::TopBottom),
            "LR" => Some(Self::LeftRight),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
        }
    }
}

/// How ranks narrower than the widest rank are shifted along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    Hierarchical,
    Tree,
    Layered,
    ForceDirected,
    Organic,
    Circular,
    Grid,
}

static ALGORITHM_TOKENS: Lazy<HashMap<&'static str, Algorithm>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for algorithm in Algorithm::ALL {
        table.insert(algorithm.token(), algorithm);
    }
    table
});

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Hierarchical,
        Algorithm::Tree,
        Algorithm::Layered,
        Algorithm::ForceDirected,
        Algorithm::Organic,
        Algorithm::Circular,
        Algorithm::Grid,
    ];

    /// Parses the identifier used by config files and the editor dialog.
    /// Unknown identifiers are the caller's `LayoutError::UnknownAlgorithm`.
    pub fn from_token(token: &str) -> Option<Self> {
        ALGORITHM_TOKENS.get(token).copied()
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::Tree => "tree",
            Self::Layered => "layered",
            Self::ForceDirected => "forceDirected",
            Self::Organic => "organic",
            Self::Circular => "circular",
            Self::Grid => "grid",
        }
    }
}

/// Tunables for the force-directed/organic simulation. The defaults are the
/// empirical constants the original dialog shipped with; they are carried
/// as-is rather than re-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceConfig {
    /// Hard cap on simulation rounds regardless of convergence.
    pub max_iterations: usize,
    /// Early exit once the largest per-node displacement drops below this.
    pub convergence_threshold: f32,
    /// Velocity retention per round, must stay below 1 to converge.
    pub damping: f32,
    /// Scale of the all-pairs inverse-square repulsion.
    pub repulsion_strength: f32,
    /// Scale of the per-edge spring pull.
    pub spring_strength: f32,
    /// Distance floor for the repulsion term, avoids singularities.
    pub min_distance: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            convergence_threshold: 0.5,
            damping: 0.5,
            repulsion_strength: 50_000.0,
            spring_strength: 0.05,
            min_distance: 16.0,
        }
    }
}

/// Shape thresholds for the automatic algorithm recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Edges-per-node ratio above which a cyclic graph is considered dense.
    pub density_threshold: f32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            density_threshold: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Requested strategy; `None` asks the selector to pick one.
    pub algorithm: Option<Algorithm>,
    pub direction: Direction,
    /// Minimum gap between sibling nodes along the cross axis, px.
    pub node_spacing: f32,
    /// Gap between ranks (or rings), px.
    pub level_spacing: f32,
    /// Margin between the layout origin and the first node, px.
    pub padding: f32,
    pub alignment: Alignment,
    /// Barycenter crossing-reduction sweeps per direction.
    pub ordering_passes: usize,
    pub force: ForceConfig,
    pub selector: SelectorConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: None,
            direction: Direction::TopBottom,
            node_spacing: 50.0,
            level_spacing: 80.0,
            padding: 40.0,
            alignment: Alignment::Center,
            ordering_passes: 4,
            force: ForceConfig::default(),
            selector: SelectorConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("nodeSpacing", self.node_spacing),
            ("levelSpacing", self.level_spacing),
            ("padding", self.padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.force.max_iterations == 0 {
            return Err(LayoutError::InvalidConfig(
                "force.maxIterations must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.force.damping) || self.force.damping == 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "force.damping must be in (0, 1), got {}",
                self.force.damping
            )));
        }
        if self.force.min_distance <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "force.minDistance must be positive, got {}",
                self.force.min_distance
            )));
        }
        if self.selector.density_threshold <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "selector.densityThreshold must be positive, got {}",
                self.selector.density_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForceConfigFile {
    max_iterations: Option<usize>,
    convergence_threshold: Option<f32>,
    damping: Option<f32>,
    repulsion_strength: Option<f32>,
    spring_strength: Option<f32>,
    min_distance: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    algorithm: Option<String>,
    direction: Option<String>,
    node_spacing: Option<f32>,
    level_spacing: Option<f32>,
    padding: Option<f32>,
    alignment: Option<Alignment>,
    ordering_passes: Option<usize>,
    force: Option<ForceConfigFile>,
    density_threshold: Option<f32>,
}

/// Loads a layout config file (JSON5, so trailing commas and comments from
/// hand-edited files are fine) and merges it over the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let mut config = LayoutConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: LayoutConfigFile = json5::from_str(&contents)?;

    if let Some(token) = parsed.algorithm.as_deref() {
        let algorithm = Algorithm::from_token(token)
            .ok_or_else(|| LayoutError::UnknownAlgorithm(token.to_string()))?;
        config.algorithm = Some(algorithm);
    }
    if let Some(token) = parsed.direction.as_deref() {
        let direction = Direction::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("unknown direction: {token:?}"))?;
        config.direction = direction;
    }
    if let Some(v) = parsed.node_spacing {
        config.node_spacing = v;
    }
    if let Some(v) = parsed.level_spacing {
        config.level_spacing = v;
    }
    if let Some(v) = parsed.padding {
        config.padding = v;
    }
    if let Some(v) = parsed.alignment {
        config.alignment = v;
    }
    if let Some(v) = parsed.ordering_passes {
        config.ordering_passes = v;
    }
    if let Some(force) = parsed.force {
        if let Some(v) = force.max_iterations {
            config.force.max_iterations = v;
        }
        if let Some(v) = force.convergence_threshold {
            config.force.convergence_threshold = v;
        }
        if let Some(v) = force.damping {
            config.force.damping = v;
        }
        if let Some(v) = force.repulsion_strength {
            config.force.repulsion_strength = v;
        }
        if let Some(v) = force.spring_strength {
            config.force.spring_strength = v;
        }
        if let Some(v) = force.min_distance {
            config.force.min_distance = v;
        }
    }
    if let Some(v) = parsed.density_threshold {
        config.selector.density_threshold = v;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_tokens_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_token(algorithm.token()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_token("forceDirected"), Some(Algorithm::ForceDirected));
        assert_eq!(Algorithm::from_token("dagre"), None);
        assert_eq!(Algorithm::from_token("Hierarchical"), None);
    }

    #[test]
    fn direction_accepts_td_alias() {
        assert_eq!(Direction::from_token("TD"), Some(Direction::TopBottom));
        assert_eq!(Direction::from_token("TB"), Some(Direction::TopBottom));
        assert_eq!(Direction::from_token("LR"), Some(Direction::LeftRight));
        assert_eq!(Direction::from_token("RL"), None);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_spacing_is_rejected() {
        let config = LayoutConfig {
            node_spacing: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let config = LayoutConfig {
            force: ForceConfig {
                max_iterations: 0,
                ..ForceConfig::default()
            },
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
