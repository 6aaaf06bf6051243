//! Scenario loading and configuration.
//!
//! Scenarios are RON files naming a match setup, so a session can start with
//! the field, bunkers and teams already in place instead of typing them in.

use std::path::Path;

use paintball_core::setup::MatchSetup;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// A complete scenario configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Field, bunkers and teams.
    pub setup: MatchSetup,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "Default Skirmish".to_string(),
            description: "Two teams in opposite corners of a 10x10 field".to_string(),
            setup: MatchSetup::new(10, 10)
                .bunker(1, 1, 10, "B1")
                .bunker(10, 10, 10, "B2")
                .team("T1", "B1")
                .team("T2", "B2"),
        }
    }
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario = Self::from_ron_str(&contents)?;
        tracing::debug!(name = %scenario.name, path = %path.display(), "Scenario loaded");
        Ok(scenario)
    }

    /// Load from a RON string (useful for embedded scenarios).
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Four teams around a 20x20 field, each with a rich home bunker, plus
    /// four poor unclaimed outposts.
    #[must_use]
    pub fn four_corners() -> Self {
        Self {
            name: "Four Corners".to_string(),
            description: "Free-for-all between four teams".to_string(),
            setup: MatchSetup::new(20, 20)
                .bunker(1, 1, 12, "nw")
                .bunker(20, 1, 12, "ne")
                .bunker(1, 20, 12, "sw")
                .bunker(20, 20, 12, "se")
                .bunker(10, 5, 2, "north-post")
                .bunker(15, 10, 2, "east-post")
                .bunker(10, 15, 2, "south-post")
                .bunker(5, 10, 2, "west-post")
                .team("alpha", "nw")
                .team("bravo", "ne")
                .team("charlie", "sw")
                .team("delta", "se"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        let game = scenario.setup.build().unwrap();
        assert_eq!(game.teams().size(), 2);
        assert_eq!(game.width(), 10);
    }

    #[test]
    fn test_four_corners_scenario() {
        let game = Scenario::four_corners().setup.build().unwrap();
        assert_eq!(game.teams().size(), 4);
        assert_eq!(game.buildings().size(), 8);
    }

    #[test]
    fn test_parse_from_ron() {
        let ron = r#"
            Scenario(
                name: "Test",
                description: "Test scenario",
                setup: (
                    width: 12,
                    height: 10,
                    bunkers: [(x: 1, y: 1, treasury: 5, name: "a")],
                    teams: [(name: "solo", bunker: "a")],
                ),
            )
        "#;
        let scenario = Scenario::from_ron_str(ron).unwrap();
        assert_eq!(scenario.name, "Test");
        assert_eq!(scenario.setup.width, 12);
        assert_eq!(scenario.setup.teams.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Scenario::load("does/not/exist.ron"),
            Err(ScenarioError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ron");
        let text = ron::to_string(&Scenario::four_corners()).unwrap();
        std::fs::write(&path, text).unwrap();

        let loaded = Scenario::load(&path).unwrap();
        assert_eq!(loaded, Scenario::four_corners());
    }

    #[test]
    fn test_bundled_scenario_parses() {
        let text = include_str!("../scenarios/corners.ron");
        let scenario = Scenario::from_ron_str(text).unwrap();
        let game = scenario.setup.build().unwrap();
        assert_eq!(game.buildings().size(), 3);
        assert_eq!(game.current_team().map(|t| t.name()), Some("reds"));
    }
}
