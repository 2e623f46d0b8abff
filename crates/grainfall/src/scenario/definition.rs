//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use grainfall_core::{Sandbox, SandboxConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::actions::ScenarioAction;
use super::verification::VerificationCondition;

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Sandbox to run in; the host's config when absent
    #[serde(default)]
    pub config: Option<SandboxConfig>,

    /// Initial setup actions (run before main scenario)
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Main scenario actions
    pub actions: Vec<ScenarioAction>,

    /// Verification checks to run after scenario
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,
}

impl ScenarioDefinition {
    /// Parse a scenario from RON text
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).context("Failed to parse RON scenario")
    }

    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Fresh sandbox for this scenario
    pub fn build_sandbox(&self, fallback: &SandboxConfig) -> Result<Sandbox> {
        let config = self.config.clone().unwrap_or_else(|| fallback.clone());
        Sandbox::new(config)
            .with_context(|| format!("Invalid sandbox config in scenario: {}", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainfall_core::simulation::ParticleKind;

    #[test]
    fn test_scenario_serialization() {
        let scenario = ScenarioDefinition {
            name: "Test Scenario".to_string(),
            description: "A test scenario".to_string(),
            config: None,
            setup: vec![ScenarioAction::SelectKind {
                kind: ParticleKind::Water,
            }],
            actions: vec![
                ScenarioAction::Draw { x: 4, y: 4 },
                ScenarioAction::Log {
                    message: "Test message".to_string(),
                },
            ],
            verify: vec![VerificationCondition::ParticleAt {
                row: 4,
                col: 4,
                expected: ParticleKind::Water,
            }],
        };

        let ron = ron::ser::to_string_pretty(&scenario, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron.contains("Test Scenario"));
        assert!(ron.contains("SelectKind"));

        let deserialized: ScenarioDefinition = ron::from_str(&ron).unwrap();
        assert_eq!(deserialized.name, scenario.name);
        assert_eq!(deserialized.actions, scenario.actions);
    }

    #[test]
    fn test_optional_sections_default() {
        let scenario = ScenarioDefinition::from_ron_str(r#"(name: "bare", actions: [])"#).unwrap();
        assert!(scenario.description.is_empty());
        assert!(scenario.config.is_none());
        assert!(scenario.setup.is_empty());
        assert!(scenario.verify.is_empty());
    }

    #[test]
    fn test_build_sandbox_prefers_own_config() {
        let scenario = ScenarioDefinition::from_ron_str(
            r#"(name: "small", config: Some((canvas_width: 12, canvas_height: 8)), actions: [])"#,
        )
        .unwrap();
        let sandbox = scenario.build_sandbox(&SandboxConfig::default()).unwrap();
        assert_eq!(sandbox.canvas().width(), 12);
        assert_eq!(sandbox.canvas().height(), 8);

        let scenario = ScenarioDefinition::from_ron_str(
            r#"(name: "broken", config: Some((tick_rate: 0)), actions: [])"#,
        )
        .unwrap();
        assert!(scenario.build_sandbox(&SandboxConfig::default()).is_err());
    }
}
