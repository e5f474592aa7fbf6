//! Debate configuration from TOML (`[debate]` section)
//!
//! ```toml
//! [debate]
//! pacing_seconds = 60
//! model = "claude-sonnet-4"          # default for every persona
//! synthesis_model = "claude-opus-4.5"
//!
//! [debate.personas]
//! werner_vogels = "claude-opus-4.6"
//! ```

use super::ConfigValidationError;
use debate_application::PanelModels;
use debate_domain::{Model, Persona};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Raw debate configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Seconds to wait between persona turns
    pub pacing_seconds: u64,
    /// Model for every persona without an override
    pub model: Option<String>,
    /// Model for the synthesis step
    pub synthesis_model: Option<String>,
    /// Per-persona model overrides, keyed by persona id
    pub personas: BTreeMap<String, String>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            pacing_seconds: 60,
            model: None,
            synthesis_model: None,
            personas: BTreeMap::new(),
        }
    }
}

impl FileDebateConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_secs(self.pacing_seconds)
    }

    /// Resolve the panel. Blank names and unknown personas are skipped;
    /// [`validate`](Self::validate) reports them.
    pub fn panel(&self) -> PanelModels {
        let default_model = parse_model(self.model.as_deref()).unwrap_or_default();
        let mut panel = PanelModels::uniform(default_model);
        for (key, model) in &self.personas {
            if let Ok(persona) = key.parse::<Persona>()
                && let Some(model) = parse_model(Some(model.as_str()))
            {
                panel.set(persona, model);
            }
        }
        panel
    }

    pub fn synthesis_model(&self) -> Model {
        parse_model(self.synthesis_model.as_deref()).unwrap_or_default()
    }

    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("debate.model", &self.model),
            ("debate.synthesis_model", &self.synthesis_model),
        ] {
            if value.as_deref().is_some_and(|m| m.trim().is_empty()) {
                issues.push(ConfigValidationError::EmptyModel {
                    field: field.to_string(),
                });
            }
        }

        for (key, model) in &self.personas {
            if key.parse::<Persona>().is_err() {
                issues.push(ConfigValidationError::UnknownPersona(key.clone()));
            }
            if model.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyModel {
                    field: format!("debate.personas.{}", key),
                });
            }
        }

        issues
    }
}

fn parse_model(name: Option<&str>) -> Option<Model> {
    name.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Model::from)
}
