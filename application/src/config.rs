//! Application-level configuration.
//!
//! This module provides configuration types that control how the debate
//! use case behaves: which model speaks for whom, retry policy and pacing.

use debate_domain::{Model, Persona, RetryPolicy};
use std::time::Duration;

/// Model bound to each persona of the panel
#[derive(Debug, Clone, Default)]
pub struct PanelModels {
    pub jeff_barr: Model,
    pub swami: Model,
    pub werner_vogels: Model,
}

impl PanelModels {
    /// The same model for every persona.
    pub fn uniform(model: Model) -> Self {
        Self {
            jeff_barr: model.clone(),
            swami: model.clone(),
            werner_vogels: model,
        }
    }

    pub fn for_persona(&self, persona: Persona) -> &Model {
        match persona {
            Persona::JeffBarr => &self.jeff_barr,
            Persona::Swami => &self.swami,
            Persona::WernerVogels => &self.werner_vogels,
        }
    }

    pub fn set(&mut self, persona: Persona, model: Model) {
        match persona {
            Persona::JeffBarr => self.jeff_barr = model,
            Persona::Swami => self.swami = model,
            Persona::WernerVogels => self.werner_vogels = model,
        }
    }
}

/// Debate behavior configuration.
#[derive(Debug, Clone)]
pub struct DebateConfig {
    pub panel: PanelModels,
    pub synthesis_model: Model,
    pub retry: RetryPolicy,
    /// Wait between persona turns.
    pub pacing: Duration,
}

impl DebateConfig {
    /// One minute between turns, roughly one spoken answer.
    pub const DEFAULT_PACING: Duration = Duration::from_secs(60);

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_synthesis_model(mut self, model: Model) -> Self {
        self.synthesis_model = model;
        self
    }

    pub fn with_panel(mut self, panel: PanelModels) -> Self {
        self.panel = panel;
        self
    }
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            panel: PanelModels::default(),
            synthesis_model: Model::default(),
            retry: RetryPolicy::default(),
            pacing: Self::DEFAULT_PACING,
        }
    }
}
