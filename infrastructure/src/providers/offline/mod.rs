//! Offline gateway
//!
//! Answers every prompt locally with canned, persona-flavoured text so a
//! full debate can run without credentials or network access. Replies are
//! deterministic: the same persona, round and problem always produce the
//! same text.

mod replies;

use async_trait::async_trait;
use debate_application::{GatewayError, LlmGateway, LlmSession};
use debate_domain::{LlmResponse, Model, Persona, PromptTemplate};
use tracing::debug;

/// Who a session was opened for, recovered from its system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speaker {
    Panelist(Persona),
    Synthesizer,
}

impl Speaker {
    fn from_system_prompt(system_prompt: &str) -> Option<Self> {
        if system_prompt == PromptTemplate::synthesis_system() {
            return Some(Speaker::Synthesizer);
        }
        Persona::panel()
            .into_iter()
            .find(|p| system_prompt == PromptTemplate::persona_system(*p))
            .map(Speaker::Panelist)
    }
}

/// Gateway that never leaves the process
#[derive(Debug, Default, Clone)]
pub struct OfflineGateway;

impl OfflineGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmGateway for OfflineGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let speaker = Speaker::from_system_prompt(system_prompt).ok_or_else(|| {
            GatewayError::SessionError("offline gateway only serves the debate panel".to_string())
        })?;
        debug!(?speaker, model = %model, "Opening offline session");
        Ok(Box::new(OfflineSession {
            model: model.clone(),
            speaker,
        }))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(Model::known_models())
    }
}

struct OfflineSession {
    model: Model,
    speaker: Speaker,
}

#[async_trait]
impl LlmSession for OfflineSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<LlmResponse, GatewayError> {
        let text = match self.speaker {
            Speaker::Panelist(persona) => {
                let round = replies::round_of(content).unwrap_or(1);
                let problem = replies::problem_of(content);
                replies::panelist(persona, round, problem)
            }
            Speaker::Synthesizer => replies::synthesis(content),
        };
        Ok(LlmResponse::from_text(text).with_model(format!("offline/{}", self.model)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{RoundNumber, extract_diagram, missing_sections};

    async fn ask(system: &str, prompt: &str) -> String {
        let gateway = OfflineGateway::new();
        let session = gateway
            .create_session_with_system_prompt(&Model::default(), system)
            .await
            .unwrap();
        session.send(prompt).await.unwrap().text().unwrap()
    }

    #[tokio::test]
    async fn test_each_persona_has_its_own_voice() {
        let prompt = PromptTemplate::turn_prompt("Build a todo app", RoundNumber::One, "");

        let jeff = ask(PromptTemplate::persona_system(Persona::JeffBarr), &prompt).await;
        let swami = ask(PromptTemplate::persona_system(Persona::Swami), &prompt).await;
        let werner = ask(PromptTemplate::persona_system(Persona::WernerVogels), &prompt).await;

        assert!(jeff.starts_with("Here's the simple approach..."));
        assert!(swami.starts_with("We can ship this in weeks..."));
        assert_ne!(werner, jeff);
        assert!(jeff.contains("Build a todo app"));
    }

    #[tokio::test]
    async fn test_replies_are_deterministic_per_round() {
        let system = PromptTemplate::persona_system(Persona::WernerVogels);
        let round_one = PromptTemplate::turn_prompt("Mars currency", RoundNumber::One, "");
        let round_three = PromptTemplate::turn_prompt("Mars currency", RoundNumber::Three, "");

        assert_eq!(ask(system, &round_one).await, ask(system, &round_one).await);
        assert_ne!(ask(system, &round_one).await, ask(system, &round_three).await);
    }

    #[tokio::test]
    async fn test_synthesis_has_every_section() {
        let doc = ask(
            PromptTemplate::synthesis_system(),
            "[jeff_barr - Round 1]: Lambda.",
        )
        .await;
        assert!(missing_sections(&doc).is_empty());
        assert!(extract_diagram(&doc).starts_with("graph TD"));
    }

    #[tokio::test]
    async fn test_unknown_system_prompt_is_rejected() {
        let gateway = OfflineGateway::new();
        let result = gateway
            .create_session_with_system_prompt(&Model::default(), "You are a pirate.")
            .await;
        assert!(matches!(result, Err(GatewayError::SessionError(_))));
    }
}
