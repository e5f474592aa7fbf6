//! Prompt templates for the debate flow

use super::persona;
use crate::core::persona::Persona;
use crate::debate::value_objects::RoundNumber;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt binding a model to a persona's character
    pub fn persona_system(persona: Persona) -> &'static str {
        match persona {
            Persona::JeffBarr => persona::JEFF_BARR,
            Persona::Swami => persona::SWAMI,
            Persona::WernerVogels => persona::WERNER_VOGELS,
        }
    }

    /// User prompt for one persona turn
    pub fn turn_prompt(problem: &str, round: RoundNumber, context: &str) -> String {
        format!(
            "Problem: {}\n\nRound {} ({})\n\nPrevious context:\n{}",
            problem,
            round.as_u8(),
            round.round_type(),
            context
        )
    }

    /// System prompt for the synthesis step
    pub fn synthesis_system() -> &'static str {
        persona::SYNTHESIZER
    }

    /// User prompt for synthesis: the transcript, as-is
    pub fn synthesis_prompt(transcript: &str) -> String {
        transcript.to_string()
    }
}
