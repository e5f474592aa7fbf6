//! Prompt domain
//!
//! Character prompts for the panel and templates for each debate turn and
//! for the synthesis step.

mod persona;
mod template;

pub use template::PromptTemplate;
