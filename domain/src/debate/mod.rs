//! Debate domain
//!
//! The multi-round progression the panel walks through and the records it
//! produces along the way.
//!
//! - [`entities::DebateSession`]: the state machine, one per debate
//! - [`value_objects`]: rounds, contributions, synthesis and the final report

pub mod entities;
pub mod value_objects;
