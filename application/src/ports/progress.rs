//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate.

use debate_domain::{Persona, RoundNumber, SessionId};
use std::time::Duration;

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once the memory session is open
    fn on_debate_start(&self, _session_id: &SessionId) {}

    /// Called when a round starts
    fn on_round_start(&self, round: RoundNumber, total_turns: usize);

    /// Called when a persona's turn is recorded
    fn on_turn_complete(&self, round: RoundNumber, persona: Persona, success: bool);

    /// Called when a round completes
    fn on_round_complete(&self, round: RoundNumber);

    /// Called while waiting between turns
    fn on_pacing(&self, _delay: Duration) {}

    /// Called when the synthesis step starts
    fn on_synthesis_start(&self) {}

    /// Called when the synthesis step ends
    fn on_synthesis_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: RoundNumber, _total_turns: usize) {}
    fn on_turn_complete(&self, _round: RoundNumber, _persona: Persona, _success: bool) {}
    fn on_round_complete(&self, _round: RoundNumber) {}
}
