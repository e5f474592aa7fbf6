//! Debate domain entities
//!
//! [`DebateSession`] owns the progression of one debate. It only moves
//! forward: rounds are produced in order, each persona speaks once per round
//! in panel order, and nothing changes after a terminal state is reached.

use crate::core::error::DomainError;
use crate::core::persona::Persona;
use crate::core::problem::ProblemStatement;
use crate::debate::value_objects::{
    Contribution, DebateReport, DebateStatus, RoundNumber, RoundRecord, SessionId,
    SynthesisRecord,
};

/// Where a debate currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebateState {
    Created,
    Round1,
    Round2,
    Round3Consensus,
    Synthesizing,
    Complete,
    Failed,
}

impl DebateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateState::Created => "created",
            DebateState::Round1 => "round_1",
            DebateState::Round2 => "round_2",
            DebateState::Round3Consensus => "round_3_consensus",
            DebateState::Synthesizing => "synthesizing",
            DebateState::Complete => "complete",
            DebateState::Failed => "failed",
        }
    }

    /// The round being played in this state, if any.
    pub fn round(&self) -> Option<RoundNumber> {
        match self {
            DebateState::Round1 => Some(RoundNumber::One),
            DebateState::Round2 => Some(RoundNumber::Two),
            DebateState::Round3Consensus => Some(RoundNumber::Three),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateState::Complete | DebateState::Failed)
    }

    fn for_round(round: RoundNumber) -> Self {
        match round {
            RoundNumber::One => DebateState::Round1,
            RoundNumber::Two => DebateState::Round2,
            RoundNumber::Three => DebateState::Round3Consensus,
        }
    }
}

impl std::fmt::Display for DebateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a debate ended in [`DebateState::Failed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The memory store could not open a session. Only valid from `Created`.
    SessionCreation(String),
    /// The synthesis call failed. Only valid from `Synthesizing`. The
    /// message is surfaced to the caller as-is.
    Synthesis(String),
    /// The caller cancelled. Valid from any non-terminal state.
    Cancelled,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::SessionCreation(e) => write!(f, "Session creation failed: {}", e),
            FailureReason::Synthesis(e) => write!(f, "{}", e),
            FailureReason::Cancelled => write!(f, "Debate cancelled"),
        }
    }
}

/// A single panel debate (Entity)
#[derive(Debug, Clone)]
pub struct DebateSession {
    session_id: Option<SessionId>,
    problem: ProblemStatement,
    state: DebateState,
    rounds: Vec<RoundRecord>,
    synthesis: Option<SynthesisRecord>,
    failure: Option<FailureReason>,
}

impl DebateSession {
    pub fn new(problem: ProblemStatement) -> Self {
        Self {
            session_id: None,
            problem,
            state: DebateState::Created,
            rounds: Vec::with_capacity(RoundNumber::all().len()),
            synthesis: None,
            failure: None,
        }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn problem(&self) -> &ProblemStatement {
        &self.problem
    }

    pub fn state(&self) -> DebateState {
        self.state
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn synthesis(&self) -> Option<&SynthesisRecord> {
        self.synthesis.as_ref()
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        self.failure.as_ref()
    }

    /// `Created → Round1`, binding the session id for the rest of the debate.
    pub fn start(&mut self, session_id: SessionId) -> Result<(), DomainError> {
        if self.state != DebateState::Created {
            return Err(DomainError::transition("start", self.state));
        }
        self.session_id = Some(session_id);
        self.enter_round(RoundNumber::One);
        Ok(())
    }

    /// The persona due to speak next in the current round.
    pub fn next_speaker(&self) -> Option<Persona> {
        self.state.round()?;
        self.rounds.last().and_then(RoundRecord::next_speaker)
    }

    /// Record a turn. The contribution must come from the expected speaker.
    pub fn record_turn(&mut self, contribution: Contribution) -> Result<(), DomainError> {
        let expected = self
            .next_speaker()
            .ok_or_else(|| DomainError::transition("record a turn", self.state))?;
        if contribution.persona != expected {
            return Err(DomainError::transition(
                format!("record a turn for {}", contribution.persona.id()),
                format!("{} is due to speak", expected.id()),
            ));
        }
        if let Some(round) = self.rounds.last_mut() {
            round.contributions.push(contribution);
        }
        Ok(())
    }

    /// Move past a finished round: on to the next round, or to synthesis
    /// after round 3. Persona failures inside the round do not matter here.
    pub fn advance(&mut self) -> Result<DebateState, DomainError> {
        let round = self
            .state
            .round()
            .ok_or_else(|| DomainError::transition("advance", self.state))?;
        if self.next_speaker().is_some() {
            return Err(DomainError::transition(
                "advance",
                format!("round {} is unfinished", round),
            ));
        }
        match round.next() {
            Some(next) => self.enter_round(next),
            None => self.state = DebateState::Synthesizing,
        }
        Ok(self.state)
    }

    /// `Synthesizing → Complete`.
    pub fn complete(&mut self, synthesis: SynthesisRecord) -> Result<(), DomainError> {
        if self.state != DebateState::Synthesizing {
            return Err(DomainError::transition("complete", self.state));
        }
        self.synthesis = Some(synthesis);
        self.state = DebateState::Complete;
        Ok(())
    }

    /// Enter the absorbing `Failed` state.
    pub fn fail(&mut self, reason: FailureReason) -> Result<(), DomainError> {
        let allowed = match &reason {
            FailureReason::SessionCreation(_) => self.state == DebateState::Created,
            FailureReason::Synthesis(_) => self.state == DebateState::Synthesizing,
            FailureReason::Cancelled => !self.state.is_terminal(),
        };
        if !allowed {
            return Err(DomainError::transition(
                format!("fail with \"{}\"", reason),
                self.state,
            ));
        }
        self.failure = Some(reason);
        self.state = DebateState::Failed;
        Ok(())
    }

    /// Caller-facing summary. Rounds played so far are included either way.
    pub fn to_report(&self) -> DebateReport {
        let (status, synthesis, diagram) = match (&self.state, &self.synthesis) {
            (DebateState::Complete, Some(s)) => (
                DebateStatus::Complete,
                Some(s.text.clone()),
                Some(s.diagram.clone()),
            ),
            _ => (DebateStatus::Error, None, None),
        };
        let error = match status {
            DebateStatus::Complete => None,
            DebateStatus::Error => Some(
                self.failure
                    .as_ref()
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| format!("Debate ended in state {}", self.state)),
            ),
        };

        DebateReport {
            session_id: self.session_id.clone(),
            status,
            problem: Some(self.problem.content().to_string()),
            synthesis,
            diagram,
            error,
            rounds: self.rounds.clone(),
        }
    }

    fn enter_round(&mut self, round: RoundNumber) {
        self.rounds.push(RoundRecord::new(round));
        self.state = DebateState::for_round(round);
    }
}
