//! Run Debate use case
//!
//! Drives one panel debate from problem statement to synthesis:
//!
//! ```text
//! for round in 1..=3:
//!     for persona in [Jeff Barr, Swami, Werner Vogels]:
//!         context  = memory.read(session, persona)     (retry, sentinel on failure)
//!         response = persona(turn_prompt(context))      (retry, sentinel on failure)
//!         memory.append(session, persona, round, response)   (retry, best effort)
//!         pacing delay
//! transcript = memory.read_all(session)                (retry, sentinel on failure)
//! synthesis  = synthesizer(transcript)                  (retry, terminal on failure)
//! ```
//!
//! Everything runs strictly in sequence; persona failures degrade the turn
//! but never stop the debate.

use crate::config::DebateConfig;
use crate::ports::debate_memory::{DebateMemory, MemoryError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, response_text};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::retry::RetryExecutor;
use debate_domain::debate::value_objects::{NO_CONTEXT_SENTINEL, NO_TRANSCRIPT_SENTINEL};
use debate_domain::{
    Contribution, DebateReport, DebateSession, DomainError, FailureReason, Model, Persona,
    ProblemCatalog, ProblemStatement, PromptTemplate, RoundNumber, SessionId, SynthesisRecord,
    TurnOutcome, extract_diagram, missing_sections,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a debate early
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error(transparent)]
    InvalidInput(DomainError),

    #[error("Session creation failed: {0}")]
    SessionCreation(#[source] MemoryError),

    /// Surfaced with the gateway's message unchanged.
    #[error("{0}")]
    Synthesis(#[source] GatewayError),

    #[error("Debate cancelled")]
    Cancelled,

    #[error(transparent)]
    Progression(DomainError),
}

impl RunDebateError {
    fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            RunDebateError::SessionCreation(e) => Some(FailureReason::SessionCreation(e.to_string())),
            RunDebateError::Synthesis(e) => Some(FailureReason::Synthesis(e.to_string())),
            RunDebateError::Cancelled => Some(FailureReason::Cancelled),
            RunDebateError::InvalidInput(_) | RunDebateError::Progression(_) => None,
        }
    }
}

/// Where the problem statement comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemSource {
    /// Free text supplied by the caller
    Text(String),
    /// Key into the canned problem catalog
    Key(String),
}

impl ProblemSource {
    pub fn resolve(&self) -> Result<ProblemStatement, DomainError> {
        match self {
            ProblemSource::Text(text) => ProblemStatement::new(text.as_str()),
            ProblemSource::Key(key) => ProblemCatalog::resolve(key),
        }
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub problem: ProblemSource,
}

impl RunDebateInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            problem: ProblemSource::Text(text.into()),
        }
    }

    pub fn from_key(key: impl Into<String>) -> Self {
        Self {
            problem: ProblemSource::Key(key.into()),
        }
    }
}

/// Use case for running a panel debate
pub struct RunDebateUseCase<G: LlmGateway + 'static, M: DebateMemory + 'static> {
    gateway: Arc<G>,
    memory: Arc<M>,
    config: DebateConfig,
    retry: RetryExecutor,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static, M: DebateMemory + 'static> RunDebateUseCase<G, M> {
    pub fn new(gateway: Arc<G>, memory: Arc<M>, config: DebateConfig) -> Self {
        let retry = RetryExecutor::new(config.retry);
        Self {
            gateway,
            memory,
            config,
            retry,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> DebateReport {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Always produces a report: `complete` (possibly with degraded turns)
    /// or `error` with a message.
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> DebateReport {
        let problem = match input.problem.resolve() {
            Ok(problem) => problem,
            Err(e) => {
                let e = RunDebateError::InvalidInput(e);
                warn!("Rejected debate input: {}", e);
                return DebateReport::rejected(e.to_string());
            }
        };

        let mut session = DebateSession::new(problem);
        match self.drive(&mut session, progress).await {
            Ok(()) => {
                info!(
                    "Debate {} complete",
                    session.session_id().map(SessionId::as_str).unwrap_or("-")
                );
                session.to_report()
            }
            Err(e) => {
                warn!("Debate failed in state {}: {}", session.state(), e);
                let recorded = e
                    .failure_reason()
                    .map(|reason| session.fail(reason).is_ok())
                    .unwrap_or(false);
                let mut report = session.to_report();
                if !recorded {
                    report.error = Some(e.to_string());
                }
                report
            }
        }
    }

    async fn drive(
        &self,
        session: &mut DebateSession,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        self.check_cancelled()?;

        let problem = session.problem();
        let session_id = self
            .retry
            .run("memory.create_session", || self.memory.create_session(problem))
            .await
            .map_err(RunDebateError::SessionCreation)?;
        info!("Starting debate {}", session_id);
        session
            .start(session_id.clone())
            .map_err(RunDebateError::Progression)?;
        progress.on_debate_start(&session_id);

        let total_turns = Persona::panel().len() * RoundNumber::all().len();
        let mut turns_taken = 0;

        while let Some(round) = session.state().round() {
            info!("Round {} ({})", round, round.round_type());
            progress.on_round_start(round, Persona::panel().len());

            while let Some(persona) = session.next_speaker() {
                self.check_cancelled()?;

                let contribution = self
                    .play_turn(&session_id, session.problem().content(), round, persona)
                    .await;
                progress.on_turn_complete(round, persona, !contribution.failed);
                session
                    .record_turn(contribution)
                    .map_err(RunDebateError::Progression)?;

                turns_taken += 1;
                if turns_taken < total_turns {
                    self.pace(progress).await?;
                }
            }

            progress.on_round_complete(round);
            session.advance().map_err(RunDebateError::Progression)?;
        }

        self.check_cancelled()?;
        let synthesis = self.synthesize(&session_id, progress).await?;
        session
            .complete(synthesis)
            .map_err(RunDebateError::Progression)
    }

    /// One persona turn. Never fails: problems become a degraded contribution.
    async fn play_turn(
        &self,
        session_id: &SessionId,
        problem: &str,
        round: RoundNumber,
        persona: Persona,
    ) -> Contribution {
        let actor = persona.id();

        let context = match self
            .retry
            .run("memory.read", || self.memory.read(session_id, actor))
            .await
        {
            Ok(context) if !context.trim().is_empty() => context,
            Ok(_) => NO_CONTEXT_SENTINEL.to_string(),
            Err(e) => {
                warn!("Context for {} unavailable: {}", actor, e);
                NO_CONTEXT_SENTINEL.to_string()
            }
        };

        let prompt = PromptTemplate::turn_prompt(problem, round, &context);
        let prompt = prompt.as_str();
        let model = self.config.panel.for_persona(persona);
        let system = PromptTemplate::persona_system(persona);
        debug!("Prompt for {} (round {}):\n{}", actor, round, prompt);

        let outcome = match self
            .retry
            .run(actor, || self.invoke(model, system, prompt))
            .await
        {
            Ok(text) => {
                info!("{} responded in round {}", persona, round);
                TurnOutcome::Delivered(text)
            }
            Err(e) => {
                warn!("{} unavailable in round {}: {}", persona, round, e);
                TurnOutcome::Degraded {
                    reason: e.to_string(),
                }
            }
        };

        let contribution = Contribution::new(persona, context, outcome);
        let content = contribution.response.as_str();
        if let Err(e) = self
            .retry
            .run("memory.append", || {
                self.memory.append(session_id, actor, round, content)
            })
            .await
        {
            warn!("Could not store {}'s round {} turn: {}", actor, round, e);
        }

        contribution
    }

    async fn synthesize(
        &self,
        session_id: &SessionId,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<SynthesisRecord, RunDebateError> {
        info!("Synthesizing");
        progress.on_synthesis_start();

        let transcript = match self
            .retry
            .run("memory.read_all", || self.memory.read_all(session_id))
            .await
        {
            Ok(t) if !t.trim().is_empty() => t,
            Ok(_) => NO_TRANSCRIPT_SENTINEL.to_string(),
            Err(e) => {
                warn!("Transcript unavailable: {}", e);
                NO_TRANSCRIPT_SENTINEL.to_string()
            }
        };

        let prompt = PromptTemplate::synthesis_prompt(&transcript);
        let prompt = prompt.as_str();
        let model = &self.config.synthesis_model;
        let system = PromptTemplate::synthesis_system();

        let result = self
            .retry
            .run("synthesis", || self.invoke(model, system, prompt))
            .await;
        progress.on_synthesis_complete(result.is_ok());

        let text = result.map_err(RunDebateError::Synthesis)?;
        let missing = missing_sections(&text);
        if !missing.is_empty() {
            debug!("Synthesis is missing sections: {}", missing.join(", "));
        }
        let diagram = extract_diagram(&text);
        Ok(SynthesisRecord { text, diagram })
    }

    /// Open a session, send one prompt, take the text.
    async fn invoke(
        &self,
        model: &Model,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(model, system_prompt)
            .await?;
        let response = session.send(prompt).await?;
        response_text(response)
    }

    async fn pace(&self, progress: &dyn DebateProgressNotifier) -> Result<(), RunDebateError> {
        let delay = self.config.pacing;
        if delay.is_zero() {
            return Ok(());
        }
        progress.on_pacing(delay);

        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => Err(RunDebateError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    fn check_cancelled(&self) -> Result<(), RunDebateError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(RunDebateError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::LlmSession;
    use async_trait::async_trait;
    use debate_domain::debate::value_objects::PERSONA_FAILURE_SENTINEL;
    use debate_domain::{DebateStatus, LlmResponse, RetryPolicy};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    // ==================== Test Doubles ====================

    /// A scripted reply for one `send()`
    #[derive(Debug, Clone)]
    enum ScriptedResponse {
        Text(String),
        Empty,
        Error(String),
    }

    /// One recorded persona or synthesis invocation
    #[derive(Debug, Clone)]
    struct Call {
        system_prompt: String,
        prompt: String,
    }

    struct ScriptedSession {
        model: Model,
        system_prompt: String,
        reply: ScriptedResponse,
        calls: Arc<Mutex<Vec<Call>>>,
        cancel_on_send: Option<CancellationToken>,
    }

    #[async_trait]
    impl LlmSession for ScriptedSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, content: &str) -> Result<LlmResponse, GatewayError> {
            self.calls.lock().unwrap().push(Call {
                system_prompt: self.system_prompt.clone(),
                prompt: content.to_string(),
            });
            if let Some(token) = &self.cancel_on_send {
                token.cancel();
            }
            match &self.reply {
                ScriptedResponse::Text(t) => Ok(LlmResponse::from_text(t.clone())),
                ScriptedResponse::Empty => Ok(LlmResponse::empty()),
                ScriptedResponse::Error(e) => Err(GatewayError::RequestFailed(e.clone())),
            }
        }
    }

    /// Replies in call order, shared by personas and synthesis. Once the
    /// script runs out, personas answer with their id and the synthesizer
    /// with a small document.
    struct ScriptedGateway {
        replies: Mutex<VecDeque<ScriptedResponse>>,
        calls: Arc<Mutex<Vec<Call>>>,
        sessions_created: Mutex<usize>,
        cancel_at: Option<(usize, CancellationToken)>,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self::with_replies(Vec::new())
        }

        fn with_replies(replies: Vec<ScriptedResponse>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Arc::new(Mutex::new(Vec::new())),
                sessions_created: Mutex::new(0),
                cancel_at: None,
            }
        }

        /// Cancel `token` while the `nth` session (1-based) is answering
        fn cancelling_at(mut self, nth: usize, token: CancellationToken) -> Self {
            self.cancel_at = Some((nth, token));
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn default_reply(system_prompt: &str) -> ScriptedResponse {
            if system_prompt == PromptTemplate::synthesis_system() {
                return ScriptedResponse::Text(SYNTHESIS_DOC.to_string());
            }
            let speaker = Persona::panel()
                .into_iter()
                .find(|p| PromptTemplate::persona_system(*p) == system_prompt)
                .map(|p| p.id())
                .unwrap_or("unknown");
            ScriptedResponse::Text(format!("{} says hi", speaker))
        }
    }

    const SYNTHESIS_DOC: &str =
        "## Architecture Overview\nAll of it.\n\n```mermaid\ngraph TD\n  A --> B\n```\n";

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn create_session_with_system_prompt(
            &self,
            model: &Model,
            system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Self::default_reply(system_prompt));
            let created = {
                let mut count = self.sessions_created.lock().unwrap();
                *count += 1;
                *count
            };
            let cancel_on_send = self
                .cancel_at
                .as_ref()
                .filter(|(nth, _)| *nth == created)
                .map(|(_, token)| token.clone());
            Ok(Box::new(ScriptedSession {
                model: model.clone(),
                system_prompt: system_prompt.to_string(),
                reply,
                calls: Arc::clone(&self.calls),
                cancel_on_send,
            }))
        }

        async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
            Ok(Model::known_models())
        }
    }

    /// In-memory store that records every operation
    #[derive(Default)]
    struct RecordingMemory {
        ops: Mutex<Vec<String>>,
        entries: Mutex<Vec<(String, u8, String)>>,
        fail_create: bool,
        fail_read: bool,
        fail_append: bool,
    }

    impl RecordingMemory {
        fn ops(&self) -> Vec<String> {
            self.ops.lock().unwrap().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.ops()
                .iter()
                .filter(|op| op.starts_with(prefix))
                .count()
        }

        fn transcript(&self) -> String {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|(actor, round, content)| format!("[{} - Round {}]: {}", actor, round, content))
                .collect::<Vec<_>>()
                .join("\n\n")
        }
    }

    #[async_trait]
    impl DebateMemory for RecordingMemory {
        async fn create_session(
            &self,
            _problem: &ProblemStatement,
        ) -> Result<SessionId, MemoryError> {
            self.ops.lock().unwrap().push("create".to_string());
            if self.fail_create {
                return Err(MemoryError::Unavailable("store offline".to_string()));
            }
            Ok(SessionId::new("debate_test"))
        }

        async fn append(
            &self,
            _session: &SessionId,
            actor: &str,
            round: RoundNumber,
            content: &str,
        ) -> Result<(), MemoryError> {
            self.ops
                .lock()
                .unwrap()
                .push(format!("append:{}:{}", actor, round));
            if self.fail_append {
                return Err(MemoryError::Unavailable("disk full".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .push((actor.to_string(), round.as_u8(), content.to_string()));
            Ok(())
        }

        async fn read(&self, _session: &SessionId, actor: &str) -> Result<String, MemoryError> {
            self.ops.lock().unwrap().push(format!("read:{}", actor));
            if self.fail_read {
                return Err(MemoryError::Unavailable("timeout".to_string()));
            }
            Ok(self.transcript())
        }

        async fn read_all(&self, _session: &SessionId) -> Result<String, MemoryError> {
            self.ops.lock().unwrap().push("read_all".to_string());
            if self.fail_read {
                return Err(MemoryError::Unavailable("timeout".to_string()));
            }
            Ok(self.transcript())
        }
    }

    /// Progress notifier that records events as strings
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl DebateProgressNotifier for RecordingProgress {
        fn on_round_start(&self, round: RoundNumber, total_turns: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("round_start:{}:{}", round, total_turns));
        }

        fn on_turn_complete(&self, round: RoundNumber, persona: Persona, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("turn:{}:{}:{}", round, persona.id(), success));
        }

        fn on_round_complete(&self, round: RoundNumber) {
            self.events
                .lock()
                .unwrap()
                .push(format!("round_complete:{}", round));
        }

        fn on_synthesis_complete(&self, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("synthesis:{}", success));
        }
    }

    fn config() -> DebateConfig {
        DebateConfig::default().with_pacing(Duration::ZERO)
    }

    fn use_case(
        gateway: &Arc<ScriptedGateway>,
        memory: &Arc<RecordingMemory>,
        config: DebateConfig,
    ) -> RunDebateUseCase<ScriptedGateway, RecordingMemory> {
        RunDebateUseCase::new(Arc::clone(gateway), Arc::clone(memory), config)
    }

    fn persona_texts(n: usize) -> Vec<ScriptedResponse> {
        (0..n)
            .map(|i| ScriptedResponse::Text(format!("turn {}", i + 1)))
            .collect()
    }

    // ==================== Flow Tests ====================

    #[tokio::test]
    async fn test_full_debate_runs_in_panel_order() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        assert_eq!(report.session_id, Some(SessionId::new("debate_test")));
        assert_eq!(report.diagram.as_deref(), Some("graph TD\n  A --> B"));
        assert_eq!(report.synthesis.as_deref(), Some(SYNTHESIS_DOC));
        assert!(report.error.is_none());
        assert_eq!(report.rounds.len(), 3);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 10);
        for (i, call) in calls.iter().take(9).enumerate() {
            let persona = Persona::panel()[i % 3];
            assert_eq!(call.system_prompt, PromptTemplate::persona_system(persona));
            let round = i / 3 + 1;
            let label = if round == 3 { "consensus" } else { "debate" };
            assert!(
                call.prompt
                    .contains(&format!("Round {} ({})", round, label)),
                "call {} prompt: {}",
                i,
                call.prompt
            );
        }
        assert_eq!(calls[9].system_prompt, PromptTemplate::synthesis_system());
        assert_eq!(calls[9].prompt, memory.transcript());
    }

    #[tokio::test]
    async fn test_context_accumulates_between_turns() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());

        use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        let calls = gateway.calls();
        assert!(calls[0].prompt.ends_with("Previous context:\n[No previous context]"));
        assert!(
            calls[1]
                .prompt
                .ends_with("Previous context:\n[jeff_barr - Round 1]: jeff_barr says hi")
        );
        assert!(calls[8].prompt.contains("[swami - Round 3]: swami says hi"));
    }

    #[tokio::test]
    async fn test_memory_calls_per_debate() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());

        use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(memory.count("create"), 1);
        assert_eq!(memory.count("read:"), 9);
        assert_eq!(memory.count("append:"), 9);
        assert_eq!(memory.count("read_all"), 1);

        let appends: Vec<String> = memory
            .ops()
            .into_iter()
            .filter(|op| op.starts_with("append:"))
            .collect();
        assert_eq!(appends[0], "append:jeff_barr:1");
        assert_eq!(appends[4], "append:swami:2");
        assert_eq!(appends[8], "append:werner_vogels:3");
        assert_eq!(memory.ops().last().map(String::as_str), Some("read_all"));
    }

    #[tokio::test]
    async fn test_progress_events() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());
        let progress = RecordingProgress::default();

        use_case(&gateway, &memory, config())
            .execute_with_progress(RunDebateInput::from_text("Build a todo app"), &progress)
            .await;

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.len(), 3 * 5 + 1);
        assert_eq!(events[0], "round_start:1:3");
        assert_eq!(events[1], "turn:1:jeff_barr:true");
        assert_eq!(events[4], "round_complete:1");
        assert_eq!(events.last().map(String::as_str), Some("synthesis:true"));
    }

    // ==================== Degraded Turns ====================

    #[tokio::test(start_paused = true)]
    async fn test_persona_failure_is_absorbed() {
        let mut replies = vec![ScriptedResponse::Error("throttled".to_string()); 3];
        replies.extend(persona_texts(8));
        let gateway = Arc::new(ScriptedGateway::with_replies(replies));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        assert_eq!(report.degraded_turns(), 1);

        let first = &report.rounds[0].contributions[0];
        assert_eq!(first.persona, Persona::JeffBarr);
        assert!(first.failed);
        assert_eq!(first.response, PERSONA_FAILURE_SENTINEL);
        assert_eq!(
            first.failure_reason.as_deref(),
            Some("Request failed: throttled")
        );

        // Everyone still speaks once per round, in panel order
        assert_eq!(report.rounds.len(), 3);
        for round in &report.rounds {
            let speakers: Vec<Persona> = round.contributions.iter().map(|c| c.persona).collect();
            assert_eq!(speakers, Persona::panel().to_vec());
        }

        // 3 attempts for Jeff, 8 more turns, 1 synthesis
        assert_eq!(gateway.calls().len(), 12);
        assert!(
            memory
                .transcript()
                .starts_with("[jeff_barr - Round 1]: [Response unavailable]")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_response_is_malformed() {
        let gateway = Arc::new(ScriptedGateway::with_replies(vec![
            ScriptedResponse::Empty;
            3
        ]));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        let first = &report.rounds[0].contributions[0];
        assert!(first.failed);
        assert!(
            first
                .failure_reason
                .as_deref()
                .unwrap_or_default()
                .starts_with("Malformed response")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_recovers_within_policy() {
        let mut replies = vec![
            ScriptedResponse::Error("blip".to_string()),
            ScriptedResponse::Text("Here's the simple approach...".to_string()),
        ];
        replies.extend(persona_texts(8));
        let gateway = Arc::new(ScriptedGateway::with_replies(replies));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.degraded_turns(), 0);
        assert_eq!(
            report.rounds[0].contributions[0].response,
            "Here's the simple approach..."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_append_failure_is_ignored() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory {
            fail_append: true,
            ..Default::default()
        });

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        assert_eq!(report.degraded_turns(), 0);
        // Every append is retried up to the policy limit
        assert_eq!(memory.count("append:"), 9 * 3);
        // Nothing was stored, so synthesis sees the empty-transcript sentinel
        assert_eq!(gateway.calls()[9].prompt, NO_TRANSCRIPT_SENTINEL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_failure_uses_context_sentinel() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory {
            fail_read: true,
            ..Default::default()
        });

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        for call in gateway.calls().iter().take(9) {
            assert!(call.prompt.ends_with(NO_CONTEXT_SENTINEL));
        }
        assert_eq!(gateway.calls()[9].prompt, NO_TRANSCRIPT_SENTINEL);
    }

    // ==================== Terminal Failures ====================

    #[tokio::test(start_paused = true)]
    async fn test_synthesis_failure_reports_error() {
        let mut replies = persona_texts(9);
        replies.extend(vec![
            ScriptedResponse::Error("model exploded".to_string());
            3
        ]);
        let gateway = Arc::new(ScriptedGateway::with_replies(replies));
        let memory = Arc::new(RecordingMemory::default());
        let progress = RecordingProgress::default();

        let report = use_case(&gateway, &memory, config())
            .execute_with_progress(RunDebateInput::from_text("Build a todo app"), &progress)
            .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert_eq!(report.error.as_deref(), Some("Request failed: model exploded"));
        assert!(report.synthesis.is_none());
        assert!(report.diagram.is_none());
        assert_eq!(report.session_id, Some(SessionId::new("debate_test")));
        assert_eq!(report.rounds.len(), 3);
        assert_eq!(gateway.calls().len(), 12);
        assert_eq!(
            progress.events.lock().unwrap().last().map(String::as_str),
            Some("synthesis:false")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_synthesis_reports_error() {
        let mut replies = persona_texts(9);
        replies.extend(vec![ScriptedResponse::Empty; 3]);
        let gateway = Arc::new(ScriptedGateway::with_replies(replies));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert!(
            report
                .error
                .as_deref()
                .unwrap_or_default()
                .starts_with("Malformed response")
        );
    }

    #[tokio::test]
    async fn test_synthesis_without_diagram_completes() {
        let mut replies = persona_texts(9);
        replies.push(ScriptedResponse::Text("Just prose, no chart.".to_string()));
        let gateway = Arc::new(ScriptedGateway::with_replies(replies));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        assert_eq!(report.diagram.as_deref(), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_creation_failure() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory {
            fail_create: true,
            ..Default::default()
        });

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert_eq!(
            report.error.as_deref(),
            Some("Session creation failed: Memory store unavailable: store offline")
        );
        assert_eq!(memory.count("create"), 3);
        assert!(gateway.calls().is_empty());
        assert!(report.session_id.is_none());
    }

    // ==================== Input Validation ====================

    #[tokio::test]
    async fn test_blank_problem_rejected_without_side_effects() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());

        for blank in ["", "   ", "\n\t"] {
            let report = use_case(&gateway, &memory, config())
                .execute(RunDebateInput::from_text(blank))
                .await;
            assert_eq!(report.status, DebateStatus::Error);
            assert_eq!(
                report.error.as_deref(),
                Some("Problem statement cannot be empty")
            );
        }

        assert!(gateway.calls().is_empty());
        assert!(memory.ops().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_problem_key_rejected() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_key("moon_cheese"))
            .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert!(report.error.as_deref().unwrap_or_default().contains("not found"));
        assert!(gateway.calls().is_empty());
        assert!(memory.ops().is_empty());
    }

    #[tokio::test]
    async fn test_canned_problem_key() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .execute(RunDebateInput::from_key("mars_currency"))
            .await;

        assert_eq!(report.status, DebateStatus::Complete);
        assert!(gateway.calls()[0].prompt.contains("Mars"));
    }

    // ==================== Pacing & Cancellation ====================

    #[tokio::test(start_paused = true)]
    async fn test_pacing_between_turns() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());
        let started = Instant::now();

        let report = use_case(
            &gateway,
            &memory,
            DebateConfig::default().with_pacing(Duration::from_secs(60)),
        )
        .execute(RunDebateInput::from_text("Build a todo app"))
        .await;

        assert_eq!(report.status, DebateStatus::Complete);
        // No wait after the ninth turn
        assert_eq!(started.elapsed(), Duration::from_secs(8 * 60));
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());
        let token = CancellationToken::new();
        token.cancel();

        let report = use_case(&gateway, &memory, config())
            .with_cancellation(token)
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert_eq!(report.error.as_deref(), Some("Debate cancelled"));
        assert!(memory.ops().is_empty());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_pacing() {
        let gateway = Arc::new(ScriptedGateway::new());
        let memory = Arc::new(RecordingMemory::default());
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(90)).await;
            canceller.cancel();
        });

        let report = use_case(
            &gateway,
            &memory,
            DebateConfig::default().with_pacing(Duration::from_secs(60)),
        )
        .with_cancellation(token)
        .execute(RunDebateInput::from_text("Build a todo app"))
        .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert_eq!(report.error.as_deref(), Some("Debate cancelled"));
        assert_eq!(gateway.calls().len(), 2);
        assert_eq!(report.rounds[0].contributions.len(), 2);
        assert_eq!(memory.count("read_all"), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_last_turn_skips_synthesis() {
        let token = CancellationToken::new();
        let gateway =
            Arc::new(ScriptedGateway::new().cancelling_at(9, token.clone()));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(&gateway, &memory, config())
            .with_cancellation(token)
            .execute(RunDebateInput::from_text("Build a todo app"))
            .await;

        assert_eq!(report.status, DebateStatus::Error);
        assert_eq!(report.error.as_deref(), Some("Debate cancelled"));
        assert!(report.synthesis.is_none());
        // The ninth turn finishes and is stored, synthesis never starts
        assert_eq!(gateway.calls().len(), 9);
        assert_eq!(memory.count("append:"), 9);
        assert_eq!(memory.count("read_all"), 0);
        assert_eq!(report.rounds.len(), 3);
        assert_eq!(report.rounds[2].contributions.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_policy_from_config() {
        let gateway = Arc::new(ScriptedGateway::with_replies(vec![
            ScriptedResponse::Error("down".to_string()),
        ]));
        let memory = Arc::new(RecordingMemory::default());

        let report = use_case(
            &gateway,
            &memory,
            config().with_retry(RetryPolicy::no_retry()),
        )
        .execute(RunDebateInput::from_text("Build a todo app"))
        .await;

        // A single failed attempt degrades the turn immediately
        assert_eq!(report.degraded_turns(), 1);
        assert_eq!(gateway.calls().len(), 10);
    }
}
