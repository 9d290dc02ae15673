//! The tiered resolution pipeline implementation.

use std::sync::Arc;

use faqline_core::audit::{AuditRecord, AuditSink, RequestCounter};
use faqline_core::error::Error;
use faqline_core::faq::FaqEntry;
use faqline_core::generate::{GenerationRequest, Generator};
use faqline_core::resolution::{AnswerSource, Resolution};
use faqline_core::turn::{Conversation, Role, Turn};
use tracing::{debug, error, info, warn};

use crate::bound::{bound_conversation, MAX_CONVERSATION_TURNS};
use crate::exact::exact_match;
use crate::relevance::relevance_match;
use crate::shape::shape_response;

/// One incoming query plus whatever history the caller carried.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// The user's message; must be non-empty after trimming
    pub message: String,

    /// Prior turns, oldest first
    pub conversation: Conversation,

    /// Per-request token budget override
    pub max_tokens: Option<u32>,

    /// Per-request sampling temperature override
    pub temperature: Option<f32>,
}

impl ResolveRequest {
    /// Build a request with no history and no overrides.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conversation: Vec::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Attach prior conversation history.
    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = conversation;
        self
    }
}

/// The tiered resolver: exact FAQ → relevant FAQ → generative fallback.
pub struct ResolutionPipeline {
    /// Tier-three generation backend
    generator: Arc<dyn Generator>,

    /// Where outcomes are recorded
    audit: Arc<dyn AuditSink>,

    /// Request-id source, shared process-wide
    counter: Arc<RequestCounter>,

    /// Persona prepended to every conversation as a system turn
    persona: Option<String>,

    /// Whether a leading system turn survives history bounding
    pin_persona: bool,

    /// History cap in turns
    max_turns: usize,

    /// Default completion token budget
    max_tokens: u32,

    /// Default sampling temperature
    temperature: f32,
}

impl ResolutionPipeline {
    /// Create a pipeline with the default bounds and no persona.
    pub fn new(
        generator: Arc<dyn Generator>,
        audit: Arc<dyn AuditSink>,
        counter: Arc<RequestCounter>,
    ) -> Self {
        Self {
            generator,
            audit,
            counter,
            persona: None,
            pin_persona: true,
            max_turns: MAX_CONVERSATION_TURNS,
            max_tokens: 200,
            temperature: 0.7,
        }
    }

    /// Set the persona prepended to every conversation.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Control whether a leading system turn survives bounding.
    pub fn with_pin_persona(mut self, pin: bool) -> Self {
        self.pin_persona = pin;
        self
    }

    /// Set the history cap in turns.
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    /// Set the default completion token budget.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Set the default sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Resolve one query against the given catalog.
    ///
    /// Tiers run in order and the first answer wins. FAQ answers are
    /// returned verbatim and do not extend the history; generated answers
    /// are length-shaped and appended as an assistant turn. The audit sink
    /// is notified on a detached task after the outcome exists, so a slow or
    /// failing sink never affects the response.
    pub async fn resolve(
        &self,
        request: ResolveRequest,
        faqs: &[FaqEntry],
    ) -> Result<Resolution, Error> {
        if request.message.trim().is_empty() {
            return Err(Error::InvalidRequest);
        }

        let request_id = self.counter.next_id();
        info!(
            request_id,
            history = request.conversation.len(),
            faq_entries = faqs.len(),
            "Resolving query"
        );

        // ── Assemble the conversation ──
        let mut conversation = request.conversation;
        conversation.push(Turn::user(&request.message));

        if let Some(persona) = &self.persona {
            if conversation.is_empty() || conversation[0].role != Role::System {
                conversation.insert(0, Turn::system(persona));
            }
        }

        conversation = self.bound_with_pinning(conversation);

        // ── Tier one: exact match ──
        if let Some(hit) = exact_match(&request.message, faqs) {
            debug!(request_id, score = hit.score, "Exact FAQ match");
            return Ok(self.finish(
                request_id,
                &request.message,
                hit.response,
                AnswerSource::ExactFaq,
                conversation,
            ));
        }

        // ── Tier two: relevance match ──
        if let Some(hit) = relevance_match(&request.message, faqs) {
            debug!(request_id, score = hit.score, "Relevant FAQ match");
            return Ok(self.finish(
                request_id,
                &request.message,
                hit.response,
                AnswerSource::RelevantFaq,
                conversation,
            ));
        }

        // ── Tier three: generative fallback ──
        let max_tokens = request.max_tokens.unwrap_or(self.max_tokens);
        let generation = GenerationRequest {
            turns: conversation.clone(),
            max_tokens,
            temperature: request.temperature.unwrap_or(self.temperature),
        };

        let raw = match self.generator.generate(generation).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    request_id,
                    provider = self.generator.name(),
                    error = %e,
                    "Generation failed"
                );
                return Err(Error::Generation(e));
            }
        };

        let answer = shape_response(&raw, max_tokens);
        conversation.push(Turn::assistant(&answer));

        Ok(self.finish(
            request_id,
            &request.message,
            answer,
            AnswerSource::Generated,
            conversation,
        ))
    }

    /// Bound the history, keeping a leading system turn alive when pinning
    /// is on. The oldest ordinary turn pays for the kept persona so the cap
    /// still holds.
    fn bound_with_pinning(&self, turns: Vec<Turn>) -> Vec<Turn> {
        let pinned = self.pin_persona
            && turns.len() > self.max_turns
            && turns.first().is_some_and(Turn::is_system);

        if !pinned {
            return bound_conversation(turns, self.max_turns);
        }

        let mut turns = turns;
        let rest = turns.split_off(1);
        let mut bounded = bound_conversation(rest, self.max_turns.saturating_sub(1));
        turns.append(&mut bounded);
        turns
    }

    fn finish(
        &self,
        request_id: u64,
        message: &str,
        answer: String,
        source: AnswerSource,
        conversation: Conversation,
    ) -> Resolution {
        info!(request_id, source = ?source, "Query resolved");

        let record = AuditRecord {
            request_id,
            message: message.to_string(),
            answer: answer.clone(),
        };
        let audit = self.audit.clone();
        tokio::spawn(async move {
            if let Err(e) = audit.record(&record).await {
                warn!(request_id = record.request_id, error = %e, "Audit record dropped");
            }
        });

        Resolution {
            answer,
            source,
            conversation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqline_core::error::{AuditError, GenerationError};
    use std::sync::Mutex;

    /// A generator that returns a fixed response and records what it saw.
    struct MockGenerator {
        response: String,
        calls: Mutex<u32>,
        last_request: Mutex<Option<GenerationRequest>>,
    }

    impl MockGenerator {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                calls: Mutex::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl Generator for MockGenerator {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> Result<String, GenerationError> {
            *self.calls.lock().unwrap() += 1;
            *self.last_request.lock().unwrap() = Some(request);
            Ok(self.response.clone())
        }
    }

    /// A generator that always fails.
    struct FailingGenerator;

    #[async_trait::async_trait]
    impl Generator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<String, GenerationError> {
            Err(GenerationError::ApiError {
                status_code: 500,
                message: "upstream exploded".into(),
            })
        }
    }

    /// An audit sink that stores records, optionally failing each call.
    struct RecordingSink {
        records: Mutex<Vec<AuditRecord>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl AuditSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
            self.records.lock().unwrap().push(record.clone());
            if self.fail {
                return Err(AuditError::Network("sink offline".into()));
            }
            Ok(())
        }
    }

    /// The audit task is detached; give it scheduler turns to run.
    async fn wait_for_records(sink: &RecordingSink, n: usize) {
        for _ in 0..100 {
            if sink.count() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("audit sink never saw {n} record(s)");
    }

    fn pipeline(
        generator: Arc<dyn Generator>,
        audit: Arc<RecordingSink>,
    ) -> ResolutionPipeline {
        ResolutionPipeline::new(generator, audit, Arc::new(RequestCounter::new()))
    }

    fn catalog() -> Vec<FaqEntry> {
        vec![FaqEntry::new(
            "What is NAFDAC?",
            "NAFDAC is Nigeria's drug regulator.",
        )]
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_any_tier() {
        let generator = Arc::new(MockGenerator::new("unused"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone());

        for message in ["", "   ", "\t\n"] {
            let err = pipeline
                .resolve(ResolveRequest::new(message), &catalog())
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidRequest));
        }

        assert_eq!(generator.calls(), 0);
        assert_eq!(audit.count(), 0);
    }

    #[tokio::test]
    async fn exact_match_skips_generation_and_keeps_history_flat() {
        let generator = Arc::new(MockGenerator::new("unused"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone());

        let resolution = pipeline
            .resolve(ResolveRequest::new("what is nafdac?"), &catalog())
            .await
            .unwrap();

        assert_eq!(resolution.answer, "NAFDAC is Nigeria's drug regulator.");
        assert_eq!(resolution.source, AnswerSource::ExactFaq);
        // The user turn is recorded; no assistant turn for FAQ answers.
        assert_eq!(resolution.conversation.len(), 1);
        assert_eq!(resolution.conversation[0].role, Role::User);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn relevance_match_skips_generation() {
        let faqs = vec![FaqEntry::new(
            "drug registration process",
            "The drug registration process has several steps.",
        )];
        let generator = Arc::new(MockGenerator::new("unused"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone());

        let resolution = pipeline
            .resolve(
                ResolveRequest::new("tell me about drug registration approval steps"),
                &faqs,
            )
            .await
            .unwrap();

        assert_eq!(resolution.source, AnswerSource::RelevantFaq);
        assert_eq!(
            resolution.answer,
            "The drug registration process has several steps."
        );
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn generation_fallback_appends_assistant_turn() {
        let generator = Arc::new(MockGenerator::new("Generated answer."));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone());

        let resolution = pipeline
            .resolve(ResolveRequest::new("how is the weather"), &[])
            .await
            .unwrap();

        assert_eq!(resolution.source, AnswerSource::Generated);
        assert_eq!(resolution.answer, "Generated answer.");
        assert_eq!(resolution.conversation.len(), 2);
        assert_eq!(resolution.conversation[0].role, Role::User);
        assert_eq!(resolution.conversation[1].role, Role::Assistant);
        assert_eq!(resolution.conversation[1].content, "Generated answer.");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn persona_leads_the_generated_conversation() {
        let generator = Arc::new(MockGenerator::new("ok"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline =
            pipeline(generator.clone(), audit.clone()).with_persona("You are a help desk.");

        let resolution = pipeline
            .resolve(ResolveRequest::new("anything"), &[])
            .await
            .unwrap();

        assert_eq!(resolution.conversation[0].role, Role::System);
        assert_eq!(resolution.conversation[0].content, "You are a help desk.");

        // The generator saw the same persona-led turns.
        let seen = generator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(seen.turns[0].role, Role::System);
        assert_eq!(seen.turns.len(), 2);
    }

    #[tokio::test]
    async fn caller_system_turn_is_not_duplicated() {
        let generator = Arc::new(MockGenerator::new("ok"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline =
            pipeline(generator.clone(), audit.clone()).with_persona("configured persona");

        let history = vec![Turn::system("caller persona"), Turn::assistant("hi")];
        let resolution = pipeline
            .resolve(
                ResolveRequest::new("anything").with_conversation(history),
                &[],
            )
            .await
            .unwrap();

        let system_turns = resolution
            .conversation
            .iter()
            .filter(|t| t.is_system())
            .count();
        assert_eq!(system_turns, 1);
        assert_eq!(resolution.conversation[0].content, "caller persona");
    }

    #[tokio::test]
    async fn long_history_is_bounded_with_pinned_persona() {
        let generator = Arc::new(MockGenerator::new("ok"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone())
            .with_persona("pinned")
            .with_max_turns(4);

        let history: Vec<Turn> = (0..10).map(|i| Turn::assistant(format!("old {i}"))).collect();
        let resolution = pipeline
            .resolve(
                ResolveRequest::new("latest question").with_conversation(history),
                &[],
            )
            .await
            .unwrap();

        // Generator input: persona + the 3 most recent turns, cap respected.
        let seen = generator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(seen.turns.len(), 4);
        assert_eq!(seen.turns[0].content, "pinned");
        assert_eq!(seen.turns[1].content, "old 8");
        assert_eq!(seen.turns[2].content, "old 9");
        assert_eq!(seen.turns[3].content, "latest question");

        // Returned history additionally carries the assistant turn.
        assert_eq!(resolution.conversation.len(), 5);
    }

    #[tokio::test]
    async fn unpinned_persona_can_be_evicted() {
        let generator = Arc::new(MockGenerator::new("ok"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone())
            .with_persona("evictable")
            .with_pin_persona(false)
            .with_max_turns(2);

        let history = vec![Turn::assistant("old 0"), Turn::assistant("old 1")];
        let resolution = pipeline
            .resolve(
                ResolveRequest::new("latest").with_conversation(history),
                &[],
            )
            .await
            .unwrap();

        let seen = generator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(seen.turns.len(), 2);
        assert!(!seen.turns[0].is_system());
        assert_eq!(seen.turns[1].content, "latest");
        assert_eq!(resolution.source, AnswerSource::Generated);
    }

    #[tokio::test]
    async fn generated_answer_is_shaped_to_the_request_budget() {
        let long = (0..30).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let generator = Arc::new(MockGenerator::new(long));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone());

        let mut request = ResolveRequest::new("needs generation");
        request.max_tokens = Some(10);
        let resolution = pipeline.resolve(request, &[]).await.unwrap();

        // 10 tokens → 7-word ceiling → 2 kept words plus the ellipsis.
        assert_eq!(resolution.answer, "w0 w1 ...");
        assert_eq!(
            resolution.conversation.last().unwrap().content,
            "w0 w1 ..."
        );

        let seen = generator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(seen.max_tokens, 10);
    }

    #[tokio::test]
    async fn generation_failure_surfaces_and_is_not_audited() {
        let audit = Arc::new(RecordingSink::new());
        let pipeline = ResolutionPipeline::new(
            Arc::new(FailingGenerator),
            audit.clone(),
            Arc::new(RequestCounter::new()),
        );

        let err = pipeline
            .resolve(ResolveRequest::new("no faq for this"), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Generation(_)));
        tokio::task::yield_now().await;
        assert_eq!(audit.count(), 0);
    }

    #[tokio::test]
    async fn outcomes_are_audited_with_incrementing_ids() {
        let generator = Arc::new(MockGenerator::new("generated"));
        let audit = Arc::new(RecordingSink::new());
        let pipeline = pipeline(generator.clone(), audit.clone());

        pipeline
            .resolve(ResolveRequest::new("what is nafdac"), &catalog())
            .await
            .unwrap();
        pipeline
            .resolve(ResolveRequest::new("something generated"), &[])
            .await
            .unwrap();

        wait_for_records(&audit, 2).await;
        let records = audit.records.lock().unwrap().clone();
        assert_eq!(records[0].request_id, 1);
        assert_eq!(records[0].message, "what is nafdac");
        assert_eq!(records[0].answer, "NAFDAC is Nigeria's drug regulator.");
        assert_eq!(records[1].request_id, 2);
        assert_eq!(records[1].answer, "generated");
    }

    #[tokio::test]
    async fn audit_failure_never_reaches_the_caller() {
        let generator = Arc::new(MockGenerator::new("unused"));
        let audit = Arc::new(RecordingSink::failing());
        let pipeline = pipeline(generator, audit.clone());

        let resolution = pipeline
            .resolve(ResolveRequest::new("what is nafdac"), &catalog())
            .await
            .unwrap();

        assert_eq!(resolution.source, AnswerSource::ExactFaq);
        wait_for_records(&audit, 1).await;
    }
}
