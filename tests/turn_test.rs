use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eastwing::agent::TurnExecutor;
use eastwing::agent::providers::{GenerationRequest, GenerationService};
use eastwing::command::{self, Command};
use eastwing::error::{EngineError, ProviderError};
use eastwing::memory::analysis::NOT_ENOUGH_HISTORY;
use eastwing::models;
use eastwing::session::SessionState;
use eastwing::stage::{Personality, ProgressionSpeed};
use eastwing::types::{ChatMessage, Role};

const FACTS: &str = "The East Wing was built in 1902.";

#[derive(Debug, Clone)]
struct Recorded {
    messages: Vec<ChatMessage>,
    temperature: f32,
    structured: bool,
}

/// Replays canned responses in order and records every request.
#[derive(Clone, Default)]
struct ScriptedService {
    responses: Arc<Mutex<VecDeque<Result<String, ProviderError>>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ScriptedService {
    fn push_reply(&self, reply: &str, summary: &str) {
        let content = serde_json::json!({ "reply": reply, "summary": summary }).to_string();
        self.push_raw(Ok(content));
    }

    fn push_raw(&self, response: Result<String, ProviderError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(Recorded {
            messages: request.messages.to_vec(),
            temperature: request.temperature,
            structured: request.output_schema.is_some(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse))
    }
}

fn setup(speed: ProgressionSpeed) -> (TurnExecutor, ScriptedService, SessionState) {
    let service = ScriptedService::default();
    let executor = TurnExecutor::new(Box::new(service.clone()));
    let session = SessionState::new(speed, models::default_model(), FACTS.to_string());
    (executor, service, session)
}

#[tokio::test]
async fn first_turn_has_no_summary_block() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("Oh, a visitor.", "[WALL MOOD: tired]");

    let reply = executor.run_turn(&mut session, "Hello?").await.unwrap();
    assert_eq!(reply, "Oh, a visitor.");

    let requests = service.requests();
    let messages = &requests[0].messages;
    let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::System, Role::User, Role::System]);
    assert!(messages[0].content.contains(FACTS));
    assert_eq!(messages[1].content, "Hello?");
    assert!(messages[2].content.starts_with("Reply in approximately "));
    assert!(requests[0].structured);
}

#[tokio::test]
async fn later_turns_carry_summary_between_prompt_and_user() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("one", "summary after one");
    service.push_reply("two", "summary after two");

    executor.run_turn(&mut session, "first").await.unwrap();
    executor.run_turn(&mut session, "second").await.unwrap();

    let requests = service.requests();
    let second = &requests[1].messages;
    let roles: Vec<Role> = second.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::Assistant, Role::User, Role::System]
    );
    assert_eq!(
        second[1].content,
        "[Conversation summary: summary after one]"
    );
    assert_eq!(second[2].content, "second");
}

#[tokio::test]
async fn six_turns_keep_last_five_summaries() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Fast);
    for i in 1..=6 {
        service.push_reply(&format!("reply {i}"), &format!("summary {i}"));
    }
    for i in 1..=6 {
        executor
            .run_turn(&mut session, &format!("message {i}"))
            .await
            .unwrap();
    }

    assert_eq!(session.turn_count(), 6);
    assert_eq!(session.memory().current_summary(), "summary 6");
    let texts: Vec<&str> = session.memory().history().map(|r| r.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["summary 2", "summary 3", "summary 4", "summary 5", "summary 6"]
    );
}

#[tokio::test]
async fn missing_summary_is_fatal_and_leaves_state_untouched() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("fine", "kept summary");
    service.push_raw(Ok(r#"{"reply": "no summary here"}"#.to_string()));

    executor.run_turn(&mut session, "hi").await.unwrap();
    let before = session.last_request().cloned();

    let err = executor.run_turn(&mut session, "again").await.unwrap_err();
    assert!(matches!(err, EngineError::MalformedReply(_)));
    assert_eq!(session.turn_count(), 1);
    assert_eq!(session.memory().current_summary(), "kept summary");
    assert_eq!(session.memory().history_len(), 1);
    assert_eq!(session.last_request().cloned(), before);
}

#[tokio::test]
async fn extra_fields_and_non_json_are_rejected() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_raw(Ok(
        r#"{"reply": "a", "summary": "b", "mood": "angry"}"#.to_string()
    ));
    service.push_raw(Ok("just some prose".to_string()));

    for _ in 0..2 {
        let err = executor.run_turn(&mut session, "hi").await.unwrap_err();
        assert!(matches!(err, EngineError::MalformedReply(_)));
    }
    assert_eq!(session.turn_count(), 0);
    assert!(session.last_request().is_none());
}

#[tokio::test]
async fn transport_failure_leaves_state_untouched() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_raw(Err(ProviderError::Refusal("no".into())));

    let err = executor.run_turn(&mut session, "hi").await.unwrap_err();
    assert!(matches!(err, EngineError::Provider(ProviderError::Refusal(_))));
    assert_eq!(session.turn_count(), 0);
    assert_eq!(session.memory().history_len(), 0);
}

#[tokio::test]
async fn empty_reply_is_a_valid_turn() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("", "quiet");

    let reply = executor.run_turn(&mut session, "hello").await.unwrap();
    assert_eq!(reply, "");
    assert_eq!(session.turn_count(), 1);
}

#[tokio::test]
async fn commands_never_reach_the_service() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    for input in ["speed fast", "api foo", "turn", "mood", "help", "", "color ?"] {
        if let Command::Chat(message) = command::parse(input) {
            executor.run_turn(&mut session, &message).await.unwrap();
        }
    }
    assert!(service.requests().is_empty());
    assert_eq!(session.turn_count(), 0);
}

#[tokio::test]
async fn stage_escalates_with_turns() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Fast);
    for _ in 0..6 {
        service.push_reply("ok", "s");
    }
    for _ in 0..6 {
        executor.run_turn(&mut session, "talk").await.unwrap();
    }
    assert_eq!(session.active_personality(), Personality::Serious);
    assert_eq!(session.active_stage().id, "stage_40");
    // one more turn reaches stage_50
    service.push_reply("ok", "s");
    executor.run_turn(&mut session, "talk").await.unwrap();
    assert_eq!(session.active_stage().id, "stage_50");
    assert_eq!(session.active_personality(), Personality::Angry);
}

#[tokio::test]
async fn mood_override_freezes_system_prompt() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Fast);
    session.set_mood_override(Personality::Serious);
    for _ in 0..14 {
        service.push_reply("ok", "s");
    }
    for _ in 0..14 {
        executor.run_turn(&mut session, "talk").await.unwrap();
    }

    let requests = service.requests();
    let first = &requests[0].messages[0].content;
    assert!(requests.iter().all(|r| &r.messages[0].content == first));
    assert_eq!(session.prompt_rebuilds(), 1);

    session.clear_mood_override();
    assert_eq!(session.active_personality(), Personality::Tired);
    assert_ne!(&session.system_prompt(), first);
}

#[tokio::test]
async fn speed_change_keeps_turn_count() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    for _ in 0..7 {
        service.push_reply("ok", "s");
    }
    for _ in 0..7 {
        executor.run_turn(&mut session, "talk").await.unwrap();
    }
    assert_eq!(session.active_personality(), Personality::Upset);

    session.set_speed(ProgressionSpeed::Fast);
    assert_eq!(session.turn_count(), 7);
    assert_eq!(session.active_personality(), Personality::Angry);
}

#[tokio::test]
async fn refreshed_facts_reach_the_next_prompt() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("ok", "s");
    service.push_reply("ok", "s");

    executor.run_turn(&mut session, "one").await.unwrap();
    session.refresh_facts("Fresh news about the ballroom.".into());
    executor.run_turn(&mut session, "two").await.unwrap();

    let requests = service.requests();
    assert!(requests[1].messages[0].content.contains("Fresh news about the ballroom."));
    assert!(!requests[1].messages[0].content.contains(FACTS));
}

#[tokio::test]
async fn opening_does_not_advance_the_turn() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("Hey! You there!", "ignored");

    let greeting = executor.opening(&mut session).await.unwrap();
    assert_eq!(greeting, "Hey! You there!");
    assert_eq!(session.turn_count(), 0);
    assert_eq!(session.memory().history_len(), 0);
    assert_eq!(session.memory().current_summary(), "");

    let last = session.last_request().unwrap();
    assert_eq!(last.messages.len(), 2);
    assert_eq!(last.messages[1].role, Role::User);
    assert!(last.messages[1].content.ends_with(&last.length_instruction));
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn last_request_matches_what_was_sent() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("ok", "s");
    executor.run_turn(&mut session, "hello").await.unwrap();

    let requests = service.requests();
    let sent = &requests[0].messages;
    let last = session.last_request().unwrap();
    assert_eq!(&last.messages, sent);
    assert_eq!(last.messages.last().unwrap().content, last.length_instruction);
}

#[tokio::test]
async fn analysis_requires_two_summaries() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    assert_eq!(
        executor.analyze_memory(&session).await.unwrap(),
        NOT_ENOUGH_HISTORY
    );

    service.push_reply("ok", "only one");
    executor.run_turn(&mut session, "hi").await.unwrap();
    assert_eq!(
        executor.analyze_memory(&session).await.unwrap(),
        NOT_ENOUGH_HISTORY
    );
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn analysis_sends_free_text_request_in_chronological_order() {
    let (executor, service, mut session) = setup(ProgressionSpeed::Slow);
    service.push_reply("ok", "early summary");
    service.push_reply("ok", "later summary");
    executor.run_turn(&mut session, "one").await.unwrap();
    executor.run_turn(&mut session, "two").await.unwrap();

    service.push_raw(Ok("STABLE ELEMENTS: the player likes bricks.".to_string()));
    let analysis = executor.analyze_memory(&session).await.unwrap();
    assert_eq!(analysis, "STABLE ELEMENTS: the player likes bricks.");

    let request = service.requests().pop().unwrap();
    assert!(!request.structured);
    assert!((request.temperature - 0.5).abs() < f32::EPSILON);
    let prompt = &request.messages[1].content;
    assert!(prompt.find("early summary").unwrap() < prompt.find("later summary").unwrap());
    // analysis leaves the conversation alone
    assert_eq!(session.turn_count(), 2);
}
