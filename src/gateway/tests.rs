use super::keywords::emergency_reply;
use super::*;
use async_trait::async_trait;
use nursebot_core::{
    context::{Completion, CompletionMetadata},
    error::NurseError,
};
use nursebot_memory::InMemoryStore;
use std::sync::Mutex;

// -----------------------------------------------------------------------
// Mock provider
// -----------------------------------------------------------------------

/// Records every request and answers with a canned result.
struct MockProvider {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    fn ok(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, NurseError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(text) => Ok(Completion {
                text: text.clone(),
                metadata: CompletionMetadata {
                    provider_used: "mock".into(),
                    ..Default::default()
                },
            }),
            None => Err(NurseError::Provider("connection reset".into())),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}

fn gateway(provider: Arc<MockProvider>) -> Gateway {
    let tracker = Tracker::new(Arc::new(InMemoryStore::new(10)));
    Gateway::new(tracker, provider, Sampling::default())
}

// -----------------------------------------------------------------------
// respond()
// -----------------------------------------------------------------------

#[tokio::test]
async fn test_respond_success_returns_and_records_reply() {
    let provider = MockProvider::ok("Stay hydrated and rest.");
    let gw = gateway(provider.clone());

    let reply = gw.respond("u1", "hello").await;
    assert_eq!(reply, "Stay hydrated and rest.");
    assert_eq!(provider.calls(), 1);

    let history = gw.tracker().store().history("u1").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "hello");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, "Stay hydrated and rest.");
}

#[tokio::test]
async fn test_respond_failure_returns_and_records_apology() {
    let provider = MockProvider::failing();
    let gw = gateway(provider.clone());

    let reply = gw.respond("u1", "hello").await;
    assert_eq!(reply, APOLOGY_REPLY);
    assert_eq!(provider.calls(), 1);

    let history = gw.tracker().store().history("u1").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, APOLOGY_REPLY);
}

#[tokio::test]
async fn test_respond_emergency_skips_provider() {
    let provider = MockProvider::ok("should not be used");
    let gw = gateway(provider.clone());

    let reply = gw.respond("u1", "I have chest pain").await;
    assert_eq!(reply, emergency_reply());
    assert_eq!(provider.calls(), 0);
    assert_eq!(gw.tracker().store().len("u1").await, 2);
}

#[tokio::test]
async fn test_respond_sends_prompt_and_sampling() {
    let provider = MockProvider::ok("ok");
    let gw = gateway(provider.clone());

    gw.respond("u1", "Is ibuprofen safe with coffee?").await;

    let requests = provider.requests.lock().unwrap();
    let req = &requests[0];
    assert_eq!(req.user_message, "Is ibuprofen safe with coffee?");
    assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(req.max_tokens, 150);
    assert!(req.system_prompt.starts_with("You are an AI nurse assistant."));
    // The user's message is recorded before the prompt is built.
    assert!(req
        .system_prompt
        .contains("- user: Is ibuprofen safe with coffee?..."));
}

#[tokio::test]
async fn test_respond_uses_configured_sampling() {
    let provider = MockProvider::ok("ok");
    let tracker = Tracker::new(Arc::new(InMemoryStore::new(10)));
    let cfg = OpenAiConfig {
        temperature: 0.2,
        max_tokens: 64,
        ..Default::default()
    };
    let gw = Gateway::new(tracker, provider.clone(), Sampling::from(&cfg));

    gw.respond("u1", "hi").await;

    let requests = provider.requests.lock().unwrap();
    assert!((requests[0].temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(requests[0].max_tokens, 64);
}

#[tokio::test]
async fn test_history_stays_bounded_across_turns() {
    let provider = MockProvider::ok("noted");
    let gw = gateway(provider);

    for i in 0..8 {
        gw.respond("u1", &format!("question {i}")).await;
    }
    let history = gw.tracker().store().history("u1").await;
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].content, "question 3");
    assert_eq!(history[9].content, "noted");
}

#[tokio::test]
async fn test_users_do_not_share_history() {
    let gw = gateway(MockProvider::ok("ok"));
    gw.respond("alice", "hello").await;
    gw.respond("bob", "I am bleeding").await;

    let alice = gw.tracker().store().history("alice").await;
    let bob = gw.tracker().store().history("bob").await;
    assert_eq!(alice[1].content, "ok");
    assert_eq!(bob[1].content, emergency_reply());
}
