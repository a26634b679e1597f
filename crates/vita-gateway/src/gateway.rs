use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, warn};
use vita_core::{Artifact, ChatRequest, Message, Profile};
use vita_llm::ChatProvider;
use vita_session::{SessionError, SessionManager};

use crate::prompt::persona_prompt;
use crate::rules;

/// How a reply came to be. The shell decides presentation; the gateway only
/// classifies.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyKind {
    /// Free text generated by the model
    Prose,
    /// A rule-table hit; the model was never called
    Canned,
    /// The model emitted a structured artifact payload
    Artifact(Artifact),
    /// The external call failed; the text is the substituted diagnostic
    Failure(String),
}

/// One assistant turn, typed
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
}

/// Shell-level misuse only. Model failures are reply data, never errors:
/// the gateway boundary does not leak them.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Composes persona + profile + history into one model request per user
/// submission, with the rule table short-circuiting in front of it.
pub struct Gateway {
    provider: Arc<dyn ChatProvider>,
    sessions: Arc<SessionManager>,
    system_prompt: String,
    model: String,
    temperature: f32,
}

impl Gateway {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        sessions: Arc<SessionManager>,
        profile: &Profile,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            sessions,
            system_prompt: persona_prompt(profile),
            model: model.into(),
            temperature,
        }
    }

    /// Handle one user submission.
    ///
    /// Appends the user turn, produces exactly one assistant turn (canned,
    /// generated, or substituted error text) and appends it before
    /// returning. The session always grows by exactly two messages.
    pub async fn respond(&self, session_id: &str, user_text: &str) -> Result<Reply, GatewayError> {
        self.respond_at(session_id, user_text, Utc::now().date_naive())
            .await
    }

    /// Same as [`respond`](Self::respond) with an explicit "today" for the
    /// date-gated rules.
    pub async fn respond_at(
        &self,
        session_id: &str,
        user_text: &str,
        today: NaiveDate,
    ) -> Result<Reply, GatewayError> {
        self.sessions.append(session_id, Message::user(user_text))?;

        let reply = if let Some(canned) = rules::classify(user_text, today) {
            debug!(session_id, "rule table hit, skipping model call");
            Reply {
                text: canned.to_string(),
                kind: ReplyKind::Canned,
            }
        } else {
            self.generate(session_id).await?
        };

        self.sessions
            .append(session_id, Message::assistant(reply.text.clone()))?;
        Ok(reply)
    }

    /// The live-model branch: one best-effort call, failure substituted as
    /// a harmless text reply.
    async fn generate(&self, session_id: &str) -> Result<Reply, GatewayError> {
        let history = self.sessions.history(session_id)?;
        let request = ChatRequest::new(&self.model)
            .with_message(Message::system(&self.system_prompt))
            .with_messages(history)
            .temperature(self.temperature);

        match self.provider.chat(request).await {
            Ok(response) => {
                let kind = match Artifact::parse(&response.content) {
                    Some(artifact) => ReplyKind::Artifact(artifact),
                    None => ReplyKind::Prose,
                };
                Ok(Reply {
                    text: response.content,
                    kind,
                })
            }
            Err(e) => {
                warn!(session_id, error = %e, "chat completion failed, substituting error reply");
                Ok(Reply {
                    text: format!("An error occurred: {}", e),
                    kind: ReplyKind::Failure(e.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vita_core::{ChatResponse, Role};
    use vita_llm::{LlmError, Result as LlmResult};

    /// Counting stub provider: canned reply or canned failure
    struct StubProvider {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        fn provider_id(&self) -> &str {
            "stub"
        }

        async fn chat(&self, _request: ChatRequest) -> LlmResult<ChatResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(text) => Ok(ChatResponse::new("stub-model", text.clone())),
                None => Err(LlmError::Network("connection refused".to_string())),
            }
        }
    }

    fn gateway_with(provider: Arc<StubProvider>) -> (Gateway, Arc<SessionManager>, String) {
        let sessions = Arc::new(SessionManager::new());
        let session_id = sessions.create();
        let gateway = Gateway::new(
            provider,
            Arc::clone(&sessions),
            &Profile::builtin(),
            "stub-model",
            0.7,
        );
        (gateway, sessions, session_id)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_success_grows_session_by_two() {
        let provider = Arc::new(StubProvider::replying("I work at Polytec."));
        let (gateway, sessions, id) = gateway_with(Arc::clone(&provider));

        let reply = gateway.respond(&id, "Where do you work?").await.unwrap();
        assert_eq!(reply.kind, ReplyKind::Prose);
        assert_eq!(sessions.message_count(&id).unwrap(), 2);

        let history = sessions.history(&id).unwrap();
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, "I work at Polytec.");
    }

    #[tokio::test]
    async fn test_failure_grows_session_by_two_with_error_text() {
        let provider = Arc::new(StubProvider::failing());
        let (gateway, sessions, id) = gateway_with(Arc::clone(&provider));

        let reply = gateway.respond(&id, "Where do you work?").await.unwrap();
        assert!(matches!(reply.kind, ReplyKind::Failure(_)));
        assert!(reply.text.starts_with("An error occurred: "));
        assert!(reply.text.contains("connection refused"));

        // Never grows by one: the substituted error is the assistant turn
        assert_eq!(sessions.message_count(&id).unwrap(), 2);
        let history = sessions.history(&id).unwrap();
        assert_eq!(history[1].content, reply.text);
    }

    #[tokio::test]
    async fn test_rule_hit_never_calls_provider() {
        let provider = Arc::new(StubProvider::replying("should not be used"));
        let (gateway, sessions, id) = gateway_with(Arc::clone(&provider));

        let reply = gateway
            .respond(&id, "What is your greatest weakness?")
            .await
            .unwrap();
        assert_eq!(reply.kind, ReplyKind::Canned);
        assert!(reply.text.contains("deeply engrossed in projects"));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(sessions.message_count(&id).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_date_gate_through_gateway() {
        let provider = Arc::new(StubProvider::replying("unused"));
        let (gateway, _sessions, id) = gateway_with(Arc::clone(&provider));

        let before = gateway
            .respond_at(&id, "Are you married?", day(2024, 9, 5))
            .await
            .unwrap();
        assert!(before.text.contains("engaged"));

        let on_day = gateway
            .respond_at(&id, "Are you married?", day(2024, 9, 6))
            .await
            .unwrap();
        assert!(on_day.text.contains("married"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_artifact_output_is_classified() {
        let provider = Arc::new(StubProvider::replying(
            r#"{"artifact": "samples", "points": [{"x": 1.0, "y": 2.0}], "export": "csv"}"#,
        ));
        let (gateway, _sessions, id) = gateway_with(provider);

        let reply = gateway.respond(&id, "Plot my skills").await.unwrap();
        assert!(matches!(reply.kind, ReplyKind::Artifact(_)));
    }

    #[tokio::test]
    async fn test_malformed_artifact_downgrades_to_prose() {
        // Tagged but missing the required "points" key
        let provider = Arc::new(StubProvider::replying(r#"{"artifact": "samples"}"#));
        let (gateway, _sessions, id) = gateway_with(provider);

        let reply = gateway.respond(&id, "Plot my skills").await.unwrap();
        assert_eq!(reply.kind, ReplyKind::Prose);
    }

    #[tokio::test]
    async fn test_stubbed_outcomes_are_deterministic() {
        let provider = Arc::new(StubProvider::failing());
        let sessions = Arc::new(SessionManager::new());
        let gateway = Gateway::new(
            provider,
            Arc::clone(&sessions),
            &Profile::builtin(),
            "stub-model",
            0.7,
        );

        let a = sessions.create();
        let b = sessions.create();
        let first = gateway.respond(&a, "same question").await.unwrap();
        let second = gateway.respond(&b, "same question").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_session_is_an_error() {
        let provider = Arc::new(StubProvider::replying("x"));
        let sessions = Arc::new(SessionManager::new());
        let gateway = Gateway::new(
            provider,
            sessions,
            &Profile::builtin(),
            "stub-model",
            0.7,
        );

        let err = gateway.respond("missing", "hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::Session(SessionError::NotFound { .. })));
    }
}
