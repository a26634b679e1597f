//! HTTP shell: the REST surface the browser UI talks to.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use vita_core::Artifact;
use vita_gateway::ReplyKind;

use crate::mail::ContactMessage;
use crate::showcase;
use crate::state::AppState;

/// Send-message request
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// One assistant reply, as presented to the shell
#[derive(Debug, Serialize)]
pub struct ReplyBody {
    pub kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<vita_gateway::Reply> for ReplyBody {
    fn from(reply: vita_gateway::Reply) -> Self {
        let (kind, artifact, reason) = match reply.kind {
            ReplyKind::Prose => ("prose", None, None),
            ReplyKind::Canned => ("canned", None, None),
            ReplyKind::Artifact(artifact) => ("artifact", Some(artifact), None),
            ReplyKind::Failure(reason) => ("failure", None, Some(reason)),
        };
        Self {
            kind,
            text: reply.text,
            artifact,
            reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub session_id: String,
    pub reply: ReplyBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Run the HTTP server until shutdown
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("vita server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the route table
pub fn create_router(state: AppState) -> Router {
    let cors = state.config.cors;
    let state = Arc::new(state);

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/sessions", post(create_session_handler))
        .route(
            "/api/v1/sessions/:session_id/messages",
            get(session_messages_handler),
        )
        .route("/api/v1/chat", post(chat_handler))
        .route("/api/v1/contact", post(contact_handler))
        .route(
            "/api/v1/showcase/project-management",
            get(project_management_handler),
        )
        .route("/api/v1/showcase/data-science", get(data_science_handler))
        .route("/api/v1/showcase/logistics", get(logistics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn create_session_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session_id = state.sessions.create();
    info!(session_id, "session created");
    (
        StatusCode::CREATED,
        Json(json!({
            "session_id": session_id,
            "created_at": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

async fn session_messages_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.history(&session_id) {
        Ok(messages) => (
            StatusCode::OK,
            Json(json!({
                "session_id": session_id,
                "messages": messages,
            })),
        ),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(json!(ErrorResponse {
                error: e.to_string(),
                code: "SESSION_NOT_FOUND".to_string(),
            })),
        ),
    }
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequestBody>,
) -> impl IntoResponse {
    // A fresh or unknown session id begins a new conversation
    let session_id = match req.session_id {
        Some(id) => state.sessions.get_or_create(&id),
        None => state.sessions.create(),
    };

    match state.gateway.respond(&session_id, &req.message).await {
        Ok(reply) => {
            let body = ChatResponseBody {
                session_id,
                reply: reply.into(),
            };
            (StatusCode::OK, Json(json!(body)))
        }
        Err(e) => {
            error!(session_id, error = %e, "chat processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!(ErrorResponse {
                    error: e.to_string(),
                    code: "CHAT_ERROR".to_string(),
                })),
            )
        }
    }
}

async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(message): Json<ContactMessage>,
) -> impl IntoResponse {
    let Some(relay) = &state.relay else {
        warn!("contact form submitted but mail relay is disabled");
        return Json(json!({ "sent": false }));
    };

    match relay.relay(&message).await {
        Ok(()) => {
            info!(from = %message.email, "contact message relayed");
            Json(json!({ "sent": true }))
        }
        Err(e) => {
            warn!(error = %e, "contact message could not be relayed");
            Json(json!({ "sent": false }))
        }
    }
}

async fn project_management_handler() -> impl IntoResponse {
    Json(json!(showcase::project_management()))
}

async fn data_science_handler() -> impl IntoResponse {
    Json(json!(showcase::data_science()))
}

async fn logistics_handler() -> impl IntoResponse {
    Json(json!(showcase::logistics()))
}
