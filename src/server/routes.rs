//! HTTP route handlers for the dashboard API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::core::ids::{ConversationId, MessageId};
use crate::dashboard::Dashboard;
use crate::view::{MessageListView, SidebarView};

/// Create the API router with all routes.
pub fn create_router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/status", get(status))
        .route(
            "/api/conversations",
            get(list_conversations).post(create_conversation),
        )
        .route("/api/conversations/{id}", get(get_conversation))
        .route("/api/conversations/{id}/select", post(select_conversation))
        .route("/api/messages", get(current_messages).post(send_message))
        .with_state(dashboard)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "chat-dashboard",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `online` while serving.
    pub status: &'static str,
    /// Number of conversations.
    pub conversations: usize,
    /// Simulated replies waiting for their timer.
    pub pending_replies: usize,
}

async fn status(State(dashboard): State<Arc<Dashboard>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        conversations: dashboard.conversation_count().await,
        pending_replies: dashboard.pending_replies(),
    })
}

async fn list_conversations(State(dashboard): State<Arc<Dashboard>>) -> Json<SidebarView> {
    Json(dashboard.sidebar().await)
}

/// Response to the `new_conversation` intent.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Identifier of the new, now current, conversation.
    pub id: ConversationId,
    /// Sidebar after the creation.
    pub sidebar: SidebarView,
}

async fn create_conversation(
    State(dashboard): State<Arc<Dashboard>>,
) -> (StatusCode, Json<CreatedResponse>) {
    let id = dashboard.new_conversation().await;
    let sidebar = dashboard.sidebar().await;
    (StatusCode::CREATED, Json(CreatedResponse { id, sidebar }))
}

async fn get_conversation(
    State(dashboard): State<Arc<Dashboard>>,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, (StatusCode, String)> {
    let not_found = || (StatusCode::NOT_FOUND, format!("Conversation not found: {id}"));
    let conversation_id: ConversationId = id.parse().map_err(|_| not_found())?;
    dashboard
        .conversation(conversation_id)
        .await
        .map(Json)
        .ok_or_else(not_found)
}

/// Response to the `select` intent.
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    /// Whether the requested conversation is now current.
    pub selected: bool,
    /// Current conversation after the request.
    pub current_id: Option<ConversationId>,
}

/// Malformed and unknown ids are both a no-op, never an error.
async fn select_conversation(
    State(dashboard): State<Arc<Dashboard>>,
    Path(id): Path<String>,
) -> Json<SelectResponse> {
    let selected = match id.parse::<ConversationId>() {
        Ok(conversation_id) => dashboard.select_conversation(conversation_id).await,
        Err(_) => false,
    };
    Json(SelectResponse {
        selected,
        current_id: dashboard.current_id().await,
    })
}

async fn current_messages(State(dashboard): State<Arc<Dashboard>>) -> Json<MessageListView> {
    Json(dashboard.message_list().await)
}

/// Send request.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    /// Message text, passed through without validation.
    pub content: String,
}

/// Send response.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    /// Whether a conversation was current and received the message.
    pub accepted: bool,
    /// Conversation the message (and its reply) went to.
    pub conversation_id: Option<ConversationId>,
    /// Identifier of the stored user message.
    pub message_id: Option<MessageId>,
}

async fn send_message(
    State(dashboard): State<Arc<Dashboard>>,
    Json(request): Json<SendRequest>,
) -> Json<SendResponse> {
    // The reply task is detached; it lands on its own after the delay.
    let response = match dashboard.send_message(request.content).await {
        Some(sent) => SendResponse {
            accepted: true,
            conversation_id: Some(sent.conversation_id),
            message_id: Some(sent.message_id),
        },
        None => SendResponse {
            accepted: false,
            conversation_id: None,
            message_id: None,
        },
    };
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DashboardConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let dashboard = Dashboard::new(&DashboardConfig::default()).unwrap();
        create_router(Arc::new(dashboard))
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let router = router();
        let (status, body) = call(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_counts_conversations() {
        let router = router();
        let (_, body) = call(&router, "GET", "/api/status", None).await;
        assert_eq!(body["status"], "online");
        assert_eq!(body["conversations"], 1);
        assert_eq!(body["pending_replies"], 0);
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let router = router();
        let (status, created) = call(&router, "POST", "/api/conversations", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["sidebar"]["current_id"], created["id"]);

        let (_, sidebar) = call(&router, "GET", "/api/conversations", None).await;
        let items = sidebar["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["title"], "New Chat");
        assert_eq!(items[1]["selected"], true);
    }

    #[tokio::test]
    async fn test_select_unknown_and_malformed_are_noops() {
        let router = router();
        let (_, before) = call(&router, "GET", "/api/conversations", None).await;

        let unknown = format!("/api/conversations/{}/select", ConversationId::new());
        let (status, body) = call(&router, "POST", &unknown, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"], false);
        assert_eq!(body["current_id"], before["current_id"]);

        let (_, body) = call(&router, "POST", "/api/conversations/garbage/select", None).await;
        assert_eq!(body["selected"], false);
        assert_eq!(body["current_id"], before["current_id"]);
    }

    #[tokio::test]
    async fn test_select_existing() {
        let router = router();
        let (_, sidebar) = call(&router, "GET", "/api/conversations", None).await;
        let welcome = sidebar["current_id"].as_str().unwrap().to_string();
        call(&router, "POST", "/api/conversations", None).await;

        let uri = format!("/api/conversations/{welcome}/select");
        let (_, body) = call(&router, "POST", &uri, None).await;
        assert_eq!(body["selected"], true);
        assert_eq!(body["current_id"], welcome.as_str());
    }

    #[tokio::test]
    async fn test_send_appends_and_retitles() {
        let router = router();
        let (_, sent) = call(
            &router,
            "POST",
            "/api/messages",
            Some(serde_json::json!({ "content": "How do lifetimes work?" })),
        )
        .await;
        assert_eq!(sent["accepted"], true);

        let (_, thread) = call(&router, "GET", "/api/messages", None).await;
        assert_eq!(thread["title"], "How do lifetimes work?");
        let messages = thread["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["id"], sent["message_id"]);

        let (_, status) = call(&router, "GET", "/api/status", None).await;
        assert_eq!(status["pending_replies"], 1);
    }

    #[tokio::test]
    async fn test_send_without_selection_rejected_quietly() {
        let mut config = DashboardConfig::default();
        config.seed.enabled = false;
        let router = create_router(Arc::new(Dashboard::new(&config).unwrap()));

        let (status, body) = call(
            &router,
            "POST",
            "/api/messages",
            Some(serde_json::json!({ "content": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], false);
    }

    #[tokio::test]
    async fn test_get_conversation() {
        let router = router();
        let (_, sidebar) = call(&router, "GET", "/api/conversations", None).await;
        let welcome = sidebar["current_id"].as_str().unwrap().to_string();

        let uri = format!("/api/conversations/{welcome}");
        let (status, body) = call(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Welcome Chat");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);

        let missing = format!("/api/conversations/{}", ConversationId::new());
        let (status, _) = call(&router, "GET", &missing, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
