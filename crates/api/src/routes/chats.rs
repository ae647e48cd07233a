//! Conversation routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use super::{bad_request, internal_error, not_found};
use crate::{AppState, middleware::AuthUser};
use pawhome_core::Outcome;
use pawhome_core::chat::ChatService;
use pawhome_db::ChatRepository;

/// Creates the conversation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chats", post(open_chat).get(list_chats))
        .route("/chats/{chat_id}", get(chat_detail))
        .route("/chats/{chat_id}/messages", post(send_message))
}

fn chat_service(state: &AppState) -> ChatService<ChatRepository> {
    ChatService::new(Arc::new(ChatRepository::new((*state.db).clone())))
}

/// Request body for opening (or resolving) a conversation.
#[derive(Debug, Deserialize)]
pub struct OpenChatRequest {
    /// The other party.
    pub user_id: Uuid,
}

/// Request body for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Message body.
    pub body: String,
}

/// `POST /chats` - returns the thread with the other user, creating it on
/// first contact.
async fn open_chat(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<OpenChatRequest>,
) -> Response {
    let service = chat_service(&state);

    match service.resolve_or_create(user.user_id(), request.user_id).await {
        Ok(Outcome::Success { value }) => (StatusCode::OK, Json(value)).into_response(),
        Ok(Outcome::Failure { reason }) => bad_request(&reason),
        Err(err) => {
            error!(error = %err, "resolving conversation failed");
            internal_error()
        }
    }
}

/// `GET /chats` - lists the user's threads, each with its latest message.
async fn list_chats(State(state): State<AppState>, user: AuthUser) -> Response {
    let service = chat_service(&state);

    match service.list_threads(user.user_id()).await {
        Ok(previews) => (StatusCode::OK, Json(previews)).into_response(),
        Err(err) => {
            error!(error = %err, "listing conversations failed");
            internal_error()
        }
    }
}

/// `GET /chats/{chat_id}` - one thread with its full history in reading
/// order. Non-members get 404, never the data.
async fn chat_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Response {
    let service = chat_service(&state);

    match service.thread_detail(user.user_id(), chat_id).await {
        Ok(Some(detail)) => (StatusCode::OK, Json(detail)).into_response(),
        Ok(None) => not_found("chat not found"),
        Err(err) => {
            error!(error = %err, "loading conversation failed");
            internal_error()
        }
    }
}

/// `POST /chats/{chat_id}/messages` - appends a message to a thread the
/// sender takes part in.
async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(chat_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    let service = chat_service(&state);

    match service
        .send_message(user.user_id(), chat_id, request.body)
        .await
    {
        Ok(Some(Outcome::Success { value })) => {
            (StatusCode::CREATED, Json(value)).into_response()
        }
        Ok(Some(Outcome::Failure { reason })) => bad_request(&reason),
        Ok(None) => not_found("chat not found"),
        Err(err) => {
            error!(error = %err, "sending message failed");
            internal_error()
        }
    }
}
