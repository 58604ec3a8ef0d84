//! Router for the chat API

use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, sse::Event, sse::KeepAlive, sse::Sse},
    routing::{get, post},
};
use tokio::sync::{Mutex, mpsc};
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::public;
use crate::api::state::{AppState, SharedSession};
use crate::chat::Session;
use crate::render::Typewriter;

type SharedState = Arc<RwLock<AppState>>;

/// Get the visible transcript of a chat session by ID
async fn chat_transcript(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let sessions = {
        let shared_state = state.read().expect("Unable to read shared state");
        Arc::clone(&shared_state.sessions)
    };
    let session = sessions.lock().await.get(&id).cloned();

    let Some(session) = session else {
        return Ok((
            StatusCode::NOT_FOUND,
            format!("Chat session {} not found", id),
        )
            .into_response());
    };

    let transcript = session.lock().await.transcript().turns();
    Ok(axum::Json(public::ChatTranscriptResponse { transcript }).into_response())
}

/// Run one chat turn and stream the reply as typewriter frames.
///
/// Each SSE data event carries the visible prefix of the reply so far; the
/// stream closes after the final full-text frame. A failed turn emits a
/// single `error` event instead; the session stays usable and the user's
/// message stays in the prompt buffer.
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();

    let sse_stream =
        UnboundedReceiverStream::new(rx).map(|event| Ok::<Event, Infallible>(event));

    let (config, sessions) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.config.clone(),
            Arc::clone(&shared_state.sessions),
        )
    };

    // Look up or create the session for this ID
    let session: SharedSession = sessions
        .lock()
        .await
        .entry(payload.session_id.clone())
        .or_insert_with(|| {
            Arc::new(Mutex::new(
                Session::builder(
                    &config.openai_api_hostname,
                    &config.openai_api_key,
                    &config.openai_model,
                )
                .build(),
            ))
        })
        .clone();

    // Run the turn and the animation off the request task so the SSE
    // response can start immediately
    tokio::spawn(async move {
        // Holding the session lock for the whole turn serializes both the
        // completion round trip and the animation per session
        let mut session = session.lock().await;

        match session.submit(&payload.message).await {
            Ok(reply) => {
                // A carriage return in the reply would be re-framed by SSE
                // into an extra `data:` field, which the client joins back
                // with a newline instead
                let reply = reply.replace('\r', " ");
                let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();
                let mut typewriter =
                    Typewriter::with_tick(Duration::from_millis(config.typewriter_tick_ms));
                typewriter.start(&reply, frame_tx);

                while let Some(frame) = frame_rx.recv().await {
                    if tx.send(Event::default().data(frame)).is_err() {
                        // Client went away; stop animating
                        break;
                    }
                }
            }
            Err(err) => {
                tracing::error!("Chat turn failed: {:#}", err);
                let message = err.to_string().replace(['\n', '\r'], " ");
                let _ = tx.send(Event::default().event("error").data(message));
            }
        }
    });

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::new()))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/{id}", get(chat_transcript))
}
