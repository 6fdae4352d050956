//! Conversation endpoints.
//!
//! The session id travels in a signed, HTTP-only cookie; clients can present
//! an id but never mint one.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use service_core::error::AppError;

use crate::{
    catalog::DISCLAIMER,
    dtos::{ChatRequest, ChatResponse, IndexResponse, StatusResponse},
    models::SessionId,
    startup::AppState,
};

/// Landing payload. Starts a session for clients that don't have one yet.
pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<IndexResponse>) {
    let jar = if session_from_jar(&state, &jar).is_some() {
        jar
    } else {
        let session_id = state.assistant.store().create_session();
        jar.add(session_cookie(&state, &session_id))
    };

    (
        jar,
        Json(IndexResponse {
            service: "LegalEase",
            disclaimer: DISCLAIMER,
        }),
    )
}

/// Run one exchange with the assistant in the caller's session.
///
/// The cookie is issued as soon as the exchange stores a turn, so a failed
/// first message stays reachable from the client's next attempt.
pub async fn chat(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(payload): Json<ChatRequest>,
) -> Result<(SignedCookieJar, Json<ChatResponse>), (SignedCookieJar, AppError)> {
    let existing = session_from_jar(&state, &jar);
    let session_id = existing.clone().unwrap_or_else(SessionId::generate);

    let result = state
        .assistant
        .chat(session_id.clone(), &payload.message, payload.is_document)
        .await;

    let jar = if existing.is_none() && state.assistant.store().contains(&session_id) {
        jar.add(session_cookie(&state, &session_id))
    } else {
        jar
    };

    match result {
        Ok(reply) => Ok((
            jar,
            Json(ChatResponse {
                message: reply.message,
                session_id: reply.session_id,
            }),
        )),
        Err(err) => Err((jar, err.into())),
    }
}

/// Forget the caller's conversation and drop the session cookie.
pub async fn clear(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<StatusResponse>) {
    if let Some(session_id) = session_from_jar(&state, &jar) {
        state.assistant.clear(&session_id);
        tracing::info!(session_id = %session_id, "Session cleared by client");
    }

    let removal = Cookie::build(state.config.session.cookie_name.clone()).path("/");

    (
        jar.remove(removal),
        Json(StatusResponse {
            status: "session cleared",
        }),
    )
}

fn session_from_jar(state: &AppState, jar: &SignedCookieJar) -> Option<SessionId> {
    jar.get(&state.config.session.cookie_name)
        .map(|cookie| SessionId::from(cookie.value()))
        .filter(|id| !id.as_str().is_empty())
}

fn session_cookie(state: &AppState, session_id: &SessionId) -> Cookie<'static> {
    Cookie::build((
        state.config.session.cookie_name.clone(),
        session_id.to_string(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(state.config.session.cookie_secure)
    .build()
}
