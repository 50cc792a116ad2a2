use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::sessions::{CreateSessionRequest, EndSessionRequest, JoinSessionRequest, SessionJoin},
    error::{AppResult, ErrorBody},
    models::Session,
    response::{ApiResponse, AppJson, AppPath, AppQuery, ListResponse},
    routes::params::SessionListQuery,
    services::session_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session).put(join_session))
        .route("/{session_code}/end", post(end_session))
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session opened with a join URL", body = ApiResponse<Session>),
        (status = 400, description = "Booking not confirmed or session exists", body = ErrorBody),
        (status = 403, description = "Participants do not match the booking", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
    ),
    tag = "Sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSessionRequest>,
) -> AppResult<Json<ApiResponse<Session>>> {
    let resp = session_service::create_session(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sessions",
    params(SessionListQuery),
    responses(
        (status = 200, description = "Sessions, newest first", body = ListResponse<Session>),
    ),
    tag = "Sessions"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SessionListQuery>,
) -> AppResult<Json<ListResponse<Session>>> {
    let resp = session_service::list_sessions(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/sessions",
    request_body = JoinSessionRequest,
    responses(
        (status = 200, description = "Join details", body = ApiResponse<SessionJoin>),
        (status = 403, description = "Caller is not a participant", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody),
    ),
    tag = "Sessions"
)]
pub async fn join_session(
    State(state): State<AppState>,
    AppJson(payload): AppJson<JoinSessionRequest>,
) -> AppResult<Json<ApiResponse<SessionJoin>>> {
    let resp = session_service::join_session(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{session_code}/end",
    params(
        ("session_code" = String, Path, description = "Session code")
    ),
    request_body = EndSessionRequest,
    responses(
        (status = 200, description = "Session ended, booking completed", body = ApiResponse<Session>),
        (status = 400, description = "Session is not active", body = ErrorBody),
        (status = 403, description = "Caller is not a participant", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody),
    ),
    tag = "Sessions"
)]
pub async fn end_session(
    State(state): State<AppState>,
    AppPath(session_code): AppPath<String>,
    AppJson(payload): AppJson<EndSessionRequest>,
) -> AppResult<Json<ApiResponse<Session>>> {
    let resp = session_service::end_session(&state, &session_code, payload).await?;
    Ok(Json(resp))
}
