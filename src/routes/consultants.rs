use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::consultants::{ConsultantSummary, UpsertProfileRequest},
    error::{AppResult, ErrorBody},
    models::ConsultantProfile,
    response::{ApiResponse, AppJson, AppQuery, ListResponse},
    routes::params::ConsultantSearchQuery,
    services::consultant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_consultants).post(upsert_profile))
}

#[utoipa::path(
    get,
    path = "/api/consultants",
    params(ConsultantSearchQuery),
    responses(
        (status = 200, description = "Approved consultants", body = ListResponse<ConsultantSummary>),
        (status = 400, description = "Unknown category", body = ErrorBody),
    ),
    tag = "Consultants"
)]
pub async fn list_consultants(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ConsultantSearchQuery>,
) -> AppResult<Json<ListResponse<ConsultantSummary>>> {
    let resp = consultant_service::list_consultants(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/consultants",
    request_body = UpsertProfileRequest,
    responses(
        (status = 200, description = "Profile created or updated", body = ApiResponse<ConsultantProfile>),
        (status = 400, description = "User is not a consultant", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Consultants"
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertProfileRequest>,
) -> AppResult<Json<ApiResponse<ConsultantProfile>>> {
    let resp = consultant_service::upsert_profile(&state, payload).await?;
    Ok(Json(resp))
}
