use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::admin::{
        ApproveConsultantRequest, ConsultantApplication, DashboardStats, RejectConsultantRequest,
    },
    error::{AppResult, ErrorBody},
    models::{Booking, ConsultantProfile},
    response::{ApiResponse, AppJson, AppPath, AppQuery, ListResponse},
    routes::params::{AdminBookingQuery, AdminConsultantQuery, AdminQuery},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/consultants", get(list_consultants))
        .route("/consultants/{user_id}/approve", post(approve_consultant))
        .route("/consultants/{user_id}/reject", post(reject_consultant))
        .route("/bookings", get(list_bookings))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    params(AdminQuery),
    responses(
        (status = 200, description = "Platform totals", body = ApiResponse<DashboardStats>),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdminQuery>,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = admin_service::dashboard_stats(&state, query.admin_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/consultants",
    params(AdminConsultantQuery),
    responses(
        (status = 200, description = "Consultant applications", body = ListResponse<ConsultantApplication>),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn list_consultants(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdminConsultantQuery>,
) -> AppResult<Json<ListResponse<ConsultantApplication>>> {
    let resp = admin_service::list_consultants(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/consultants/{user_id}/approve",
    params(
        ("user_id" = Uuid, Path, description = "Consultant user ID")
    ),
    request_body = ApproveConsultantRequest,
    responses(
        (status = 200, description = "Consultant approved", body = ApiResponse<ConsultantProfile>),
        (status = 400, description = "Already approved", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Profile not found", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn approve_consultant(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(payload): AppJson<ApproveConsultantRequest>,
) -> AppResult<Json<ApiResponse<ConsultantProfile>>> {
    let resp = admin_service::approve_consultant(&state, user_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/consultants/{user_id}/reject",
    params(
        ("user_id" = Uuid, Path, description = "Consultant user ID")
    ),
    request_body = RejectConsultantRequest,
    responses(
        (status = 200, description = "Application rejected and removed", body = ApiResponse<ConsultantProfile>),
        (status = 400, description = "Missing reason or already approved", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Profile not found", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn reject_consultant(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(payload): AppJson<RejectConsultantRequest>,
) -> AppResult<Json<ApiResponse<ConsultantProfile>>> {
    let resp = admin_service::reject_consultant(&state, user_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    params(AdminBookingQuery),
    responses(
        (status = 200, description = "Recent bookings across all users", body = ListResponse<Booking>),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdminBookingQuery>,
) -> AppResult<Json<ListResponse<Booking>>> {
    let resp = admin_service::list_bookings(&state, query).await?;
    Ok(Json(resp))
}
