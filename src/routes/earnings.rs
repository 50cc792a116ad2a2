use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    dto::earnings::EarningSummary,
    error::AppResult,
    models::Earning,
    response::{ApiResponse, AppQuery, ListResponse},
    routes::params::EarningListQuery,
    services::earning_service,
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    pub consultant_id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_earnings))
        .route("/summary", get(earning_summary))
}

#[utoipa::path(
    get,
    path = "/api/earnings",
    params(EarningListQuery),
    responses(
        (status = 200, description = "Consultant earnings, newest first", body = ListResponse<Earning>),
    ),
    tag = "Earnings"
)]
pub async fn list_earnings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<EarningListQuery>,
) -> AppResult<Json<ListResponse<Earning>>> {
    let resp = earning_service::list_earnings(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/earnings/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Totals per earning status", body = ApiResponse<EarningSummary>),
    ),
    tag = "Earnings"
)]
pub async fn earning_summary(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SummaryQuery>,
) -> AppResult<Json<ApiResponse<EarningSummary>>> {
    let resp = earning_service::earning_summary(&state, query.consultant_id).await?;
    Ok(Json(resp))
}
