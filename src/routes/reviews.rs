use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::reviews::CreateReviewRequest,
    error::{AppResult, ErrorBody},
    models::Review,
    response::{ApiResponse, AppJson, AppQuery, ListResponse},
    routes::params::ReviewListQuery,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_reviews).post(create_review))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Public reviews, newest first", body = ListResponse<Review>),
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ReviewListQuery>,
) -> AppResult<Json<ListResponse<Review>>> {
    let resp = review_service::list_reviews(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review submitted", body = ApiResponse<Review>),
        (status = 400, description = "Invalid rating, booking not completed or already reviewed", body = ErrorBody),
        (status = 403, description = "Caller is not the booking's client", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::create_review(&state, payload).await?;
    Ok(Json(resp))
}
