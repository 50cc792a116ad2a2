use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::categories::{CategorySummary, CreateCategoryRequest},
    error::{AppResult, ErrorBody},
    response::ApiResponse,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(create_category))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories with approved consultant counts", body = ApiResponse<Vec<CategorySummary>>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategorySummary>>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 400, description = "Categories are predefined", body = ErrorBody),
    ),
    tag = "Categories"
)]
pub async fn create_category() -> AppResult<Json<ApiResponse<CategorySummary>>> {
    let resp = category_service::create_category()?;
    Ok(Json(resp))
}
