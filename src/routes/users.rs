use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest, UserDetail},
    error::{AppResult, ErrorBody},
    models::User,
    response::{ApiResponse, AppJson, AppQuery},
    routes::params::UserLookupQuery,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_user).post(create_user).put(update_user))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserLookupQuery),
    responses(
        (status = 200, description = "User with consultant profile", body = ApiResponse<UserDetail>),
        (status = 400, description = "Neither id nor email given", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserLookupQuery>,
) -> AppResult<Json<ApiResponse<UserDetail>>> {
    let resp = user_service::get_user(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Invalid input or duplicate email", body = ErrorBody),
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::create_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_user(&state, payload).await?;
    Ok(Json(resp))
}
