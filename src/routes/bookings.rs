use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::bookings::CreateBookingRequest,
    error::{AppResult, ErrorBody},
    models::Booking,
    response::{ApiResponse, AppJson, AppQuery, ListResponse},
    routes::params::BookingListQuery,
    services::booking_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_bookings).post(create_booking))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = ListResponse<Booking>),
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> AppResult<Json<ListResponse<Booking>>> {
    let resp = booking_service::list_bookings(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created, awaiting payment", body = ApiResponse<Booking>),
        (status = 400, description = "Consultant not approved or invalid input", body = ErrorBody),
        (status = 404, description = "Client or consultant not found", body = ErrorBody),
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::create_booking(&state, payload).await?;
    Ok(Json(resp))
}
