use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::payments::{ChargeBookingRequest, ChargeResult, PaymentLookup, RefundReceipt, RefundRequest},
    error::{AppResult, ErrorBody},
    response::{ApiResponse, AppJson, AppQuery},
    routes::params::PaymentLookupQuery,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(lookup_payment).post(charge_booking).put(refund_payment),
    )
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = ChargeBookingRequest,
    responses(
        (status = 200, description = "Payment captured, booking confirmed", body = ApiResponse<ChargeResult>),
        (status = 400, description = "Declined, already paid or amount mismatch", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
    ),
    tag = "Payments"
)]
pub async fn charge_booking(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ChargeBookingRequest>,
) -> AppResult<Json<ApiResponse<ChargeResult>>> {
    let resp = payment_service::charge_booking(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentLookupQuery),
    responses(
        (status = 200, description = "Verification result or payment details", body = ApiResponse<PaymentLookup>),
        (status = 400, description = "Neither transaction id nor booking id given", body = ErrorBody),
        (status = 404, description = "Unknown booking or transaction", body = ErrorBody),
    ),
    tag = "Payments"
)]
pub async fn lookup_payment(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaymentLookupQuery>,
) -> AppResult<Json<ApiResponse<PaymentLookup>>> {
    let resp = payment_service::lookup_payment(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/payments",
    request_body = RefundRequest,
    responses(
        (status = 200, description = "Refund processed, booking cancelled", body = ApiResponse<RefundReceipt>),
        (status = 400, description = "Payment not completed", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
    ),
    tag = "Payments"
)]
pub async fn refund_payment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefundRequest>,
) -> AppResult<Json<ApiResponse<RefundReceipt>>> {
    let resp = payment_service::refund_payment(&state, payload).await?;
    Ok(Json(resp))
}
