use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::payments::{
        ChargeBookingRequest, ChargeResult, DEFAULT_CURRENCY, PaymentDetails, PaymentLookup,
        PaymentReceipt, PaymentVerification, RefundReceipt, RefundRequest, VerificationStatus,
    },
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings, Model as BookingModel},
        earnings::{ActiveModel as EarningActive, Column as EarningCol, Entity as Earnings},
        enums::EarningStatus,
    },
    error::{AppError, AppResult},
    gateway::{ChargeOutcome, ChargeRequest},
    lifecycle::{BookingEvent, BookingState, split_commission, transition},
    response::ApiResponse,
    routes::params::PaymentLookupQuery,
    services::booking_service::find_booking,
    state::AppState,
};

pub const DEFAULT_REFUND_REASON: &str = "Customer requested refund";

/// Charges a booking. The booking row stays locked until the outcome is
/// committed, so concurrent charges for one booking run one after another.
pub async fn charge_booking(
    state: &AppState,
    payload: ChargeBookingRequest,
) -> AppResult<ApiResponse<ChargeResult>> {
    let txn = state.orm.begin().await?;

    let booking = Bookings::find_by_id(payload.booking_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    let current = BookingState::new(booking.status, booking.payment_status);
    transition(current, BookingEvent::PaymentSucceeded)?;
    if payload.amount != booking.price {
        return Err(AppError::bad_request(
            "Payment amount does not match booking price",
        ));
    }

    let currency = payload
        .currency
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let request = ChargeRequest {
        booking_id: booking.id,
        amount: booking.price,
        currency: currency.clone(),
        method: payload.payment_method,
        details: payload.payment_details,
    };

    match state.payments.process_payment(&request).await? {
        ChargeOutcome::Declined { reason } => {
            let next = transition(current, BookingEvent::PaymentFailed)?;
            let booking_id = booking.id;
            apply_state(booking, next, None, &txn).await?;
            txn.commit().await?;

            tracing::warn!(%booking_id, %reason, "payment declined");
            audit::record(
                &state.pool,
                None,
                "payment_failed",
                "bookings",
                serde_json::json!({ "booking_id": booking_id, "reason": reason }),
            )
            .await;
            Err(AppError::BadRequest(reason))
        }
        ChargeOutcome::Approved { transaction_id } => {
            let next = transition(current, BookingEvent::PaymentSucceeded)?;
            let booking = apply_state(booking, next, Some(transaction_id.clone()), &txn).await?;

            let split = split_commission(booking.price);
            EarningActive {
                id: Set(Uuid::new_v4()),
                consultant_id: Set(booking.consultant_id),
                booking_id: Set(booking.id),
                session_id: Set(None),
                amount: Set(split.amount),
                commission: Set(split.commission),
                total_amount: Set(split.total_amount),
                status: Set(EarningStatus::Pending),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&txn)
            .await?;

            txn.commit().await?;

            tracing::info!(
                booking_id = %booking.id,
                %transaction_id,
                amount = booking.price,
                commission = split.commission,
                "payment completed"
            );
            audit::record(
                &state.pool,
                Some(booking.client_id),
                "payment_completed",
                "bookings",
                serde_json::json!({
                    "booking_id": booking.id,
                    "transaction_id": transaction_id,
                    "amount": booking.price,
                }),
            )
            .await;

            Ok(ApiResponse::success(
                "Payment successful",
                ChargeResult {
                    payment: PaymentReceipt {
                        transaction_id,
                        amount: booking.price,
                        currency,
                        status: booking.payment_status,
                    },
                    booking: booking.into(),
                },
            ))
        }
    }
}

pub async fn lookup_payment(
    state: &AppState,
    query: PaymentLookupQuery,
) -> AppResult<ApiResponse<PaymentLookup>> {
    let transaction_id = query
        .transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match (transaction_id, query.booking_id) {
        (Some(transaction_id), _) => {
            let exists = Bookings::find()
                .filter(BookingCol::TransactionId.eq(transaction_id))
                .one(&state.orm)
                .await?;
            if exists.is_none() {
                return Err(AppError::not_found("Transaction"));
            }

            let verified = state.payments.verify_payment(transaction_id).await?;
            let verification = PaymentVerification {
                transaction_id: transaction_id.to_string(),
                status: if verified {
                    VerificationStatus::Verified
                } else {
                    VerificationStatus::Pending
                },
                verified_at: verified.then(Utc::now),
            };
            Ok(ApiResponse::success(
                "Payment verification",
                PaymentLookup::Verification(verification),
            ))
        }
        (None, Some(booking_id)) => {
            let booking = find_booking(state, booking_id).await?;
            Ok(ApiResponse::success(
                "Payment details",
                PaymentLookup::Details(PaymentDetails {
                    booking_id: booking.id,
                    booking_number: booking.booking_number,
                    amount: booking.price,
                    status: booking.payment_status,
                    transaction_id: booking.transaction_id,
                    created_at: booking.created_at.with_timezone(&Utc),
                }),
            ))
        }
        (None, None) => Err(AppError::bad_request(
            "Transaction ID or Booking ID is required",
        )),
    }
}

pub async fn refund_payment(
    state: &AppState,
    payload: RefundRequest,
) -> AppResult<ApiResponse<RefundReceipt>> {
    let transaction_id = payload
        .transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let finder = match (payload.booking_id, transaction_id) {
        (Some(booking_id), _) => Bookings::find_by_id(booking_id),
        (None, Some(transaction_id)) => {
            Bookings::find().filter(BookingCol::TransactionId.eq(transaction_id))
        }
        (None, None) => {
            return Err(AppError::bad_request(
                "Booking ID or Transaction ID is required",
            ));
        }
    };

    let txn = state.orm.begin().await?;
    let booking = finder
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    let current = BookingState::new(booking.status, booking.payment_status);
    let next = transition(current, BookingEvent::Refunded)?;
    let Some(charge_id) = booking.transaction_id.clone() else {
        return Err(AppError::bad_request(
            "Cannot refund a payment that was not completed",
        ));
    };

    let refund_id = match state
        .payments
        .process_refund(&charge_id, booking.price)
        .await?
    {
        ChargeOutcome::Approved { transaction_id } => transaction_id,
        ChargeOutcome::Declined { reason } => return Err(AppError::BadRequest(reason)),
    };

    let booking = apply_state(booking, next, None, &txn).await?;
    Earnings::update_many()
        .col_expr(EarningCol::Status, Expr::value(EarningStatus::Held))
        .col_expr(EarningCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(EarningCol::BookingId.eq(booking.id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    let reason = payload
        .reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REFUND_REASON.to_string());

    tracing::info!(booking_id = %booking.id, %refund_id, "payment refunded");
    audit::record(
        &state.pool,
        Some(booking.client_id),
        "payment_refunded",
        "bookings",
        serde_json::json!({
            "booking_id": booking.id,
            "refund_id": refund_id,
            "reason": reason,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Refund processed",
        RefundReceipt {
            transaction_id: refund_id,
            booking_id: booking.id,
            amount: booking.price,
            reason,
            processed_at: Utc::now(),
        },
    ))
}

/// Writes a lifecycle state onto the locked booking row.
async fn apply_state(
    booking: BookingModel,
    next: BookingState,
    transaction_id: Option<String>,
    txn: &DatabaseTransaction,
) -> AppResult<BookingModel> {
    let mut active: BookingActive = booking.into();
    active.status = Set(next.status);
    active.payment_status = Set(next.payment);
    if transaction_id.is_some() {
        active.transaction_id = Set(transaction_id);
    }
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(txn).await?)
}
