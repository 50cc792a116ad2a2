mod common;

use consultant_marketplace_api::{
    dto::{
        bookings::CreateBookingRequest,
        payments::{ChargeBookingRequest, PaymentLookup, RefundRequest},
        reviews::CreateReviewRequest,
        sessions::{CreateSessionRequest, EndSessionRequest, JoinSessionRequest},
    },
    entity::{
        earnings::{Column as EarningCol, Entity as Earnings},
        enums::{BookingStatus, BookingType, EarningStatus, PaymentStatus, SessionStatus, UserRole},
    },
    error::AppError,
    gateway::PaymentMethod,
    routes::params::{BookingListQuery, ParticipantRole, PaymentLookupQuery, ReviewListQuery},
    services::{
        booking_service, consultant_service, payment_service,
        review_service::{self, SESSION_MISMATCH},
        session_service,
    },
    state::AppState,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

fn booking_request(client_id: Uuid, consultant_id: Uuid, first: bool) -> CreateBookingRequest {
    CreateBookingRequest {
        client_id,
        consultant_id,
        booking_type: Some(BookingType::Instant),
        scheduled_for: None,
        duration_minutes: None,
        session_notes: Some("Switching from finance to product".into()),
        is_first_session: first,
    }
}

fn charge(booking_id: Uuid, amount: i64) -> ChargeBookingRequest {
    ChargeBookingRequest {
        booking_id,
        amount,
        currency: None,
        payment_method: PaymentMethod::Upi,
        payment_details: serde_json::json!({ "upi_id": "client@upi" }),
    }
}

fn bad_request_message(err: AppError) -> String {
    match err {
        AppError::BadRequest(message) => message,
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[tokio::test]
async fn paid_booking_runs_through_session_and_review() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;

    // Instant bookings wait for payment.
    let booking = booking_service::create_booking(&state, booking_request(client_id, consultant_id, true))
        .await?
        .data;
    assert_eq!(booking.price, 99);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment_status, PaymentStatus::Pending);
    assert!(booking.booking_number.starts_with("BK"));
    assert!(booking.scheduled_for.is_some());

    // Sessions need a confirmed booking.
    let err = session_service::create_session(
        &state,
        CreateSessionRequest {
            booking_id: booking.id,
            client_id,
            consultant_id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(bad_request_message(err), "Booking is not confirmed");

    let err = payment_service::charge_booking(&state, charge(booking.id, 299))
        .await
        .unwrap_err();
    assert_eq!(
        bad_request_message(err),
        "Payment amount does not match booking price"
    );

    let paid = payment_service::charge_booking(&state, charge(booking.id, 99)).await?.data;
    assert_eq!(paid.booking.status, BookingStatus::Confirmed);
    assert_eq!(paid.booking.payment_status, PaymentStatus::Completed);
    assert_eq!(paid.payment.currency, "INR");
    assert!(paid.payment.transaction_id.starts_with("TXN"));

    let earning = Earnings::find()
        .filter(EarningCol::BookingId.eq(booking.id))
        .one(&state.orm)
        .await?
        .expect("earning recorded with the payment");
    assert_eq!(earning.commission, 19);
    assert_eq!(earning.amount, 80);
    assert_eq!(earning.status, EarningStatus::Pending);

    let err = payment_service::charge_booking(&state, charge(booking.id, 99))
        .await
        .unwrap_err();
    assert_eq!(
        bad_request_message(err),
        "Payment already completed for this booking"
    );

    let details = payment_service::lookup_payment(
        &state,
        PaymentLookupQuery {
            transaction_id: None,
            booking_id: Some(booking.id),
        },
    )
    .await?
    .data;
    match details {
        PaymentLookup::Details(details) => {
            assert_eq!(details.status, PaymentStatus::Completed);
            assert_eq!(details.transaction_id.as_deref(), Some(paid.payment.transaction_id.as_str()));
        }
        other => panic!("expected payment details, got {other:?}"),
    }

    // Reviews only after the session has ended.
    let review = CreateReviewRequest {
        booking_id: booking.id,
        client_id,
        rating: 5,
        review: Some("Clear and practical".into()),
        session_id: None,
        is_public: None,
    };
    let err = review_service::create_review(&state, clone_review(&review))
        .await
        .unwrap_err();
    assert_eq!(bad_request_message(err), "Can only review completed bookings");

    let session = session_service::create_session(
        &state,
        CreateSessionRequest {
            booking_id: booking.id,
            client_id,
            consultant_id,
        },
    )
    .await?
    .data;
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(
        session.join_url.as_deref(),
        Some(format!("{}/{}", common::SESSION_BASE_URL, session.session_code).as_str())
    );

    let err = session_service::create_session(
        &state,
        CreateSessionRequest {
            booking_id: booking.id,
            client_id,
            consultant_id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = session_service::join_session(
        &state,
        JoinSessionRequest {
            session_code: session.session_code.clone(),
            user_id: client_id,
            role: ParticipantRole::Consultant,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let joined = session_service::join_session(
        &state,
        JoinSessionRequest {
            session_code: session.session_code.clone(),
            user_id: client_id,
            role: ParticipantRole::Client,
        },
    )
    .await?
    .data;
    assert_eq!(joined.booking.status, BookingStatus::Confirmed);

    let ended = session_service::end_session(
        &state,
        &session.session_code,
        EndSessionRequest {
            user_id: consultant_id,
        },
    )
    .await?
    .data;
    assert_eq!(ended.status, SessionStatus::Completed);
    assert!(ended.ended_at.is_some());

    let completed = booking_service::find_booking(&state, booking.id).await?;
    assert_eq!(completed.status, BookingStatus::Completed);

    let earning = Earnings::find()
        .filter(EarningCol::BookingId.eq(booking.id))
        .one(&state.orm)
        .await?
        .expect("earning");
    assert_eq!(earning.session_id, Some(session.id));

    let created = review_service::create_review(&state, clone_review(&review)).await?.data;
    assert_eq!(created.consultant_id, consultant_id);
    assert_eq!(created.session_id, Some(session.id));
    assert!(created.is_public);

    let err = review_service::create_review(&state, clone_review(&review))
        .await
        .unwrap_err();
    assert_eq!(bad_request_message(err), "Review already exists for this booking");

    let reviews = review_service::list_reviews(
        &state,
        ReviewListQuery {
            consultant_id: Some(consultant_id),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(reviews.pagination.total, 1);

    Ok(())
}

#[tokio::test]
async fn price_is_fixed_when_the_booking_is_made() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;

    let booking = booking_service::create_booking(&state, booking_request(client_id, consultant_id, false))
        .await?
        .data;
    assert_eq!(booking.price, 299);

    consultant_service::upsert_profile(&state, common::profile_request(consultant_id, 149, 499)).await?;

    let stored = booking_service::find_booking(&state, booking.id).await?;
    assert_eq!(stored.price, 299);

    let listed = booking_service::list_bookings(
        &state,
        BookingListQuery {
            user_id: Some(client_id),
            role: Some(ParticipantRole::Client),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(listed.pagination.total, 1);
    assert_eq!(listed.items[0].price, 299);

    Ok(())
}

#[tokio::test]
async fn unapproved_consultants_cannot_be_booked() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::create_user(&state, "pending", UserRole::Consultant).await?;
    consultant_service::upsert_profile(&state, common::profile_request(consultant_id, 99, 299)).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;

    let err = booking_service::create_booking(&state, booking_request(client_id, consultant_id, true))
        .await
        .unwrap_err();
    assert_eq!(bad_request_message(err), "Consultant is not approved");

    let err = booking_service::create_booking(&state, booking_request(Uuid::new_v4(), consultant_id, true))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn declined_payment_leaves_booking_retryable() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };
    let declining = common::state_with(state.pool.clone(), false);

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;
    let booking = booking_service::create_booking(&state, booking_request(client_id, consultant_id, true))
        .await?
        .data;

    let err = payment_service::charge_booking(&declining, charge(booking.id, 99))
        .await
        .unwrap_err();
    assert_eq!(bad_request_message(err), "Payment failed. Please try again.");

    let stored = booking_service::find_booking(&state, booking.id).await?;
    assert_eq!(stored.payment_status, PaymentStatus::Failed);
    assert_eq!(stored.status, BookingStatus::Pending);

    let paid = payment_service::charge_booking(&state, charge(booking.id, 99)).await?.data;
    assert_eq!(paid.booking.status, BookingStatus::Confirmed);

    Ok(())
}

#[tokio::test]
async fn refund_cancels_booking_and_holds_earning() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;
    let booking = booking_service::create_booking(&state, booking_request(client_id, consultant_id, true))
        .await?
        .data;

    let err = payment_service::refund_payment(
        &state,
        RefundRequest {
            booking_id: Some(booking.id),
            transaction_id: None,
            reason: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        bad_request_message(err),
        "Cannot refund a payment that was not completed"
    );

    let paid = payment_service::charge_booking(&state, charge(booking.id, 99)).await?.data;

    let refund = payment_service::refund_payment(
        &state,
        RefundRequest {
            booking_id: None,
            transaction_id: Some(paid.payment.transaction_id.clone()),
            reason: None,
        },
    )
    .await?
    .data;
    assert!(refund.transaction_id.starts_with("REF"));
    assert_eq!(refund.amount, 99);
    assert_eq!(refund.reason, "Customer requested refund");

    let stored = booking_service::find_booking(&state, booking.id).await?;
    assert_eq!(stored.status, BookingStatus::Cancelled);
    assert_eq!(stored.payment_status, PaymentStatus::Refunded);

    let earning = Earnings::find()
        .filter(EarningCol::BookingId.eq(booking.id))
        .one(&state.orm)
        .await?
        .expect("earning");
    assert_eq!(earning.status, EarningStatus::Held);

    let err = payment_service::charge_booking(&state, charge(booking.id, 99))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn concurrent_charges_capture_once() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;
    let booking = booking_service::create_booking(&state, booking_request(client_id, consultant_id, true))
        .await?
        .data;

    let (first, second) = tokio::join!(
        charge_with(&state, booking.id),
        charge_with(&state, booking.id),
    );
    assert_eq!(
        [first, second].iter().filter(|ok| **ok).count(),
        1,
        "exactly one charge should succeed"
    );

    let earnings = Earnings::find()
        .filter(EarningCol::BookingId.eq(booking.id))
        .all(&state.orm)
        .await?;
    assert_eq!(earnings.len(), 1);

    Ok(())
}

#[tokio::test]
async fn review_session_must_belong_to_the_booking() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;
    let (booking_a, session_a) = completed_booking(&state, client_id, consultant_id).await?;
    let (booking_b, session_b) = completed_booking(&state, client_id, consultant_id).await?;

    let review = |booking_id, session_id| CreateReviewRequest {
        booking_id,
        client_id,
        rating: 4,
        review: None,
        session_id,
        is_public: None,
    };

    let err = review_service::create_review(&state, review(booking_a, Some(session_b)))
        .await
        .unwrap_err();
    assert_eq!(bad_request_message(err), SESSION_MISMATCH);

    let err = review_service::create_review(&state, review(booking_b, Some(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let created = review_service::create_review(&state, review(booking_a, Some(session_a)))
        .await?
        .data;
    assert_eq!(created.session_id, Some(session_a));

    Ok(())
}

/// Books, pays, runs and ends a session; returns `(booking_id, session_id)`.
async fn completed_booking(
    state: &AppState,
    client_id: Uuid,
    consultant_id: Uuid,
) -> anyhow::Result<(Uuid, Uuid)> {
    let booking = booking_service::create_booking(state, booking_request(client_id, consultant_id, false))
        .await?
        .data;
    payment_service::charge_booking(state, charge(booking.id, booking.price)).await?;
    let session = session_service::create_session(
        state,
        CreateSessionRequest {
            booking_id: booking.id,
            client_id,
            consultant_id,
        },
    )
    .await?
    .data;
    session_service::end_session(state, &session.session_code, EndSessionRequest { user_id: client_id })
        .await?;
    Ok((booking.id, session.id))
}

async fn charge_with(state: &AppState, booking_id: Uuid) -> bool {
    payment_service::charge_booking(state, charge(booking_id, 99))
        .await
        .is_ok()
}

fn clone_review(review: &CreateReviewRequest) -> CreateReviewRequest {
    CreateReviewRequest {
        booking_id: review.booking_id,
        client_id: review.client_id,
        rating: review.rating,
        review: review.review.clone(),
        session_id: review.session_id,
        is_public: review.is_public,
    }
}
