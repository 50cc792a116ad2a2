use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit, codes,
    dto::bookings::{CreateBookingRequest, DEFAULT_DURATION_MINUTES},
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings, Model as BookingModel},
        consultant_profiles::{Column as ProfileCol, Entity as ConsultantProfiles},
        enums::BookingType,
    },
    error::{AppError, AppResult, is_unique_violation},
    lifecycle::BookingState,
    models::Booking,
    response::{ApiResponse, ListResponse},
    routes::params::{BookingListQuery, ParticipantRole},
    services::user_service::find_user,
    state::AppState,
};

const BOOKING_NUMBER_ATTEMPTS: usize = 3;

pub async fn create_booking(
    state: &AppState,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    if payload.client_id == payload.consultant_id {
        return Err(AppError::bad_request("Cannot book a session with yourself"));
    }
    let duration = payload.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    if duration <= 0 {
        return Err(AppError::bad_request("Duration must be a positive number of minutes"));
    }

    let client = find_user(state, payload.client_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => AppError::not_found("Client"),
            other => other,
        })?;

    let profile = ConsultantProfiles::find()
        .filter(ProfileCol::UserId.eq(payload.consultant_id))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Consultant"))?;
    if !profile.is_approved {
        return Err(AppError::bad_request("Consultant is not approved"));
    }

    let booking_type = payload.booking_type.unwrap_or(BookingType::Scheduled);
    let scheduled_for = match booking_type {
        BookingType::Instant => Some(Utc::now()),
        BookingType::Scheduled => payload.scheduled_for,
    };
    let price = profile.price_for(payload.is_first_session);
    let initial = BookingState::created();

    let mut attempt = 0;
    let booking = loop {
        attempt += 1;
        let result = BookingActive {
            id: Set(Uuid::new_v4()),
            booking_number: Set(codes::booking_number()),
            client_id: Set(client.id),
            consultant_id: Set(profile.user_id),
            booking_type: Set(booking_type),
            status: Set(initial.status),
            payment_status: Set(initial.payment),
            scheduled_for: Set(scheduled_for.map(Into::into)),
            duration_minutes: Set(duration),
            price: Set(price),
            is_first_session: Set(payload.is_first_session),
            session_notes: Set(payload.session_notes.clone()),
            transaction_id: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&state.orm)
        .await;

        match result {
            Ok(booking) => break booking,
            Err(err) if is_unique_violation(&err) && attempt < BOOKING_NUMBER_ATTEMPTS => {
                tracing::warn!(attempt, "booking number collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    };

    tracing::info!(
        booking_id = %booking.id,
        booking_number = %booking.booking_number,
        price = booking.price,
        "booking created"
    );
    audit::record(
        &state.pool,
        Some(client.id),
        "booking_create",
        "bookings",
        serde_json::json!({
            "booking_id": booking.id,
            "consultant_id": booking.consultant_id,
            "price": booking.price,
        }),
    )
    .await;

    Ok(ApiResponse::success("Booking created", booking.into()))
}

pub async fn list_bookings(
    state: &AppState,
    query: BookingListQuery,
) -> AppResult<ListResponse<Booking>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(user_id) = query.user_id {
        condition = condition.add(match query.role {
            Some(ParticipantRole::Client) => Condition::all().add(BookingCol::ClientId.eq(user_id)),
            Some(ParticipantRole::Consultant) => {
                Condition::all().add(BookingCol::ConsultantId.eq(user_id))
            }
            None => Condition::any()
                .add(BookingCol::ClientId.eq(user_id))
                .add(BookingCol::ConsultantId.eq(user_id)),
        });
    }
    if let Some(status) = query.status {
        condition = condition.add(BookingCol::Status.eq(status));
    }

    let finder = Bookings::find()
        .filter(condition)
        .order_by_desc(BookingCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Booking::from)
        .collect();

    Ok(ListResponse::new(items, page, limit, total))
}

pub async fn find_booking(state: &AppState, id: Uuid) -> AppResult<BookingModel> {
    Bookings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))
}
