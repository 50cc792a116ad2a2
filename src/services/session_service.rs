use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit, codes,
    dto::sessions::{CreateSessionRequest, EndSessionRequest, JoinSessionRequest, SessionJoin},
    entity::{
        bookings::{ActiveModel as BookingActive, Entity as Bookings},
        earnings::{Column as EarningCol, Entity as Earnings},
        enums::{BookingStatus, SessionStatus},
        sessions::{ActiveModel as SessionActive, Column as SessionCol, Entity as Sessions, Model as SessionModel},
    },
    error::{AppError, AppResult, is_unique_violation},
    lifecycle::{BookingEvent, BookingState, transition},
    models::Session,
    response::{ApiResponse, ListResponse},
    routes::params::{ParticipantRole, SessionListQuery},
    services::booking_service::find_booking,
    state::AppState,
};

const SESSION_EXISTS: &str = "Session already exists for this booking";

pub async fn create_session(
    state: &AppState,
    payload: CreateSessionRequest,
) -> AppResult<ApiResponse<Session>> {
    let txn = state.orm.begin().await?;

    let booking = Bookings::find_by_id(payload.booking_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::bad_request("Booking is not confirmed"));
    }
    if booking.client_id != payload.client_id || booking.consultant_id != payload.consultant_id {
        return Err(AppError::forbidden(
            "Session participants do not match the booking",
        ));
    }

    let existing = Sessions::find()
        .filter(SessionCol::BookingId.eq(booking.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::bad_request(SESSION_EXISTS));
    }

    let session_code = codes::session_code();
    let join_url = state.sessions.issue_join_url(&session_code).await?;
    let now = Utc::now();

    let session = SessionActive {
        id: Set(Uuid::new_v4()),
        session_code: Set(session_code),
        booking_id: Set(booking.id),
        client_id: Set(booking.client_id),
        consultant_id: Set(booking.consultant_id),
        status: Set(SessionStatus::Active),
        join_url: Set(Some(join_url)),
        started_at: Set(Some(now.into())),
        ended_at: Set(None),
        duration_minutes: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::bad_request(SESSION_EXISTS)
        } else {
            err.into()
        }
    })?;

    Earnings::update_many()
        .col_expr(EarningCol::SessionId, Expr::value(Some(session.id)))
        .col_expr(EarningCol::UpdatedAt, Expr::value(now))
        .filter(EarningCol::BookingId.eq(booking.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        session_id = %session.id,
        session_code = %session.session_code,
        booking_id = %booking.id,
        "session started"
    );
    audit::record(
        &state.pool,
        Some(booking.consultant_id),
        "session_create",
        "sessions",
        serde_json::json!({ "session_id": session.id, "booking_id": booking.id }),
    )
    .await;

    Ok(ApiResponse::success("Session created", session.into()))
}

pub async fn list_sessions(
    state: &AppState,
    query: SessionListQuery,
) -> AppResult<ListResponse<Session>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(user_id) = query.user_id {
        condition = condition.add(match query.role {
            Some(ParticipantRole::Client) => Condition::all().add(SessionCol::ClientId.eq(user_id)),
            Some(ParticipantRole::Consultant) => {
                Condition::all().add(SessionCol::ConsultantId.eq(user_id))
            }
            None => Condition::any()
                .add(SessionCol::ClientId.eq(user_id))
                .add(SessionCol::ConsultantId.eq(user_id)),
        });
    }
    if let Some(status) = query.status {
        condition = condition.add(SessionCol::Status.eq(status));
    }

    let finder = Sessions::find()
        .filter(condition)
        .order_by_desc(SessionCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Session::from)
        .collect();

    Ok(ListResponse::new(items, page, limit, total))
}

pub async fn join_session(
    state: &AppState,
    payload: JoinSessionRequest,
) -> AppResult<ApiResponse<SessionJoin>> {
    let session = find_by_code(state, payload.session_code.trim()).await?;

    if !is_participant_as(&session, payload.user_id, payload.role) {
        return Err(AppError::forbidden("You are not a participant of this session"));
    }
    if session.status == SessionStatus::Completed {
        return Err(AppError::bad_request("Session has already ended"));
    }

    let session = if session.status == SessionStatus::Scheduled {
        let mut active: SessionActive = session.into();
        active.status = Set(SessionStatus::Active);
        active.started_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        let session = active.update(&state.orm).await?;
        tracing::info!(session_code = %session.session_code, "session activated on join");
        session
    } else {
        session
    };

    let booking = find_booking(state, session.booking_id).await?;

    Ok(ApiResponse::success(
        "Joined session",
        SessionJoin {
            session_code: session.session_code,
            join_url: session.join_url,
            status: session.status,
            client_id: session.client_id,
            consultant_id: session.consultant_id,
            booking: booking.into(),
        },
    ))
}

/// Closes an active session and completes its booking in one transaction.
pub async fn end_session(
    state: &AppState,
    session_code: &str,
    payload: EndSessionRequest,
) -> AppResult<ApiResponse<Session>> {
    let txn = state.orm.begin().await?;

    let session = Sessions::find()
        .filter(SessionCol::SessionCode.eq(session_code.trim()))
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Session"))?;

    if session.client_id != payload.user_id && session.consultant_id != payload.user_id {
        return Err(AppError::forbidden("You are not a participant of this session"));
    }
    if session.status != SessionStatus::Active {
        return Err(AppError::bad_request("Session is not active"));
    }

    let booking = Bookings::find_by_id(session.booking_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))?;
    let next = transition(
        BookingState::new(booking.status, booking.payment_status),
        BookingEvent::SessionEnded,
    )?;

    let now = Utc::now();
    let mut booking: BookingActive = booking.into();
    booking.status = Set(next.status);
    booking.payment_status = Set(next.payment);
    booking.updated_at = Set(now.into());
    booking.update(&txn).await?;

    let duration = elapsed_minutes(session.started_at.map(|s| s.with_timezone(&Utc)), now);
    let mut active: SessionActive = session.into();
    active.status = Set(SessionStatus::Completed);
    active.ended_at = Set(Some(now.into()));
    active.duration_minutes = Set(duration);
    active.updated_at = Set(now.into());
    let session = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        session_code = %session.session_code,
        booking_id = %session.booking_id,
        duration_minutes = ?session.duration_minutes,
        "session ended"
    );
    audit::record(
        &state.pool,
        Some(payload.user_id),
        "session_end",
        "sessions",
        serde_json::json!({ "session_id": session.id, "booking_id": session.booking_id }),
    )
    .await;

    Ok(ApiResponse::success("Session ended", session.into()))
}

async fn find_by_code(state: &AppState, session_code: &str) -> AppResult<SessionModel> {
    Sessions::find()
        .filter(SessionCol::SessionCode.eq(session_code))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Session"))
}

fn is_participant_as(session: &SessionModel, user_id: Uuid, role: ParticipantRole) -> bool {
    match role {
        ParticipantRole::Client => session.client_id == user_id,
        ParticipantRole::Consultant => session.consultant_id == user_id,
    }
}

fn elapsed_minutes(started_at: Option<DateTime<Utc>>, ended_at: DateTime<Utc>) -> Option<i32> {
    started_at.map(|start| (ended_at - start).num_minutes().clamp(0, i32::MAX as i64) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(client_id: Uuid, consultant_id: Uuid) -> SessionModel {
        let now = Utc::now().into();
        SessionModel {
            id: Uuid::new_v4(),
            session_code: "SSTEST000001".into(),
            booking_id: Uuid::new_v4(),
            client_id,
            consultant_id,
            status: SessionStatus::Active,
            join_url: None,
            started_at: Some(now),
            ended_at: None,
            duration_minutes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn role_must_match_the_recorded_participant() {
        let (client, consultant) = (Uuid::new_v4(), Uuid::new_v4());
        let s = session(client, consultant);
        assert!(is_participant_as(&s, client, ParticipantRole::Client));
        assert!(is_participant_as(&s, consultant, ParticipantRole::Consultant));
        assert!(!is_participant_as(&s, client, ParticipantRole::Consultant));
        assert!(!is_participant_as(&s, Uuid::new_v4(), ParticipantRole::Client));
    }

    #[test]
    fn duration_counts_whole_minutes() {
        let end = Utc::now();
        assert_eq!(elapsed_minutes(Some(end - Duration::seconds(45 * 60 + 30)), end), Some(45));
        assert_eq!(elapsed_minutes(None, end), None);
        assert_eq!(elapsed_minutes(Some(end + Duration::minutes(5)), end), Some(0));
    }
}
