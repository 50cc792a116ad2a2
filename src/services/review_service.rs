use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::reviews::CreateReviewRequest,
    entity::{
        enums::BookingStatus,
        reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews},
        sessions::{Column as SessionCol, Entity as Sessions},
    },
    error::{AppError, AppResult, is_unique_violation},
    models::Review,
    response::{ApiResponse, ListResponse},
    routes::params::ReviewListQuery,
    services::booking_service::find_booking,
    state::AppState,
};

pub const DUPLICATE_REVIEW: &str = "Review already exists for this booking";
pub const SESSION_MISMATCH: &str = "Session does not belong to this booking";

pub fn validate_rating(rating: i32) -> AppResult<()> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::bad_request("Rating must be between 1 and 5"))
    }
}

pub async fn create_review(
    state: &AppState,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    validate_rating(payload.rating)?;

    let booking = find_booking(state, payload.booking_id).await?;
    if booking.client_id != payload.client_id {
        return Err(AppError::forbidden("Only the booking's client can review it"));
    }
    if booking.status != BookingStatus::Completed {
        return Err(AppError::bad_request("Can only review completed bookings"));
    }

    let existing = Reviews::find()
        .filter(ReviewCol::BookingId.eq(booking.id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::bad_request(DUPLICATE_REVIEW));
    }

    let session_id = match payload.session_id {
        Some(id) => {
            let session = Sessions::find_by_id(id)
                .one(&state.orm)
                .await?
                .ok_or_else(|| AppError::not_found("Session"))?;
            if session.booking_id != booking.id {
                return Err(AppError::bad_request(SESSION_MISMATCH));
            }
            Some(session.id)
        }
        None => Sessions::find()
            .filter(SessionCol::BookingId.eq(booking.id))
            .one(&state.orm)
            .await?
            .map(|s| s.id),
    };

    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking.id),
        session_id: Set(session_id),
        client_id: Set(booking.client_id),
        consultant_id: Set(booking.consultant_id),
        rating: Set(payload.rating),
        review: Set(payload.review.map(|r| r.trim().to_string()).filter(|r| !r.is_empty())),
        is_public: Set(payload.is_public.unwrap_or(true)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::bad_request(DUPLICATE_REVIEW)
        } else {
            err.into()
        }
    })?;

    audit::record(
        &state.pool,
        Some(review.client_id),
        "review_create",
        "reviews",
        serde_json::json!({
            "review_id": review.id,
            "booking_id": review.booking_id,
            "rating": review.rating,
        }),
    )
    .await;

    Ok(ApiResponse::success("Review submitted", review.into()))
}

pub async fn list_reviews(state: &AppState, query: ReviewListQuery) -> AppResult<ListResponse<Review>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(ReviewCol::IsPublic.eq(true));
    if let Some(consultant_id) = query.consultant_id {
        condition = condition.add(ReviewCol::ConsultantId.eq(consultant_id));
    }
    if let Some(client_id) = query.client_id {
        condition = condition.add(ReviewCol::ClientId.eq(client_id));
    }
    if let Some(booking_id) = query.booking_id {
        condition = condition.add(ReviewCol::BookingId.eq(booking_id));
    }

    let finder = Reviews::find()
        .filter(condition)
        .order_by_desc(ReviewCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    Ok(ListResponse::new(items, page, limit, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        for rating in [0, 6, -1] {
            let err = validate_rating(rating).unwrap_err();
            assert_eq!(err.to_string(), "Rating must be between 1 and 5");
        }
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
    }
}
