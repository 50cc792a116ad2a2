use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::admin::{
        ApproveConsultantRequest, ConsultantApplication, DashboardStats, RejectConsultantRequest,
    },
    entity::{
        bookings::{Column as BookingCol, Entity as Bookings},
        consultant_profiles::{
            ActiveModel as ProfileActive, Column as ProfileCol, Entity as ConsultantProfiles,
        },
        enums::UserRole,
        users::Model as UserModel,
    },
    error::{AppError, AppResult},
    models::{Booking, ConsultantProfile},
    response::{ApiResponse, ListResponse},
    routes::params::{AdminBookingQuery, AdminConsultantQuery, ApprovalFilter},
    services::{consultant_service::users_by_id, user_service::find_user},
    state::AppState,
};

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total_users: i64,
    total_consultants: i64,
    total_clients: i64,
    total_revenue: i64,
    total_sessions: i64,
    active_sessions: i64,
    pending_approvals: i64,
    average_rating: f64,
}

/// Resolves `admin_id` to a user with the admin role.
pub async fn ensure_admin(state: &AppState, admin_id: Uuid) -> AppResult<UserModel> {
    let user = find_user(state, admin_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => AppError::forbidden("Admin access required"),
            other => other,
        })?;
    if user.role != UserRole::Admin {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(user)
}

pub async fn dashboard_stats(state: &AppState, admin_id: Uuid) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(state, admin_id).await?;

    let row: StatsRow = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users) AS total_users,
            (SELECT COUNT(*) FROM users WHERE role = 'consultant') AS total_consultants,
            (SELECT COUNT(*) FROM users WHERE role = 'client') AS total_clients,
            (SELECT COALESCE(SUM(price), 0)::bigint FROM bookings
                WHERE payment_status = 'completed') AS total_revenue,
            (SELECT COUNT(*) FROM sessions) AS total_sessions,
            (SELECT COUNT(*) FROM sessions WHERE status = 'active') AS active_sessions,
            (SELECT COUNT(*) FROM consultant_profiles WHERE NOT is_approved) AS pending_approvals,
            (SELECT COALESCE(AVG(rating), 0)::float8 FROM reviews WHERE is_public) AS average_rating
        "#,
    )
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Dashboard stats",
        DashboardStats {
            total_users: row.total_users,
            total_consultants: row.total_consultants,
            total_clients: row.total_clients,
            total_revenue: row.total_revenue,
            total_sessions: row.total_sessions,
            active_sessions: row.active_sessions,
            pending_approvals: row.pending_approvals,
            average_rating: (row.average_rating * 10.0).round() / 10.0,
        },
    ))
}

pub async fn list_consultants(
    state: &AppState,
    query: AdminConsultantQuery,
) -> AppResult<ListResponse<ConsultantApplication>> {
    ensure_admin(state, query.admin_id).await?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    match query.approval {
        Some(ApprovalFilter::Pending) => condition = condition.add(ProfileCol::IsApproved.eq(false)),
        Some(ApprovalFilter::Approved) => condition = condition.add(ProfileCol::IsApproved.eq(true)),
        None => {}
    }

    let finder = ConsultantProfiles::find()
        .filter(condition)
        .order_by_desc(ProfileCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let profiles = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let user_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
    let mut users = users_by_id(state, &user_ids).await?;

    let items = profiles
        .into_iter()
        .filter_map(|profile| {
            let user = users.remove(&profile.user_id)?;
            Some(ConsultantApplication {
                user: user.into(),
                profile: profile.into(),
            })
        })
        .collect();

    Ok(ListResponse::new(items, page, limit, total))
}

pub async fn approve_consultant(
    state: &AppState,
    user_id: Uuid,
    payload: ApproveConsultantRequest,
) -> AppResult<ApiResponse<ConsultantProfile>> {
    let admin = ensure_admin(state, payload.admin_id).await?;

    let txn = state.orm.begin().await?;
    let profile = ConsultantProfiles::find()
        .filter(ProfileCol::UserId.eq(user_id))
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Consultant profile"))?;
    if profile.is_approved {
        return Err(AppError::bad_request("Consultant is already approved"));
    }

    let now = Utc::now();
    let mut active: ProfileActive = profile.into();
    active.is_approved = Set(true);
    active.approval_date = Set(Some(now.into()));
    active.updated_at = Set(now.into());
    let profile = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(admin_id = %admin.id, consultant_id = %user_id, "consultant approved");
    audit::record(
        &state.pool,
        Some(admin.id),
        "approve_consultant",
        "consultant_profiles",
        serde_json::json!({ "consultant_id": user_id, "profile_id": profile.id }),
    )
    .await;

    Ok(ApiResponse::success("Consultant approved", profile.into()))
}

/// Rejecting a pending application removes the profile; the user keeps
/// their account and may resubmit.
pub async fn reject_consultant(
    state: &AppState,
    user_id: Uuid,
    payload: RejectConsultantRequest,
) -> AppResult<ApiResponse<ConsultantProfile>> {
    let admin = ensure_admin(state, payload.admin_id).await?;
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::bad_request("Rejection reason is required"));
    }

    let txn = state.orm.begin().await?;
    let profile = ConsultantProfiles::find()
        .filter(ProfileCol::UserId.eq(user_id))
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Consultant profile"))?;
    if profile.is_approved {
        return Err(AppError::bad_request(
            "Only pending consultants can be rejected",
        ));
    }

    profile.clone().delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(admin_id = %admin.id, consultant_id = %user_id, %reason, "consultant rejected");
    audit::record(
        &state.pool,
        Some(admin.id),
        "reject_consultant",
        "consultant_profiles",
        serde_json::json!({
            "consultant_id": user_id,
            "profile_id": profile.id,
            "reason": reason,
        }),
    )
    .await;

    Ok(ApiResponse::success("Consultant rejected", profile.into()))
}

pub async fn list_bookings(
    state: &AppState,
    query: AdminBookingQuery,
) -> AppResult<ListResponse<Booking>> {
    ensure_admin(state, query.admin_id).await?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
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
