use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::consultants::{ConsultantSummary, UpsertProfileRequest},
    entity::{
        consultant_profiles::{
            self, ActiveModel as ProfileActive, Column as ProfileCol, Entity as ConsultantProfiles,
            Model as ProfileModel,
        },
        enums::UserRole,
        users::{Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult, is_unique_violation},
    models::ConsultantProfile,
    response::{ApiResponse, ListResponse},
    routes::params::ConsultantSearchQuery,
    services::user_service::find_user,
    state::AppState,
};

pub const DUPLICATE_PROFILE: &str = "Consultant profile already exists for this user";

/// Public review aggregate for one consultant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub count: i64,
}

pub async fn list_consultants(
    state: &AppState,
    query: ConsultantSearchQuery,
) -> AppResult<ListResponse<ConsultantSummary>> {
    let (page, limit, offset) = query.pagination().normalize();
    let category = query.category_filter().map_err(AppError::BadRequest)?;

    let mut condition = Condition::all()
        .add(ProfileCol::IsApproved.eq(true))
        .add(UserCol::Role.eq(UserRole::Consultant));

    if let Some(category) = category {
        condition = condition.add(ProfileCol::Category.eq(category));
    }
    if query.online == Some(true) {
        condition = condition.add(ProfileCol::IsOnline.eq(true));
    }
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Users, UserCol::Name)).ilike(pattern.clone()))
                .add(Expr::col((ConsultantProfiles, ProfileCol::Bio)).ilike(pattern.clone()))
                .add(
                    Expr::expr(
                        Expr::col((ConsultantProfiles, ProfileCol::Skills))
                            .cast_as(Alias::new("TEXT")),
                    )
                    .ilike(pattern),
                ),
        );
    }

    let finder = ConsultantProfiles::find()
        .join(JoinType::InnerJoin, consultant_profiles::Relation::User.def())
        .filter(condition)
        .order_by_desc(ProfileCol::IsOnline)
        .order_by_desc(ProfileCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let profiles = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let user_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
    let users = users_by_id(state, &user_ids).await?;
    let ratings = rating_stats(&state.pool, &user_ids).await?;

    let items = profiles
        .into_iter()
        .filter_map(|profile| {
            let user = users.get(&profile.user_id)?.clone();
            let stats = ratings.get(&profile.user_id).copied().unwrap_or_default();
            Some(summary_from(user, profile, stats))
        })
        .collect();

    Ok(ListResponse::new(items, page, limit, total))
}

pub async fn upsert_profile(
    state: &AppState,
    payload: UpsertProfileRequest,
) -> AppResult<ApiResponse<ConsultantProfile>> {
    let user = find_user(state, payload.user_id).await?;
    if user.role != UserRole::Consultant {
        return Err(AppError::bad_request("User is not a consultant"));
    }
    if payload.first_session_price < 0 || payload.regular_session_price < 0 {
        return Err(AppError::bad_request("Session prices cannot be negative"));
    }

    let qualifications = serde_json::json!(payload.qualifications);
    let skills = serde_json::json!(payload.skills);

    let existing = ConsultantProfiles::find()
        .filter(ProfileCol::UserId.eq(user.id))
        .one(&state.orm)
        .await?;

    let (profile, message) = match existing {
        Some(existing) => {
            let mut active: ProfileActive = existing.into();
            active.bio = Set(payload.bio);
            active.experience = Set(payload.experience);
            active.qualifications = Set(qualifications);
            active.skills = Set(skills);
            active.category = Set(payload.category);
            active.subcategory = Set(payload.subcategory);
            active.first_session_price = Set(payload.first_session_price);
            active.regular_session_price = Set(payload.regular_session_price);
            if payload.availability.is_some() {
                active.availability = Set(payload.availability);
            }
            if let Some(online) = payload.is_online {
                active.is_online = Set(online);
            }
            active.profile_completed = Set(true);
            active.updated_at = Set(Utc::now().into());
            (active.update(&state.orm).await?, "Profile updated")
        }
        None => {
            let profile = ProfileActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.id),
                bio: Set(payload.bio),
                experience: Set(payload.experience),
                qualifications: Set(qualifications),
                skills: Set(skills),
                category: Set(payload.category),
                subcategory: Set(payload.subcategory),
                first_session_price: Set(payload.first_session_price),
                regular_session_price: Set(payload.regular_session_price),
                availability: Set(payload.availability),
                is_approved: Set(false),
                approval_date: Set(None),
                is_online: Set(payload.is_online.unwrap_or(false)),
                profile_completed: Set(true),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&state.orm)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AppError::bad_request(DUPLICATE_PROFILE)
                } else {
                    err.into()
                }
            })?;
            (profile, "Profile created")
        }
    };

    audit::record(
        &state.pool,
        Some(user.id),
        "consultant_profile_upsert",
        "consultant_profiles",
        serde_json::json!({ "profile_id": profile.id, "category": profile.category }),
    )
    .await;

    Ok(ApiResponse::success(message, profile.into()))
}

/// `%term%` with the ILIKE wildcards in `term` matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) async fn users_by_id(
    state: &AppState,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, UserModel>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users = Users::find()
        .filter(UserCol::Id.is_in(ids.iter().copied()))
        .all(&state.orm)
        .await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

async fn rating_stats(pool: &DbPool, consultant_ids: &[Uuid]) -> AppResult<HashMap<Uuid, RatingStats>> {
    if consultant_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, Option<f64>, i64)> = sqlx::query_as(
        r#"
        SELECT consultant_id, AVG(rating)::float8, COUNT(*)
        FROM reviews
        WHERE is_public AND consultant_id = ANY($1)
        GROUP BY consultant_id
        "#,
    )
    .bind(consultant_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, average, count)| {
            let stats = RatingStats {
                average: round_rating(average.unwrap_or(0.0)),
                count,
            };
            (id, stats)
        })
        .collect())
}

fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn summary_from(user: UserModel, profile: ProfileModel, stats: RatingStats) -> ConsultantSummary {
    ConsultantSummary {
        id: user.id,
        name: user.name,
        email: user.email,
        avatar: user.avatar,
        phone: user.phone,
        role: user.role,
        consultant_profile: profile.into(),
        average_rating: stats.average,
        total_reviews: stats.count,
    }
}
