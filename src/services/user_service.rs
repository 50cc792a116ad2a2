use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{CreateUserRequest, UpdateUserRequest, UserDetail},
    entity::{
        consultant_profiles::{Column as ProfileCol, Entity as ConsultantProfiles},
        enums::UserRole,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult, is_unique_violation},
    models::User,
    response::ApiResponse,
    routes::params::UserLookupQuery,
    state::AppState,
};

const DUPLICATE_EMAIL: &str = "User with this email already exists";

pub async fn get_user(state: &AppState, query: UserLookupQuery) -> AppResult<ApiResponse<UserDetail>> {
    let email = query
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty());

    let user = match (query.id, email) {
        (Some(id), _) => Users::find_by_id(id).one(&state.orm).await?,
        (None, Some(email)) => {
            Users::find()
                .filter(UserCol::Email.eq(email))
                .one(&state.orm)
                .await?
        }
        (None, None) => return Err(AppError::bad_request("User ID or email is required")),
    };
    let user = user.ok_or_else(|| AppError::not_found("User"))?;

    let profile = ConsultantProfiles::find()
        .filter(ProfileCol::UserId.eq(user.id))
        .one(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "User",
        UserDetail {
            user: user.into(),
            consultant_profile: profile.map(Into::into),
        },
    ))
}

pub async fn create_user(state: &AppState, payload: CreateUserRequest) -> AppResult<ApiResponse<User>> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request("Email and password are required"));
    }

    let existing = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::bad_request(DUPLICATE_EMAIL));
    }

    let password_hash = hash_password(&payload.password)?;
    let role = payload.role.unwrap_or(UserRole::Client);

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        name: Set(non_empty(payload.name)),
        phone: Set(non_empty(payload.phone)),
        avatar: Set(None),
        role: Set(role),
        email_verified_at: Set(None),
        phone_verified: Set(false),
        kyc_verified: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::bad_request(DUPLICATE_EMAIL)
        } else {
            err.into()
        }
    })?;

    tracing::info!(user_id = %user.id, role = ?user.role, "user created");
    audit::record(
        &state.pool,
        Some(user.id),
        "user_create",
        "users",
        serde_json::json!({ "user_id": user.id, "role": user.role }),
    )
    .await;

    Ok(ApiResponse::success("User created", user.into()))
}

pub async fn update_user(state: &AppState, payload: UpdateUserRequest) -> AppResult<ApiResponse<User>> {
    let existing = find_user(state, payload.user_id).await?;

    let mut active: UserActive = existing.into();
    if let Some(name) = non_empty(payload.name) {
        active.name = Set(Some(name));
    }
    if let Some(phone) = non_empty(payload.phone) {
        active.phone = Set(Some(phone));
    }
    if let Some(avatar) = non_empty(payload.avatar) {
        active.avatar = Set(Some(avatar));
    }
    if let Some(role) = payload.role {
        active.role = Set(role);
    }
    active.updated_at = Set(Utc::now().into());
    let user = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("User updated", user.into()))
}

pub(crate) async fn find_user(state: &AppState, id: Uuid) -> AppResult<UserModel> {
    Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn emails_are_compared_case_insensitively() {
        assert_eq!(normalize_email("  Priya@Example.COM "), "priya@example.com");
    }

    #[test]
    fn blank_strings_mean_no_change() {
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(Some(" Asha ".into())), Some("Asha".into()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"hunter22", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }
}
