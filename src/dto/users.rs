use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::enums::UserRole,
    models::{ConsultantProfile, User},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetail {
    pub user: User,
    pub consultant_profile: Option<ConsultantProfile>,
}
