use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::enums::{Category, UserRole},
    models::ConsultantProfile,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertProfileRequest {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub experience: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub category: Category,
    pub subcategory: Option<String>,
    pub first_session_price: i64,
    pub regular_session_price: i64,
    #[schema(value_type = Option<Object>)]
    pub availability: Option<serde_json::Value>,
    pub is_online: Option<bool>,
}

/// Approved consultant as shown in discovery listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConsultantSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub consultant_profile: ConsultantProfile,
    pub average_rating: f64,
    pub total_reviews: i64,
}
