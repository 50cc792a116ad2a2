use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "consultant")]
    Consultant,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[sea_orm(string_value = "career")]
    Career,
    #[sea_orm(string_value = "education")]
    Education,
    #[sea_orm(string_value = "finance")]
    Finance,
    #[sea_orm(string_value = "business")]
    Business,
    #[sea_orm(string_value = "wellness")]
    Wellness,
    #[sea_orm(string_value = "technology")]
    Technology,
    #[sea_orm(string_value = "legal")]
    Legal,
    #[sea_orm(string_value = "marketing")]
    Marketing,
    #[sea_orm(string_value = "other")]
    Other,
}

impl Category {
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Career => "career",
            Category::Education => "education",
            Category::Finance => "finance",
            Category::Business => "business",
            Category::Wellness => "wellness",
            Category::Technology => "technology",
            Category::Legal => "legal",
            Category::Marketing => "marketing",
            Category::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Career => "Career",
            Category::Education => "Education",
            Category::Finance => "Finance",
            Category::Business => "Business",
            Category::Wellness => "Wellness",
            Category::Technology => "Technology",
            Category::Legal => "Legal",
            Category::Marketing => "Marketing",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Career => "💼",
            Category::Education => "📚",
            Category::Finance => "💰",
            Category::Business => "🏢",
            Category::Wellness => "🧘",
            Category::Technology => "💻",
            Category::Legal => "⚖️",
            Category::Marketing => "📱",
            Category::Other => "📋",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Category::iter().find(|c| c.slug().eq_ignore_ascii_case(slug))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    #[sea_orm(string_value = "instant")]
    Instant,
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarningStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "held")]
    Held,
    #[sea_orm(string_value = "paid")]
    Paid,
}
