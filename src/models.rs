use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    bookings, consultant_profiles, earnings,
    enums::{
        BookingStatus, BookingType, Category, EarningStatus, PaymentStatus, SessionStatus,
        UserRole,
    },
    reviews, sessions, users,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub phone_verified: bool,
    pub kyc_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            phone: model.phone,
            avatar: model.avatar,
            role: model.role,
            email_verified_at: model.email_verified_at.map(|dt| dt.with_timezone(&Utc)),
            phone_verified: model.phone_verified,
            kyc_verified: model.kyc_verified,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsultantProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub experience: Option<String>,
    #[schema(value_type = Object)]
    pub qualifications: serde_json::Value,
    #[schema(value_type = Object)]
    pub skills: serde_json::Value,
    pub category: Category,
    pub subcategory: Option<String>,
    pub first_session_price: i64,
    pub regular_session_price: i64,
    #[schema(value_type = Option<Object>)]
    pub availability: Option<serde_json::Value>,
    pub is_approved: bool,
    pub approval_date: Option<DateTime<Utc>>,
    pub is_online: bool,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<consultant_profiles::Model> for ConsultantProfile {
    fn from(model: consultant_profiles::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            bio: model.bio,
            experience: model.experience,
            qualifications: model.qualifications,
            skills: model.skills,
            category: model.category,
            subcategory: model.subcategory,
            first_session_price: model.first_session_price,
            regular_session_price: model.regular_session_price,
            availability: model.availability,
            is_approved: model.is_approved,
            approval_date: model.approval_date.map(|dt| dt.with_timezone(&Utc)),
            is_online: model.is_online,
            profile_completed: model.profile_completed,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub booking_number: String,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub price: i64,
    pub is_first_session: bool,
    pub session_notes: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<bookings::Model> for Booking {
    fn from(model: bookings::Model) -> Self {
        Self {
            id: model.id,
            booking_number: model.booking_number,
            client_id: model.client_id,
            consultant_id: model.consultant_id,
            booking_type: model.booking_type,
            status: model.status,
            payment_status: model.payment_status,
            scheduled_for: model.scheduled_for.map(|dt| dt.with_timezone(&Utc)),
            duration_minutes: model.duration_minutes,
            price: model.price,
            is_first_session: model.is_first_session,
            session_notes: model.session_notes,
            transaction_id: model.transaction_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub id: Uuid,
    pub session_code: String,
    pub booking_id: Uuid,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub status: SessionStatus,
    pub join_url: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            id: model.id,
            session_code: model.session_code,
            booking_id: model.booking_id,
            client_id: model.client_id,
            consultant_id: model.consultant_id,
            status: model.status,
            join_url: model.join_url,
            started_at: model.started_at.map(|dt| dt.with_timezone(&Utc)),
            ended_at: model.ended_at.map(|dt| dt.with_timezone(&Utc)),
            duration_minutes: model.duration_minutes,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub session_id: Option<Uuid>,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub rating: i32,
    pub review: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            booking_id: model.booking_id,
            session_id: model.session_id,
            client_id: model.client_id,
            consultant_id: model.consultant_id,
            rating: model.rating,
            review: model.review,
            is_public: model.is_public,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Earning {
    pub id: Uuid,
    pub consultant_id: Uuid,
    pub booking_id: Uuid,
    pub session_id: Option<Uuid>,
    pub amount: i64,
    pub commission: i64,
    pub total_amount: i64,
    pub status: EarningStatus,
    pub created_at: DateTime<Utc>,
}

impl From<earnings::Model> for Earning {
    fn from(model: earnings::Model) -> Self {
        Self {
            id: model.id,
            consultant_id: model.consultant_id,
            booking_id: model.booking_id,
            session_id: model.session_id,
            amount: model.amount,
            commission: model.commission,
            total_amount: model.total_amount,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
