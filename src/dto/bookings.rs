use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::enums::BookingType;

pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub booking_type: Option<BookingType>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub session_notes: Option<String>,
    #[serde(default)]
    pub is_first_session: bool,
}
