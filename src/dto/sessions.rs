use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::enums::SessionStatus,
    models::Booking,
    routes::params::ParticipantRole,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub booking_id: Uuid,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinSessionRequest {
    pub session_code: String,
    pub user_id: Uuid,
    pub role: ParticipantRole,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EndSessionRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionJoin {
    pub session_code: String,
    pub join_url: Option<String>,
    pub status: SessionStatus,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub booking: Booking,
}
