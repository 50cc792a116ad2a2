use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ConsultantProfile, User};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_consultants: i64,
    pub total_clients: i64,
    pub total_revenue: i64,
    pub total_sessions: i64,
    pub active_sessions: i64,
    pub pending_approvals: i64,
    pub average_rating: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConsultantApplication {
    pub user: User,
    pub profile: ConsultantProfile,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveConsultantRequest {
    pub admin_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectConsultantRequest {
    pub admin_id: Uuid,
    pub reason: String,
}
