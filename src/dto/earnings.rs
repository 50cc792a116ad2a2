use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Consultant share per earning status, in rupees.
#[derive(Debug, Default, Serialize, ToSchema, PartialEq, Eq)]
pub struct EarningSummary {
    pub consultant_id: Uuid,
    pub pending: i64,
    pub held: i64,
    pub paid: i64,
    pub total_commission: i64,
}
