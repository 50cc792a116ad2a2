use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub booking_id: Uuid,
    pub client_id: Uuid,
    pub rating: i32,
    pub review: Option<String>,
    pub session_id: Option<Uuid>,
    pub is_public: Option<bool>,
}
