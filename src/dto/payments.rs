use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{entity::enums::PaymentStatus, gateway::PaymentMethod, models::Booking};

pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChargeBookingRequest {
    pub booking_id: Uuid,
    pub amount: i64,
    pub currency: Option<String>,
    pub payment_method: PaymentMethod,
    #[schema(value_type = Object)]
    pub payment_details: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChargeResult {
    pub payment: PaymentReceipt,
    pub booking: Booking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Pending,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentVerification {
    pub transaction_id: String,
    pub status: VerificationStatus,
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDetails {
    pub booking_id: Uuid,
    pub booking_number: String,
    pub amount: i64,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PaymentLookup {
    Verification(PaymentVerification),
    Details(PaymentDetails),
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefundRequest {
    pub booking_id: Option<Uuid>,
    pub transaction_id: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefundReceipt {
    pub transaction_id: String,
    pub booking_id: Uuid,
    pub amount: i64,
    pub reason: String,
    pub processed_at: DateTime<Utc>,
}
