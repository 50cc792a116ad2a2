use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{codes, config::PaymentConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Upi,
    Netbanking,
}

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub booking_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub method: PaymentMethod,
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Approved { transaction_id: String },
    Declined { reason: String },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process_payment(&self, request: &ChargeRequest) -> anyhow::Result<ChargeOutcome>;

    /// Whether the gateway has settled the given transaction.
    async fn verify_payment(&self, transaction_id: &str) -> anyhow::Result<bool>;

    async fn process_refund(&self, transaction_id: &str, amount: i64) -> anyhow::Result<ChargeOutcome>;
}

/// Stand-in gateway: approves a configurable share of charges after an
/// artificial delay. Refunds always succeed.
#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    approval_rate: f64,
    verify_rate: f64,
    charge_delay: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            approval_rate: config.approval_rate.clamp(0.0, 1.0),
            verify_rate: config.verify_rate.clamp(0.0, 1.0),
            charge_delay: config.charge_delay,
        }
    }

    /// Deterministic gateway with no delay, for tests and local runs.
    pub fn with_outcome(approve: bool) -> Self {
        let rate = if approve { 1.0 } else { 0.0 };
        Self {
            approval_rate: rate,
            verify_rate: rate,
            charge_delay: Duration::ZERO,
        }
    }

    // verify and refund calls take a fraction of the charge latency
    fn verify_delay(&self) -> Duration {
        self.charge_delay / 2
    }

    fn refund_delay(&self) -> Duration {
        self.charge_delay * 3 / 4
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn process_payment(&self, request: &ChargeRequest) -> anyhow::Result<ChargeOutcome> {
        tokio::time::sleep(self.charge_delay).await;

        let outcome = if rand::random_bool(self.approval_rate) {
            ChargeOutcome::Approved {
                transaction_id: codes::transaction_id(),
            }
        } else {
            ChargeOutcome::Declined {
                reason: "Payment failed. Please try again.".to_string(),
            }
        };
        tracing::debug!(
            booking_id = %request.booking_id,
            amount = request.amount,
            method = ?request.method,
            approved = matches!(outcome, ChargeOutcome::Approved { .. }),
            "simulated charge"
        );
        Ok(outcome)
    }

    async fn verify_payment(&self, transaction_id: &str) -> anyhow::Result<bool> {
        tokio::time::sleep(self.verify_delay()).await;
        let verified = rand::random_bool(self.verify_rate);
        tracing::debug!(transaction_id, verified, "simulated verification");
        Ok(verified)
    }

    async fn process_refund(&self, transaction_id: &str, amount: i64) -> anyhow::Result<ChargeOutcome> {
        tokio::time::sleep(self.refund_delay()).await;
        tracing::debug!(transaction_id, amount, "simulated refund");
        Ok(ChargeOutcome::Approved {
            transaction_id: codes::refund_id(),
        })
    }
}
