//! Capabilities backed by external providers: charging money and hosting the
//! live consultation.

mod payment;
mod session;

pub use payment::{
    ChargeOutcome, ChargeRequest, PaymentGateway, PaymentMethod, SimulatedPaymentGateway,
};
pub use session::{HostedSessionProvider, SessionProvider};
