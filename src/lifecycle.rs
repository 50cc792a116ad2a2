//! Booking lifecycle.
//!
//! A booking carries two columns, `status` and `payment_status`, but they only
//! move together through [`transition`]. The payment axis is a sub-state of the
//! workflow axis: a booking is `Confirmed` or `Completed` only while its
//! payment is `Completed`.

use thiserror::Error;

use crate::entity::enums::{BookingStatus, PaymentStatus};

/// Platform share of every paid booking, in percent.
pub const COMMISSION_PERCENT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    PaymentSucceeded,
    PaymentFailed,
    SessionEnded,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingState {
    pub status: BookingStatus,
    pub payment: PaymentStatus,
}

impl BookingState {
    pub fn new(status: BookingStatus, payment: PaymentStatus) -> Self {
        Self { status, payment }
    }

    /// Freshly created booking, whatever its type.
    pub fn created() -> Self {
        Self::new(BookingStatus::Pending, PaymentStatus::Pending)
    }

    pub fn is_consistent(&self) -> bool {
        match self.status {
            BookingStatus::Confirmed | BookingStatus::Completed => {
                self.payment == PaymentStatus::Completed
            }
            BookingStatus::Pending => matches!(
                self.payment,
                PaymentStatus::Pending | PaymentStatus::Failed
            ),
            BookingStatus::Cancelled => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransitionError(pub &'static str);

pub fn transition(state: BookingState, event: BookingEvent) -> Result<BookingState, TransitionError> {
    use BookingEvent::*;
    use BookingStatus as S;
    use PaymentStatus as P;

    match (event, state.status, state.payment) {
        (PaymentSucceeded | PaymentFailed, _, P::Completed) => {
            Err(TransitionError("Payment already completed for this booking"))
        }
        (PaymentSucceeded | PaymentFailed, S::Cancelled, _) => {
            Err(TransitionError("Booking has been cancelled"))
        }
        (PaymentSucceeded, S::Pending, P::Pending | P::Failed) => {
            Ok(BookingState::new(S::Confirmed, P::Completed))
        }
        (PaymentFailed, S::Pending, P::Pending | P::Failed) => {
            Ok(BookingState::new(S::Pending, P::Failed))
        }
        (SessionEnded, S::Confirmed, P::Completed) => {
            Ok(BookingState::new(S::Completed, P::Completed))
        }
        (SessionEnded, _, _) => Err(TransitionError("Booking is not confirmed")),
        (Refunded, S::Confirmed | S::Completed, P::Completed) => {
            Ok(BookingState::new(S::Cancelled, P::Refunded))
        }
        (Refunded, _, _) => Err(TransitionError(
            "Cannot refund a payment that was not completed",
        )),
        _ => Err(TransitionError("Invalid booking state")),
    }
}

/// Consultant share and platform commission of a paid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionSplit {
    pub amount: i64,
    pub commission: i64,
    pub total_amount: i64,
}

pub fn split_commission(total_amount: i64) -> CommissionSplit {
    let commission = (total_amount * COMMISSION_PERCENT).div_euclid(100);
    CommissionSplit {
        amount: total_amount - commission,
        commission,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingEvent::*;

    fn state(status: BookingStatus, payment: PaymentStatus) -> BookingState {
        BookingState::new(status, payment)
    }

    #[test]
    fn rejected_transition_displays_its_reason() {
        let err = transition(BookingState::created(), SessionEnded).unwrap_err();
        assert_eq!(err.to_string(), "Booking is not confirmed");
    }

    #[test]
    fn successful_payment_confirms_a_pending_booking() {
        let next = transition(BookingState::created(), PaymentSucceeded).unwrap();
        assert_eq!(next, state(BookingStatus::Confirmed, PaymentStatus::Completed));
    }

    #[test]
    fn failed_payment_can_be_retried() {
        let failed = transition(BookingState::created(), PaymentFailed).unwrap();
        assert_eq!(failed, state(BookingStatus::Pending, PaymentStatus::Failed));
        let paid = transition(failed, PaymentSucceeded).unwrap();
        assert_eq!(paid.status, BookingStatus::Confirmed);
    }

    #[test]
    fn second_payment_is_rejected() {
        let paid = state(BookingStatus::Confirmed, PaymentStatus::Completed);
        let err = transition(paid, PaymentSucceeded).unwrap_err();
        assert_eq!(err.0, "Payment already completed for this booking");
    }

    #[test]
    fn cancelled_booking_cannot_be_paid() {
        let refunded = state(BookingStatus::Cancelled, PaymentStatus::Refunded);
        assert!(transition(refunded, PaymentSucceeded).is_err());
    }

    #[test]
    fn session_end_requires_confirmation() {
        assert!(transition(BookingState::created(), SessionEnded).is_err());
        let done = transition(
            state(BookingStatus::Confirmed, PaymentStatus::Completed),
            SessionEnded,
        )
        .unwrap();
        assert_eq!(done.status, BookingStatus::Completed);
    }

    #[test]
    fn refund_requires_completed_payment() {
        let err = transition(BookingState::created(), Refunded).unwrap_err();
        assert_eq!(err.0, "Cannot refund a payment that was not completed");

        let refunded = transition(
            state(BookingStatus::Confirmed, PaymentStatus::Completed),
            Refunded,
        )
        .unwrap();
        assert_eq!(refunded, state(BookingStatus::Cancelled, PaymentStatus::Refunded));
    }

    #[test]
    fn every_reachable_state_is_consistent() {
        let mut frontier = vec![BookingState::created()];
        let mut seen = Vec::new();
        while let Some(current) = frontier.pop() {
            if seen.contains(&current) {
                continue;
            }
            assert!(current.is_consistent(), "{current:?}");
            seen.push(current);
            for event in [PaymentSucceeded, PaymentFailed, SessionEnded, Refunded] {
                if let Ok(next) = transition(current, event) {
                    frontier.push(next);
                }
            }
        }
        assert!(seen.contains(&state(BookingStatus::Completed, PaymentStatus::Completed)));
    }

    #[test]
    fn confirmed_but_unpaid_is_inconsistent() {
        assert!(!state(BookingStatus::Confirmed, PaymentStatus::Pending).is_consistent());
    }

    #[test]
    fn commission_is_floored_twenty_percent() {
        let split = split_commission(99);
        assert_eq!(split.commission, 19);
        assert_eq!(split.amount, 80);
        assert_eq!(split.amount + split.commission, split.total_amount);

        assert_eq!(split_commission(299).commission, 59);
        assert_eq!(split_commission(0).commission, 0);
    }
}
