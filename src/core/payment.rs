use crate::core::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A direct payment between two members, recorded to settle debt.
///
/// Paying improves the sender's balance and reduces the receiver's
/// credit. The engine does not require `from` and `to` to differ: a
/// self-payment is a no-op on the balance sheet (the credit and debit
/// cancel), and rejecting it is a UI-level concern.
///
/// # Examples
///
/// ```
/// use split_engine::core::payment::Payment;
/// use split_engine::core::member::MemberId;
/// use rust_decimal_macros::dec;
///
/// let payment = Payment::new(MemberId::new("ben"), MemberId::new("anna"), dec!(30));
/// assert_eq!(payment.amount(), dec!(30));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    id: Uuid,
    /// The member who paid.
    from: MemberId,
    /// The member who received.
    to: MemberId,
    /// The amount paid. Must be positive.
    amount: Decimal,
    /// When the payment was made.
    date: DateTime<Utc>,
}

impl Payment {
    /// Create a new payment.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(from: MemberId, to: MemberId, amount: Decimal) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Payment amount must be positive, got {}",
            amount
        );
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            date: Utc::now(),
        }
    }

    /// Create a payment with a specific ID (useful for testing / determinism).
    pub fn with_id(id: Uuid, from: MemberId, to: MemberId, amount: Decimal) -> Self {
        assert!(amount > Decimal::ZERO);
        Self {
            id,
            from,
            to,
            amount,
            date: Utc::now(),
        }
    }

    /// Set the payment date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from(&self) -> &MemberId {
        &self.from
    }

    pub fn to(&self) -> &MemberId {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_creation() {
        let p = Payment::new(MemberId::new("ben"), MemberId::new("anna"), dec!(30));
        assert_eq!(p.from().as_str(), "ben");
        assert_eq!(p.to().as_str(), "anna");
        assert_eq!(p.amount(), dec!(30));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_payment_zero_amount() {
        Payment::new(MemberId::new("ben"), MemberId::new("anna"), Decimal::ZERO);
    }

    #[test]
    fn test_self_payment_representable() {
        // Not rejected here; it cancels out in the balance sheet.
        let p = Payment::new(MemberId::new("anna"), MemberId::new("anna"), dec!(10));
        assert_eq!(p.from(), p.to());
    }
}
