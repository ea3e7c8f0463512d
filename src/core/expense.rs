use crate::core::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's portion of an expense.
///
/// The amount may be zero (a participant who owes nothing for this
/// expense). Shares are never validated against the expense total at the
/// engine boundary; see `GroupSnapshot::validate` for the advisory check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub member: MemberId,
    pub amount: Decimal,
}

impl Share {
    pub fn new(member: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }
}

/// A shared expense fronted by one member and split among participants.
///
/// The payer is credited the full amount; each share debits its member.
/// If the payer also participates, their net credit is
/// `amount - own share`.
///
/// Expenses are immutable once created. The engine operates on whole
/// group snapshots and never mutates them.
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::{Expense, Share};
/// use split_engine::core::member::MemberId;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     "Dinner",
///     dec!(90),
///     MemberId::new("anna"),
///     vec![
///         Share::new("anna", dec!(30)),
///         Share::new("ben", dec!(30)),
///         Share::new("carla", dec!(30)),
///     ],
/// );
///
/// assert_eq!(dinner.amount(), dec!(90));
/// assert_eq!(dinner.shares().len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// Human-readable description ("Dinner", "Fuel").
    title: String,
    /// The total amount fronted by the payer. Must be positive.
    amount: Decimal,
    /// The member who paid.
    payer: MemberId,
    /// How the amount is split. Order is irrelevant.
    shares: Vec<Share>,
    /// When the expense occurred.
    date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        payer: MemberId,
        shares: Vec<Share>,
    ) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Expense amount must be positive, got {}",
            amount
        );
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            payer,
            shares,
            date: Utc::now(),
        }
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        title: impl Into<String>,
        amount: Decimal,
        payer: MemberId,
        shares: Vec<Share>,
    ) -> Self {
        assert!(amount > Decimal::ZERO);
        Self {
            id,
            title: title.into(),
            amount,
            payer,
            shares,
            date: Utc::now(),
        }
    }

    /// Set the expense date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payer(&self) -> &MemberId {
        &self.payer
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Sum of all share amounts.
    ///
    /// Equals `amount()` for a well-formed expense; the engine tolerates
    /// mismatches and simply produces an unbalanced sheet.
    pub fn share_total(&self) -> Decimal {
        self.shares.iter().map(|s| s.amount).sum()
    }
}
