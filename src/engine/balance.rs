use crate::core::expense::Expense;
use crate::core::group::GroupSnapshot;
use crate::core::member::{Member, MemberId};
use crate::core::payment::Payment;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Net balance of every member in a group.
///
/// A positive balance means the member is owed money (net creditor).
/// A negative balance means the member owes money (net debtor).
///
/// The sheet is derived and transient: it is recomputed from a full
/// snapshot on every call and never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// MemberId -> net balance. Positive = owed, negative = owes.
    balances: HashMap<MemberId, Decimal>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet with a zero entry for every given member, so members with
    /// no activity still appear.
    pub fn seeded(members: &[Member]) -> Self {
        let balances = members
            .iter()
            .map(|m| (m.id.clone(), Decimal::ZERO))
            .collect();
        Self { balances }
    }

    /// Apply an expense: the payer is credited the full amount, each
    /// share debits its member. Ids absent from the sheet get a zero
    /// entry on demand; referential inconsistency is tolerated, not an
    /// error.
    pub fn apply_expense(&mut self, expense: &Expense) {
        *self
            .balances
            .entry(expense.payer().clone())
            .or_insert(Decimal::ZERO) += expense.amount();
        for share in expense.shares() {
            *self
                .balances
                .entry(share.member.clone())
                .or_insert(Decimal::ZERO) -= share.amount;
        }
    }

    /// Apply a payment: paying down debt improves the sender's balance,
    /// receiving settles the receiver's credit. A self-payment cancels
    /// out and leaves the balance unchanged.
    pub fn apply_payment(&mut self, payment: &Payment) {
        *self
            .balances
            .entry(payment.from().clone())
            .or_insert(Decimal::ZERO) += payment.amount();
        *self
            .balances
            .entry(payment.to().clone())
            .or_insert(Decimal::ZERO) -= payment.amount();
    }

    /// The net balance of a member, zero if unknown.
    pub fn balance(&self, member: &MemberId) -> Decimal {
        self.balances.get(member).copied().unwrap_or(Decimal::ZERO)
    }

    /// All balances, including exact zeros.
    pub fn all_balances(&self) -> &HashMap<MemberId, Decimal> {
        &self.balances
    }

    /// Number of entries in the sheet.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Whether the conservation law holds: all balances sum to exactly
    /// zero. False when some expense's shares do not sum to its amount.
    pub fn is_balanced(&self) -> bool {
        self.balances.values().sum::<Decimal>() == Decimal::ZERO
    }

    /// Sum of all positive balances — the total amount that has to move
    /// for the group to settle (equals sum of |negative| when balanced).
    pub fn total_outstanding(&self) -> Decimal {
        self.balances
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }

    /// Number of members who owe money.
    pub fn debtor_count(&self) -> usize {
        self.balances
            .values()
            .filter(|v| **v < Decimal::ZERO)
            .count()
    }

    /// Number of members who are owed money.
    pub fn creditor_count(&self) -> usize {
        self.balances
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .count()
    }
}

impl FromIterator<(MemberId, Decimal)> for BalanceSheet {
    /// Build a sheet from any conforming map of member id to signed
    /// balance, for callers that do not go through the calculator.
    fn from_iter<T: IntoIterator<Item = (MemberId, Decimal)>>(iter: T) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

/// Pure balance computation over a group snapshot.
///
/// Folds expenses and payments into a per-member net balance. No side
/// effects, no shared state, no errors: malformed references get
/// on-demand zero entries and inconsistent share sums simply yield an
/// unbalanced sheet.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Compute net balances from members, expenses, and payments.
    ///
    /// # Algorithm
    ///
    /// 1. Seed a zero balance for every member.
    /// 2. Fold expenses: payer `+= amount`, each share `-= share amount`.
    /// 3. Fold payments: sender `+= amount`, receiver `-= amount`.
    ///
    /// When every expense's shares sum to its amount, the resulting
    /// sheet sums to exactly zero.
    pub fn compute(
        members: &[Member],
        expenses: &[Expense],
        payments: &[Payment],
    ) -> BalanceSheet {
        debug!(
            "computing balances: {} members, {} expenses, {} payments",
            members.len(),
            expenses.len(),
            payments.len()
        );

        let seeded = BalanceSheet::seeded(members);
        let after_expenses = expenses.iter().fold(seeded, |mut sheet, expense| {
            sheet.apply_expense(expense);
            sheet
        });
        payments.iter().fold(after_expenses, |mut sheet, payment| {
            sheet.apply_payment(payment);
            sheet
        })
    }

    /// Compute net balances from a full group snapshot.
    pub fn compute_snapshot(group: &GroupSnapshot) -> BalanceSheet {
        Self::compute(group.members(), group.expenses(), group.payments())
    }
}
