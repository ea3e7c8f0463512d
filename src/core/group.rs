use crate::core::currency::CurrencyCode;
use crate::core::expense::Expense;
use crate::core::member::{Member, MemberId};
use crate::core::payment::Payment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// A coherent snapshot of one group's data: members, expenses, payments.
///
/// This is the engine's sole input shape. The surrounding data layer owns
/// the entities and their lifecycle; the engine only reads a full
/// snapshot and produces fresh derived values on every invocation. There
/// is no incremental update model: any change to the underlying data
/// means recomputing from a new snapshot.
///
/// # Examples
///
/// ```
/// use split_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut group = GroupSnapshot::new("Ski trip", CurrencyCode::new("EUR"));
/// group.add_member(Member::new("anna", "Anna"));
/// group.add_member(Member::new("ben", "Ben"));
/// group.add_expense(Expense::new(
///     "Lift passes",
///     dec!(80),
///     MemberId::new("anna"),
///     vec![Share::new("anna", dec!(40)), Share::new("ben", dec!(40))],
/// ));
///
/// assert_eq!(group.member_count(), 2);
/// assert!(group.validate().is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub currency: CurrencyCode,
    members: Vec<Member>,
    expenses: Vec<Expense>,
    payments: Vec<Payment>,
}

impl GroupSnapshot {
    pub fn new(name: impl Into<String>, currency: CurrencyCode) -> Self {
        Self {
            name: name.into(),
            currency,
            members: Vec::new(),
            expenses: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn add_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }

    /// Total gross value of all expenses.
    pub fn gross_expenses(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// All member ids referenced anywhere in the snapshot, including ids
    /// that appear only in expenses or payments.
    pub fn referenced_member_ids(&self) -> HashSet<MemberId> {
        let mut ids: HashSet<MemberId> = self.members.iter().map(|m| m.id.clone()).collect();
        for expense in &self.expenses {
            ids.insert(expense.payer().clone());
            for share in expense.shares() {
                ids.insert(share.member.clone());
            }
        }
        for payment in &self.payments {
            ids.insert(payment.from().clone());
            ids.insert(payment.to().clone());
        }
        ids
    }

    /// Advisory consistency check over the snapshot.
    ///
    /// Returns every issue found; an empty vec means the conservation law
    /// holds by construction and settlement will drain both sides fully.
    /// The engine itself never consults this. It tolerates all of these
    /// conditions and degrades silently; callers that want a loud failure
    /// check before computing.
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();
        let known: HashSet<&MemberId> = self.members.iter().map(|m| &m.id).collect();

        for expense in &self.expenses {
            let share_total = expense.share_total();
            if share_total != expense.amount() {
                issues.push(SnapshotIssue::ShareSumMismatch {
                    expense_id: expense.id(),
                    expected: expense.amount(),
                    actual: share_total,
                });
            }
            if !known.contains(expense.payer()) {
                issues.push(SnapshotIssue::UnknownMember {
                    member: expense.payer().clone(),
                    context: format!("payer of expense {}", expense.id()),
                });
            }
            for share in expense.shares() {
                if !known.contains(&share.member) {
                    issues.push(SnapshotIssue::UnknownMember {
                        member: share.member.clone(),
                        context: format!("share of expense {}", expense.id()),
                    });
                }
            }
        }

        for payment in &self.payments {
            if payment.from() == payment.to() {
                issues.push(SnapshotIssue::SelfPayment {
                    payment_id: payment.id(),
                    member: payment.from().clone(),
                });
            }
            for (member, role) in [(payment.from(), "sender"), (payment.to(), "receiver")] {
                if !known.contains(member) {
                    issues.push(SnapshotIssue::UnknownMember {
                        member: member.clone(),
                        context: format!("{} of payment {}", role, payment.id()),
                    });
                }
            }
        }

        issues
    }
}

/// A consistency problem found in a group snapshot.
///
/// None of these stop the engine; they describe inputs that produce an
/// unbalanced or surprising balance sheet.
#[derive(Debug, Clone, Error)]
pub enum SnapshotIssue {
    #[error("expense {expense_id}: shares sum to {actual}, expected {expected}")]
    ShareSumMismatch {
        expense_id: Uuid,
        expected: Decimal,
        actual: Decimal,
    },
    #[error("unknown member {member} referenced as {context}")]
    UnknownMember { member: MemberId, context: String },
    #[error("payment {payment_id}: {member} pays themselves")]
    SelfPayment { payment_id: Uuid, member: MemberId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Share;
    use rust_decimal_macros::dec;

    fn two_member_group() -> GroupSnapshot {
        let mut group = GroupSnapshot::new("Flat", CurrencyCode::new("EUR"));
        group.add_member(Member::new("anna", "Anna"));
        group.add_member(Member::new("ben", "Ben"));
        group
    }

    #[test]
    fn test_clean_snapshot_has_no_issues() {
        let mut group = two_member_group();
        group.add_expense(Expense::new(
            "Groceries",
            dec!(40),
            MemberId::new("anna"),
            vec![Share::new("anna", dec!(20)), Share::new("ben", dec!(20))],
        ));
        group.add_payment(Payment::new(
            MemberId::new("ben"),
            MemberId::new("anna"),
            dec!(20),
        ));
        assert!(group.validate().is_empty());
    }

    #[test]
    fn test_share_sum_mismatch_reported() {
        let mut group = two_member_group();
        group.add_expense(Expense::new(
            "Taxi",
            dec!(50),
            MemberId::new("anna"),
            vec![Share::new("ben", dec!(10))],
        ));
        let issues = group.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], SnapshotIssue::ShareSumMismatch { .. }));
    }

    #[test]
    fn test_unknown_member_reported() {
        let mut group = two_member_group();
        group.add_payment(Payment::new(
            MemberId::new("ghost"),
            MemberId::new("anna"),
            dec!(5),
        ));
        let issues = group.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], SnapshotIssue::UnknownMember { .. }));
    }

    #[test]
    fn test_self_payment_reported_but_representable() {
        let mut group = two_member_group();
        group.add_payment(Payment::new(
            MemberId::new("anna"),
            MemberId::new("anna"),
            dec!(5),
        ));
        let issues = group.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], SnapshotIssue::SelfPayment { .. }));
    }

    #[test]
    fn test_referenced_ids_include_unknowns() {
        let mut group = two_member_group();
        group.add_payment(Payment::new(
            MemberId::new("ghost"),
            MemberId::new("anna"),
            dec!(5),
        ));
        let ids = group.referenced_member_ids();
        assert!(ids.contains(&MemberId::new("ghost")));
        assert_eq!(ids.len(), 3);
    }
}
