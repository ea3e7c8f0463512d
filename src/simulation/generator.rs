//! Random group snapshot generation.
//!
//! Generates synthetic groups with equal-split expenses and a few
//! recorded payments, for benchmarking the engine and producing test
//! fixtures from the CLI.

use crate::core::currency::CurrencyCode;
use crate::core::expense::{Expense, Share};
use crate::core::group::GroupSnapshot;
use crate::core::member::{Member, MemberId};
use crate::core::payment::Payment;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random group snapshot.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of expenses to generate.
    pub expense_count: usize,
    /// Number of direct payments to generate.
    pub payment_count: usize,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
    /// Currency code for the group.
    pub currency: CurrencyCode,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            payment_count: 3,
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
            currency: CurrencyCode::new("EUR"),
        }
    }
}

/// Generate a random group snapshot.
///
/// Every expense is split equally among a random subset of members that
/// always includes the payer, with the rounding remainder folded into the
/// first share so shares sum exactly to the total. Generated snapshots
/// therefore satisfy the conservation law by construction.
pub fn generate_random_group(config: &GroupConfig) -> GroupSnapshot {
    let mut rng = rand::thread_rng();
    let mut group = GroupSnapshot::new("generated", config.currency.clone());

    let member_ids: Vec<MemberId> = (0..config.member_count)
        .map(|i| MemberId::new(format!("MEMBER-{:03}", i)))
        .collect();
    for (i, id) in member_ids.iter().enumerate() {
        group.add_member(Member::new(id.as_str(), format!("Member {}", i)));
    }

    for n in 0..config.expense_count {
        let payer_idx = rng.gen_range(0..member_ids.len());

        let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(5.0);
        let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(500.0);
        let amount = Decimal::from_f64_retain(rng.gen_range(min_f64..max_f64))
            .unwrap_or(Decimal::from(10))
            .round_dp(2);
        if amount <= Decimal::ZERO {
            continue;
        }

        // Random participant subset, payer always included.
        let mut participants: Vec<MemberId> = member_ids
            .iter()
            .enumerate()
            .filter(|(i, _)| *i == payer_idx || rng.gen_bool(0.6))
            .map(|(_, id)| id.clone())
            .collect();
        if participants.is_empty() {
            participants.push(member_ids[payer_idx].clone());
        }

        let shares = equal_split(amount, &participants);
        group.add_expense(Expense::new(
            format!("Expense {}", n),
            amount,
            member_ids[payer_idx].clone(),
            shares,
        ));
    }

    for _ in 0..config.payment_count {
        if member_ids.len() < 2 {
            break;
        }
        let from_idx = rng.gen_range(0..member_ids.len());
        let mut to_idx = rng.gen_range(0..member_ids.len());
        while to_idx == from_idx {
            to_idx = rng.gen_range(0..member_ids.len());
        }
        let amount = Decimal::from(rng.gen_range(1u64..100u64));
        group.add_payment(Payment::new(
            member_ids[from_idx].clone(),
            member_ids[to_idx].clone(),
            amount,
        ));
    }

    group
}

/// Split an amount equally among participants, folding the rounding
/// remainder into the first share so the shares sum exactly to `amount`.
pub fn equal_split(amount: Decimal, participants: &[MemberId]) -> Vec<Share> {
    if participants.is_empty() {
        return Vec::new();
    }
    let count = Decimal::from(participants.len() as u64);
    let base = (amount / count).round_dp(2);
    let remainder = amount - base * count;

    participants
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let share = if i == 0 { base + remainder } else { base };
            Share::new(member.as_str(), share)
        })
        .collect()
}
