use crate::core::member::MemberId;
use crate::core::payment::Payment;
use crate::engine::balance::BalanceSheet;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Balances are rounded to monetary precision before matching.
const MONETARY_DP: u32 = 2;

/// A side is considered drained once its remainder falls to this level,
/// so decimal dust cannot stall the matching loop.
const SETTLEMENT_EPSILON: Decimal = dec!(0.001);

/// A proposed transfer that pays down part of the group's debt.
///
/// Output only: it becomes a real [`Payment`] only if the caller records
/// it, at which point it belongs in the next snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTransfer {
    /// The debtor who should pay.
    pub from: MemberId,
    /// The creditor who should receive.
    pub to: MemberId,
    /// The amount to transfer. Always positive.
    pub amount: Decimal,
}

impl SuggestedTransfer {
    /// Materialize this suggestion as a recordable payment.
    pub fn to_payment(&self) -> Payment {
        Payment::new(self.from.clone(), self.to.clone(), self.amount)
    }
}

impl std::fmt::Display for SuggestedTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} to {}", self.from, self.amount, self.to)
    }
}

/// The full set of transfers suggested for a balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Transfers in matching order, largest debts first.
    transfers: Vec<SuggestedTransfer>,
    /// Sum of positive rounded balances at planning time.
    total_outstanding: Decimal,
    /// Sum of all suggested transfer amounts.
    total_transferred: Decimal,
}

impl SettlementPlan {
    pub fn transfers(&self) -> &[SuggestedTransfer] {
        &self.transfers
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Total credit outstanding when the plan was computed.
    pub fn total_outstanding(&self) -> Decimal {
        self.total_outstanding
    }

    /// Total amount moved by the suggested transfers.
    pub fn total_transferred(&self) -> Decimal {
        self.total_transferred
    }

    /// Share of the outstanding credit covered by the plan, in percent.
    ///
    /// 100 for any balanced sheet. Below 100 when the input was
    /// unbalanced and an unmatched remainder was silently dropped.
    pub fn coverage_percent(&self) -> f64 {
        if self.total_outstanding == Decimal::ZERO {
            return 100.0;
        }
        let pct = self.total_transferred * Decimal::from(100) / self.total_outstanding;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Outstanding:  {}", self.total_outstanding)?;
        writeln!(f, "Transferred:  {}", self.total_transferred)?;
        writeln!(f, "Coverage:     {:.1}%", self.coverage_percent())?;
        writeln!(f, "Transfers:    {}", self.transfers.len())?;
        for transfer in &self.transfers {
            writeln!(f, "  {}", transfer)?;
        }
        Ok(())
    }
}

/// Internal matching entry: a member plus their remaining magnitude.
struct OpenPosition {
    member: MemberId,
    remaining: Decimal,
}

/// Greedy largest-first settlement planning.
///
/// A debt-simplification heuristic, not a minimum-transaction-count
/// optimizer: it repeatedly matches the largest remaining debtor against
/// the largest remaining creditor. The emitted transfers, applied as
/// payments, zero out every nonzero balance of a balanced sheet.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Plan transfers that settle the given balance sheet.
    ///
    /// # Algorithm
    ///
    /// 1. Round every balance to 2 decimal places. Rounded zeros take
    ///    part in no transfer.
    /// 2. Split into debtors (negative, tracked by absolute value) and
    ///    creditors (positive), each sorted descending by magnitude.
    ///    Order among equal magnitudes is unspecified.
    /// 3. Two-pointer matching: transfer `min(debtor, creditor)` from the
    ///    current largest debtor to the current largest creditor, emitting
    ///    only positive amounts; advance whichever side has drained to
    ///    within the epsilon (possibly both on an exact match).
    /// 4. Stop when either side is exhausted. On a balanced sheet both
    ///    sides drain together; on an unbalanced one the unmatched
    ///    remainder is dropped without error.
    ///
    /// Emits at most `debtors + creditors - 1` transfers.
    pub fn plan(sheet: &BalanceSheet) -> SettlementPlan {
        let mut debtors: Vec<OpenPosition> = Vec::new();
        let mut creditors: Vec<OpenPosition> = Vec::new();

        for (member, balance) in sheet.all_balances() {
            let rounded = balance.round_dp(MONETARY_DP);
            if rounded < Decimal::ZERO {
                debtors.push(OpenPosition {
                    member: member.clone(),
                    remaining: rounded.abs(),
                });
            } else if rounded > Decimal::ZERO {
                creditors.push(OpenPosition {
                    member: member.clone(),
                    remaining: rounded,
                });
            }
        }

        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let total_outstanding: Decimal = creditors.iter().map(|c| c.remaining).sum();
        debug!(
            "planning settlement: {} debtors, {} creditors, {} outstanding",
            debtors.len(),
            creditors.len(),
            total_outstanding
        );

        let mut transfers = Vec::new();
        let mut total_transferred = Decimal::ZERO;
        let mut i = 0;
        let mut j = 0;

        while i < debtors.len() && j < creditors.len() {
            let amount = debtors[i].remaining.min(creditors[j].remaining);
            if amount > Decimal::ZERO {
                transfers.push(SuggestedTransfer {
                    from: debtors[i].member.clone(),
                    to: creditors[j].member.clone(),
                    amount,
                });
                total_transferred += amount;
            }

            debtors[i].remaining -= amount;
            creditors[j].remaining -= amount;

            if debtors[i].remaining <= SETTLEMENT_EPSILON {
                i += 1;
            }
            if creditors[j].remaining <= SETTLEMENT_EPSILON {
                j += 1;
            }
        }

        SettlementPlan {
            transfers,
            total_outstanding,
            total_transferred,
        }
    }
}
