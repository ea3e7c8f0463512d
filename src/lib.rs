//! # split-engine
//!
//! Shared-expense balance and settlement engine for groups.
//!
//! Given a snapshot of a group — its members, recorded expenses with
//! per-member shares, and direct payments — this engine computes each
//! member's net balance and suggests a short list of transfers that
//! settles all balances to zero.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, currencies, expenses,
//!   payments, group snapshots
//! - **engine** — The pure computations: balance calculation and greedy
//!   settlement planning
//! - **simulation** — Random group generation for benchmarks and testing

pub mod core;
pub mod engine;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{CurrencyCode, CurrencyTable};
    pub use crate::core::expense::{Expense, Share};
    pub use crate::core::group::{GroupSnapshot, SnapshotIssue};
    pub use crate::core::member::{Member, MemberId};
    pub use crate::core::payment::Payment;
    pub use crate::engine::balance::{BalanceCalculator, BalanceSheet};
    pub use crate::engine::settlement::{SettlementPlan, SettlementPlanner, SuggestedTransfer};
}
