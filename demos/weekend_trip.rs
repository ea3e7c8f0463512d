//! Weekend trip walkthrough.
//!
//! Demonstrates the full engine flow: build a group snapshot, compute
//! net balances, plan settlement transfers, record them as payments,
//! and verify everyone is settled.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_engine::prelude::*;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  split-engine: Weekend Trip Walkthrough   ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let mut group = GroupSnapshot::new("Weekend trip", CurrencyCode::new("EUR"));

    let anna = MemberId::new("anna");
    let ben = MemberId::new("ben");

    group.add_member(Member::new("anna", "Anna"));
    group.add_member(Member::new("ben", "Ben"));
    group.add_member(Member::new("carla", "Carla"));

    // Anna fronts dinner for everyone, Ben covers the taxi.
    group.add_expense(Expense::new(
        "Dinner",
        dec!(90),
        anna.clone(),
        vec![
            Share::new("anna", dec!(30)),
            Share::new("ben", dec!(30)),
            Share::new("carla", dec!(30)),
        ],
    ));
    group.add_expense(Expense::new(
        "Taxi",
        dec!(24),
        ben.clone(),
        vec![
            Share::new("anna", dec!(8)),
            Share::new("ben", dec!(8)),
            Share::new("carla", dec!(8)),
        ],
    ));

    println!("━━━ Balances ━━━\n");
    let sheet = BalanceCalculator::compute_snapshot(&group);
    for member in group.members() {
        let balance = sheet.balance(&member.id);
        let status = if balance > Decimal::ZERO {
            "is owed"
        } else if balance < Decimal::ZERO {
            "owes"
        } else {
            "settled"
        };
        println!("  {:<8} {:>8} EUR  [{}]", member.name, balance, status);
    }

    println!("\n━━━ Settlement ━━━\n");
    let plan = SettlementPlanner::plan(&sheet);
    println!("{}", plan);

    // Record the suggested transfers as real payments and recompute.
    for transfer in plan.transfers() {
        group.add_payment(transfer.to_payment());
    }
    let settled = BalanceCalculator::compute_snapshot(&group);

    println!("━━━ After recording the transfers ━━━\n");
    for member in group.members() {
        println!("  {:<8} {:>8} EUR", member.name, settled.balance(&member.id));
    }
}
