//! Uneven shares and tolerated inconsistencies.
//!
//! Shows per-member shares that differ from an equal split, a payer who
//! covers someone else entirely, and the advisory snapshot validation
//! that surfaces a share-sum mismatch without stopping the engine.

use rust_decimal_macros::dec;
use split_engine::prelude::*;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  split-engine: Uneven Shares Walkthrough  ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let mut group = GroupSnapshot::new("City break", CurrencyCode::new("EUR"));

    group.add_member(Member::new("anna", "Anna"));
    group.add_member(Member::new("ben", "Ben"));

    // Anna pays the hotel for herself and Ben in equal halves.
    group.add_expense(Expense::new(
        "Hotel",
        dec!(100),
        MemberId::new("anna"),
        vec![Share::new("anna", dec!(50)), Share::new("ben", dec!(50))],
    ));

    // Ben pays for the museum, but Anna's ticket was the expensive one.
    group.add_expense(Expense::new(
        "Museum",
        dec!(30),
        MemberId::new("ben"),
        vec![Share::new("anna", dec!(22)), Share::new("ben", dec!(8))],
    ));

    let sheet = BalanceCalculator::compute_snapshot(&group);
    println!("━━━ Balances ━━━\n");
    println!("  Anna: {}", sheet.balance(&MemberId::new("anna")));
    println!("  Ben:  {}", sheet.balance(&MemberId::new("ben")));

    let plan = SettlementPlanner::plan(&sheet);
    println!("\n{}", plan);

    // --- A snapshot with a share-sum mismatch ---
    println!("━━━ Advisory validation ━━━\n");

    let mut sloppy = GroupSnapshot::new("Sloppy", CurrencyCode::new("EUR"));
    sloppy.add_member(Member::new("anna", "Anna"));
    sloppy.add_member(Member::new("ben", "Ben"));
    sloppy.add_expense(Expense::new(
        "Taxi",
        dec!(50),
        MemberId::new("anna"),
        vec![Share::new("ben", dec!(10))],
    ));

    for issue in sloppy.validate() {
        println!("  issue: {}", issue);
    }

    // The engine still computes; the sheet is simply unbalanced.
    let sloppy_sheet = BalanceCalculator::compute_snapshot(&sloppy);
    println!("\n  sheet balanced: {}", sloppy_sheet.is_balanced());
}
