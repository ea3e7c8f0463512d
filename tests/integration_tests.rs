use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_engine::core::currency::CurrencyCode;
use split_engine::core::expense::{Expense, Share};
use split_engine::core::group::GroupSnapshot;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::payment::Payment;
use split_engine::engine::balance::{BalanceCalculator, BalanceSheet};
use split_engine::engine::settlement::SettlementPlanner;

/// Full pipeline test: snapshot → balances → plan → record transfers as
/// payments → recompute → everyone settled.
#[test]
fn full_pipeline_weekend_trip() {
    let mut group = GroupSnapshot::new("Weekend trip", CurrencyCode::new("EUR"));

    let anna = MemberId::new("anna");
    let ben = MemberId::new("ben");
    let carla = MemberId::new("carla");
    let david = MemberId::new("david");

    group.add_member(Member::new("anna", "Anna"));
    group.add_member(Member::new("ben", "Ben"));
    group.add_member(Member::new("carla", "Carla"));
    group.add_member(Member::new("david", "David"));

    group.add_expense(Expense::new(
        "Cabin",
        dec!(240),
        anna.clone(),
        vec![
            Share::new("anna", dec!(60)),
            Share::new("ben", dec!(60)),
            Share::new("carla", dec!(60)),
            Share::new("david", dec!(60)),
        ],
    ));
    group.add_expense(Expense::new(
        "Groceries",
        dec!(80),
        ben.clone(),
        vec![
            Share::new("anna", dec!(20)),
            Share::new("ben", dec!(20)),
            Share::new("carla", dec!(20)),
            Share::new("david", dec!(20)),
        ],
    ));
    group.add_expense(Expense::new(
        "Fuel",
        dec!(60),
        carla.clone(),
        vec![Share::new("carla", dec!(30)), Share::new("david", dec!(30))],
    ));
    group.add_payment(Payment::new(david.clone(), anna.clone(), dec!(50)));

    assert!(group.validate().is_empty());
    assert_eq!(group.gross_expenses(), dec!(380));

    let sheet = BalanceCalculator::compute_snapshot(&group);
    assert!(sheet.is_balanced());

    // Anna: +240 -60 -20 -50 = 110
    // Ben:   +80 -60 -20     = 0
    // Carla: +60 -60 -20 -30 = -50
    // David: -60 -20 -30 +50 = -60
    assert_eq!(sheet.balance(&anna), dec!(110));
    assert_eq!(sheet.balance(&ben), Decimal::ZERO);
    assert_eq!(sheet.balance(&carla), dec!(-50));
    assert_eq!(sheet.balance(&david), dec!(-60));

    let plan = SettlementPlanner::plan(&sheet);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.total_transferred(), dec!(110));
    assert_eq!(plan.coverage_percent(), 100.0);

    // Ben is settled and must not appear in any transfer.
    for transfer in plan.transfers() {
        assert_ne!(transfer.from, ben);
        assert_ne!(transfer.to, ben);
    }

    // Record every suggested transfer as a payment and recompute: the
    // next snapshot settles to zero for everyone.
    for transfer in plan.transfers() {
        group.add_payment(transfer.to_payment());
    }
    let settled = BalanceCalculator::compute_snapshot(&group);
    for member in group.members() {
        assert_eq!(settled.balance(&member.id), Decimal::ZERO);
    }

    // And the follow-up plan is empty.
    assert!(SettlementPlanner::plan(&settled).is_empty());
}

/// The dinner scenario: equal three-way split, payer included.
#[test]
fn dinner_scenario_two_transfers() {
    let members = vec![
        Member::new("anna", "Anna"),
        Member::new("ben", "Ben"),
        Member::new("carla", "Carla"),
    ];
    let dinner = Expense::new(
        "Dinner",
        dec!(90),
        MemberId::new("anna"),
        vec![
            Share::new("anna", dec!(30)),
            Share::new("ben", dec!(30)),
            Share::new("carla", dec!(30)),
        ],
    );

    let sheet = BalanceCalculator::compute(&members, &[dinner], &[]);
    assert_eq!(sheet.balance(&MemberId::new("anna")), dec!(60));
    assert_eq!(sheet.balance(&MemberId::new("ben")), dec!(-30));
    assert_eq!(sheet.balance(&MemberId::new("carla")), dec!(-30));

    let plan = SettlementPlanner::plan(&sheet);
    assert_eq!(plan.len(), 2);
    for transfer in plan.transfers() {
        assert_eq!(transfer.to, MemberId::new("anna"));
        assert_eq!(transfer.amount, dec!(30));
    }
}

/// Uneven split where the payer covers someone else entirely.
#[test]
fn payer_covers_other_single_transfer() {
    let members = vec![Member::new("anna", "Anna"), Member::new("ben", "Ben")];
    let hotel = Expense::new(
        "Hotel",
        dec!(100),
        MemberId::new("anna"),
        vec![Share::new("anna", dec!(50)), Share::new("ben", dec!(50))],
    );

    let sheet = BalanceCalculator::compute(&members, &[hotel], &[]);
    let plan = SettlementPlanner::plan(&sheet);

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.transfers()[0].from, MemberId::new("ben"));
    assert_eq!(plan.transfers()[0].to, MemberId::new("anna"));
    assert_eq!(plan.transfers()[0].amount, dec!(50));
}

/// Uneven cent splits settle within rounding tolerance.
#[test]
fn cent_splits_settle_within_tolerance() {
    let members = vec![
        Member::new("anna", "Anna"),
        Member::new("ben", "Ben"),
        Member::new("carla", "Carla"),
    ];
    let expense = Expense::new(
        "Pizza",
        dec!(100),
        MemberId::new("anna"),
        vec![
            Share::new("anna", dec!(33.34)),
            Share::new("ben", dec!(33.33)),
            Share::new("carla", dec!(33.33)),
        ],
    );

    let sheet = BalanceCalculator::compute(&members, &[expense], &[]);
    assert!(sheet.is_balanced());

    let plan = SettlementPlanner::plan(&sheet);
    let mut residual: BalanceSheet = sheet
        .all_balances()
        .iter()
        .map(|(id, amount)| (id.clone(), *amount))
        .collect();
    for transfer in plan.transfers() {
        residual.apply_payment(&transfer.to_payment());
    }
    for (_, amount) in residual.all_balances() {
        assert!(amount.abs() <= dec!(0.01));
    }
}

/// Group JSON round-trips through serde.
#[test]
fn group_snapshot_json_round_trip() {
    let mut group = GroupSnapshot::new("Flat", CurrencyCode::new("CHF"));
    group.add_member(Member::new("anna", "Anna"));
    group.add_member(Member::new("ben", "Ben"));
    group.add_expense(Expense::new(
        "Internet",
        dec!(60),
        MemberId::new("anna"),
        vec![Share::new("anna", dec!(30)), Share::new("ben", dec!(30))],
    ));

    let json = serde_json::to_string(&group).unwrap();
    let restored: GroupSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.name, "Flat");
    assert_eq!(restored.currency, CurrencyCode::new("CHF"));
    assert_eq!(restored.member_count(), 2);
    assert_eq!(restored.expense_count(), 1);

    let sheet = BalanceCalculator::compute_snapshot(&restored);
    assert_eq!(sheet.balance(&MemberId::new("ben")), dec!(-30));
}

/// Settlement plans serialize with their transfers.
#[test]
fn settlement_plan_serializes() {
    let sheet: BalanceSheet = [
        (MemberId::new("anna"), dec!(25)),
        (MemberId::new("ben"), dec!(-25)),
    ]
    .into_iter()
    .collect();

    let plan = SettlementPlanner::plan(&sheet);
    let json = serde_json::to_string_pretty(&plan).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("transfers").is_some());
    assert!(parsed.get("total_outstanding").is_some());
}

/// An empty group produces an empty, balanced result end to end.
#[test]
fn empty_group_produces_empty_plan() {
    let group = GroupSnapshot::new("Empty", CurrencyCode::new("EUR"));
    let sheet = BalanceCalculator::compute_snapshot(&group);
    assert!(sheet.is_empty());
    assert!(sheet.is_balanced());

    let plan = SettlementPlanner::plan(&sheet);
    assert!(plan.is_empty());
    assert_eq!(plan.total_outstanding(), Decimal::ZERO);
}

/// Expenses referencing ids outside the member list still compute.
#[test]
fn referential_inconsistency_is_tolerated() {
    let members = vec![Member::new("anna", "Anna")];
    let expense = Expense::new(
        "Drinks",
        dec!(30),
        MemberId::new("ghost"),
        vec![Share::new("anna", dec!(15)), Share::new("ghost", dec!(15))],
    );

    let sheet = BalanceCalculator::compute(&members, &[expense], &[]);
    assert_eq!(sheet.balance(&MemberId::new("ghost")), dec!(15));
    assert_eq!(sheet.balance(&MemberId::new("anna")), dec!(-15));
    assert!(sheet.is_balanced());
}
