//! split-engine CLI
//!
//! Compute balances and settlement plans for a group from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Net balances for a group JSON file
//! split-engine balances --input group.json
//!
//! # Suggested settlement transfers
//! split-engine settle --input group.json --format json
//!
//! # Generate a random group for testing
//! split-engine generate --members 5 --expenses 20
//! ```

use rust_decimal::Decimal;
use split_engine::core::currency::CurrencyCode;
use split_engine::core::expense::{Expense, Share};
use split_engine::core::group::GroupSnapshot;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::payment::Payment;
use split_engine::engine::balance::BalanceCalculator;
use split_engine::engine::settlement::SettlementPlanner;
use split_engine::simulation::generator::{generate_random_group, GroupConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — shared-expense balance and settlement engine

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute each member's net balance
    settle      Compute suggested settlement transfers
    generate    Generate a random group snapshot (for testing)
    help        Show this message

OPTIONS (balances, settle):
    --input <FILE>      Path to JSON group file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --members <N>       Number of members (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --payments <N>      Number of payments (default: 3)
    --currency <CODE>   Currency code (default: EUR)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine balances --input group.json
    split-engine settle --input group.json --format json
    split-engine generate --members 8 --expenses 40 --output group.json"#
    );
}

/// JSON schema for input groups.
#[derive(serde::Deserialize)]
struct GroupFile {
    name: String,
    #[serde(default = "default_currency")]
    currency: String,
    members: Vec<MemberInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default)]
    payments: Vec<PaymentInput>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(serde::Deserialize)]
struct MemberInput {
    id: String,
    name: String,
}

#[derive(serde::Deserialize)]
struct ExpenseInput {
    title: String,
    amount: String,
    payer: String,
    shares: Vec<ShareInput>,
}

#[derive(serde::Deserialize)]
struct ShareInput {
    member: String,
    amount: String,
}

#[derive(serde::Deserialize)]
struct PaymentInput {
    from: String,
    to: String,
    amount: String,
}

/// JSON output schema for balances.
#[derive(serde::Serialize)]
struct BalancesOutput {
    group: String,
    currency: String,
    balanced: bool,
    balances: Vec<BalanceOutput>,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    member: String,
    balance: String,
    status: String,
}

/// JSON output schema for settlement plans.
#[derive(serde::Serialize)]
struct SettlementOutput {
    group: String,
    currency: String,
    total_outstanding: String,
    total_transferred: String,
    coverage_percent: f64,
    transfers: Vec<TransferOutput>,
}

#[derive(serde::Serialize)]
struct TransferOutput {
    from: String,
    to: String,
    amount: String,
}

fn parse_amount(raw: &str, context: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid amount '{}' in {}: {}", raw, context, e);
        process::exit(1);
    })
}

fn load_group(path: &str) -> GroupSnapshot {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: GroupFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "name": "Ski trip",
  "currency": "EUR",
  "members": [ {{ "id": "anna", "name": "Anna" }} ],
  "expenses": [
    {{ "title": "Dinner", "amount": "90", "payer": "anna",
       "shares": [ {{ "member": "anna", "amount": "45" }},
                   {{ "member": "ben", "amount": "45" }} ] }}
  ],
  "payments": [ {{ "from": "ben", "to": "anna", "amount": "45" }} ]
}}"#
        );
        process::exit(1);
    });

    let mut group = GroupSnapshot::new(file.name, CurrencyCode::new(file.currency));
    for member in file.members {
        group.add_member(Member::new(member.id.as_str(), member.name));
    }
    for expense in file.expenses {
        let amount = parse_amount(&expense.amount, &format!("expense '{}'", expense.title));
        let shares = expense
            .shares
            .iter()
            .map(|s| {
                Share::new(
                    s.member.as_str(),
                    parse_amount(&s.amount, &format!("share of '{}'", expense.title)),
                )
            })
            .collect();
        group.add_expense(Expense::new(
            expense.title,
            amount,
            MemberId::new(expense.payer),
            shares,
        ));
    }
    for payment in file.payments {
        let amount = parse_amount(
            &payment.amount,
            &format!("payment {} -> {}", payment.from, payment.to),
        );
        group.add_payment(Payment::new(
            MemberId::new(payment.from),
            MemberId::new(payment.to),
            amount,
        ));
    }

    for issue in group.validate() {
        eprintln!("warning: {}", issue);
    }

    group
}

fn parse_input_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_input_options(args);
    let group = load_group(&path);
    let sheet = BalanceCalculator::compute_snapshot(&group);

    let names: std::collections::HashMap<&MemberId, &str> = group
        .members()
        .iter()
        .map(|m| (&m.id, m.name.as_str()))
        .collect();

    let mut rows: Vec<(&MemberId, Decimal)> = sheet
        .all_balances()
        .iter()
        .map(|(id, amount)| (id, *amount))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    if format == "json" {
        let balances = rows
            .iter()
            .map(|(id, amount)| BalanceOutput {
                member: id.to_string(),
                balance: amount.to_string(),
                status: if *amount > Decimal::ZERO {
                    "CREDITOR".to_string()
                } else if *amount < Decimal::ZERO {
                    "DEBTOR".to_string()
                } else {
                    "SETTLED".to_string()
                },
            })
            .collect();

        let output = BalancesOutput {
            group: group.name.clone(),
            currency: group.currency.to_string(),
            balanced: sheet.is_balanced(),
            balances,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("=== Balances: {} ({}) ===", group.name, group.currency);
        for (id, amount) in &rows {
            let display = names.get(id).copied().unwrap_or(id.as_str());
            let status = if *amount > Decimal::ZERO {
                "is owed"
            } else if *amount < Decimal::ZERO {
                "owes"
            } else {
                "settled"
            };
            println!("  {:<20} {:>12}  [{}]", display, amount, status);
        }
        if !sheet.is_balanced() {
            println!("\nwarning: balances do not sum to zero");
        }
    }
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_input_options(args);
    let group = load_group(&path);
    let sheet = BalanceCalculator::compute_snapshot(&group);
    let plan = SettlementPlanner::plan(&sheet);

    if format == "json" {
        let transfers = plan
            .transfers()
            .iter()
            .map(|t| TransferOutput {
                from: t.from.to_string(),
                to: t.to.to_string(),
                amount: t.amount.to_string(),
            })
            .collect();

        let output = SettlementOutput {
            group: group.name.clone(),
            currency: group.currency.to_string(),
            total_outstanding: plan.total_outstanding().to_string(),
            total_transferred: plan.total_transferred().to_string(),
            coverage_percent: plan.coverage_percent(),
            transfers,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", plan);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GroupConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                config.member_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                config.expense_count =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                        eprintln!("--expenses requires a number");
                        process::exit(1);
                    });
            }
            "--payments" => {
                i += 1;
                config.payment_count =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                        eprintln!("--payments requires a number");
                        process::exit(1);
                    });
            }
            "--currency" => {
                i += 1;
                config.currency = CurrencyCode::new(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--currency requires a code");
                    process::exit(1);
                }));
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let group = generate_random_group(&config);

    #[derive(serde::Serialize)]
    struct OutputShare {
        member: String,
        amount: String,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        title: String,
        amount: String,
        payer: String,
        shares: Vec<OutputShare>,
    }

    #[derive(serde::Serialize)]
    struct OutputPayment {
        from: String,
        to: String,
        amount: String,
    }

    #[derive(serde::Serialize)]
    struct OutputMember {
        id: String,
        name: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        name: String,
        currency: String,
        members: Vec<OutputMember>,
        expenses: Vec<OutputExpense>,
        payments: Vec<OutputPayment>,
    }

    let output = OutputFile {
        name: group.name.clone(),
        currency: group.currency.to_string(),
        members: group
            .members()
            .iter()
            .map(|m| OutputMember {
                id: m.id.to_string(),
                name: m.name.clone(),
            })
            .collect(),
        expenses: group
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                title: e.title().to_string(),
                amount: e.amount().to_string(),
                payer: e.payer().to_string(),
                shares: e
                    .shares()
                    .iter()
                    .map(|s| OutputShare {
                        member: s.member.to_string(),
                        amount: s.amount.to_string(),
                    })
                    .collect(),
            })
            .collect(),
        payments: group
            .payments()
            .iter()
            .map(|p| OutputPayment {
                from: p.from().to_string(),
                to: p.to().to_string(),
                amount: p.amount().to_string(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} members → {}",
            group.expense_count(),
            group.member_count(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
