// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use purse::app::App;
use purse::commands::{accounts, doctor, fx, reports};
use purse::dataset::Dataset;
use purse::{cli, db};
use rust_decimal_macros::dec;

const DATASET: &str = r#"{
    "currencies": {
        "base": "EUR",
        "available": ["EUR", "USD", "GBP"],
        "rates": { "EUR": 1, "USD": 1.1, "GBP": 0.86 }
    },
    "accounts": []
}"#;

fn setup() -> App {
    let ds = Dataset::from_json(DATASET).unwrap();
    App::from_dataset(&ds, None, None).unwrap()
}

fn run(app: &mut App, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("account", sub)) => accounts::handle(app, sub),
        Some(("fx", sub)) => fx::handle(app, sub),
        Some(("total", sub)) => reports::handle(app, sub),
        Some(("doctor", _)) => doctor::handle(app),
        _ => panic!("unexpected command {:?}", args),
    }
}

#[test]
fn add_list_move_and_remove() {
    let mut app = setup();
    run(&mut app, &["purse", "account", "add", "Cash", "--currency", "usd", "--balance", "100"])
        .unwrap();
    run(&mut app, &["purse", "account", "add", "Wallet"]).unwrap();
    run(&mut app, &["purse", "account", "add", "Card", "-c", "GBP", "-b", "-8.6"]).unwrap();
    assert_eq!(app.total(), dec!(80.91));

    let rows = accounts::rows(&app);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].currency, "USD");
    assert_eq!(rows[1].currency, "EUR");
    assert_eq!(rows[1].balance, "0.00");
    assert_eq!(rows[2].balance, "-8.60");

    run(&mut app, &["purse", "account", "move", "0", "2"]).unwrap();
    let names: Vec<String> = accounts::rows(&app).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Wallet", "Card", "Cash"]);
    assert_eq!(app.total(), dec!(80.91));

    run(&mut app, &["purse", "account", "rm", "1"]).unwrap();
    assert_eq!(app.total(), dec!(90.91));
    assert!(app.account("Card").is_none());
}

#[test]
fn invalid_account_intents_report_errors() {
    let mut app = setup();
    assert!(run(&mut app, &["purse", "account", "add", "  "]).is_err());
    assert!(run(&mut app, &["purse", "account", "add", "X", "--currency", "JPY"]).is_err());
    assert!(run(&mut app, &["purse", "account", "add", "X", "--balance", "abc"]).is_err());
    assert!(run(&mut app, &["purse", "account", "rm", "0"]).is_err());
    assert!(run(&mut app, &["purse", "account", "move", "0", "1"]).is_err());
    assert!(app.accounts().is_empty());
    assert!(!app.is_dirty());
}

#[test]
fn set_display_currency_and_total_report() {
    let mut app = setup();
    run(&mut app, &["purse", "account", "add", "Cash", "-c", "USD", "-b", "110"]).unwrap();
    run(&mut app, &["purse", "account", "add", "Pounds", "-c", "GBP", "-b", "43"]).unwrap();
    assert_eq!(app.total(), dec!(150));

    run(&mut app, &["purse", "fx", "set-display", "gbp"]).unwrap();
    assert_eq!(app.display_currency(), "GBP");
    assert_eq!(app.total(), dec!(129));

    let report = reports::total_report(&app).unwrap();
    assert_eq!(report.currency, "GBP");
    assert_eq!(report.total, "129.00");
    assert_eq!(report.accounts[0].converted, "86.00");
    assert_eq!(report.accounts[1].converted, "43.00");

    assert!(run(&mut app, &["purse", "fx", "set-display", "XXX"]).is_err());
    assert_eq!(app.display_currency(), "GBP");
    run(&mut app, &["purse", "total", "--json"]).unwrap();
    run(&mut app, &["purse", "fx", "convert", "100", "usd", "eur"]).unwrap();
    run(&mut app, &["purse", "fx", "list"]).unwrap();
}

#[test]
fn doctor_reports_mismatched_balances() {
    let ds = Dataset::from_json(DATASET).unwrap();
    let stored = serde_json::from_str(
        r#"[
        {"name":"Good","currency":"EUR","balance":10,"transactions":[]},
        {"name":"Bad","currency":"EUR","balance":10,"opening":0,"transactions":[
            {"type":"income","amount":5,"comment":"","date":1}]},
        {"name":"Good","currency":"USD","balance":0,"transactions":[]}
    ]"#,
    )
    .unwrap();
    let mut app = App::from_dataset(&ds, Some(stored), None).unwrap();
    let rows = doctor::diagnose(&app).unwrap();
    let kinds: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, vec!["balance_mismatch", "duplicate_name"]);

    let clean = setup();
    assert!(doctor::diagnose(&clean).unwrap().is_empty());
    run(&mut app, &["purse", "doctor"]).unwrap();
}

#[test]
fn display_currency_survives_a_save() {
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let ds = Dataset::from_json(DATASET).unwrap();
    let mut app = db::load_app(&conn, &ds).unwrap();
    run(&mut app, &["purse", "fx", "set-display", "USD"]).unwrap();
    db::save_app(&mut conn, &mut app).unwrap();
    assert_eq!(
        db::load_display_currency(&conn).unwrap().as_deref(),
        Some("USD")
    );
}

#[test]
fn doctor_flags_negative_amounts_and_inferred_openings() {
    let ds = Dataset::from_json(DATASET).unwrap();
    let stored = serde_json::from_str(
        r#"[
        {"name":"Refund","currency":"EUR","balance":-5,"opening":0,"transactions":[
            {"type":"income","amount":-5,"comment":"","date":1}]},
        {"name":"Legacy","currency":"EUR","balance":40,"transactions":[
            {"type":"expenses","amount":10,"comment":"","date":1}]},
        {"name":"Plain","currency":"EUR","balance":0,"transactions":[
            {"type":"income","amount":3,"comment":"","date":2},
            {"type":"expenses","amount":3,"comment":"","date":1}]}
    ]"#,
    )
    .unwrap();
    let app = App::from_dataset(&ds, Some(stored), None).unwrap();
    let rows = doctor::diagnose(&app).unwrap();
    let kinds: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, vec!["unverified_opening", "negative_amount"]);
    assert!(rows[0][1].starts_with("Legacy:"), "{}", rows[0][1]);
    assert!(rows[1][1].starts_with("Refund #0"), "{}", rows[1][1]);
}

#[test]
fn doctor_help_explains_inferred_openings() {
    let mut cmd = cli::build_cli();
    let doctor = cmd.find_subcommand_mut("doctor").unwrap();
    let help = doctor.render_long_help().to_string();
    assert!(help.contains("unverified_opening"), "{}", help);
}
