//! CLI command tests

use std::io::Write;

use clap::Parser;
use waypoint_core::db::Database;

use crate::cli::{Cli, Commands, ReportKind};
use crate::commands;

fn csv_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_global_flags_and_defaults() {
    let cli = Cli::try_parse_from(["waypoint", "serve", "--no-encrypt"]).unwrap();
    assert_eq!(cli.db.to_str(), Some("waypoint.db"));
    assert!(cli.no_encrypt);
    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(!no_auth);
        }
        _ => panic!("expected serve"),
    }
}

#[test]
fn test_report_arguments() {
    let cli = Cli::try_parse_from([
        "waypoint",
        "--db",
        "other.db",
        "report",
        "debts",
        "--user",
        "me@example.com",
        "--extra",
        "250",
    ])
    .unwrap();
    assert_eq!(cli.db.to_str(), Some("other.db"));
    match cli.command {
        Commands::Report { kind, user, extra } => {
            assert_eq!(kind, ReportKind::Debts);
            assert_eq!(user, "me@example.com");
            assert_eq!(extra, Some(250.0));
        }
        _ => panic!("expected report"),
    }

    assert!(Cli::try_parse_from(["waypoint", "report", "budget", "--user", "x"]).is_err());
    assert!(Cli::try_parse_from(["waypoint", "import", "--file", "a.csv"]).is_err());
}

// ========== Command Tests ==========

#[test]
fn test_import_file() {
    let db = Database::in_memory().unwrap();
    let csv = csv_fixture(
        "type,category,amount,date,description\n\
         INCOME,Salary,4000,2026-01-01,January\n\
         EXPENSE,Rent,1500,2026-01-02,\n\
         LOAN,Bank,100,2026-01-03,bad type\n",
    );

    let report = commands::import_file(&db, csv.path(), "me@example.com").unwrap();
    assert_eq!(report.success_count, 2);
    assert_eq!(report.error_count, 1);
    assert!(report.errors[0].message.contains("LOAN"));
}

#[test]
fn test_import_missing_file() {
    let db = Database::in_memory().unwrap();
    let missing = std::path::Path::new("/nonexistent/statement.csv");
    assert!(commands::import_file(&db, missing, "me@example.com").is_err());
}

#[test]
fn test_build_reports() {
    let db = Database::in_memory().unwrap();
    let csv = csv_fixture("type,category,amount\nINCOME,Salary,1000\nEXPENSE,Food,100\n");
    commands::import_file(&db, csv.path(), "me@example.com").unwrap();

    let dash = commands::build_report(&db, ReportKind::Dashboard, "me@example.com", None).unwrap();
    assert_eq!(dash["summary"]["balance"], 900.0);

    let worth = commands::build_report(&db, ReportKind::Networth, "me@example.com", None).unwrap();
    assert_eq!(worth["netWorth"], 0.0);

    let fire = commands::build_report(&db, ReportKind::Fire, "me@example.com", None).unwrap();
    assert!(fire["metrics"].is_object());

    let debts = commands::build_report(&db, ReportKind::Debts, "me@example.com", Some(50.0)).unwrap();
    assert_eq!(debts["extraMonthlyPayment"], 50.0);

    let advice = commands::build_report(&db, ReportKind::Advice, "me@example.com", None).unwrap();
    assert!(advice["status"].is_string());

    // Reports are scoped to the named user
    let other = commands::build_report(&db, ReportKind::Dashboard, "you@example.com", None).unwrap();
    assert_eq!(other["summary"]["balance"], 0.0);
}

#[test]
fn test_negative_extra_is_rejected() {
    let db = Database::in_memory().unwrap();
    assert!(commands::build_report(&db, ReportKind::Debts, "me@example.com", Some(-1.0)).is_err());
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cli.db");

    commands::open_db(&path, true).unwrap();
    assert!(path.exists());
    commands::cmd_init(&path, true).unwrap();
}
