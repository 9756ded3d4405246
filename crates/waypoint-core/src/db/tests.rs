//! Database tests

use super::*;
use crate::models::*;
use crate::store::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (Database, OwnerId, OwnerId) {
    let db = Database::in_memory().unwrap();
    let alice = db.resolve_owner("alice@example.com").unwrap();
    let bob = db.resolve_owner("bob@example.com").unwrap();
    (db, alice, bob)
}

fn card(total: f64, rate: f64) -> NewDebt {
    NewDebt {
        name: "Credit Card".into(),
        total_amount: total,
        current_amount: None,
        interest_rate: rate,
        minimum_payment: 50.0,
        due_date: Some(15),
    }
}

#[test]
fn test_resolve_owner_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let first = db.resolve_owner("Alice@Example.com").unwrap();
    let again = db.resolve_owner("  alice@example.com ").unwrap();
    assert_eq!(first, again);

    let other = db.resolve_owner("bob@example.com").unwrap();
    assert_ne!(first, other);

    assert!(matches!(db.resolve_owner("   "), Err(Error::Validation(_))));
}

#[test]
fn test_schema_has_owner_columns() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    for table in [
        "transactions",
        "debts",
        "assets",
        "goals",
        "bills",
        "consumption_items",
    ] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = 'owner_id'",
                params![table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "{} should be owner scoped", table);
    }
}

#[test]
fn test_transaction_round_trip() {
    let (db, alice, _) = setup();

    let rent = NewTransaction::new(TransactionType::Expense, "Rent", 1_200.0)
        .locked()
        .on(date(2026, 4, 1))
        .with_description("April rent");
    let stored = db.insert_transaction(alice, &rent).unwrap();

    assert!(stored.id > 0);
    assert_eq!(stored.transaction_type, TransactionType::Expense);
    assert_eq!(stored.category, "Rent");
    assert_eq!(stored.amount, 1_200.0);
    assert!(stored.is_locked);
    assert_eq!(stored.recurrence, Recurrence::None);
    assert_eq!(stored.date, date(2026, 4, 1));
    assert_eq!(stored.description, "April rent");
}

#[test]
fn test_transaction_query_filters_and_order() {
    let (db, alice, _) = setup();
    let batch = vec![
        NewTransaction::new(TransactionType::Income, "Salary", 5_000.0).on(date(2026, 3, 1)),
        NewTransaction::new(TransactionType::Expense, "Food", 40.0).on(date(2026, 3, 5)),
        NewTransaction::new(TransactionType::Expense, "Food", 60.0).on(date(2026, 4, 2)),
        NewTransaction::new(TransactionType::DebtPayment, "Card", 300.0).on(date(2026, 4, 3)),
    ];
    assert_eq!(db.insert_transactions(alice, &batch).unwrap(), 4);

    let all = db.find_transactions(alice, &TransactionQuery::new()).unwrap();
    let dates: Vec<NaiveDate> = all.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2026, 3, 1),
            date(2026, 3, 5),
            date(2026, 4, 2),
            date(2026, 4, 3)
        ]
    );

    let march_expenses = db
        .find_transactions(
            alice,
            &TransactionQuery::new()
                .transaction_type(TransactionType::Expense)
                .since(date(2026, 3, 1))
                .until(date(2026, 3, 31)),
        )
        .unwrap();
    assert_eq!(march_expenses.len(), 1);
    assert_eq!(march_expenses[0].amount, 40.0);

    let latest = db
        .find_transactions(alice, &TransactionQuery::new().newest_first().limit(2))
        .unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].transaction_type, TransactionType::DebtPayment);
}

#[test]
fn test_transactions_are_owner_scoped() {
    let (db, alice, bob) = setup();
    let tx = db
        .insert_transaction(
            alice,
            &NewTransaction::new(TransactionType::Income, "Salary", 100.0),
        )
        .unwrap();

    assert!(db
        .find_transactions(bob, &TransactionQuery::new())
        .unwrap()
        .is_empty());
    assert!(!db.delete_transaction(bob, tx.id).unwrap());
    assert_eq!(db.delete_all_transactions(bob).unwrap(), 0);

    assert!(db.delete_transaction(alice, tx.id).unwrap());
    assert!(!db.delete_transaction(alice, tx.id).unwrap());
}

#[test]
fn test_locked_income_is_rejected_by_schema() {
    let (db, alice, _) = setup();
    let bad = NewTransaction::new(TransactionType::Income, "Salary", 10.0).locked();
    assert!(matches!(
        db.insert_transaction(alice, &bad),
        Err(Error::Database(_))
    ));

    let negative = NewTransaction::new(TransactionType::Expense, "Food", -1.0);
    assert!(db.insert_transaction(alice, &negative).is_err());
}

#[test]
fn test_bulk_insert_is_atomic() {
    let (db, alice, _) = setup();
    let batch = vec![
        NewTransaction::new(TransactionType::Expense, "Food", 10.0),
        NewTransaction::new(TransactionType::Income, "Salary", 10.0).locked(),
    ];
    assert!(db.insert_transactions(alice, &batch).is_err());
    assert!(db
        .find_transactions(alice, &TransactionQuery::new())
        .unwrap()
        .is_empty());
}

#[test]
fn test_debt_crud() {
    let (db, alice, bob) = setup();
    let debt = db.insert_debt(alice, &card(5_000.0, 18.0)).unwrap();
    assert_eq!(debt.current_amount, 5_000.0);
    assert_eq!(debt.status, DebtStatus::Active);
    assert_eq!(debt.due_date, Some(15));

    assert!(db.get_debt(bob, debt.id).unwrap().is_none());

    let mut paid = debt.clone();
    paid.status = DebtStatus::PaidOff;
    paid.current_amount = 0.0;
    assert!(db.update_debt(alice, &paid).unwrap());
    assert!(!db.update_debt(bob, &paid).unwrap());

    assert!(db
        .find_debts(alice, Some(DebtStatus::Active))
        .unwrap()
        .is_empty());
    let all = db.find_debts(alice, None).unwrap();
    assert_eq!(all, vec![paid]);

    assert_eq!(db.delete_all_debts(alice).unwrap(), 1);
}

#[test]
fn test_asset_value_update() {
    let (db, alice, bob) = setup();
    let asset = db
        .insert_asset(
            alice,
            &NewAsset {
                name: "Gold coins".into(),
                asset_type: AssetType::Gold,
                value: 2_000.0,
                is_liquid: false,
            },
        )
        .unwrap();
    assert_eq!(asset.asset_type, AssetType::Gold);

    assert!(db.update_asset_value(bob, asset.id, 1.0).unwrap().is_none());
    let updated = db
        .update_asset_value(alice, asset.id, 2_500.0)
        .unwrap()
        .unwrap();
    assert_eq!(updated.value, 2_500.0);

    assert_eq!(db.find_assets(alice).unwrap().len(), 1);
    assert!(db.delete_asset(alice, asset.id).unwrap());
    assert_eq!(db.delete_all_assets(alice).unwrap(), 0);
}

#[test]
fn test_goal_dates_round_trip() {
    let (db, alice, _) = setup();
    let goal = db
        .insert_goal(
            alice,
            &NewGoal {
                title: "House".into(),
                target_amount: 100_000.0,
                saved_amount: 5_000.0,
                deadline: Some(date(2030, 1, 1)),
                priority: GoalPriority::High,
            },
        )
        .unwrap();
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.completed_date, None);

    let mut done = goal.clone();
    done.status = GoalStatus::Completed;
    done.completed_date = Some(date(2029, 6, 30));
    done.saved_amount = 100_000.0;
    assert!(db.update_goal(alice, &done).unwrap());

    let stored = db.get_goal(alice, goal.id).unwrap().unwrap();
    assert_eq!(stored.deadline, Some(date(2030, 1, 1)));
    assert_eq!(stored.completed_date, Some(date(2029, 6, 30)));
    assert_eq!(stored.priority, GoalPriority::High);
    assert_eq!(db.find_goals(alice).unwrap().len(), 1);
}

#[test]
fn test_bills_sorted_by_due_day() {
    let (db, alice, _) = setup();
    for (name, day) in [("Internet", 20), ("Rent", 1), ("Phone", 9)] {
        db.insert_bill(
            alice,
            &NewBill {
                name: name.into(),
                amount: 50.0,
                due_day: day,
                category: None,
            },
        )
        .unwrap();
    }

    let bills = db.find_bills(alice).unwrap();
    let names: Vec<&str> = bills.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Phone", "Internet"]);
    assert!(bills.iter().all(|b| b.category == "Bills"));
}

#[test]
fn test_consumption_item_update() {
    let (db, alice, bob) = setup();
    let input = NewConsumptionItem {
        name: "Shampoo".into(),
        cost: 300.0,
        months: 3,
        monthly_cost: 100.0,
    };
    let item = db.insert_item(alice, &input).unwrap();

    let bigger = NewConsumptionItem {
        name: "Shampoo (large)".into(),
        cost: 600.0,
        months: 4,
        monthly_cost: 150.0,
    };
    assert!(db.update_item(bob, item.id, &bigger).unwrap().is_none());
    let updated = db.update_item(alice, item.id, &bigger).unwrap().unwrap();
    assert_eq!(updated.months, 4);
    assert_eq!(updated.monthly_cost, 150.0);

    assert!(db.get_item(bob, item.id).unwrap().is_none());
    assert!(db.delete_item(alice, item.id).unwrap());
    assert!(db.find_items(alice).unwrap().is_empty());
}

#[test]
fn test_unknown_owner_violates_foreign_key() {
    let db = Database::in_memory().unwrap();
    let tx = NewTransaction::new(TransactionType::Expense, "Food", 1.0);
    assert!(db.insert_transaction(9_999, &tx).is_err());
}
