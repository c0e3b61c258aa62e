//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_goals().unwrap().is_empty());
        assert!(db.list_transactions().unwrap().is_empty());
        assert!(!db.is_encrypted());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('goals') WHERE name IN ('id', 'name', 'target', 'current', 'deadline')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 5, "goals table should have 5 expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('transactions') WHERE name IN ('id', 'amount', 'category', 'date')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 4, "transactions table should have 4 expected columns");
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fintrack.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new_unencrypted(path).unwrap();
            db.add_goal(&NewGoal::new("Car", 12000.0, 2000.0, "2030-01-01"))
                .unwrap();
        }

        let reopened = Database::new_unencrypted(path).unwrap();
        assert_eq!(reopened.count_goals().unwrap(), 1);
    }

    #[test]
    fn test_goal_crud() {
        let db = Database::in_memory().unwrap();

        let car = db
            .add_goal(&NewGoal::new("New car", 12000.0, 2000.0, "2030-01-01"))
            .unwrap();
        assert!(car.id > 0);
        let phone = db
            .add_goal(&NewGoal::new("Phone", 900.0, 0.0, "2025-05-05"))
            .unwrap();

        let goals = db.list_goals().unwrap();
        assert_eq!(goals, vec![car.clone(), phone]);

        let fetched = db.get_goal(car.id).unwrap().unwrap();
        assert_eq!(fetched.name, "New car");
        assert_eq!(fetched.target, 12000.0);
        assert_eq!(fetched.deadline, "2030-01-01");

        assert!(db.get_goal(9999).unwrap().is_none());
    }

    #[test]
    fn test_goal_validation() {
        let db = Database::in_memory().unwrap();

        let zero_target = db.add_goal(&NewGoal::new("Bad", 0.0, 0.0, "2030-01-01"));
        assert!(matches!(zero_target, Err(Error::InvalidData(_))));

        let negative_current = db.add_goal(&NewGoal::new("Bad", 10.0, -1.0, "2030-01-01"));
        assert!(matches!(negative_current, Err(Error::InvalidData(_))));

        let nan_target = db.add_goal(&NewGoal::new("Bad", f64::NAN, 0.0, "2030-01-01"));
        assert!(matches!(nan_target, Err(Error::InvalidData(_))));

        assert_eq!(db.count_goals().unwrap(), 0);
    }

    #[test]
    fn test_goal_keeps_malformed_deadline() {
        let db = Database::in_memory().unwrap();
        let goal = db
            .add_goal(&NewGoal::new("Someday", 500.0, 0.0, "someday"))
            .unwrap();
        assert_eq!(db.get_goal(goal.id).unwrap().unwrap().deadline, "someday");
    }

    #[test]
    fn test_transaction_crud() {
        let db = Database::in_memory().unwrap();
        let today = day(2024, 3, 10);

        let rent = db
            .add_transaction_on(&NewTransaction::new(850.0, Category::Rent), today)
            .unwrap();
        assert_eq!(rent.date, today);

        let dated = db
            .add_transaction_on(
                &NewTransaction::new(42.5, Category::Kitchen).on(day(2024, 2, 1)),
                today,
            )
            .unwrap();
        assert_eq!(dated.date, day(2024, 2, 1));

        let all = db.list_transactions().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, Category::Rent);
        assert_eq!(all[1].amount, 42.5);

        let fetched = db.get_transaction(dated.id).unwrap().unwrap();
        assert_eq!(fetched, dated);
    }

    #[test]
    fn test_transaction_rejects_non_finite_amount() {
        let db = Database::in_memory().unwrap();
        let result =
            db.add_transaction_on(&NewTransaction::new(f64::INFINITY, Category::Other), day(2024, 1, 1));
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert_eq!(db.count_transactions().unwrap(), 0);
    }

    #[test]
    fn test_recent_transactions() {
        let db = Database::in_memory().unwrap();
        let today = day(2024, 3, 10);
        for i in 1..=8 {
            db.add_transaction_on(&NewTransaction::new(i as f64, Category::Other), today)
                .unwrap();
        }

        let recent = db.recent_transactions(5).unwrap();
        let amounts: Vec<f64> = recent.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![4.0, 5.0, 6.0, 7.0, 8.0]);

        assert_eq!(db.recent_transactions(50).unwrap().len(), 8);
        assert!(db.recent_transactions(0).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_reads_as_other() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO transactions (amount, category, date) VALUES (?1, ?2, ?3)",
            params![12.0, "Mutfak", "2024-01-02"],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO transactions (amount, category, date) VALUES (?1, ?2, ?3)",
            params![3.0, "Groceries & more", "2024-01-03"],
        )
        .unwrap();
        drop(conn);

        let all = db.list_transactions().unwrap();
        assert_eq!(all[0].category, Category::Kitchen);
        assert_eq!(all[1].category, Category::Other);
    }

    #[test]
    fn test_unreadable_dates_are_skipped() {
        let db = Database::in_memory().unwrap();
        db.add_transaction_on(&NewTransaction::new(10.0, Category::Rent), day(2024, 1, 2))
            .unwrap();
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO transactions (amount, category, date) VALUES (?1, ?2, ?3)",
            params![99.0, "Other", "02/01/2024"],
        )
        .unwrap();
        let bad_id = conn.last_insert_rowid();
        drop(conn);
        db.add_transaction_on(&NewTransaction::new(5.0, Category::Kitchen), day(2024, 1, 3))
            .unwrap();

        let amounts: Vec<f64> = db
            .list_transactions()
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![10.0, 5.0]);
        assert_eq!(db.recent_transactions(2).unwrap().len(), 1);
        assert!(db.get_transaction(bad_id).unwrap().is_none());
        assert_eq!(db.count_transactions().unwrap(), 3);

        // Reports still build over the readable rows
        let report = crate::reports::Reporter::new(&db).report().unwrap();
        assert_eq!(report.total_expenses, 15.0);
    }

    #[test]
    fn test_clear_all() {
        let db = Database::in_memory().unwrap();
        db.add_goal(&NewGoal::new("Car", 1.0, 0.0, "2030-01-01"))
            .unwrap();
        db.add_transaction_on(&NewTransaction::new(1.0, Category::Other), day(2024, 1, 1))
            .unwrap();

        db.clear_all().unwrap();
        assert_eq!(db.count_goals().unwrap(), 0);
        assert_eq!(db.count_transactions().unwrap(), 0);
    }
}
