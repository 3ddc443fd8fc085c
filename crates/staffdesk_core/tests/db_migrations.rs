use staffdesk_core::db::migrations::latest_version;
use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::EventKind;

#[test]
fn fresh_database_is_migrated_to_latest_version() {
    let conn = open_db_in_memory().unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn migrations_create_all_core_tables() {
    let conn = open_db_in_memory().unwrap();

    for table in [
        "departments",
        "positions",
        "employees",
        "event_types",
        "employee_events",
        "working_calendar",
    ] {
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "missing table `{table}`");
    }
}

#[test]
fn event_types_seed_matches_kind_mappings() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn
        .prepare("SELECT category_id, name FROM event_types ORDER BY category_id;")
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut seeded = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        let category_id: i64 = row.get(0).unwrap();
        let name: String = row.get(1).unwrap();
        seeded.push((category_id, name));
    }

    assert_eq!(seeded.len(), 3);
    for (category_id, name) in seeded {
        let kind = EventKind::from_category_id(category_id).unwrap();
        assert_eq!(kind.db_name(), name);
    }
}

#[test]
fn reopening_an_up_to_date_database_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let before: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();

    // Applying migrations again must not change anything.
    let mut conn = conn;
    staffdesk_core::db::migrations::apply_migrations(&mut conn).unwrap();
    let after: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(before, after);
}
