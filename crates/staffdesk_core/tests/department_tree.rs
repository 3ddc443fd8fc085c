use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::{
    DepartmentRepository, HierarchyService, HierarchyServiceError, SqliteDepartmentRepository,
};
use std::collections::HashSet;
use uuid::Uuid;

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

#[test]
fn subtree_contains_root_and_all_transitive_children() {
    let conn = setup();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let a = repo.create(None, "Head Office").unwrap();
    let b = repo.create(Some(a.department_uuid), "Engineering").unwrap();
    let c = repo.create(Some(b.department_uuid), "Platform").unwrap();
    let d = repo.create(None, "Unrelated Branch").unwrap();

    let service = HierarchyService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());

    let subtree = service.resolve_subtree(a.department_uuid).unwrap();
    let expected: HashSet<_> = [a.department_uuid, b.department_uuid, c.department_uuid]
        .into_iter()
        .collect();
    assert_eq!(subtree, expected);

    let unrelated = service.resolve_subtree(d.department_uuid).unwrap();
    assert_eq!(unrelated, HashSet::from([d.department_uuid]));
}

#[test]
fn unknown_root_resolves_to_singleton() {
    let conn = setup();
    let service = HierarchyService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());

    let missing = Uuid::new_v4();
    let subtree = service.resolve_subtree(missing).unwrap();
    assert_eq!(subtree, HashSet::from([missing]));
}

#[test]
fn resolution_is_idempotent_without_intervening_writes() {
    let conn = setup();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let root = repo.create(None, "Root").unwrap();
    repo.create(Some(root.department_uuid), "Left").unwrap();
    repo.create(Some(root.department_uuid), "Right").unwrap();

    let service = HierarchyService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());
    let first = service.resolve_subtree(root.department_uuid).unwrap();
    let second = service.resolve_subtree(root.department_uuid).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn injected_cycle_is_detected_instead_of_looping() {
    let conn = setup();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let a = repo.create(None, "A").unwrap();
    let b = repo.create(Some(a.department_uuid), "B").unwrap();

    // Corrupt the forest invariant directly, as only a storage bug could.
    conn.execute(
        "UPDATE departments SET parent_uuid = ?1 WHERE department_uuid = ?2;",
        [b.department_uuid.to_string(), a.department_uuid.to_string()],
    )
    .unwrap();

    let service = HierarchyService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());
    let err = service.resolve_subtree(a.department_uuid).unwrap_err();
    assert!(matches!(err, HierarchyServiceError::CycleDetected(_)));
}
