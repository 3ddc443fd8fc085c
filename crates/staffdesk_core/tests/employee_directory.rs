use chrono::NaiveDate;
use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::model::employee::EmployeeValidationError;
use staffdesk_core::{
    Department, DepartmentRepository, Employee, EmployeeRepository, EmployeeService,
    EmployeeServiceError, EventKind, EventRepository, Position, PositionRepository, RepoError,
    SqliteDepartmentRepository, SqliteEmployeeRepository, SqliteEventRepository,
    SqlitePositionRepository,
};
use staffdesk_core::EmployeeEvent;
use uuid::Uuid;

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

fn seed_org(conn: &rusqlite::Connection) -> (Department, Position) {
    let department = SqliteDepartmentRepository::try_new(conn)
        .unwrap()
        .create(None, "Sales")
        .unwrap();
    let position = SqlitePositionRepository::try_new(conn)
        .unwrap()
        .create("Manager")
        .unwrap();
    (department, position)
}

fn sample_employee(department: &Department, position: &Position, last_name: &str) -> Employee {
    Employee::new(
        department.department_uuid,
        position.position_uuid,
        last_name,
        "Olga",
        "+7-495-000-40-04",
        "o.sample@example.com",
        "5-501",
    )
}

fn service(
    conn: &rusqlite::Connection,
) -> EmployeeService<
    SqliteEmployeeRepository<'_>,
    SqliteEventRepository<'_>,
    SqliteDepartmentRepository<'_>,
> {
    EmployeeService::new(
        SqliteEmployeeRepository::try_new(conn).unwrap(),
        SqliteEventRepository::try_new(conn).unwrap(),
        SqliteDepartmentRepository::try_new(conn).unwrap(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_and_get_round_trips_all_fields() {
    let conn = setup();
    let (department, position) = seed_org(&conn);
    let service = service(&conn);

    let mut employee = sample_employee(&department, &position, "Smirnova");
    employee.middle_name = Some("Igorevna".to_string());
    employee.date_of_birth = NaiveDate::from_ymd_opt(1990, 2, 11);
    employee.additional_info = Some("speaks three languages".to_string());

    let id = service.create_employee(&employee).unwrap();
    let loaded = service.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded, employee);
}

#[test]
fn invalid_email_is_rejected_on_create() {
    let conn = setup();
    let (department, position) = seed_org(&conn);
    let service = service(&conn);

    let mut employee = sample_employee(&department, &position, "Kuznetsov");
    employee.corporate_email = "broken-address".to_string();

    let err = service.create_employee(&employee).unwrap_err();
    assert!(matches!(
        err,
        EmployeeServiceError::Repo(RepoError::Validation(
            EmployeeValidationError::InvalidEmail(_)
        ))
    ));
}

#[test]
fn update_of_unknown_employee_is_rejected() {
    let conn = setup();
    let (department, position) = seed_org(&conn);
    let service = service(&conn);

    let employee = sample_employee(&department, &position, "Ghost");
    let err = service.update_employee(&employee).unwrap_err();
    assert!(matches!(
        err,
        EmployeeServiceError::Repo(RepoError::EmployeeNotFound(id))
            if id == employee.employee_uuid
    ));
}

#[test]
fn update_replaces_fields() {
    let conn = setup();
    let (department, position) = seed_org(&conn);
    let service = service(&conn);

    let mut employee = sample_employee(&department, &position, "Orlova");
    service.create_employee(&employee).unwrap();

    employee.cabinet = "6-602".to_string();
    employee.mobile_phone = Some("+7-916-000-00-01".to_string());
    service.update_employee(&employee).unwrap();

    let loaded = service.get_employee(employee.employee_uuid).unwrap().unwrap();
    assert_eq!(loaded.cabinet, "6-602");
    assert_eq!(loaded.mobile_phone.as_deref(), Some("+7-916-000-00-01"));
}

#[test]
fn listing_scopes_to_subtree_only_when_requested() {
    let conn = setup();
    let departments = SqliteDepartmentRepository::try_new(&conn).unwrap();
    let root = departments.create(None, "Company").unwrap();
    let child = departments
        .create(Some(root.department_uuid), "Regional Office")
        .unwrap();
    let position = SqlitePositionRepository::try_new(&conn)
        .unwrap()
        .create("Clerk")
        .unwrap();
    let service = service(&conn);

    let at_root = sample_employee(&root, &position, "Root");
    let at_child = sample_employee(&child, &position, "Child");
    service.create_employee(&at_root).unwrap();
    service.create_employee(&at_child).unwrap();

    let today = date(2024, 6, 1);
    let direct = service
        .list_by_department(root.department_uuid, false, today)
        .unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].employee_uuid, at_root.employee_uuid);

    let scoped = service
        .list_by_department(root.department_uuid, true, today)
        .unwrap();
    assert_eq!(scoped.len(), 2);
}

#[test]
fn recently_terminated_employees_stay_visible_for_thirty_days() {
    let conn = setup();
    let (department, position) = seed_org(&conn);
    let employees = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let recent = sample_employee(&department, &position, "Recent");
    let old = sample_employee(&department, &position, "Longgone");
    employees.create(&recent).unwrap();
    employees.create(&old).unwrap();

    let today = date(2024, 6, 30);
    employees
        .set_employment_end(recent.employee_uuid, date(2024, 6, 20))
        .unwrap();
    employees
        .set_employment_end(old.employee_uuid, date(2024, 5, 10))
        .unwrap();

    let visible = service
        .list_by_department(department.department_uuid, false, today)
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].employee_uuid, recent.employee_uuid);
}

#[test]
fn get_employee_with_events_orders_by_start_date() {
    let conn = setup();
    let (department, position) = seed_org(&conn);
    let events = SqliteEventRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let employee = sample_employee(&department, &position, "Scheduled");
    service.create_employee(&employee).unwrap();

    events
        .insert(&EmployeeEvent::new(
            employee.employee_uuid,
            EventKind::Training,
            date(2024, 9, 2),
            date(2024, 9, 6),
            None,
        ))
        .unwrap();
    events
        .insert(&EmployeeEvent::new(
            employee.employee_uuid,
            EventKind::Leave,
            date(2024, 7, 1),
            date(2024, 7, 14),
            Some("summer vacation".to_string()),
        ))
        .unwrap();

    let (loaded, listed) = service
        .get_employee_with_events(employee.employee_uuid)
        .unwrap();
    assert_eq!(loaded.employee_uuid, employee.employee_uuid);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].kind, EventKind::Leave);
    assert_eq!(listed[1].kind, EventKind::Training);
}

#[test]
fn get_employee_with_events_rejects_unknown_id() {
    let conn = setup();
    seed_org(&conn);
    let service = service(&conn);

    let missing = Uuid::new_v4();
    let err = service.get_employee_with_events(missing).unwrap_err();
    assert!(matches!(err, EmployeeServiceError::EmployeeNotFound(id) if id == missing));
}
