use chrono::NaiveDate;
use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::{
    CalendarRepository, DepartmentRepository, Employee, EmployeeId, EmployeeRepository, EventKind,
    EventService, EventServiceError, PositionRepository, SqliteCalendarRepository,
    SqliteDepartmentRepository, SqliteEmployeeRepository, SqliteEventRepository,
    SqlitePositionRepository,
};

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

fn seed_employee(conn: &rusqlite::Connection) -> EmployeeId {
    let department = SqliteDepartmentRepository::try_new(conn)
        .unwrap()
        .create(None, "Support")
        .unwrap();
    let position = SqlitePositionRepository::try_new(conn)
        .unwrap()
        .create("Agent")
        .unwrap();
    let employee = Employee::new(
        department.department_uuid,
        position.position_uuid,
        "Sidorova",
        "Elena",
        "+7-495-000-20-02",
        "e.sidorova@example.com",
        "1-105",
    );
    SqliteEmployeeRepository::try_new(conn)
        .unwrap()
        .create(&employee)
        .unwrap()
}

fn service(
    conn: &rusqlite::Connection,
) -> EventService<
    SqliteEmployeeRepository<'_>,
    SqliteEventRepository<'_>,
    SqliteCalendarRepository<'_>,
> {
    EventService::new(
        SqliteEmployeeRepository::try_new(conn).unwrap(),
        SqliteEventRepository::try_new(conn).unwrap(),
        SqliteCalendarRepository::try_new(conn).unwrap(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn day_off_over_default_working_days_is_accepted() {
    let conn = setup();
    let employee = seed_employee(&conn);
    let service = service(&conn);

    service
        .create_event(
            employee,
            EventKind::DayOff,
            date(2024, 4, 1),
            date(2024, 4, 3),
            None,
        )
        .unwrap();
    assert_eq!(service.list_events(employee).unwrap().len(), 1);
}

#[test]
fn day_off_spanning_a_non_working_override_is_rejected() {
    let conn = setup();
    let employee = seed_employee(&conn);

    let calendar = SqliteCalendarRepository::try_new(&conn).unwrap();
    calendar.set_override(date(2024, 4, 2), false).unwrap();

    let service = service(&conn);
    let err = service
        .create_event(
            employee,
            EventKind::DayOff,
            date(2024, 4, 1),
            date(2024, 4, 3),
            None,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        EventServiceError::NonWorkingDay(day) if day == date(2024, 4, 2)
    ));
    assert!(service.list_events(employee).unwrap().is_empty());
}

#[test]
fn earliest_violating_date_is_the_one_reported() {
    let conn = setup();
    let employee = seed_employee(&conn);

    let calendar = SqliteCalendarRepository::try_new(&conn).unwrap();
    calendar.set_override(date(2024, 4, 4), false).unwrap();
    calendar.set_override(date(2024, 4, 2), false).unwrap();

    let service = service(&conn);
    let err = service
        .create_event(
            employee,
            EventKind::DayOff,
            date(2024, 4, 1),
            date(2024, 4, 5),
            None,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        EventServiceError::NonWorkingDay(day) if day == date(2024, 4, 2)
    ));
}

#[test]
fn explicit_working_override_is_accepted() {
    let conn = setup();
    let employee = seed_employee(&conn);

    let calendar = SqliteCalendarRepository::try_new(&conn).unwrap();
    calendar.set_override(date(2024, 4, 6), true).unwrap();

    let service = service(&conn);
    service
        .create_event(
            employee,
            EventKind::DayOff,
            date(2024, 4, 6),
            date(2024, 4, 6),
            None,
        )
        .unwrap();
}

#[test]
fn calendar_check_applies_only_to_day_off() {
    let conn = setup();
    let employee = seed_employee(&conn);

    let calendar = SqliteCalendarRepository::try_new(&conn).unwrap();
    calendar.set_override(date(2024, 8, 14), false).unwrap();

    let service = service(&conn);
    service
        .create_event(
            employee,
            EventKind::Leave,
            date(2024, 8, 12),
            date(2024, 8, 16),
            None,
        )
        .unwrap();
    service
        .create_event(
            employee,
            EventKind::Training,
            date(2024, 8, 14),
            date(2024, 8, 14),
            None,
        )
        .unwrap();
}

#[test]
fn override_round_trips_through_repository() {
    let conn = setup();
    let calendar = SqliteCalendarRepository::try_new(&conn).unwrap();

    assert_eq!(calendar.find_override(date(2024, 1, 1)).unwrap(), None);

    calendar.set_override(date(2024, 1, 1), false).unwrap();
    assert_eq!(
        calendar.find_override(date(2024, 1, 1)).unwrap(),
        Some(false)
    );

    calendar.set_override(date(2024, 1, 1), true).unwrap();
    assert_eq!(
        calendar.find_override(date(2024, 1, 1)).unwrap(),
        Some(true)
    );
}
