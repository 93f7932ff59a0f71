//! Integration tests for directory reconciliation over the mock terminal.
//!
//! Each test uses its own terminal address because session gates are
//! process-wide.

use chrono::NaiveDate;
use punchclock_core::{EmployeeId, Privilege, PunchEvent, PunchKind};
use punchclock_directory::{Directory, NewUser, ReconcileError, UserUpdate};
use punchclock_session::{SessionError, SessionManager};
use punchclock_terminal::{DeviceUser, MockTerminal, TerminalConfig};

fn directory(terminal: &MockTerminal, host: &str) -> Directory<MockTerminal> {
    let manager = SessionManager::new(terminal.clone(), TerminalConfig::new(host)).unwrap();
    Directory::new(manager)
}

fn employee(id: &str) -> EmployeeId {
    EmployeeId::new(id).unwrap()
}

fn seed(terminal: &MockTerminal, internal_id: u16, id: &str, name: &str, privilege_code: u8) {
    terminal.seed_user(DeviceUser {
        internal_id,
        employee_id: employee(id),
        name: name.to_string(),
        privilege_code,
        password: String::new(),
        group_id: String::new(),
    });
}

fn punch(id: &str, y: i32, m: u32, d: u32) -> PunchEvent {
    PunchEvent {
        employee_id: employee(id),
        timestamp: NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
        kind: PunchKind::CheckIn,
        status: 1,
    }
}

fn new_user(id: &str, name: &str, privilege: Privilege) -> NewUser {
    NewUser {
        employee_id: employee(id),
        name: name.to_string(),
        password: String::new(),
        privilege,
        internal_id: None,
    }
}

#[tokio::test]
async fn create_returns_refreshed_list() {
    let terminal = MockTerminal::new();
    let directory = directory(&terminal, "dir-create.test");

    let users = directory
        .create_user(new_user("1", "Alice", Privilege::Admin))
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].internal_id, 1);
    assert_eq!(users[0].privilege, Privilege::Admin);

    // The device row carries the canonical admin code.
    let rows = terminal.users_snapshot();
    assert_eq!(rows[0].privilege_code, 14);

    assert_eq!(terminal.disable_count(), 1);
    assert_eq!(terminal.enable_count(), 1);
}

#[tokio::test]
async fn create_duplicate_leaves_table_unchanged() {
    let terminal = MockTerminal::new();
    seed(&terminal, 1, "1", "Alice", 0);
    let directory = directory(&terminal, "dir-duplicate.test");

    let result = directory
        .create_user(new_user("1", "Impostor", Privilege::Standard))
        .await;

    assert!(matches!(result, Err(ReconcileError::DuplicateId { .. })));
    let rows = terminal.users_snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Alice");
    assert!(!terminal.is_disabled());
}

#[tokio::test]
async fn create_assigns_next_free_internal_id() {
    let terminal = MockTerminal::new();
    seed(&terminal, 1, "1", "Alice", 0);
    seed(&terminal, 5, "5", "Eve", 0);
    let directory = directory(&terminal, "dir-next-id.test");

    let users = directory
        .create_user(new_user("7", "Grace", Privilege::Standard))
        .await
        .unwrap();

    let grace = users
        .iter()
        .find(|user| user.employee_id.as_str() == "7")
        .unwrap();
    assert_eq!(grace.internal_id, 6);
}

#[tokio::test]
async fn create_rejects_taken_internal_id() {
    let terminal = MockTerminal::new();
    seed(&terminal, 3, "3", "Carol", 0);
    let directory = directory(&terminal, "dir-id-taken.test");

    let mut new = new_user("4", "Dave", Privilege::Standard);
    new.internal_id = Some(3);
    let result = directory.create_user(new).await;

    assert!(matches!(
        result,
        Err(ReconcileError::InternalIdTaken { internal_id: 3 })
    ));
    assert_eq!(terminal.users_snapshot().len(), 1);
}

#[tokio::test]
async fn list_maps_privileges_and_presents_unknown_names() {
    let terminal = MockTerminal::new();
    seed(&terminal, 1, "1", "", 14);
    seed(&terminal, 2, "2", "Bob", 0);
    let directory = directory(&terminal, "dir-list.test");

    let users = directory.list_users().await.unwrap();

    assert_eq!(users[0].privilege, Privilege::Admin);
    assert_eq!(users[0].display_name(), "Unknown");
    // The stored record keeps its empty name.
    assert_eq!(users[0].name, "");
    assert_eq!(users[1].privilege, Privilege::Standard);
    assert_eq!(users[1].display_name(), "Bob");
}

#[tokio::test]
async fn reads_run_inside_the_bracket() {
    let terminal = MockTerminal::new();
    let directory = directory(&terminal, "dir-read-bracket.test");

    directory.list_users().await.unwrap();

    assert_eq!(terminal.disable_count(), 1);
    assert_eq!(terminal.enable_count(), 1);
    assert_eq!(terminal.disconnect_count(), 1);
}

#[tokio::test]
async fn update_changes_only_the_requested_fields() {
    let terminal = MockTerminal::new();
    seed(&terminal, 4, "4", "Dan", 0);
    let directory = directory(&terminal, "dir-update.test");

    let users = directory
        .update_user(
            &employee("4"),
            UserUpdate {
                name: Some("Daniel".to_string()),
                privilege: Some(Privilege::Admin),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Daniel");
    assert_eq!(users[0].privilege, Privilege::Admin);
    // Internal id survives the rewrite.
    assert_eq!(users[0].internal_id, 4);
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let terminal = MockTerminal::new();
    let directory = directory(&terminal, "dir-update-missing.test");

    let result = directory
        .update_user(&employee("9"), UserUpdate::default())
        .await;

    assert!(matches!(result, Err(ReconcileError::NotFound { .. })));
}

#[tokio::test]
async fn delete_removes_exactly_one_row() {
    let terminal = MockTerminal::new();
    seed(&terminal, 1, "1", "Alice", 0);
    seed(&terminal, 2, "2", "Bob", 0);
    let directory = directory(&terminal, "dir-delete.test");

    let users = directory.delete_user(&employee("1")).await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].employee_id.as_str(), "2");
    assert_eq!(terminal.users_snapshot().len(), 1);
}

#[tokio::test]
async fn delete_missing_user_is_not_found() {
    let terminal = MockTerminal::new();
    seed(&terminal, 1, "1", "Alice", 0);
    let directory = directory(&terminal, "dir-delete-missing.test");

    let result = directory.delete_user(&employee("2")).await;

    assert!(matches!(result, Err(ReconcileError::NotFound { .. })));
    assert_eq!(terminal.users_snapshot().len(), 1);
}

#[tokio::test]
async fn fetch_punches_reflects_the_device_each_time() {
    let terminal = MockTerminal::new();
    terminal.seed_punch(punch("1", 2024, 3, 5));
    terminal.seed_punch(punch("2", 2024, 3, 5));
    let directory = directory(&terminal, "dir-punches.test");

    assert_eq!(directory.fetch_punches().await.unwrap().len(), 2);

    terminal.seed_punch(punch("1", 2024, 3, 6));
    // A fresh retrieval, not an accumulated local log.
    assert_eq!(directory.fetch_punches().await.unwrap().len(), 3);
}

#[tokio::test]
async fn session_failures_keep_their_classification() {
    let terminal = MockTerminal::new();
    terminal.refuse_next_connects(5);
    let directory = directory(&terminal, "dir-unreachable.test");

    let result = directory.list_users().await;

    assert!(matches!(
        result,
        Err(ReconcileError::Session(SessionError::Unreachable { .. }))
    ));
}
