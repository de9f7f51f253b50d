//! Tests for the employee service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockEmployeeRepository;

#[fixture]
fn candidate() -> Employee {
    Employee::try_from_strings("Jaeyeon", "Cho", "cjyeon1022@gmail.com").expect("valid employee")
}

fn id(raw: i64) -> EmployeeId {
    EmployeeId::new(raw).expect("positive id")
}

#[rstest]
#[tokio::test]
async fn create_employee_saves_when_email_is_free(candidate: Employee) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
    repo.expect_save()
        .times(1)
        .return_once(|employee| Ok(employee.clone().with_id(id(1))));

    let service = EmployeeService::new(Arc::new(repo));
    let stored = service
        .create_employee(candidate.clone())
        .await
        .expect("create succeeds");

    assert_eq!(stored.id(), Some(id(1)));
    assert_eq!(stored.email(), candidate.email());
}

#[rstest]
#[tokio::test]
async fn create_employee_rejects_duplicate_email_without_saving(candidate: Employee) {
    let existing = candidate.clone().with_id(id(3));
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_save().times(0);

    let service = EmployeeService::new(Arc::new(repo));
    let error = service
        .create_employee(candidate)
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.message(),
        "employee already exists with given email: cjyeon1022@gmail.com"
    );
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "email", "code": "duplicate_email" }))
    );
}

#[rstest]
#[tokio::test]
async fn create_employee_maps_storage_unique_violation_to_conflict(candidate: Employee) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_save().return_once(|employee| {
        Err(EmployeeRepositoryError::duplicate_email(
            employee.email().as_ref(),
        ))
    });

    let service = EmployeeService::new(Arc::new(repo));
    let error = service
        .create_employee(candidate)
        .await
        .expect_err("raced insert");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(EmployeeRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(EmployeeRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_employee_maps_lookup_failures(
    candidate: Employee,
    #[case] failure: EmployeeRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Err(failure));
    repo.expect_save().times(0);

    let service = EmployeeService::new(Arc::new(repo));
    let error = service
        .create_employee(candidate)
        .await
        .expect_err("lookup fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_employee_saves_without_duplicate_check(candidate: Employee) {
    let record = candidate.with_id(id(1));
    let expected = record.clone();
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_email().times(0);
    repo.expect_save()
        .withf(move |employee| employee.id() == Some(id(1)))
        .times(1)
        .return_once(|employee| Ok(employee.clone()));

    let service = EmployeeService::new(Arc::new(repo));
    let stored = service
        .update_employee(record)
        .await
        .expect("update succeeds");

    assert_eq!(stored, expected);
}

#[rstest]
#[tokio::test]
async fn delete_employee_forwards_to_repository() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_delete_by_id()
        .with(eq(id(9)))
        .times(1)
        .return_once(|_| Ok(()));

    let service = EmployeeService::new(Arc::new(repo));

    service
        .delete_employee(id(9))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn list_employees_returns_repository_order(candidate: Employee) {
    let second = Employee::try_from_strings("Brin", "Sergey", "x@y.com")
        .expect("valid employee")
        .with_id(id(2));
    let rows = vec![candidate.with_id(id(1)), second];
    let expected = rows.clone();
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_all().return_once(move || Ok(rows));

    let service = EmployeeService::new(Arc::new(repo));
    let listed = service.list_employees().await.expect("list succeeds");

    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn get_employee_returns_none_for_missing_row() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_id()
        .with(eq(id(42)))
        .return_once(|_| Ok(None));

    let service = EmployeeService::new(Arc::new(repo));
    let found = service.get_employee(id(42)).await.expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn get_employee_maps_connection_error() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(EmployeeRepositoryError::connection("pool timed out")));

    let service = EmployeeService::new(Arc::new(repo));
    let error = service.get_employee(id(1)).await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(error.message().contains("pool timed out"));
}
