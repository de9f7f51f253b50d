//! Employee domain service.
//!
//! Implements the [`EmployeeCommand`] and [`EmployeeQuery`] driving ports on
//! top of any [`EmployeeRepository`] adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    EmployeeCommand, EmployeeQuery, EmployeeRepository, EmployeeRepositoryError,
};
use crate::domain::{Employee, EmployeeId, Error};

fn duplicate_email_error(email: &str) -> Error {
    Error::conflict(format!("employee already exists with given email: {email}")).with_details(
        json!({
            "field": "email",
            "code": "duplicate_email",
        }),
    )
}

fn map_repository_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("employee repository unavailable: {message}"))
        }
        EmployeeRepositoryError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
        EmployeeRepositoryError::DuplicateEmail { email } => duplicate_email_error(&email),
    }
}

/// Employee service implementing both driving ports.
#[derive(Clone)]
pub struct EmployeeService<R> {
    employee_repo: Arc<R>,
}

impl<R> EmployeeService<R> {
    /// Create a new service over the employee repository.
    pub fn new(employee_repo: Arc<R>) -> Self {
        Self { employee_repo }
    }
}

#[async_trait]
impl<R> EmployeeCommand for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn create_employee(&self, candidate: Employee) -> Result<Employee, Error> {
        let existing = self
            .employee_repo
            .find_by_email(candidate.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            info!(email = %candidate.email(), "rejected employee with duplicate email");
            return Err(duplicate_email_error(candidate.email().as_ref()));
        }

        let stored = self
            .employee_repo
            .save(&candidate)
            .await
            .map_err(map_repository_error)?;
        debug!(employee_id = ?stored.id().map(EmployeeId::get), "employee created");
        Ok(stored)
    }

    async fn update_employee(&self, employee: Employee) -> Result<Employee, Error> {
        let stored = self
            .employee_repo
            .save(&employee)
            .await
            .map_err(map_repository_error)?;
        debug!(employee_id = ?stored.id().map(EmployeeId::get), "employee updated");
        Ok(stored)
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), Error> {
        self.employee_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        debug!(employee_id = id.get(), "employee delete requested");
        Ok(())
    }
}

#[async_trait]
impl<R> EmployeeQuery for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn list_employees(&self) -> Result<Vec<Employee>, Error> {
        self.employee_repo
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, Error> {
        self.employee_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
