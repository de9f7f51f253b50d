//! Driving port for employee reads.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, Error};

/// Read-only use-case port for the employee directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeQuery: Send + Sync {
    /// Every stored employee, unfiltered and unpaginated.
    async fn list_employees(&self) -> Result<Vec<Employee>, Error>;

    /// The employee with `id`, or `None` when no such row exists.
    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, Error>;
}
