//! Driving port for employee mutations.
//!
//! HTTP handlers call [`EmployeeCommand`] to create, update, and delete
//! employees without depending on persistence adapters.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, Error};

/// Use-case port for changing the employee directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeCommand: Send + Sync {
    /// Persist a new employee after checking its email is not already taken.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::Conflict`] when another employee
    /// already holds the candidate's email.
    async fn create_employee(&self, candidate: Employee) -> Result<Employee, Error>;

    /// Persist `employee` as-is. Callers are responsible for having looked up
    /// the target row and for deciding which id the record carries.
    async fn update_employee(&self, employee: Employee) -> Result<Employee, Error>;

    /// Request deletion of `id`; deleting an absent id succeeds.
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), Error>;
}
