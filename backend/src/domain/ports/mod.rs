//! Domain ports for the hexagonal boundary.
//!
//! - [`EmployeeRepository`] is the driven port implemented by persistence
//!   adapters.
//! - [`EmployeeCommand`] and [`EmployeeQuery`] are the driving ports consumed
//!   by inbound adapters.

mod employee_command;
mod employee_query;
mod employee_repository;

#[cfg(test)]
pub use employee_command::MockEmployeeCommand;
pub use employee_command::EmployeeCommand;
#[cfg(test)]
pub use employee_query::MockEmployeeQuery;
pub use employee_query::EmployeeQuery;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{EmployeeRepository, EmployeeRepositoryError};
