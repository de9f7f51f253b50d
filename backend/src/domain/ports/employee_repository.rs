//! Driven port for employee persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Employee, EmployeeId, PersonName};

/// Persistence errors raised by employee repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeRepositoryError {
    /// Repository connection could not be established.
    #[error("employee repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("employee repository query failed: {message}")]
    Query { message: String },
    /// The storage unique constraint on `email` rejected a write.
    #[error("employee email already stored: {email}")]
    DuplicateEmail { email: String },
}

impl EmployeeRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Unique-constraint rejection for `email`.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Durable mapping from identifier to employee record.
///
/// Adapters apply no business rules. In particular `save` performs no
/// application-level duplicate check; the storage constraint on `email` is
/// the only guard at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert the record when it has no id, otherwise update the row with
    /// that id in place (inserting it if the row has gone). Returns the stored
    /// record with its id populated.
    async fn save(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError>;

    /// Fetch an employee by identifier.
    async fn find_by_id(
        &self,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Fetch the employee holding `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Fetch the lowest-id employee with exactly this first and last name.
    async fn find_by_name(
        &self,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Return every stored employee in ascending id order.
    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError>;

    /// Remove the row with `id`. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: EmployeeId) -> Result<(), EmployeeRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_email_message_names_the_email() {
        let err = EmployeeRepositoryError::duplicate_email("ada@example.com");
        assert_eq!(
            err.to_string(),
            "employee email already stored: ada@example.com"
        );
    }

    #[rstest]
    fn connection_and_query_errors_are_distinct() {
        assert_ne!(
            EmployeeRepositoryError::connection("down"),
            EmployeeRepositoryError::query("down")
        );
    }

    #[rstest]
    #[case(
        EmployeeRepositoryError::connection("pool closed"),
        EmployeeRepositoryError::Connection { message: "pool closed".to_owned() },
        "employee repository connection failed: pool closed"
    )]
    #[case(
        EmployeeRepositoryError::query(String::from("syntax error")),
        EmployeeRepositoryError::Query { message: "syntax error".to_owned() },
        "employee repository query failed: syntax error"
    )]
    fn constructors_build_the_matching_variant(
        #[case] built: EmployeeRepositoryError,
        #[case] expected: EmployeeRepositoryError,
        #[case] rendered: &str,
    ) {
        assert_eq!(built.to_string(), rendered);
        assert_eq!(built, expected);
    }
}
