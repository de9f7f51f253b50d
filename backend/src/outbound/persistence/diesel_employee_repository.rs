//! PostgreSQL-backed `EmployeeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{EmailAddress, Employee, EmployeeId, PersonName};

use super::models::{EmployeeRow, EmployeeUpdate, KeyedEmployeeRow, NewEmployeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::employees;

/// Diesel-backed implementation of the `EmployeeRepository` port.
///
/// `save` inserts records without an id and upserts on the primary key for
/// records that carry one. The `employees_email_key` constraint is the only
/// duplicate guard here.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmployeeRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EmployeeRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => EmployeeRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            EmployeeRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EmployeeRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => EmployeeRepositoryError::query("database error"),
        _ => EmployeeRepositoryError::query("database error"),
    }
}

/// Writes additionally translate unique violations, which can only come from
/// the email constraint once keyed rows upsert on the primary key.
fn map_write_error(error: diesel::result::Error, email: &EmailAddress) -> EmployeeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                "employee write hit unique constraint"
            );
            EmployeeRepositoryError::duplicate_email(email.as_ref())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_employee(row: EmployeeRow) -> Result<Employee, EmployeeRepositoryError> {
    let EmployeeRow {
        id,
        first_name,
        last_name,
        email,
    } = row;
    let id = EmployeeId::new(id)
        .map_err(|err| EmployeeRepositoryError::query(format!("invalid employee id: {err}")))?;
    Employee::try_from_strings(first_name, last_name, email)
        .map(|employee| employee.with_id(id))
        .map_err(|err| {
            EmployeeRepositoryError::query(format!("corrupted employee {id} in database: {err}"))
        })
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let first_name = employee.first_name().as_ref();
        let last_name = employee.last_name().as_ref();
        let email = employee.email().as_ref();

        let row: EmployeeRow = match employee.id() {
            None => {
                let new_row = NewEmployeeRow {
                    first_name,
                    last_name,
                    email,
                };
                diesel::insert_into(employees::table)
                    .values(&new_row)
                    .returning(EmployeeRow::as_returning())
                    .get_result::<EmployeeRow>(&mut conn)
                    .await
            }
            Some(id) => {
                let keyed_row = KeyedEmployeeRow {
                    id: id.get(),
                    first_name,
                    last_name,
                    email,
                };
                let update = EmployeeUpdate {
                    first_name,
                    last_name,
                    email,
                };
                diesel::insert_into(employees::table)
                    .values(&keyed_row)
                    .on_conflict(employees::id)
                    .do_update()
                    .set(&update)
                    .returning(EmployeeRow::as_returning())
                    .get_result::<EmployeeRow>(&mut conn)
                    .await
            }
        }
        .map_err(|err| map_write_error(err, employee.email()))?;

        row_to_employee(row)
    }

    async fn find_by_id(
        &self,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EmployeeRow> = employees::table
            .filter(employees::id.eq(id.get()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_employee).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EmployeeRow> = employees::table
            .filter(employees::email.eq(email.as_ref()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_employee).transpose()
    }

    async fn find_by_name(
        &self,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EmployeeRow> = employees::table
            .filter(employees::first_name.eq(first_name.as_ref()))
            .filter(employees::last_name.eq(last_name.as_ref()))
            .order(employees::id.asc())
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_employee).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EmployeeRow> = employees::table
            .order(employees::id.asc())
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_employee).collect()
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<(), EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(employees::table.filter(employees::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        log_delete(id, deleted);
        Ok(())
    }
}

fn log_delete(id: EmployeeId, deleted: usize) {
    debug!(employee_id = id.get(), deleted, "employee delete executed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    fn delete_log_uses_the_employee_id_field() {
        let captured = CapturedLogs::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            log_delete(EmployeeId::new(7).expect("positive id"), 1);
        });

        let output = String::from_utf8(captured.0.lock().expect("log buffer").clone())
            .expect("utf-8 log output");
        assert!(output.contains("\"employee_id\":7"), "log line: {output}");
        assert!(!output.contains("\"id\":7"), "log line: {output}");
    }

    fn email() -> EmailAddress {
        EmailAddress::new("cjyeon1022@gmail.com").expect("valid email")
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, EmployeeRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(DieselError::NotFound);

        assert!(matches!(repo_err, EmployeeRepositoryError::Query { .. }));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_string()),
        );

        assert!(matches!(
            map_diesel_error(diesel_err),
            EmployeeRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn unique_violation_on_write_maps_to_duplicate_email() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_string()),
        );

        let repo_err = map_write_error(diesel_err, &email());

        assert_eq!(
            repo_err,
            EmployeeRepositoryError::duplicate_email("cjyeon1022@gmail.com")
        );
    }

    #[rstest]
    fn unique_violation_on_read_stays_a_query_error() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );

        assert!(matches!(
            map_diesel_error(diesel_err),
            EmployeeRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn corrupted_row_is_reported_as_query_error() {
        let row = EmployeeRow {
            id: 4,
            first_name: String::new(),
            last_name: "Cho".to_owned(),
            email: "cjyeon1022@gmail.com".to_owned(),
        };

        let repo_err = row_to_employee(row).expect_err("empty first name");

        assert!(repo_err.to_string().contains("corrupted employee 4"));
    }

    #[rstest]
    fn valid_row_converts_with_id() {
        let row = EmployeeRow {
            id: 1,
            first_name: "Jaeyeon".to_owned(),
            last_name: "Cho".to_owned(),
            email: "cjyeon1022@gmail.com".to_owned(),
        };

        let employee = row_to_employee(row).expect("valid row");

        assert_eq!(employee.id().map(EmployeeId::get), Some(1));
        assert_eq!(employee.email(), &email());
    }
}
