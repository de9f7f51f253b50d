//! Process-local `EmployeeRepository` used when no database is configured.
//!
//! Mirrors the PostgreSQL adapter's observable behaviour: ids come from a
//! monotonic counter, `email` is unique, and listings are ordered by id.
//! State is lost on restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{EmailAddress, Employee, EmployeeId, PersonName};

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<EmployeeId, Employee>,
    last_id: i64,
}

impl Store {
    fn email_taken_by_other(&self, email: &EmailAddress, id: Option<EmployeeId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email() == email && row.id() != id)
    }

    fn next_id(&mut self) -> Result<EmployeeId, EmployeeRepositoryError> {
        self.last_id += 1;
        EmployeeId::new(self.last_id)
            .map_err(|err| EmployeeRepositoryError::query(format!("id sequence exhausted: {err}")))
    }
}

/// In-memory employee storage guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    store: Mutex<Store>,
}

impl InMemoryEmployeeRepository {
    /// Create an empty repository whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError> {
        let mut store = self.lock();
        if store.email_taken_by_other(employee.email(), employee.id()) {
            return Err(EmployeeRepositoryError::duplicate_email(
                employee.email().as_ref(),
            ));
        }

        let id = match employee.id() {
            Some(id) => {
                // Keep the counter ahead of explicitly keyed rows.
                store.last_id = store.last_id.max(id.get());
                id
            }
            None => store.next_id()?,
        };
        let stored = employee.clone().with_id(id);
        store.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(self
            .lock()
            .rows
            .values()
            .find(|row| row.email() == email)
            .cloned())
    }

    async fn find_by_name(
        &self,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(self
            .lock()
            .rows
            .values()
            .find(|row| row.first_name() == first_name && row.last_name() == last_name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<(), EmployeeRepositoryError> {
        self.lock().rows.remove(&id);
        Ok(())
    }
}
