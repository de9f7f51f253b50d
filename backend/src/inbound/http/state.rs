//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeeCommand, EmployeeQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeCommand>,
    pub employees_query: Arc<dyn EmployeeQuery>,
}

impl HttpState {
    /// Bundle the employee command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use employees::domain::EmployeeService;
    /// use employees::inbound::http::state::HttpState;
    /// use employees::outbound::memory::InMemoryEmployeeRepository;
    ///
    /// let service = Arc::new(EmployeeService::new(Arc::new(
    ///     InMemoryEmployeeRepository::new(),
    /// )));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// ```
    pub fn new(
        employees: Arc<dyn EmployeeCommand>,
        employees_query: Arc<dyn EmployeeQuery>,
    ) -> Self {
        Self {
            employees,
            employees_query,
        }
    }
}
