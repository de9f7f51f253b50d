//! Builders wiring the employee service to its repository adapter.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use employees::domain::EmployeeService;
use employees::domain::ports::EmployeeRepository;
use employees::inbound::http::state::HttpState;
use employees::outbound::memory::InMemoryEmployeeRepository;
use employees::outbound::persistence::DieselEmployeeRepository;

use super::ServerConfig;

fn state_for<R>(repo: R) -> HttpState
where
    R: EmployeeRepository + 'static,
{
    let service = Arc::new(EmployeeService::new(Arc::new(repo)));
    HttpState::new(service.clone(), service)
}

/// Build handler state, using PostgreSQL when a pool is configured and the
/// in-memory repository otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("employee storage: postgres");
            state_for(DieselEmployeeRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; employees are kept in memory and lost on restart");
            state_for(InMemoryEmployeeRepository::new())
        }
    };
    web::Data::new(state)
}
