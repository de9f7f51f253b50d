//! Domain primitives, ports, and services.
//!
//! Purpose: define the employee entity and the use cases inbound adapters
//! drive, independently of HTTP and storage.
//!
//! Public surface:
//! - Employee (alias to `employee::Employee`) with its validated parts.
//! - Error (alias to `error::Error`) and ErrorCode, the transport-agnostic
//!   failure payload.
//! - TraceId, the per-request correlation identifier.
//! - EmployeeService, the implementation of the driving ports.

pub mod employee;
pub mod employee_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::employee::{
    EmailAddress, Employee, EmployeeId, EmployeeValidationError, FIELD_MAX, NameKind, PersonName,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use employees::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
