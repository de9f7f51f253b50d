//! Employee HTTP handlers.
//!
//! ```text
//! POST   /api/employees
//! GET    /api/employees
//! GET    /api/employees/{id}
//! PUT    /api/employees/{id}
//! DELETE /api/employees/{id}
//! ```
//!
//! A missing employee on get or update is answered with `404` and an empty
//! body rather than an error payload. The update response echoes the record
//! rebuilt from the request body, so its `id` is always `null`.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    EmailAddress, Employee, EmployeeId, EmployeeValidationError, Error, NameKind, PersonName,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Plain-text body returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Employee deleted success!";

/// Request payload for create and update.
///
/// Fields are optional at the serde level so a missing field is reported
/// with its name instead of a generic parse failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequestBody {
    /// Accepted for compatibility and ignored; ids come from storage or the
    /// path.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[schema(example = "Jaeyeon")]
    pub first_name: Option<String>,
    #[serde(default)]
    #[schema(example = "Cho")]
    pub last_name: Option<String>,
    #[serde(default)]
    #[schema(example = "cjyeon1022@gmail.com")]
    pub email: Option<String>,
}

fn missing_field(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn field_error(field: &'static str, err: EmployeeValidationError) -> Error {
    let code = match err {
        EmployeeValidationError::NonPositiveId => "invalid_id",
        EmployeeValidationError::NameTooLong { .. }
        | EmployeeValidationError::EmailTooLong { .. } => "too_long",
        EmployeeValidationError::InvalidEmail => "invalid_email",
        EmployeeValidationError::EmptyFirstName
        | EmployeeValidationError::EmptyLastName
        | EmployeeValidationError::EmptyEmail => "empty",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Build an unsaved employee from the body, discarding any supplied id.
fn parse_employee(body: EmployeeRequestBody) -> Result<Employee, Error> {
    let EmployeeRequestBody {
        id,
        first_name,
        last_name,
        email,
    } = body;
    if let Some(ignored) = id {
        debug!(ignored, "discarding caller-supplied employee id");
    }
    let first_name = first_name.ok_or_else(|| missing_field("firstName"))?;
    let last_name = last_name.ok_or_else(|| missing_field("lastName"))?;
    let email = email.ok_or_else(|| missing_field("email"))?;

    let first_name = PersonName::new(NameKind::First, first_name)
        .map_err(|err| field_error("firstName", err))?;
    let last_name =
        PersonName::new(NameKind::Last, last_name).map_err(|err| field_error("lastName", err))?;
    let email = EmailAddress::new(email).map_err(|err| field_error("email", err))?;
    Ok(Employee::new(first_name, last_name, email))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeRequestBody,
    responses(
        (status = 201, description = "Employee created", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRequestBody>,
) -> ApiResult<HttpResponse> {
    let candidate = parse_employee(payload.into_inner())?;
    let stored = state.employees.create_employee(candidate).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// List every employee.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [EmployeeSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Employee>>> {
    let employees = state.employees_query.list_employees().await?;
    Ok(web::Json(employees))
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeSchema),
        (status = 400, description = "Id is not an integer", body = ErrorSchema),
        (status = 404, description = "No such employee; empty body")
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    // Non-positive ids are never assigned by storage.
    let Ok(id) = EmployeeId::new(path.into_inner()) else {
        return Ok(not_found());
    };
    let response = match state.employees_query.get_employee(id).await? {
        Some(employee) => HttpResponse::Ok().json(employee),
        None => not_found(),
    };
    Ok(response)
}

/// Replace an employee's names and email.
///
/// The record is rebuilt from the body, stored under the path id, and echoed
/// back without an id.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    request_body = EmployeeRequestBody,
    responses(
        (status = 200, description = "Employee updated; `id` is null", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such employee; empty body"),
        (status = 409, description = "Email held by another employee", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<EmployeeRequestBody>,
) -> ApiResult<HttpResponse> {
    let Ok(id) = EmployeeId::new(path.into_inner()) else {
        return Ok(not_found());
    };
    if state.employees_query.get_employee(id).await?.is_none() {
        return Ok(not_found());
    }

    let rebuilt = parse_employee(payload.into_inner())?;
    state
        .employees
        .update_employee(rebuilt.clone().with_id(id))
        .await?;
    Ok(HttpResponse::Ok().json(rebuilt))
}

/// Delete an employee. Succeeds whether or not the id exists.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Deletion requested", body = String, content_type = "text/plain"),
        (status = 400, description = "Id is not an integer", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    if let Ok(id) = EmployeeId::new(path.into_inner()) {
        state.employees.delete_employee(id).await?;
    }
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(DELETED_MESSAGE))
}

/// Register the employee routes on a scope mounted at `/api/employees`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_employee)
        .service(list_employees)
        .service(get_employee)
        .service(update_employee)
        .service(delete_employee);
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
