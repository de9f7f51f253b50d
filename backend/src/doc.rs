//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the employee and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep utoipa
//! out of the domain types. Swagger UI serves it in debug builds.

use crate::inbound::http::employees::EmployeeRequestBody;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee directory API",
        description = "CRUD over employee records with a unique email per employee."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(EmployeeSchema, EmployeeRequestBody, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "employees", description = "Employee records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
