use crate::{
    auth::auth::AuthUser,
    model::{employee::EmployeeRecord, tables::PayrollTables},
    session::SessionStore,
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

/// Hours arrive as text from the browser form, but plain JSON numbers
/// are accepted too. Both funnel through one parse.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum HoursWorked {
    Number(f64),
    Text(String),
}

impl HoursWorked {
    fn parse(&self) -> Option<f64> {
        match self {
            HoursWorked::Number(n) => Some(*n),
            HoursWorked::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AddEmployee {
    #[schema(example = "Junio")]
    pub last_name: String,

    #[schema(example = "Annielyn")]
    pub first_name: String,

    #[schema(example = "Manager")]
    pub position: String,

    #[schema(example = "100", value_type = String)]
    pub hours_worked: HoursWorked,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<EmployeeRecord>,
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct PositionsResponse {
    #[schema(example = json!(["Manager", "Supervisor", "Employee"]))]
    pub positions: Vec<String>,
}

/// Admission check. A rejected submission reports every failure at once
/// and leaves the session's collection untouched.
fn validate(payload: &AddEmployee, tables: &PayrollTables) -> Result<EmployeeRecord, Vec<String>> {
    let mut errors = Vec::new();

    let last_name = payload.last_name.trim();
    let first_name = payload.first_name.trim();

    if last_name.is_empty() {
        errors.push("Last Name is required.".to_string());
    }
    if first_name.is_empty() {
        errors.push("First Name is required.".to_string());
    }
    if payload.position.is_empty() || !tables.rates.contains(&payload.position) {
        errors.push("Valid Position must be selected.".to_string());
    }

    let hours_worked = match payload.hours_worked.parse() {
        Some(h) if h.is_finite() && h > 0.0 => Some(h),
        _ => {
            errors.push("Hours Worked must be a positive number.".to_string());
            None
        }
    };

    match (errors.is_empty(), hours_worked) {
        (true, Some(hours_worked)) => Ok(EmployeeRecord {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            position: payload.position.clone(),
            hours_worked,
        }),
        _ => Err(errors),
    }
}

/// Add Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = AddEmployee,
    responses(
        (status = 201, description = "Employee admitted", body = Object, example = json!({
            "message": "Employee Annielyn Junio added successfully."
        })),
        (status = 422, description = "Validation failed, collection unchanged", body = Object, example = json!({
            "message": "Failed to add employee.",
            "errors": ["Last Name is required."]
        })),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn add_employee(
    auth: AuthUser,
    store: web::Data<SessionStore>,
    tables: web::Data<PayrollTables>,
    payload: web::Json<AddEmployee>,
) -> actix_web::Result<impl Responder> {
    match validate(&payload, tables.get_ref()) {
        Ok(record) => {
            let full_name = format!("{} {}", record.first_name, record.last_name);

            if !store.push_employee(&auth.session_id, record).await {
                return Ok(HttpResponse::Unauthorized().json(json!({
                    "error": "Session expired or logged out"
                })));
            }

            info!(session_id = %auth.session_id, "Employee added");

            Ok(HttpResponse::Created().json(json!({
                "message": format!("Employee {} added successfully.", full_name)
            })))
        }
        Err(errors) => Ok(HttpResponse::UnprocessableEntity().json(json!({
            "message": "Failed to add employee.",
            "errors": errors
        }))),
    }
}

/// List the session's records in insertion order
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, body = EmployeeListResponse),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    store: web::Data<SessionStore>,
) -> actix_web::Result<impl Responder> {
    let employees = store
        .get(&auth.session_id)
        .await
        .map(|s| s.records())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: employees.len(),
        data: employees,
    }))
}

/// Reset: clear every record in the session
#[utoipa::path(
    delete,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Collection cleared", body = Object, example = json!({
            "message": "Payroll data has been reset."
        })),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn reset_employees(
    auth: AuthUser,
    store: web::Data<SessionStore>,
) -> actix_web::Result<impl Responder> {
    if !store.clear_employees(&auth.session_id).await {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "error": "Session expired or logged out"
        })));
    }

    info!(session_id = %auth.session_id, "Payroll data reset");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Payroll data has been reset."
    })))
}

/// Positions available in the rate table, in configured order
#[utoipa::path(
    get,
    path = "/api/v1/positions",
    responses(
        (status = 200, body = PositionsResponse),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_positions(
    _auth: AuthUser,
    tables: web::Data<PayrollTables>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(PositionsResponse {
        positions: tables.rates.positions(),
    }))
}
