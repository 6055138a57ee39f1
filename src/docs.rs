use crate::api::employee::{AddEmployee, EmployeeListResponse, PositionsResponse};
use crate::api::payroll::{PayrollRowView, PayrollSummaryResponse, PayrollTotalsView};
use crate::auth::handlers::{LoginRequest, LoginResponse};
use crate::model::employee::EmployeeRecord;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Entry API",
        version = "1.0.0",
        description = r#"
## Employee Payroll Entry

This API powers a session-backed **payroll entry form**: log in, add
employee records, and fetch the computed payroll summary.

### 🔹 Key Features
- **Session login**
  - Any non-empty username/password opens a fresh session (no credential store)
- **Employee entry**
  - Add records (name, position, hours worked) with itemized validation
- **Payroll summary**
  - Gross pay, tiered bonus, tiered tax, SSS and Pag-IBIG contributions,
    total deduction, and net pay per employee, plus column totals
- **Session lifecycle**
  - Reset clears the records; logout invalidates the session

### 🔐 Security
Protected endpoints use **JWT Bearer authentication**; each token is
bound to a server-side session that logout or idle expiry removes.

### 📦 Response Format
- JSON-based RESTful responses
- Money columns rendered as "₱ 1,234.56"; "-" marks no bonus / no tax

---
Built with **Rust**, **Actix Web**, **Moka**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,

        crate::api::employee::add_employee,
        crate::api::employee::list_employees,
        crate::api::employee::reset_employees,
        crate::api::employee::list_positions,

        crate::api::payroll::payroll_summary
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            AddEmployee,
            EmployeeRecord,
            EmployeeListResponse,
            PositionsResponse,
            PayrollRowView,
            PayrollTotalsView,
            PayrollSummaryResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session login/logout APIs"),
        (name = "Employee", description = "Employee record entry APIs"),
        (name = "Payroll", description = "Payroll summary APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
