use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single payroll entry as admitted from the form. Immutable for the
/// lifetime of the session; removed only by reset or session end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "last_name": "Junio",
        "first_name": "Annielyn",
        "position": "Manager",
        "hours_worked": 100.0
    })
)]
pub struct EmployeeRecord {
    #[schema(example = "Junio")]
    pub last_name: String,

    #[schema(example = "Annielyn")]
    pub first_name: String,

    #[schema(example = "Manager")]
    pub position: String,

    #[schema(example = 100.0)]
    pub hours_worked: f64,
}
