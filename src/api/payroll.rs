use crate::{
    auth::auth::AuthUser,
    calc::calculate_payroll,
    model::{
        payroll::{PayrollRow, PayrollTotals},
        tables::PayrollTables,
    },
    session::SessionStore,
    utils::format::{display_amount, format_currency},
};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

/// One rendered row of the summary table. Money columns carry the
/// currency symbol; bonus and tax show "-" when not applicable.
#[derive(Serialize, ToSchema)]
pub struct PayrollRowView {
    #[schema(example = 1)]
    pub sn: usize,
    #[schema(example = "Junio")]
    pub last_name: String,
    #[schema(example = "Annielyn")]
    pub first_name: String,
    #[schema(example = "Manager")]
    pub position: String,
    #[schema(example = "₱ 500.00")]
    pub rate: String,
    #[schema(example = 20.0)]
    pub hours_worked: f64,
    #[schema(example = "₱ 10,000.00")]
    pub gross: String,
    #[schema(example = "₱ 2,500.00")]
    pub bonus: String,
    #[schema(example = "₱ 300.00")]
    pub sss: String,
    #[schema(example = "₱ 2,500.00")]
    pub tax: String,
    #[schema(example = "₱ 200.00")]
    pub pagibig: String,
    #[schema(example = "₱ 3,000.00")]
    pub total_deduction: String,
    #[schema(example = "₱ 9,500.00")]
    pub net_pay: String,
}

impl From<PayrollRow> for PayrollRowView {
    fn from(row: PayrollRow) -> Self {
        Self {
            sn: row.sn,
            last_name: row.last_name,
            first_name: row.first_name,
            position: row.position,
            rate: format_currency(row.rate),
            hours_worked: row.hours_worked,
            gross: format_currency(row.gross),
            bonus: display_amount(row.bonus),
            sss: format_currency(row.sss),
            tax: display_amount(row.tax),
            pagibig: format_currency(row.pagibig),
            total_deduction: format_currency(row.total_deduction),
            net_pay: format_currency(row.net_pay),
        }
    }
}

/// Rendered totals row. Sentinel entries counted as zero in the bonus
/// and tax columns, so both always render numerically here.
#[derive(Serialize, ToSchema)]
pub struct PayrollTotalsView {
    pub gross: String,
    pub bonus: String,
    pub sss: String,
    pub tax: String,
    pub pagibig: String,
    pub total_deduction: String,
    #[schema(example = "₱ 9,500.00")]
    pub net_pay: String,
}

impl From<PayrollTotals> for PayrollTotalsView {
    fn from(totals: PayrollTotals) -> Self {
        Self {
            gross: format_currency(totals.gross),
            bonus: format_currency(totals.bonus),
            sss: format_currency(totals.sss),
            tax: format_currency(totals.tax),
            pagibig: format_currency(totals.pagibig),
            total_deduction: format_currency(totals.total_deduction),
            net_pay: format_currency(totals.net_pay),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PayrollSummaryResponse {
    pub rows: Vec<PayrollRowView>,
    /// Absent when there are no rows.
    pub totals: Option<PayrollTotalsView>,
}

/// Payroll summary, recomputed from the session's records on every call
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    responses(
        (status = 200, body = PayrollSummaryResponse),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn payroll_summary(
    auth: AuthUser,
    store: web::Data<SessionStore>,
    tables: web::Data<PayrollTables>,
) -> actix_web::Result<impl Responder> {
    let employees = store
        .get(&auth.session_id)
        .await
        .map(|s| s.records())
        .unwrap_or_default();

    let (rows, totals) = calculate_payroll(&employees, &tables.rates, &tables.bonus, &tables.tax);

    Ok(HttpResponse::Ok().json(PayrollSummaryResponse {
        rows: rows.into_iter().map(Into::into).collect(),
        totals: totals.map(Into::into),
    }))
}
