//! The payroll calculator: a pure projection from the session's employee
//! records to summary rows and column totals. Re-run on every render
//! against the current collection; owns no state of its own.

use crate::model::employee::EmployeeRecord;
use crate::model::payroll::{PayrollRow, PayrollTotals, TieredAmount};
use crate::model::tables::{RateTable, TieredTable};

/// SSS contribution, flat percentage of gross (uncapped).
pub const SSS_RATE: f64 = 0.03;
/// Pag-IBIG contribution, flat percentage of gross (uncapped).
pub const PAGIBIG_RATE: f64 = 0.02;

/// Computes one summary row per record, in input order, plus column
/// totals (`None` when there are no records). Unknown positions fall
/// back to a zero rate so the render path never fails.
pub fn calculate_payroll(
    employees: &[EmployeeRecord],
    rates: &RateTable,
    bonus_tiers: &TieredTable,
    tax_tiers: &TieredTable,
) -> (Vec<PayrollRow>, Option<PayrollTotals>) {
    let mut rows = Vec::with_capacity(employees.len());

    for (index, employee) in employees.iter().enumerate() {
        let rate = rates.rate_for(&employee.position).unwrap_or(0.0);
        let gross = rate * employee.hours_worked;

        let bonus = gross * bonus_tiers.rate_for(gross);
        let tax = gross * tax_tiers.rate_for(gross);

        let sss = gross * SSS_RATE;
        let pagibig = gross * PAGIBIG_RATE;

        // Negative tier rates never come out of validated tables, but
        // must not inflate deductions or earnings if they do.
        let total_deduction = sss + pagibig + tax.max(0.0);
        let net_pay = gross + bonus.max(0.0) - total_deduction;

        rows.push(PayrollRow {
            sn: index + 1,
            last_name: employee.last_name.clone(),
            first_name: employee.first_name.clone(),
            position: employee.position.clone(),
            rate,
            hours_worked: employee.hours_worked,
            gross,
            bonus: TieredAmount::from_amount(bonus),
            sss,
            tax: TieredAmount::from_amount(tax),
            pagibig,
            total_deduction,
            net_pay,
        });
    }

    let totals = totals_for(&rows);
    (rows, totals)
}

fn totals_for(rows: &[PayrollRow]) -> Option<PayrollTotals> {
    if rows.is_empty() {
        return None;
    }

    let mut totals = PayrollTotals::default();
    for row in rows {
        totals.gross += row.gross;
        totals.bonus += row.bonus.or_zero();
        totals.sss += row.sss;
        totals.tax += row.tax.or_zero();
        totals.pagibig += row.pagibig;
        totals.total_deduction += row.total_deduction;
        totals.net_pay += row.net_pay;
    }
    Some(totals)
}
