use serde::Serialize;

/// Bonus and tax carry a tag instead of a bare zero so the "no bonus" /
/// "no tax" sentinel never mixes into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TieredAmount {
    Amount(f64),
    // serializes as null
    NotApplicable,
}

impl TieredAmount {
    pub fn from_amount(amount: f64) -> Self {
        if amount == 0.0 {
            TieredAmount::NotApplicable
        } else {
            TieredAmount::Amount(amount)
        }
    }

    /// Sentinel entries contribute zero to column totals.
    pub fn or_zero(self) -> f64 {
        match self {
            TieredAmount::Amount(amount) => amount,
            TieredAmount::NotApplicable => 0.0,
        }
    }
}

/// One computed summary row. Derived fresh on every view render; never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollRow {
    /// 1-based sequence number, stable per render order.
    pub sn: usize,
    pub last_name: String,
    pub first_name: String,
    pub position: String,
    pub rate: f64,
    pub hours_worked: f64,
    pub gross: f64,
    pub bonus: TieredAmount,
    pub sss: f64,
    pub tax: TieredAmount,
    pub pagibig: f64,
    pub total_deduction: f64,
    pub net_pay: f64,
}

/// Column-wise sums across all rows. Only emitted when at least one row
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollTotals {
    pub gross: f64,
    pub bonus: f64,
    pub sss: f64,
    pub tax: f64,
    pub pagibig: f64,
    pub total_deduction: f64,
    pub net_pay: f64,
}
