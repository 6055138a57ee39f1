use crate::model::payroll::TieredAmount;

pub const CURRENCY_SYMBOL: &str = "₱";

/// "₱ 1,234.56" — two decimals, comma thousands separators. Negative
/// amounts keep the sign next to the number: "₱ -1,234.56".
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("{} -{}.{}", CURRENCY_SYMBOL, grouped, frac_part)
    } else {
        format!("{} {}.{}", CURRENCY_SYMBOL, grouped, frac_part)
    }
}

/// Formats a tiered amount, or the "-" sentinel when not applicable.
pub fn display_amount(amount: TieredAmount) -> String {
    match amount {
        TieredAmount::Amount(value) => format_currency(value),
        TieredAmount::NotApplicable => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_symbol_and_separators() {
        assert_eq!(format_currency(0.0), "₱ 0.00");
        assert_eq!(format_currency(7.5), "₱ 7.50");
        assert_eq!(format_currency(950.0), "₱ 950.00");
        assert_eq!(format_currency(1234.56), "₱ 1,234.56");
        assert_eq!(format_currency(10_000.0), "₱ 10,000.00");
        assert_eq!(format_currency(1_000_000.0), "₱ 1,000,000.00");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_currency(999.999), "₱ 1,000.00");
        assert_eq!(format_currency(0.005), "₱ 0.01");
    }

    #[test]
    fn negative_amounts_keep_the_sign_on_the_number() {
        assert_eq!(format_currency(-1234.5), "₱ -1,234.50");
    }

    #[test]
    fn sentinel_renders_as_dash() {
        assert_eq!(display_amount(TieredAmount::NotApplicable), "-");
        assert_eq!(display_amount(TieredAmount::Amount(2500.0)), "₱ 2,500.00");
    }
}
