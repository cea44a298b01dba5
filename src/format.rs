fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `1234.5` with `$` becomes `$1,234.50`; negatives become `-$...`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        format_with_commas(cents / 100),
        cents % 100
    )
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(1234.56, "$"), "$1,234.56");
        assert_eq!(format_currency(-500.0, "$"), "-$500.00");
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(1_000_000.99, "€"), "€1,000,000.99");
        assert_eq!(format_currency(42.1, "$"), "$42.10");
    }

    #[test]
    fn tiny_negatives_do_not_render_minus_zero() {
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }

    #[test]
    fn plain_amounts_use_two_decimals() {
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_percent(33.333), "33.3%");
    }
}
