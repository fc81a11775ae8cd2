//! Display formatting for calculator output
//!
//! Amounts are shown as whole US dollars with thousands separators,
//! e.g. `$1,234,568` or `-$12,500`.

/// Format an amount as whole-dollar USD
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }

    // f64::round rounds half away from zero
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a decimal rate as a percentage with two places (0.079 -> "7.90%")
pub fn format_percent(rate: f64) -> String {
    if !rate.is_finite() {
        return "N/A".to_string();
    }
    format!("{:.2}%", rate * 100.0)
}
