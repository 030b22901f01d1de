// src/analysis/format.rs

/// Placeholder shown wherever a value doesn't apply.
pub const PLACEHOLDER: &str = "—";

/// Formats an amount with thousands separators and at most two fraction
/// digits, trailing zeros trimmed (`1155` -> "1,155", `1234.5` -> "1,234.5").
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (whole != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(magnitude) => format!("-${}", magnitude),
        None => format!("${}", amount),
    }
}

/// Replaces every separator character in a category key with a space
/// (`"Imported_Vodka_Sales"` -> `"Imported Vodka Sales"`).
pub fn humanize_key(key: &str, separators: &str) -> String {
    key.chars()
        .map(|c| if separators.contains(c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first character ("week" -> "Week").
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1155.0), "1,155");
        assert_eq!(format_amount(2310.0), "2,310");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(-4200.25), "-4,200.25");
        assert_eq!(format_amount(-0.001), "0");
        assert_eq!(format_amount(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1155.0), "$1,155");
        assert_eq!(format_currency(-12.5), "-$12.5");
        assert_eq!(format_currency(f64::INFINITY), PLACEHOLDER);
    }

    #[test]
    fn test_humanize_key_with_configured_separators() {
        assert_eq!(humanize_key("Imported_Vodka_Sales", "_"), "Imported Vodka Sales");
        assert_eq!(humanize_key("Whiskey", "_"), "Whiskey");
        assert_eq!(humanize_key("cordials-liqueurs", "_"), "cordials-liqueurs");
        assert_eq!(humanize_key("cordials-liqueurs", "_-"), "cordials liqueurs");
        assert_eq!(humanize_key("__Gin__", "_"), "Gin");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("week"), "Week");
        assert_eq!(capitalize(""), "");
    }
}
