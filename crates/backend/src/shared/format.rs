/// Formats an integer with a thin space as thousands separator
/// (French convention), e.g. `1234567` -> `"1 234 567"`.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() * 2);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push('\u{202F}');
        }
        result.push(ch);
    }
    result
}

/// Formats an amount with two decimals and a decimal comma, e.g.
/// `1234.5` -> `"1 234,50"`.
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let units = (cents / 100) as usize;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, format_number(units), cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1\u{202F}000");
        assert_eq!(format_number(1234567), "1\u{202F}234\u{202F}567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0,00");
        assert_eq!(format_amount(1234.5), "1\u{202F}234,50");
        assert_eq!(format_amount(-3.456), "-3,46");
    }
}
