//! Amount formatting for ledger entries.
//!
//! Amounts are whole won (`i64`). Display uses comma thousands separators;
//! input parsing accepts what users paste back in.
//!
//! ```
//! use ledger_navigator::format::{format_number, format_won, parse_amount};
//!
//! assert_eq!(format_number(1234567), "1,234,567");
//! assert_eq!(format_won(-5000), "-5,000원");
//! assert_eq!(parse_amount("₩ 12,000"), Some(12000));
//! ```

/// Insert thousands separators.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Amount with the won suffix.
pub fn format_won(value: i64) -> String {
    format!("{}원", format_number(value))
}

/// Amount with an explicit sign, as shown in transaction lists
/// (`+12,000원` income, `-3,500원` expense, `0원`).
pub fn format_signed_won(value: i64) -> String {
    if value > 0 {
        format!("+{}", format_won(value))
    } else {
        format_won(value)
    }
}

/// Parse user input into an amount.
///
/// Separators, whitespace, `원` and `₩` are ignored. Returns `None` for
/// anything else, for empty input, and on overflow.
pub fn parse_amount(input: &str) -> Option<i64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, ',' | '원' | '₩') && !c.is_whitespace())
        .collect();

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
