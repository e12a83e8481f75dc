//! Currency formatting
//!
//! Amounts are shown with no decimal places, Indian digit grouping
//! (`1,50,000`) and a currency symbol. INR is assumed when the data names
//! no currency.

/// Currency used when the data does not specify one
pub const DEFAULT_CURRENCY: &str = "INR";

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("JP¥"),
        "CNY" => Some("CN¥"),
        "AUD" => Some("A$"),
        "CAD" => Some("CA$"),
        _ => None,
    }
}

/// Group an integer digit string the Indian way: last three, then pairs
fn group_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Format an amount in the given currency (default INR), zero decimals
pub fn format_money(amount: f64, currency: Option<&str>) -> String {
    let code = currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let prefix = match symbol(&code) {
        Some(sym) => sym.to_string(),
        None => format!("{}\u{a0}", code),
    };

    if amount.is_nan() {
        return format!("{}NaN", prefix);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", sign, prefix);
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}{}{}", sign, prefix, group_digits(&digits))
}
