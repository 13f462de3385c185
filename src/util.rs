//! Display formatting helpers

/// Format a USD amount with exactly two decimals, e.g. `$1.47`
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Format the asset price rounded to whole dollars with thousands separators, e.g. `$3,500`
pub fn format_asset_price(price: f64) -> String {
    format!("${}", group_thousands(price.round() as u64))
}

/// Format a fee value the way the backend reports it (`12`, `12.5`)
pub fn format_fee(fee: f64) -> String {
    format!("{fee} Gwei")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
