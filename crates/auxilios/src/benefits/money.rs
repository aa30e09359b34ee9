use rust_decimal::{Decimal, RoundingStrategy};

/// A rate as a percentage for display, `0.7` becoming `70`. Saturates instead of
/// overflowing.
pub fn percent(rate: Decimal) -> Decimal {
    rate.checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::MAX)
        .normalize()
}

/// Render an amount the way Brazilian forms show it: `R$ 1.412,00`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents}")
}
