//! Conversions between human-readable amounts and base units.

use alloy::primitives::{utils, U256};

/// Format a U256 value with decimals to a human-readable string.
///
/// Trailing fraction zeros are dropped ("0.01", not "0.010000000000000000").
pub fn format_units(value: U256, decimals: u8) -> String {
    match utils::format_units(value, decimals) {
        Ok(formatted) if formatted.contains('.') => {
            formatted.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        Ok(formatted) => formatted,
        Err(_) => value.to_string(),
    }
}

/// Parse a human-readable decimal amount string to U256 with decimals.
///
/// Only plain decimal digits with at most one `.` are accepted; radix
/// prefixes, separators and signs are rejected. Fraction digits beyond
/// `decimals` are truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction)
    {
        return Err(format!("Invalid amount: {amount}"));
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let fraction = &fraction[..fraction.len().min(decimals as usize)];
    let normalized =
        if fraction.is_empty() { integer.to_string() } else { format!("{integer}.{fraction}") };

    utils::parse_units(&normalized, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|e| format!("Invalid amount {amount}: {e}"))
}
