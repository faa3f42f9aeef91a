//! Chilean peso and date formatting

use crate::words::number_to_words;
use crate::{ChileTextError, Result};
use chrono::NaiveDate;

/// Thousands separator used by the es-CL locale
const THOUSANDS_SEP: char = '.';

/// Prefix for peso amounts
const CURRENCY_PREFIX: &str = "$ ";

/// Chilean text formatting utilities
pub struct ChileFormatter;

impl ChileFormatter {
    /// Spell an amount as Spanish words with the `PESOS` suffix
    pub fn amount_in_words(amount: i64) -> String {
        number_to_words(amount)
    }

    /// Format an amount as a peso string (e.g., "$ 1.234.567")
    pub fn format_clp(amount: f64) -> String {
        format_clp(amount)
    }

    /// Format an ISO date as `DD/MM/YYYY`
    pub fn format_date(iso: &str) -> Result<String> {
        format_date_cl(iso)
    }
}

/// Format an amount as Chilean pesos with zero decimals
///
/// Fractions are rounded half away from zero; non-finite input reads as zero.
///
/// # Examples
/// ```
/// use chile_text::format_clp;
/// assert_eq!(format_clp(1234567.0), "$ 1.234.567");
/// assert_eq!(format_clp(-1500.0), "$ -1.500");
/// ```
pub fn format_clp(amount: f64) -> String {
    format!("{CURRENCY_PREFIX}{}", format_thousands(round_amount(amount)))
}

/// Round a peso amount to an integer, mapping NaN and infinities to zero
pub fn round_amount(amount: f64) -> i64 {
    if amount.is_finite() {
        amount.round() as i64
    } else {
        0
    }
}

/// Group an integer with `.` every three digits
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEP);
        }
        grouped.push(c);
    }

    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`
///
/// The date is taken as a calendar date at local noon, so no timezone offset
/// can move it to a neighbouring day. Empty input formats as empty.
///
/// # Examples
/// ```
/// use chile_text::format_date_cl;
/// assert_eq!(format_date_cl("2024-03-05").unwrap(), "05/03/2024");
/// assert_eq!(format_date_cl("").unwrap(), "");
/// ```
pub fn format_date_cl(iso: &str) -> Result<String> {
    let iso = iso.trim();
    if iso.is_empty() {
        return Ok(String::new());
    }

    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map_err(|e| ChileTextError::InvalidDate(format!("{iso}: {e}")))?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| ChileTextError::InvalidDate(iso.to_string()))?;

    Ok(noon.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(24500), "24.500");
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(-1500), "-1.500");
    }

    #[test]
    fn test_format_clp() {
        assert_eq!(format_clp(0.0), "$ 0");
        assert_eq!(format_clp(1234567.0), "$ 1.234.567");
        assert_eq!(format_clp(5000.0), "$ 5.000");
        assert_eq!(format_clp(-500.0), "$ -500");
    }

    #[test]
    fn test_format_clp_rounds_fractions() {
        assert_eq!(format_clp(1498.5), "$ 1.499");
        assert_eq!(format_clp(1498.4), "$ 1.498");
        assert_eq!(format_clp(-2.5), "$ -3");
    }

    #[test]
    fn test_format_clp_non_finite() {
        assert_eq!(format_clp(f64::NAN), "$ 0");
        assert_eq!(format_clp(f64::INFINITY), "$ 0");
    }

    #[test]
    fn test_format_date_cl() {
        assert_eq!(format_date_cl("2024-03-05").unwrap(), "05/03/2024");
        assert_eq!(format_date_cl("1999-12-31").unwrap(), "31/12/1999");
        assert_eq!(format_date_cl(" 2025-01-22 ").unwrap(), "22/01/2025");
    }

    #[test]
    fn test_format_date_empty() {
        assert_eq!(format_date_cl("").unwrap(), "");
        assert_eq!(format_date_cl("   ").unwrap(), "");
    }

    #[test]
    fn test_format_date_invalid() {
        assert!(format_date_cl("2024-02-30").is_err());
        assert!(format_date_cl("05/03/2024").is_err());
        assert!(format_date_cl("not a date").is_err());
    }

    #[test]
    fn test_formatter_facade() {
        assert_eq!(ChileFormatter::amount_in_words(1000), "MIL PESOS");
        assert_eq!(ChileFormatter::format_clp(24500.0), "$ 24.500");
        assert_eq!(ChileFormatter::format_date("2024-03-05").unwrap(), "05/03/2024");
    }
}
