use api_types::income::{IncomeKind, IncomeNew};
use chrono::{DateTime, Utc};

use crate::error::{ClientError, Result};

/// Recurrence marker stored on recurring entries.
pub const MONTHLY: &str = "MONTHLY";

/// Validates a raw amount string from an input field.
///
/// Rejects anything that is not a finite, strictly positive number — this
/// runs before any request is built, so a bad amount never reaches the
/// backend.
pub fn parse_amount(input: &str) -> Result<f64> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ClientError::validation("Please enter a valid amount"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ClientError::validation("Please enter a valid amount"));
    }
    Ok(amount)
}

/// Builds a creation payload from validated form input.
///
/// The entry is dated "now" (the backend does not assign income dates) and
/// recurring entries carry the `MONTHLY` pattern; non-recurring entries omit
/// the field entirely.
pub fn entry(
    email: &str,
    amount_input: &str,
    kind: IncomeKind,
    is_recurring: bool,
    now: DateTime<Utc>,
) -> Result<IncomeNew> {
    let amount = parse_amount(amount_input)?;
    Ok(IncomeNew {
        email: email.to_string(),
        amount,
        date: now,
        is_recurring,
        kind,
        recurrence_pattern: is_recurring.then(|| MONTHLY.to_string()),
    })
}
