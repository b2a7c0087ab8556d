//! Display Formatting
//!
//! French labels for bill dates and statuses.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::models::BillStatus;

/// Three-letter French month abbreviations, capitalized
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid bill date: {0:?}")]
pub struct DateError(pub String);

/// `2004-04-04` -> `4 Avr. 04`
pub fn format_date(raw: &str) -> Result<String, DateError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| DateError(raw.to_string()))?;
    let month = MONTHS[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), month, date.year().rem_euclid(100)))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}
