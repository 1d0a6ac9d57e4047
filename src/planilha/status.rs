use chrono::{Days, NaiveDate};

use super::reader::CellValue;

/// Status derived from one spreadsheet cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    /// A payment was recorded (dash, "OK", or a payment date)
    Paid,
    /// Still open ("PENDENTE" or under negotiation)
    Pending,
    /// Unrecognized content; the cell is skipped with a warning
    Unknown,
}

struct TextRule {
    matches: fn(&str) -> bool,
    verdict: CellStatus,
}

fn is_dash(s: &str) -> bool {
    s == "-"
}

fn contains_ok(s: &str) -> bool {
    s.contains("OK")
}

fn contains_negociacao(s: &str) -> bool {
    s.contains("NEGOCIAÇÃO")
}

fn is_pendente(s: &str) -> bool {
    s == "PENDENTE"
}

fn is_payment_date(s: &str) -> bool {
    parse_text_date(s).is_some()
}

/// Ordered by precedence; the first matching rule wins. Inputs are
/// trimmed and upper-cased before matching.
const TEXT_RULES: &[TextRule] = &[
    TextRule { matches: is_dash, verdict: CellStatus::Paid },
    TextRule { matches: contains_ok, verdict: CellStatus::Paid },
    TextRule { matches: contains_negociacao, verdict: CellStatus::Pending },
    TextRule { matches: is_pendente, verdict: CellStatus::Pending },
    TextRule { matches: is_payment_date, verdict: CellStatus::Paid },
];

/// Derive the candidate status for one status cell.
pub fn derive_status(cell: &CellValue) -> CellStatus {
    match cell {
        CellValue::Blank => CellStatus::Unknown,
        CellValue::Text(text) => {
            let cleaned = text.trim().to_uppercase();
            for rule in TEXT_RULES {
                if (rule.matches)(&cleaned) {
                    return rule.verdict;
                }
            }
            CellStatus::Unknown
        }
        // A raw numeric cell holding an Excel date serial is a payment date
        CellValue::Number(n) => {
            if excel_serial_to_date(*n).is_some() {
                CellStatus::Paid
            } else {
                CellStatus::Unknown
            }
        }
    }
}

/// Parse a date out of a cell, either `dd/mm/yy[yy]` text or an Excel
/// date serial. Used by the seed import to find each plan's first due date.
pub fn parse_cell_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Blank => None,
        CellValue::Text(text) => parse_text_date(&text.trim().to_uppercase()),
        CellValue::Number(n) => excel_serial_to_date(*n),
    }
}

/// `dd/mm/yy` or `dd/mm/yyyy`; two-digit years pivot at 50 (49 → 2049,
/// 50 → 1950).
fn parse_text_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let mut year: i32 = parts[2].trim().parse().ok()?;
    if year < 100 {
        year += if year < 50 { 2000 } else { 1900 };
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Excel date serials count days from 1899-12-30. Serials at or below
/// 10000 (mid-1927) are treated as plain numbers, not dates.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial <= 10_000.0 || !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}
