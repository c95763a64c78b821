//! CSV ingestion boundary.
//!
//! Parses uploaded movement sheets into ledger records. Column order follows
//! the warehouse export: document no, date, department, code, name, amount,
//! pack, price, lot no, barcode, expiry date. The header row is skipped.
//! Rows too short to carry an amount are dropped; missing descriptive fields
//! fall back to defaults so downstream consumers always see fully populated
//! records.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{LedgerRecord, MovementKind};

/// Column index of the amount field; rows shorter than this are dropped.
const AMOUNT_COLUMN: usize = 5;

/// Outcome of one CSV import.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Parsed records, ready to push to the store (IDs unassigned)
    pub records: Vec<LedgerRecord>,
    /// Rows dropped as unrecognized or too short
    pub skipped: usize,
}

/// Parse a movement sheet.
///
/// The sign of every amount is forced by `kind`: an IN sheet yields positive
/// quantities, an OUT sheet negative ones, regardless of the sign in the
/// file. `now` supplies the ingestion timestamp and the fallback movement
/// date for rows without one. Malformed rows never abort the import.
pub fn parse_movement_csv(text: &str, kind: MovementKind, now: DateTime<Utc>) -> IngestReport {
    let today = now.date_naive();
    let mut records = Vec::new();
    let mut skipped = 0;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if row.len() <= AMOUNT_COLUMN {
            skipped += 1;
            continue;
        }

        let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");
        let text_field = |idx: usize| {
            let value = field(idx);
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        let amount = field(AMOUNT_COLUMN).parse::<f64>().unwrap_or(0.0) as i64;
        let quantity = match kind {
            MovementKind::In => amount.abs(),
            MovementKind::Out => -amount.abs(),
        };

        records.push(LedgerRecord {
            id: String::new(),
            document_no: text_field(0),
            date: parse_date(field(1)).unwrap_or(today),
            department: text_field(2),
            code: field(3).to_string(),
            name: {
                let name = field(4);
                if name.is_empty() {
                    "Unknown".to_string()
                } else {
                    name.to_string()
                }
            },
            quantity,
            pack: {
                let pack = field(6);
                if pack.is_empty() {
                    "1".to_string()
                } else {
                    pack.to_string()
                }
            },
            price: field(7).parse::<f64>().unwrap_or(0.0),
            lot_no: text_field(8),
            barcode: text_field(9),
            exp_date: parse_date(field(10)),
            timestamp: now.timestamp_millis(),
            kind,
        });
    }

    tracing::debug!(
        parsed = records.len(),
        skipped,
        "movement sheet ingested"
    );

    IngestReport { records, skipped }
}

/// Parse an ISO `YYYY-MM-DD` date field; anything else becomes `None`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap()
    }

    const SHEET: &str = "\
dispno,date,department,code,name,amount,pack,price,lot,barcode,expdate
D001,2024-01-10,IPD,ABC123,Paracetamol 500mg,100,100 TAB,1.25,L1,885000111,2025-06-30
D002,2024-01-12,IPD,XYZ789,Amoxicillin 250mg,40,50 CAP,3.5,L7,885000222,2024-03-01
";

    #[test]
    fn test_in_sheet_parses_positive() {
        let report = parse_movement_csv(SHEET, MovementKind::In, now());
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped, 0);

        let first = &report.records[0];
        assert_eq!(first.document_no, "D001");
        assert_eq!(first.code, "ABC123");
        assert_eq!(first.quantity, 100);
        assert_eq!(first.price, 1.25);
        assert_eq!(first.lot_no, "L1");
        assert_eq!(
            first.exp_date,
            Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        );
        assert_eq!(first.kind, MovementKind::In);
    }

    #[test]
    fn test_out_sheet_forces_negative() {
        let report = parse_movement_csv(SHEET, MovementKind::Out, now());
        assert_eq!(report.records[0].quantity, -100);
        assert_eq!(report.records[1].quantity, -40);
    }

    #[test]
    fn test_short_rows_dropped() {
        let sheet = "\
dispno,date,department,code,name,amount
D001,2024-01-10,IPD
D002,2024-01-10,IPD,ABC123,Paracetamol 500mg,25
";
        let report = parse_movement_csv(sheet, MovementKind::In, now());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.records[0].quantity, 25);
        // columns past the amount are absent: defaults apply
        assert_eq!(report.records[0].pack, "1");
        assert_eq!(report.records[0].lot_no, "-");
        assert!(report.records[0].exp_date.is_none());
    }

    #[test]
    fn test_malformed_fields_default() {
        let sheet = "\
dispno,date,department,code,name,amount,pack,price,lot,barcode,expdate
D001,not-a-date,IPD,ABC123,Paracetamol 500mg,abc,,xyz,L1,,31/12/2025
";
        let report = parse_movement_csv(sheet, MovementKind::In, now());
        let rec = &report.records[0];
        assert_eq!(rec.quantity, 0);
        assert_eq!(rec.price, 0.0);
        assert_eq!(rec.pack, "1");
        assert_eq!(rec.date, now().date_naive());
        assert!(rec.exp_date.is_none());
    }

    #[test]
    fn test_empty_sheet() {
        let report = parse_movement_csv("", MovementKind::In, now());
        assert!(report.records.is_empty());
        assert_eq!(report.skipped, 0);
    }
}
