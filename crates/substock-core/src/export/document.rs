//! Printable requisition document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::FinalizedRequisition;

/// Requesting department printed on every document.
const REQUESTING_DEPARTMENT: &str = "Substock IPD";

/// A finalized requisition flattened into print-ready form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequisitionDocument {
    /// Document metadata
    pub metadata: DocumentMetadata,
    /// Numbered order lines
    pub lines: Vec<DocumentLine>,
}

/// Document header fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document identifier
    pub doc_id: String,
    /// Requester display name
    pub requester: String,
    /// Issue date
    pub issued_on: NaiveDate,
    /// Requesting department
    pub department: String,
    /// Number of order lines
    pub line_count: usize,
    /// Total order value
    pub total_value: f64,
}

/// Single order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLine {
    /// 1-based line number
    pub seq: usize,
    /// Drug code
    pub code: String,
    /// Drug display name
    pub name: String,
    /// Pack description
    pub pack: String,
    /// Cabinet label
    pub cabinet: String,
    /// On-hand balance at forecast time
    pub balance: i64,
    /// Ordered quantity
    pub order_qty: u32,
    /// Unit price
    pub unit_price: f64,
    /// Line value: order quantity × unit price
    pub line_total: f64,
}

impl RequisitionDocument {
    /// Flatten a finalized requisition for the print collaborator.
    pub fn from_requisition(requisition: &FinalizedRequisition) -> Self {
        let lines = requisition
            .items
            .iter()
            .enumerate()
            .map(|(idx, line)| DocumentLine {
                seq: idx + 1,
                code: line.item.code.clone(),
                name: line.item.name.clone(),
                pack: line.item.pack.clone(),
                cabinet: line.item.cabinet.clone(),
                balance: line.item.balance,
                order_qty: line.manual_order,
                unit_price: line.item.price,
                line_total: line.line_total(),
            })
            .collect();

        Self {
            metadata: DocumentMetadata {
                doc_id: requisition.doc_id.clone(),
                requester: requisition.requester.clone(),
                issued_on: requisition.issued_on,
                department: REQUESTING_DEPARTMENT.to_string(),
                line_count: requisition.items.len(),
                total_value: requisition.total_value(),
            },
            lines,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("doc_id,requester,issued_on,seq,code,name,pack,cabinet,balance,order_qty,unit_price,line_total\n");

        // Lines
        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&self.metadata.doc_id),
                escape_csv(&self.metadata.requester),
                self.metadata.issued_on,
                line.seq,
                escape_csv(&line.code),
                escape_csv(&line.name),
                escape_csv(&line.pack),
                escape_csv(&line.cabinet),
                line.balance,
                line.order_qty,
                line.unit_price,
                line.line_total,
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
