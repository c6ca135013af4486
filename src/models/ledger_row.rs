//! Spreadsheet row written for every received transaction.
//!
//! The column names and their order are relied on by reporting built on top
//! of the sheet.

use serde::Serialize;
use serde_json::Value;

/// Canonical column order of the transaction log sheet.
pub const LEDGER_COLUMNS: [&str; 6] = ["TransactionID", "Status", "Amount", "Operator", "Phone", "Date"];

/// One row of the transaction log.
///
/// Payload values are forwarded as-is; `Date` is the ISO 8601 time the
/// webhook was processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    #[serde(rename = "TransactionID", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Value>,

    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,

    #[serde(rename = "Operator", skip_serializing_if = "Option::is_none")]
    pub operator: Option<Value>,

    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,

    #[serde(rename = "Date")]
    pub date: String,
}

impl LedgerRow {
    /// Value of a single column, `None` for unknown column names.
    pub fn column(&self, name: &str) -> Option<Value> {
        match name {
            "TransactionID" => self.transaction_id.clone(),
            "Status" => self.status.clone(),
            "Amount" => self.amount.clone(),
            "Operator" => self.operator.clone(),
            "Phone" => self.phone.clone(),
            "Date" => Some(Value::String(self.date.clone())),
            _ => None,
        }
    }

    /// Cells for this row laid out under the given header row.
    ///
    /// Columns are matched by (trimmed) header name. Headers without a
    /// matching column, missing values and nulls become empty cells. Arrays
    /// and objects are written as their JSON text.
    pub fn cells_for(&self, headers: &[String]) -> Vec<Value> {
        headers
            .iter()
            .map(|header| match self.column(header.trim()) {
                None | Some(Value::Null) => Value::String(String::new()),
                Some(v @ (Value::Array(_) | Value::Object(_))) => Value::String(v.to_string()),
                Some(v) => v,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> LedgerRow {
        LedgerRow {
            transaction_id: Some(json!("TXN1")),
            status: Some(json!("SUCCESSFUL")),
            amount: Some(json!(100)),
            operator: Some(json!("MTN")),
            phone: None,
            date: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn cells_follow_canonical_header_order() {
        let headers: Vec<String> = LEDGER_COLUMNS.iter().map(|c| c.to_string()).collect();

        assert_eq!(
            row().cells_for(&headers),
            vec![
                json!("TXN1"),
                json!("SUCCESSFUL"),
                json!(100),
                json!("MTN"),
                json!(""),
                json!("2026-01-01T00:00:00.000Z"),
            ]
        );
    }

    #[test]
    fn cells_follow_sheet_header_order_and_ignore_unknown_columns() {
        let headers = vec![
            "Date".to_string(),
            " Amount ".to_string(),
            "Notes".to_string(),
            "TransactionID".to_string(),
        ];

        assert_eq!(
            row().cells_for(&headers),
            vec![json!("2026-01-01T00:00:00.000Z"), json!(100), json!(""), json!("TXN1")]
        );
    }

    #[test]
    fn structured_values_are_written_as_json_text() {
        let mut row = row();
        row.amount = Some(json!({"value": 5}));
        row.status = Some(Value::Null);

        let cells = row.cells_for(&["Amount".to_string(), "Status".to_string()]);
        assert_eq!(cells[0], json!(r#"{"value":5}"#));
        assert_eq!(cells[1], json!(""));
    }

    #[test]
    fn serializes_with_sheet_column_names() {
        let value = serde_json::to_value(row()).unwrap();

        assert_eq!(
            value,
            json!({
                "TransactionID": "TXN1",
                "Status": "SUCCESSFUL",
                "Amount": 100,
                "Operator": "MTN",
                "Date": "2026-01-01T00:00:00.000Z"
            })
        );
    }
}
