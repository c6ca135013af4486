//! Incoming top-up webhook payload.
//!
//! Every field is optional and untyped: the payload is forwarded, not validated.
//! A missing field travels into the ledger row as an empty cell and into the
//! message text as `undefined`.

use serde::Serialize;
use serde_json::{Map, Value};

/// A completed top-up transaction as reported by the provider callback.
///
/// # JSON Example
///
/// ```json
/// {
///   "transactionId": "TXN1",
///   "status": "SUCCESSFUL",
///   "amount": 100,
///   "operatorName": "MTN",
///   "recipientPhone": "+233200000000"
/// }
/// ```
///
/// Built from a JSON object by key only (see [`TransactionEvent::from_fields`]);
/// positional payloads are not accepted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvent {
    /// Provider transaction identifier
    pub transaction_id: Option<Value>,

    /// Outcome label, e.g. "SUCCESSFUL" or "FAILED"
    pub status: Option<Value>,

    /// Top-up amount, number or string
    pub amount: Option<Value>,

    /// Mobile operator name
    pub operator_name: Option<Value>,

    /// Recipient phone number, E.164 expected but not checked
    pub recipient_phone: Option<Value>,
}

impl TransactionEvent {
    /// Pick the five payload fields out of a JSON object. Other keys are ignored.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            transaction_id: fields.get("transactionId").cloned(),
            status: fields.get("status").cloned(),
            amount: fields.get("amount").cloned(),
            operator_name: fields.get("operatorName").cloned(),
            recipient_phone: fields.get("recipientPhone").cloned(),
        }
    }
}

/// Render a payload field for message text.
///
/// Strings are used verbatim and a missing field becomes `undefined`.
/// Numbers print the way a JavaScript template would: integral floats lose
/// their fractional part (`100.0` -> `100`).
pub fn display_field(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn picks_camel_case_fields_by_key() {
        let event = TransactionEvent::from_fields(&fields(json!({
            "transactionId": "TXN1",
            "status": "SUCCESSFUL",
            "amount": 100,
            "operatorName": "MTN",
            "recipientPhone": "+233200000000",
            "customIdentifier": "ignored"
        })));

        assert_eq!(event.transaction_id, Some(json!("TXN1")));
        assert_eq!(event.amount, Some(json!(100)));
        assert_eq!(event.recipient_phone, Some(json!("+233200000000")));
    }

    #[test]
    fn empty_object_leaves_every_field_missing() {
        let event = TransactionEvent::from_fields(&Map::new());
        assert!(event.transaction_id.is_none());
        assert!(event.recipient_phone.is_none());
    }

    #[test]
    fn display_field_renders_like_template_interpolation() {
        assert_eq!(display_field(None), "undefined");
        assert_eq!(display_field(Some(&Value::Null)), "null");
        assert_eq!(display_field(Some(&json!("MTN"))), "MTN");
        assert_eq!(display_field(Some(&json!(100))), "100");
        assert_eq!(display_field(Some(&json!(12.5))), "12.5");
        assert_eq!(display_field(Some(&json!(true))), "true");
    }

    #[test]
    fn integral_floats_print_without_fraction() {
        assert_eq!(display_field(Some(&json!(100.0))), "100");
        assert_eq!(display_field(Some(&json!(-5.0))), "-5");
        assert_eq!(display_field(Some(&json!(-0.0))), "0");
        assert_eq!(display_field(Some(&json!(0.5))), "0.5");
    }
}
