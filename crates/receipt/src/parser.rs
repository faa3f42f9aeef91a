//! Receipt JSON parsing

use crate::{InvoiceRecord, ReceiptError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a receipt record from JSON string
pub fn parse_record(json: &str) -> Result<InvoiceRecord> {
    serde_json::from_str(json).map_err(|e| ReceiptError::Parse(e.to_string()))
}

/// Parse a receipt record from an already-decoded JSON value
pub fn record_from_value(value: Value) -> Result<InvoiceRecord> {
    serde_json::from_value(value).map_err(|e| ReceiptError::Parse(e.to_string()))
}

/// Read a form number the way the entry form stores it
///
/// Numbers pass through, numeric strings are parsed after trimming, and
/// everything else (empty strings, `null`, garbage) becomes zero.
pub fn value_to_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_number(&value))
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_value_to_number() {
        assert_eq!(value_to_number(&json!(42)), 42.0);
        assert_eq!(value_to_number(&json!(1.5)), 1.5);
        assert_eq!(value_to_number(&json!(" 2500 ")), 2500.0);
        assert_eq!(value_to_number(&json!("")), 0.0);
        assert_eq!(value_to_number(&json!("abc")), 0.0);
        assert_eq!(value_to_number(&json!("inf")), 0.0);
        assert_eq!(value_to_number(&json!(null)), 0.0);
        assert_eq!(value_to_number(&json!(true)), 0.0);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("hello")), "hello");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "");
    }

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "recipientName": "Ana Rojas",
            "recipientTaxId": "9.876.543-2",
            "documentDate": "2024-12-31",
            "comment": "Pago de diciembre",
            "folioNumber": 1600,
            "lineItems": [
                { "code": "GC", "description": "Gasto común", "quantity": 1, "unitPrice": 85000, "discount": 0 }
            ]
        }"#;

        let record = parse_record(json).unwrap();
        assert_eq!(record.recipient_name, "Ana Rojas");
        assert_eq!(record.document_date, "2024-12-31");
        assert_eq!(record.folio_number, 1600);
        assert_eq!(record.line_items.len(), 1);
        assert_eq!(record.line_items[0].description, "Gasto común");
        assert_eq!(record.grand_total(), 85000.0);
    }

    #[test]
    fn test_parse_form_values() {
        // Form inputs arrive as strings, blanks and nulls
        let value = json!({
            "senor": null,
            "rutCliente": 123,
            "lineItems": [
                { "codigo": "A", "detalle": "Arriendo", "cantidad": "2", "precioUnitario": "10000", "recDesc": "" },
                { "codigo": "B", "detalle": "Multa", "cantidad": "x", "precioUnitario": null }
            ]
        });

        let record = record_from_value(value).unwrap();
        assert_eq!(record.recipient_name, "");
        assert_eq!(record.recipient_tax_id, "123");
        assert_eq!(record.folio_number, 0);
        assert_eq!(record.line_items[0].line_total(), 20000.0);
        assert_eq!(record.line_items[1].line_total(), 0.0);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_record("{ not json").unwrap_err();
        assert!(matches!(err, ReceiptError::Parse(_)));
    }
}
