//! APIレスポンスパーサー
//!
//! 画像解析APIのレスポンスからJSONを抽出し、レシート配列としてパースする

use crate::error::{Error, Result};
use crate::types::ReceiptRecord;
use serde::Deserialize;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. 生の {...} オブジェクト
/// 4. エラー
///
/// # Examples
/// ```
/// use tip_receipts_common::extract_json;
///
/// let response = "[{\"tip\": \"$2.00\"}]";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("tip"));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    for (open, close) in [('[', ']'), ('{', '}')] {
        if let (Some(start), Some(end)) = (response.find(open), response.rfind(close)) {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON found in response".into()))
}

/// オブジェクトで包まれたレスポンス
#[derive(Deserialize)]
#[serde(untagged)]
enum ReceiptPayload {
    List(Vec<ReceiptRecord>),
    Wrapped {
        #[serde(alias = "results", alias = "records")]
        receipts: Vec<ReceiptRecord>,
    },
    Single(ReceiptRecord),
}

/// 単一オブジェクトをレシートとみなすためのキー
const RECEIPT_KEYS: &[&str] = &[
    "receipts",
    "results",
    "records",
    "id",
    "customerName",
    "customer_name",
    "checkNumber",
    "check_number",
    "date",
    "time",
    "amount",
    "tip",
    "total",
    "paymentType",
    "payment_type",
    "signed",
    "imageUrl",
    "image_url",
    "confidence",
];

/// 画像解析APIのレスポンスをレシート配列にパースする
///
/// 配列・`{"receipts": [...]}`・単一オブジェクトのいずれも受け付ける。
/// レシートのキーを1つも持たないオブジェクト（`{"error": ...}` など）はエラー。
pub fn parse_receipt_response(response: &str) -> Result<Vec<ReceiptRecord>> {
    let json_str = extract_json(response)?;
    let value: serde_json::Value = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("receipt JSON: {}", e)))?;

    if let serde_json::Value::Object(map) = &value {
        if !RECEIPT_KEYS.iter().any(|key| map.contains_key(*key)) {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            return Err(Error::Parse(format!(
                "response object has no receipt fields: {}",
                keys.join(", ")
            )));
        }
    }

    let payload: ReceiptPayload = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("receipt JSON: {}", e)))?;

    let records = match payload {
        ReceiptPayload::List(records) => records,
        ReceiptPayload::Wrapped { receipts } => receipts,
        ReceiptPayload::Single(record) => vec![record],
    };
    tracing::debug!(count = records.len(), "parsed receipt response");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Here are the receipts:
```json
[
  {"customerName": "John Smith", "tip": "$4.00"}
]
```
Done."#;

        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("John Smith"));
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"[{"tip": "$1.00"}]"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_error() {
        assert!(extract_json("nothing to see").is_err());
    }

    #[test]
    fn test_parse_receipt_response_array() {
        let response = r#"[{"customerName": "A", "amount": "$10.00"}, {"customerName": "B"}]"#;
        let records = parse_receipt_response(response).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, "$10.00");
        assert_eq!(records[1].customer_name, "B");
    }

    #[test]
    fn test_parse_receipt_response_wrapped() {
        let response = r#"{"receipts": [{"customer_name": "Wrapped", "tip": 3.5}]}"#;
        let records = parse_receipt_response(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer_name, "Wrapped");
        assert_eq!(records[0].tip, "3.5");
    }

    #[test]
    fn test_parse_receipt_response_single_object() {
        let response = r#"Result: {"customerName": "Solo", "signed": true}"#;
        let records = parse_receipt_response(response).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].signed);
    }

    #[test]
    fn test_parse_receipt_response_error_object() {
        let response = r#"{"error": "quota exceeded"}"#;
        match parse_receipt_response(response) {
            Err(Error::Parse(msg)) => assert!(msg.contains("error")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_receipt_response_empty_object() {
        assert!(matches!(parse_receipt_response("{}"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_receipt_response_invalid() {
        let response = "[not json]";
        assert!(matches!(parse_receipt_response(response), Err(Error::Parse(_))));
    }
}
