//! 絞り込み
//!
//! 指定フィールドにクエリ文字列を含むレコードを選ぶ（大文字小文字無視）。

use crate::types::{Field, ReceiptRecord};

/// 1件のレコードがクエリに一致するか
///
/// `query` は小文字化・トリム済みであること。
fn matches(record: &ReceiptRecord, field: &Field, query: &str) -> bool {
    let Some(value) = field.value(record) else {
        return false;
    };
    if value.is_empty() {
        return false;
    }

    let haystack = if field.is_monetary() {
        value.replace('$', "").to_lowercase()
    } else {
        value.to_lowercase()
    };
    haystack.contains(query)
}

/// レコード列を絞り込む
///
/// クエリが空（空白のみを含む）の場合は入力をそのまま複製して返す。
/// 一致したレコードの相対順序は保たれ、入力は変更しない。
///
/// # Examples
/// ```
/// use tip_receipts_common::{filter_records, Field, ReceiptRecord};
///
/// let records = vec![
///     ReceiptRecord { customer_name: "John Smith".into(), ..Default::default() },
///     ReceiptRecord { customer_name: "Jane Doe".into(), ..Default::default() },
/// ];
/// let hits = filter_records(&records, &Field::CustomerName, "SMITH");
/// assert_eq!(hits.len(), 1);
/// ```
pub fn filter_records(records: &[ReceiptRecord], field: &Field, query: &str) -> Vec<ReceiptRecord> {
    let query = query.trim();
    if query.is_empty() {
        return records.to_vec();
    }

    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches(r, field, &query))
        .cloned()
        .collect()
}
