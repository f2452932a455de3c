//! 並べ替え
//!
//! 正規化キーで安定ソートする。キーが等しいレコードは入力順を保つ。

use crate::normalize::{sort_key, SortKey};
use crate::types::{Field, ReceiptRecord, SortDirection};
use std::cmp::Ordering;

/// キー同士を方向付きで比較
pub fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => b.cmp(a),
    }
}

/// レコード列を並べ替えた新しい列を返す
///
/// キーは1レコードにつき1回だけ計算する。
/// 降順は比較を反転するだけなので、同順位の相対順序は昇順と同じく入力順になる。
pub fn sort_records(records: &[ReceiptRecord], field: &Field, direction: SortDirection) -> Vec<ReceiptRecord> {
    let mut keyed: Vec<(SortKey, &ReceiptRecord)> = records
        .iter()
        .map(|r| (sort_key(r, field), r))
        .collect();

    // slice::sort_by は安定ソート
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction));

    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}
