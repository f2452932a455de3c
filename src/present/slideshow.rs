//! スライドショー表示（1件ずつのカード）

use crate::view::SlideshowSource;
use tip_receipts_common::{Field, ReceiptRecord};

/// 1件分のフレームを描画する
///
/// # Arguments
/// * `record` - 表示するレコード（None なら空表示）
/// * `index` - 列内の位置（0始まり）
/// * `len` - 列の長さ
/// * `source` - 全件表示か絞り込み表示か
pub fn render_slideshow_frame(
    record: Option<&ReceiptRecord>,
    index: usize,
    len: usize,
    source: SlideshowSource,
) -> String {
    let Some(record) = record else {
        return format!("[0/0 {}] (no records)\n", source);
    };

    let mut out = format!("[{}/{} {}] {}\n", index + 1, len, source, record.id);
    for field in Field::ALL.iter() {
        let value = field.value(record).unwrap_or_default();
        let value = if value.is_empty() { "-" } else { value };
        out.push_str(&format!("  {:<9} {}\n", field.label(), value));
    }
    out.push_str(&format!("  {:<9} {}\n", "Signed", if record.signed { "yes" } else { "no" }));
    if !record.image_url.is_empty() {
        out.push_str(&format!("  {:<9} {}\n", "Image", record.image_url));
    }
    out.push_str(&format!("  {:<9} {:.0}%\n", "Conf.", record.confidence * 100.0));
    out
}
