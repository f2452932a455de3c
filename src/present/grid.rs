//! グリッド表示（テキスト表）

use tip_receipts_common::{Field, ReceiptRecord};

const MIN_COL_WIDTH: usize = 6;
const MAX_COL_WIDTH: usize = 24;

/// 表示幅に収まらない値は末尾を `…` にする
fn fit(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        format!("{:<width$}", value, width = width)
    } else {
        let truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

fn column_width(field: &Field, records: &[ReceiptRecord]) -> usize {
    records
        .iter()
        .filter_map(|r| field.value(r))
        .map(|v| v.chars().count())
        .chain(std::iter::once(field.label().chars().count()))
        .max()
        .unwrap_or(0)
        .clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
}

/// レコード列を表として描画する
///
/// 0件の場合はエラーではなく「レコードなし」表示になる。
///
/// # Arguments
/// * `records` - 描画するレコード（1ページ分）
/// * `columns` - 表示する列
/// * `first_index` - 先頭レコードの通し番号（0始まり）
pub fn render_grid(records: &[ReceiptRecord], columns: &[Field], first_index: usize) -> String {
    if records.is_empty() {
        return "(no records)\n".to_string();
    }

    let widths: Vec<usize> = columns.iter().map(|f| column_width(f, records)).collect();
    let number_width = (first_index + records.len()).to_string().len().max(1);

    let mut out = String::new();

    out.push_str(&" ".repeat(number_width + 2));
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(f, w)| fit(f.label(), *w))
        .collect();
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    let rule_len = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3;
    out.push_str(&" ".repeat(number_width + 2));
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for (offset, record) in records.iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(f, w)| fit(f.value(record).unwrap_or_default(), *w))
            .collect();
        out.push_str(&format!(
            "{:>width$}. {}",
            first_index + offset + 1,
            cells.join(" | ").trim_end(),
            width = number_width
        ));
        out.push('\n');
    }

    out
}
