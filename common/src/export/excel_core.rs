//! Excel生成（共通ライブラリ）
//!
//! 表示中のレシートを1シートの表として書き出す。金額列は数値セル。

use crate::error::{Error, Result};
use crate::normalize::parse_money;
use crate::types::{Field, ReceiptRecord};
use rust_xlsxwriter::*;

/// 出力する列（左から）
const COLUMNS: [Field; 8] = Field::ALL;

const NAME_COL_WIDTH: f64 = 24.0;
const DEFAULT_COL_WIDTH: f64 = 13.0;

fn xlsx_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Export(format!("{}: {}", context, e))
}

/// タイトルからシート名を作る
///
/// Excelが禁止する `[]:*?/\` は `_` に置き換え、前後の `'` を外して31文字に切り詰める。
fn sheet_name_for(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .collect();
    let name: String = cleaned.trim().trim_matches('\'').chars().take(31).collect();
    let name = name.trim_end_matches('\'').to_string();
    if name.trim().is_empty() {
        "Receipts".to_string()
    } else {
        name
    }
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `records` - 出力するレシート（表示順）
/// * `title` - シート名
pub fn generate_excel_buffer(records: &[ReceiptRecord], title: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let money_format = Format::new()
        .set_num_format("$#,##0.00")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let total_format = Format::new().set_bold().set_num_format("$#,##0.00");

    let worksheet = workbook.add_worksheet();
    let sheet_name = sheet_name_for(title);
    worksheet
        .set_name(sheet_name.as_str())
        .map_err(xlsx_err("sheet name"))?;

    for (col, field) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        let width = if *field == Field::CustomerName { NAME_COL_WIDTH } else { DEFAULT_COL_WIDTH };
        worksheet.set_column_width(col, width).map_err(xlsx_err("column width"))?;
        worksheet
            .write_string_with_format(0, col, field.label(), &header_format)
            .map_err(xlsx_err("header"))?;
    }
    let signed_col = COLUMNS.len() as u16;
    worksheet
        .write_string_with_format(0, signed_col, "Signed", &header_format)
        .map_err(xlsx_err("header"))?;
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err("freeze panes"))?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, field) in COLUMNS.iter().enumerate() {
            let col = col as u16;
            let value = field.value(record).unwrap_or_default();
            if field.is_monetary() && !value.trim().is_empty() {
                worksheet
                    .write_number_with_format(row, col, parse_money(value), &money_format)
                    .map_err(xlsx_err("cell"))?;
            } else {
                worksheet
                    .write_string_with_format(row, col, value, &text_format)
                    .map_err(xlsx_err("cell"))?;
            }
        }
        worksheet
            .write_string_with_format(row, signed_col, if record.signed { "yes" } else { "no" }, &text_format)
            .map_err(xlsx_err("cell"))?;
    }

    // 合計行
    let total_row = (records.len() + 1) as u32;
    worksheet
        .write_string_with_format(total_row, 0, "Total", &Format::new().set_bold())
        .map_err(xlsx_err("total row"))?;
    for (col, field) in COLUMNS.iter().enumerate() {
        if !field.is_monetary() {
            continue;
        }
        let sum: f64 = records
            .iter()
            .map(|r| parse_money(field.value(r).unwrap_or_default()))
            .sum();
        worksheet
            .write_number_with_format(total_row, col as u16, sum, &total_format)
            .map_err(xlsx_err("total row"))?;
    }

    workbook.save_to_buffer().map_err(xlsx_err("save"))
}
