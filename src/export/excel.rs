//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::Result;
use std::path::Path;
use tip_receipts_common::export::excel_core::generate_excel_buffer;
use tip_receipts_common::ReceiptRecord;

pub fn generate_excel(records: &[ReceiptRecord], output_path: &Path, title: &str) -> Result<()> {
    let buffer = generate_excel_buffer(records, title)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
