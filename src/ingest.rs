//! レシートデータの読み込み
//!
//! 画像解析APIの生レスポンス（説明文やコードブロック付き）も、
//! 書き出し済みのJSON配列もそのまま読める。

use crate::error::{Result, TipReceiptsError};
use std::path::Path;
use tip_receipts_common::{parse_receipt_response, ReceiptRecord};

pub fn load_records(path: &Path) -> Result<Vec<ReceiptRecord>> {
    if !path.exists() {
        return Err(TipReceiptsError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let records = parse_receipt_response(&content)?;

    let low_confidence = records.iter().filter(|r| r.confidence > 0.0 && r.confidence < 0.5).count();
    if low_confidence > 0 {
        tracing::warn!(count = low_confidence, "receipts with low extraction confidence");
    }
    tracing::info!(count = records.len(), path = %path.display(), "loaded receipts");
    Ok(records)
}

pub fn save_records(records: &[ReceiptRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
