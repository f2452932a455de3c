//! 集計（件数・金額合計・平均チップ率）

use serde::Serialize;
use std::fmt;
use tip_receipts_common::{parse_money, ReceiptRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    pub count: usize,
    pub signed_count: usize,
    pub amount: f64,
    pub tip: f64,
    pub total: f64,
    /// チップ合計 / 金額合計 × 100（金額合計が0なら None）
    pub tip_percent: Option<f64>,
}

impl ReceiptSummary {
    pub fn from_records(records: &[ReceiptRecord]) -> Self {
        let mut summary = Self {
            count: records.len(),
            ..Default::default()
        };

        for record in records {
            summary.amount += parse_money(&record.amount);
            summary.tip += parse_money(&record.tip);
            summary.total += parse_money(&record.total);
            if record.signed {
                summary.signed_count += 1;
            }
        }

        if summary.amount > 0.0 {
            summary.tip_percent = Some(summary.tip / summary.amount * 100.0);
        }
        summary
    }
}

impl fmt::Display for ReceiptSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Receipts: {} ({} signed)", self.count, self.signed_count)?;
        writeln!(f, "Amount:   ${:.2}", self.amount)?;
        writeln!(f, "Tips:     ${:.2}", self.tip)?;
        writeln!(f, "Total:    ${:.2}", self.total)?;
        match self.tip_percent {
            Some(pct) => writeln!(f, "Tip rate: {:.1}%", pct),
            None => writeln!(f, "Tip rate: -"),
        }
    }
}
