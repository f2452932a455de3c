//! スライドショーの位置管理
//!
//! 位置は `[0, len-1]` に丸める（端で折り返さない）。

use std::fmt;
use tip_receipts_common::ReceiptRecord;

/// スライドショーが巡回する列
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlideshowSource {
    /// 絞り込み・並べ替え後の表示中レコード
    #[default]
    Filtered,
    /// 全レコード（取り込み順）
    All,
}

impl SlideshowSource {
    pub fn toggled(self) -> Self {
        match self {
            SlideshowSource::Filtered => SlideshowSource::All,
            SlideshowSource::All => SlideshowSource::Filtered,
        }
    }
}

impl fmt::Display for SlideshowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideshowSource::Filtered => write!(f, "filtered"),
            SlideshowSource::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideshowState {
    pub index: usize,
    pub source: SlideshowSource,
}

impl SlideshowState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 列の長さに合わせて位置を丸め、変化したかを返す
    pub fn clamp_to(&mut self, len: usize) -> bool {
        let clamped = clamp_index(self.index, len);
        let changed = clamped != self.index;
        self.index = clamped;
        changed
    }
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// 別の列の中で同じレコードの位置を探す
///
/// 採番済みIDで探し、見つからなければ imageUrl で探す。
pub fn locate(record: &ReceiptRecord, records: &[ReceiptRecord]) -> Option<usize> {
    if !record.id.is_unassigned() {
        if let Some(pos) = records.iter().position(|r| r.id == record.id) {
            return Some(pos);
        }
    }
    if record.image_url.is_empty() {
        return None;
    }
    records.iter().position(|r| r.image_url == record.image_url)
}
