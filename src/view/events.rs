//! ビュー間同期イベント
//!
//! 状態が変わるたびにコーディネーターが購読者へ同期的に配信する。
//! ペイロードはコーディネーター内部の借用なので、購読者は必要な分だけ複製する。

use super::slideshow::SlideshowSource;
use std::fmt;
use tip_receipts_common::{Field, ReceiptRecord, SortDirection, ViewMode};

/// 状態変更イベント
#[derive(Debug, Clone, Copy)]
pub enum ViewEvent<'a> {
    /// 全レコードが差し替えられた
    RecordsReplaced {
        displayed: &'a [ReceiptRecord],
        total: usize,
    },
    /// 絞り込み条件が変わった
    Filtered {
        displayed: &'a [ReceiptRecord],
        field: &'a Field,
        query: &'a str,
    },
    /// 表示中レコードが並べ替えられた
    Sorted {
        displayed: &'a [ReceiptRecord],
        field: &'a Field,
        direction: SortDirection,
    },
    /// グリッド ↔ スライドショーの切り替え
    ViewToggled {
        mode: ViewMode,
        displayed: &'a [ReceiptRecord],
    },
    /// スライドショーの位置または対象列が変わった
    SlideshowMoved {
        index: usize,
        source: SlideshowSource,
        record: Option<&'a ReceiptRecord>,
    },
}

/// イベント種別（ログ・テスト用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    RecordsReplaced,
    Filtered,
    Sorted,
    ViewToggled,
    SlideshowMoved,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::RecordsReplaced => "recordsReplaced",
            EventKind::Filtered => "filtered",
            EventKind::Sorted => "sorted",
            EventKind::ViewToggled => "viewToggled",
            EventKind::SlideshowMoved => "slideshowMoved",
        };
        f.write_str(name)
    }
}

impl<'a> ViewEvent<'a> {
    pub fn kind(&self) -> EventKind {
        match self {
            ViewEvent::RecordsReplaced { .. } => EventKind::RecordsReplaced,
            ViewEvent::Filtered { .. } => EventKind::Filtered,
            ViewEvent::Sorted { .. } => EventKind::Sorted,
            ViewEvent::ViewToggled { .. } => EventKind::ViewToggled,
            ViewEvent::SlideshowMoved { .. } => EventKind::SlideshowMoved,
        }
    }

    /// 表示中レコード列（スライドショー移動イベントには無い）
    pub fn displayed(&self) -> Option<&'a [ReceiptRecord]> {
        match *self {
            ViewEvent::RecordsReplaced { displayed, .. }
            | ViewEvent::Filtered { displayed, .. }
            | ViewEvent::Sorted { displayed, .. }
            | ViewEvent::ViewToggled { displayed, .. } => Some(displayed),
            ViewEvent::SlideshowMoved { .. } => None,
        }
    }
}

/// 購読者
///
/// クロージャは `ViewStateCoordinator::subscribe` で直接登録できる。
pub trait ViewObserver {
    fn on_event(&mut self, event: &ViewEvent<'_>);
}

/// 購読解除用ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
