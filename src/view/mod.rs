//! ビュー状態コーディネーター
//!
//! 全レコードと表示中レコードを保持し、絞り込み・並べ替え・表示モードの変更に
//! 合わせて表示中レコードを再計算する。グリッドとスライドショーが古いデータを
//! 描画しないよう、状態変更のたびに購読者へ同期的に通知する。
//!
//! どの操作もエラーを返さない。不正なフィールド名は絞り込みでは一致なし、
//! 並べ替えでは空文字キーとして扱われる。

pub mod events;
pub mod pager;
pub mod slideshow;

pub use events::{EventKind, SubscriptionId, ViewEvent, ViewObserver};
pub use pager::GridPager;
pub use slideshow::{SlideshowSource, SlideshowState};

use serde::{Deserialize, Serialize};
use tip_receipts_common::{
    filter_records, sort_records, Field, FilterSpec, ReceiptRecord, RecordId, SortDirection,
    SortSpec, ViewMode,
};

type Observer = Box<dyn FnMut(&ViewEvent<'_>)>;

/// 絞り込み時に並べ替えフィールドをどう扱うか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// 絞り込んだフィールドで並べ替える（方向は維持）
    #[default]
    FollowFilter,
    /// 絞り込みと並べ替えのフィールドを独立に保持する
    Independent,
}

impl std::str::FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "follow_filter" | "follow" => Ok(SortPolicy::FollowFilter),
            "independent" => Ok(SortPolicy::Independent),
            _ => Err(format!("Unknown sort policy: {}. Use follow_filter or independent", s)),
        }
    }
}

/// 呼び出し側がUIイベントループで直列化して使う前提（内部でロックしない）
pub struct ViewStateCoordinator {
    all: Vec<ReceiptRecord>,
    displayed: Vec<ReceiptRecord>,
    filter: FilterSpec,
    sort: SortSpec,
    view_mode: ViewMode,
    slideshow: SlideshowState,
    sort_policy: SortPolicy,
    observers: Vec<(SubscriptionId, Observer)>,
    next_record_id: u64,
    next_subscription_id: u64,
}

fn notify(observers: &mut [(SubscriptionId, Observer)], event: &ViewEvent<'_>) {
    tracing::debug!(kind = %event.kind(), observers = observers.len(), "view event");
    for (_, observer) in observers.iter_mut() {
        observer(event);
    }
}

impl ViewStateCoordinator {
    pub fn new(sort: SortSpec, sort_policy: SortPolicy) -> Self {
        Self {
            all: Vec::new(),
            displayed: Vec::new(),
            filter: FilterSpec::default(),
            sort,
            view_mode: ViewMode::Grid,
            slideshow: SlideshowState::default(),
            sort_policy,
            observers: Vec::new(),
            next_record_id: 1,
            next_subscription_id: 1,
        }
    }

    // ---------------------------------------------------------------
    // 購読
    // ---------------------------------------------------------------

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ViewEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn subscribe_observer<O>(&mut self, mut observer: O) -> SubscriptionId
    where
        O: ViewObserver + 'static,
    {
        self.subscribe(move |event: &ViewEvent<'_>| observer.on_event(event))
    }

    /// 購読を解除する。登録されていたかを返す
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    // ---------------------------------------------------------------
    // 参照
    // ---------------------------------------------------------------

    pub fn all_records(&self) -> &[ReceiptRecord] {
        &self.all
    }

    pub fn displayed_records(&self) -> &[ReceiptRecord] {
        &self.displayed
    }

    pub fn active_filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn active_sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn sort_policy(&self) -> SortPolicy {
        self.sort_policy
    }

    pub fn slideshow_source(&self) -> SlideshowSource {
        self.slideshow.source
    }

    /// スライドショーが巡回している列
    pub fn slideshow_records(&self) -> &[ReceiptRecord] {
        match self.slideshow.source {
            SlideshowSource::Filtered => &self.displayed,
            SlideshowSource::All => &self.all,
        }
    }

    pub fn current_index(&self) -> usize {
        self.slideshow.index
    }

    pub fn current_record(&self) -> Option<&ReceiptRecord> {
        self.slideshow_records().get(self.slideshow.index)
    }

    // ---------------------------------------------------------------
    // 状態変更
    // ---------------------------------------------------------------

    /// 全レコードを差し替える
    ///
    /// 未採番のレコードにIDを振り、現在の絞り込み・並べ替えで表示中レコードを
    /// 再計算し、スライドショーを先頭に戻す。
    pub fn set_records(&mut self, records: Vec<ReceiptRecord>) {
        self.all = records;
        self.assign_ids();
        self.displayed = self.derive_displayed();
        self.slideshow.reset();

        tracing::debug!(
            total = self.all.len(),
            displayed = self.displayed.len(),
            "records replaced"
        );
        notify(
            &mut self.observers,
            &ViewEvent::RecordsReplaced {
                displayed: &self.displayed,
                total: self.all.len(),
            },
        );
    }

    /// 絞り込みを適用する
    ///
    /// 表示中レコード = Sort(Filter(全レコード, field, query))。
    /// `SortPolicy::FollowFilter` では並べ替えフィールドも `field` になる。
    pub fn apply_filter(&mut self, field: Field, query: &str) {
        if !field.is_known() {
            tracing::warn!(field = %field, "filter on unknown field");
        }
        if self.sort_policy == SortPolicy::FollowFilter {
            self.sort.field = field.clone();
        }
        self.filter = FilterSpec {
            field,
            query: query.to_string(),
        };
        self.displayed = self.derive_displayed();
        self.clamp_slideshow();

        tracing::debug!(
            field = %self.filter.field,
            query = %self.filter.query,
            displayed = self.displayed.len(),
            "filter applied"
        );
        notify(
            &mut self.observers,
            &ViewEvent::Filtered {
                displayed: &self.displayed,
                field: &self.filter.field,
                query: &self.filter.query,
            },
        );
    }

    /// 絞り込みを解除する（並べ替えは維持）
    pub fn clear_filter(&mut self) {
        let field = self.filter.field.clone();
        self.apply_filter(field, "");
    }

    /// 表示中レコードだけを並べ替える（絞り込みは再実行しない）
    pub fn set_sort(&mut self, field: Field, direction: SortDirection) {
        if !field.is_known() {
            tracing::warn!(field = %field, "sort on unknown field");
        }
        self.sort = SortSpec { field, direction };
        self.displayed = sort_records(&self.displayed, &self.sort.field, direction);

        notify(
            &mut self.observers,
            &ViewEvent::Sorted {
                displayed: &self.displayed,
                field: &self.sort.field,
                direction,
            },
        );
    }

    /// 表示モードを切り替える
    ///
    /// スライドショーへの切り替えでは表示中レコードを先頭から巡回する。
    /// グリッドへの切り替えでは表示中レコードに触れない。
    pub fn toggle_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        if mode == ViewMode::Slideshow {
            self.slideshow.reset();
        }

        notify(
            &mut self.observers,
            &ViewEvent::ViewToggled {
                mode,
                displayed: &self.displayed,
            },
        );
    }

    /// グリッドで選んだレコードからスライドショーを開く
    pub fn open_slideshow_at(&mut self, index: usize) {
        self.toggle_view_mode(ViewMode::Slideshow);
        self.jump_to(index);
    }

    /// スライドショーの「全件表示 / 絞り込み表示」を切り替える
    ///
    /// 今見ているレコードを切り替え先でも探し、見つからなければ先頭に戻る。
    pub fn toggle_show_all(&mut self) -> SlideshowSource {
        let target = self.slideshow.source.toggled();
        self.set_slideshow_source(target);
        target
    }

    pub fn set_slideshow_source(&mut self, source: SlideshowSource) {
        if self.slideshow.source == source {
            return;
        }
        let current = self.current_record().cloned();
        self.slideshow.source = source;
        self.slideshow.index = current
            .and_then(|record| slideshow::locate(&record, self.slideshow_records()))
            .unwrap_or(0);

        self.notify_slideshow();
    }

    pub fn next(&mut self) -> usize {
        let index = self.slideshow.index.saturating_add(1);
        self.move_slideshow(index)
    }

    pub fn previous(&mut self) -> usize {
        let index = self.slideshow.index.saturating_sub(1);
        self.move_slideshow(index)
    }

    /// 指定位置へ移動する（範囲外は端に丸める）
    pub fn jump_to(&mut self, index: usize) -> usize {
        self.move_slideshow(index)
    }

    // ---------------------------------------------------------------
    // 内部処理
    // ---------------------------------------------------------------

    fn derive_displayed(&self) -> Vec<ReceiptRecord> {
        let filtered = filter_records(&self.all, &self.filter.field, &self.filter.query);
        sort_records(&filtered, &self.sort.field, self.sort.direction)
    }

    fn assign_ids(&mut self) {
        let max_existing = self.all.iter().map(|r| r.id.0).max().unwrap_or(0);
        self.next_record_id = self.next_record_id.max(max_existing.saturating_add(1));

        for record in self.all.iter_mut().filter(|r| r.id.is_unassigned()) {
            record.id = RecordId(self.next_record_id);
            self.next_record_id = self.next_record_id.saturating_add(1);
        }
    }

    fn clamp_slideshow(&mut self) {
        let len = self.slideshow_records().len();
        self.slideshow.clamp_to(len);
    }

    fn move_slideshow(&mut self, index: usize) -> usize {
        let clamped = slideshow::clamp_index(index, self.slideshow_records().len());
        if clamped != self.slideshow.index {
            self.slideshow.index = clamped;
            self.notify_slideshow();
        }
        clamped
    }

    fn notify_slideshow(&mut self) {
        let records = match self.slideshow.source {
            SlideshowSource::Filtered => &self.displayed,
            SlideshowSource::All => &self.all,
        };
        notify(
            &mut self.observers,
            &ViewEvent::SlideshowMoved {
                index: self.slideshow.index,
                source: self.slideshow.source,
                record: records.get(self.slideshow.index),
            },
        );
    }
}

impl Default for ViewStateCoordinator {
    fn default() -> Self {
        Self::new(SortSpec::default(), SortPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rec(name: &str, amount: &str, image: &str) -> ReceiptRecord {
        ReceiptRecord {
            customer_name: name.to_string(),
            amount: amount.to_string(),
            image_url: image.to_string(),
            ..Default::default()
        }
    }

    fn names(records: &[ReceiptRecord]) -> Vec<String> {
        records.iter().map(|r| r.customer_name.clone()).collect()
    }

    fn sample() -> Vec<ReceiptRecord> {
        vec![
            rec("John Smith", "$10", "img-1"),
            rec("Jane Doe", "$5", "img-2"),
            rec("Bob Smithson", "$20", "img-3"),
        ]
    }

    #[test]
    fn test_set_records_assigns_ids() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());

        let ids: Vec<u64> = view.all_records().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // 再設定しても既存IDは維持され、新規分は続きから振られる
        let mut again = view.all_records().to_vec();
        again.push(rec("New", "$1", "img-4"));
        view.set_records(again);
        let ids: Vec<u64> = view.all_records().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_set_records_with_max_id_does_not_overflow() {
        let mut view = ViewStateCoordinator::default();
        let mut records = sample();
        records[0].id = RecordId(u64::MAX);
        view.set_records(records);

        assert_eq!(view.all_records().len(), 3);
        assert_eq!(view.all_records()[0].id, RecordId(u64::MAX));
        assert!(view.all_records().iter().all(|r| !r.id.is_unassigned()));
    }

    #[test]
    fn test_set_records_reapplies_active_filter_and_sort() {
        let mut view = ViewStateCoordinator::new(
            SortSpec {
                field: Field::Amount,
                direction: SortDirection::Asc,
            },
            SortPolicy::Independent,
        );
        view.set_records(sample());
        view.apply_filter(Field::CustomerName, "smith");

        view.set_records(vec![
            rec("Anna Smith", "$30", "img-4"),
            rec("Carl Jones", "$1", "img-5"),
            rec("Dana Smithers", "$7", "img-6"),
            rec("Eve Smith", "$15", "img-7"),
        ]);

        assert_eq!(view.active_filter().query, "smith");
        assert_eq!(
            names(view.displayed_records()),
            vec!["Dana Smithers", "Eve Smith", "Anna Smith"]
        );
        assert_eq!(view.all_records().len(), 4);
    }

    #[test]
    fn test_set_sort_amount_ascending() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(vec![rec("A", "$10", ""), rec("B", "$5", ""), rec("C", "$20", "")]);
        view.set_sort(Field::Amount, SortDirection::Asc);
        assert_eq!(names(view.displayed_records()), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_apply_filter_keeps_relative_order() {
        let mut view = ViewStateCoordinator::new(
            SortSpec { field: Field::Date, direction: SortDirection::Asc },
            SortPolicy::Independent,
        );
        view.set_records(sample());
        view.apply_filter(Field::CustomerName, "smith");
        assert_eq!(names(view.displayed_records()), vec!["John Smith", "Bob Smithson"]);
    }

    #[test]
    fn test_apply_filter_follow_policy_sorts_by_filter_field() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.set_sort(Field::Amount, SortDirection::Desc);
        view.apply_filter(Field::CustomerName, "smith");

        assert_eq!(view.active_sort().field, Field::CustomerName);
        assert_eq!(view.active_sort().direction, SortDirection::Desc);
        assert_eq!(names(view.displayed_records()), vec!["John Smith", "Bob Smithson"]);
    }

    #[test]
    fn test_apply_filter_independent_policy_keeps_sort_field() {
        let mut view = ViewStateCoordinator::new(SortSpec::default(), SortPolicy::Independent);
        view.set_records(sample());
        view.set_sort(Field::Amount, SortDirection::Desc);
        view.apply_filter(Field::CustomerName, "smith");

        assert_eq!(view.active_sort().field, Field::Amount);
        assert_eq!(names(view.displayed_records()), vec!["Bob Smithson", "John Smith"]);
    }

    #[test]
    fn test_clear_filter_returns_full_sorted_set() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.apply_filter(Field::Amount, "2");
        assert_eq!(names(view.displayed_records()), vec!["Bob Smithson"]);

        view.clear_filter();
        assert_eq!(
            names(view.displayed_records()),
            vec!["Jane Doe", "John Smith", "Bob Smithson"]
        );
        assert!(view.active_filter().is_empty());
    }

    #[test]
    fn test_unknown_field_degrades() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.apply_filter(Field::parse("nickname"), "smith");
        assert!(view.displayed_records().is_empty());

        view.clear_filter();
        assert_eq!(view.displayed_records().len(), 3);
    }

    #[test]
    fn test_observers_notified_synchronously() {
        let seen: Rc<RefCell<Vec<(EventKind, Option<usize>)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut view = ViewStateCoordinator::default();
        view.subscribe(move |event: &ViewEvent<'_>| {
            sink.borrow_mut().push((event.kind(), event.displayed().map(|d| d.len())));
        });

        view.set_records(sample());
        view.apply_filter(Field::CustomerName, "smith");
        view.set_sort(Field::Amount, SortDirection::Asc);
        view.toggle_view_mode(ViewMode::Slideshow);

        assert_eq!(
            *seen.borrow(),
            vec![
                (EventKind::RecordsReplaced, Some(3)),
                (EventKind::Filtered, Some(2)),
                (EventKind::Sorted, Some(2)),
                (EventKind::ViewToggled, Some(2)),
            ]
        );
    }

    #[test]
    fn test_filtered_event_payload() {
        let captured: Rc<RefCell<Option<(String, String, usize)>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&captured);

        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.subscribe(move |event: &ViewEvent<'_>| {
            if let ViewEvent::Filtered { displayed, field, query } = event {
                *sink.borrow_mut() = Some((field.to_string(), query.to_string(), displayed.len()));
            }
        });
        view.apply_filter(Field::CustomerName, "doe");

        assert_eq!(
            *captured.borrow(),
            Some(("customer_name".to_string(), "doe".to_string(), 1))
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut view = ViewStateCoordinator::default();
        let id = view.subscribe(move |_: &ViewEvent<'_>| *sink.borrow_mut() += 1);
        view.set_records(sample());
        assert!(view.unsubscribe(id));
        assert!(!view.unsubscribe(id));
        view.clear_filter();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_slideshow_uses_displayed_records() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.apply_filter(Field::CustomerName, "smith");
        view.toggle_view_mode(ViewMode::Slideshow);

        assert_eq!(view.view_mode(), ViewMode::Slideshow);
        assert_eq!(view.slideshow_records().len(), 2);
        assert_eq!(view.current_index(), 0);
    }

    #[test]
    fn test_slideshow_navigation_is_clamped() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.toggle_view_mode(ViewMode::Slideshow);

        assert_eq!(view.previous(), 0);
        assert_eq!(view.next(), 1);
        assert_eq!(view.next(), 2);
        assert_eq!(view.next(), 2);
        assert_eq!(view.jump_to(99), 2);
        assert_eq!(view.jump_to(1), 1);
    }

    #[test]
    fn test_slideshow_navigation_on_empty() {
        let mut view = ViewStateCoordinator::default();
        view.toggle_view_mode(ViewMode::Slideshow);
        assert_eq!(view.next(), 0);
        assert!(view.current_record().is_none());
    }

    #[test]
    fn test_toggle_show_all_preserves_position() {
        let mut view = ViewStateCoordinator::new(SortSpec::default(), SortPolicy::Independent);
        view.set_records(sample());
        view.apply_filter(Field::CustomerName, "smith");
        view.open_slideshow_at(1);
        assert_eq!(view.current_record().map(|r| r.customer_name.as_str()), Some("Bob Smithson"));

        assert_eq!(view.toggle_show_all(), SlideshowSource::All);
        assert_eq!(view.current_index(), 2);
        assert_eq!(view.current_record().map(|r| r.customer_name.as_str()), Some("Bob Smithson"));

        // 絞り込み外のレコードに移動してから戻すと先頭になる
        view.jump_to(1);
        assert_eq!(view.toggle_show_all(), SlideshowSource::Filtered);
        assert_eq!(view.current_index(), 0);
    }

    #[test]
    fn test_toggle_show_all_roundtrip_restores_filtered_subset() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.apply_filter(Field::CustomerName, "smith");
        view.toggle_view_mode(ViewMode::Slideshow);
        let before = view.slideshow_records().to_vec();

        view.toggle_show_all();
        assert_eq!(view.slideshow_records().len(), 3);
        view.toggle_show_all();

        assert_eq!(view.slideshow_records(), before.as_slice());
        assert_eq!(view.displayed_records(), before.as_slice());
    }

    #[test]
    fn test_set_records_resets_slideshow() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.open_slideshow_at(2);
        view.toggle_show_all();

        view.set_records(sample());
        assert_eq!(view.current_index(), 0);
        assert_eq!(view.slideshow_source(), SlideshowSource::Filtered);
    }

    #[test]
    fn test_displayed_is_subset_of_all() {
        let mut view = ViewStateCoordinator::default();
        view.set_records(sample());
        view.apply_filter(Field::Amount, "0");
        for record in view.displayed_records() {
            assert!(view.all_records().contains(record));
        }
    }

    #[test]
    fn test_sort_policy_from_str() {
        assert_eq!("follow-filter".parse::<SortPolicy>(), Ok(SortPolicy::FollowFilter));
        assert_eq!("independent".parse::<SortPolicy>(), Ok(SortPolicy::Independent));
        assert!("random".parse::<SortPolicy>().is_err());
    }
}
