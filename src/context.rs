//! アプリケーションコンテキスト
//!
//! 設定とビュー状態をまとめて各コマンドに渡す。グローバル状態は持たない。

use crate::cli::ViewArgs;
use crate::config::Config;
use crate::present;
use crate::view::{GridPager, ViewStateCoordinator};
use tip_receipts_common::ReceiptRecord;

pub struct AppContext {
    pub config: Config,
    pub view: ViewStateCoordinator,
    pub pager: GridPager,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let view = ViewStateCoordinator::new(config.default_sort.clone(), config.sort_policy);
        let pager = GridPager::new(config.page_size);
        Self { config, view, pager }
    }

    /// レコードを取り込み、コマンドラインの絞り込み・並べ替えを適用する
    ///
    /// 絞り込みの後に並べ替えを適用するので、明示した並べ替えが優先される。
    pub fn load(&mut self, records: Vec<ReceiptRecord>, args: &ViewArgs) {
        self.view.set_records(records);

        if args.filter_field.is_some() || args.query.is_some() {
            let field = args
                .filter_field
                .clone()
                .unwrap_or_else(|| self.view.active_filter().field.clone());
            self.view.apply_filter(field, args.query.as_deref().unwrap_or_default());
        }

        if args.sort.is_some() || args.direction.is_some() {
            let active = self.view.active_sort().clone();
            self.view.set_sort(
                args.sort.clone().unwrap_or(active.field),
                args.direction.unwrap_or(active.direction),
            );
        }
    }

    /// 現在の表示モードで描画（page は0始まり）
    pub fn render(&self, page: usize) -> String {
        present::render_view(&self.view, &self.pager, page, &self.config.columns)
    }
}
