//! 表示アダプタ
//!
//! コーディネーターの出力をグリッド（表）かスライドショー（1件カード）として描画する。

pub mod grid;
pub mod slideshow;

pub use grid::render_grid;
pub use slideshow::render_slideshow_frame;

use crate::view::{GridPager, ViewStateCoordinator};
use tip_receipts_common::{Field, ViewMode};

/// 現在の表示モードで描画する
pub fn render_view(view: &ViewStateCoordinator, pager: &GridPager, page: usize, columns: &[Field]) -> String {
    match view.view_mode() {
        ViewMode::Grid => {
            let records = view.displayed_records();
            let page = page.min(pager.page_count(records.len()) - 1);
            let mut out = render_grid(pager.page(records, page), columns, page * pager.page_size());
            out.push_str(&format!(
                "page {}/{} · {} of {} receipts\n",
                page + 1,
                pager.page_count(records.len()),
                records.len(),
                view.all_records().len()
            ));
            out
        }
        ViewMode::Slideshow => render_slideshow_frame(
            view.current_record(),
            view.current_index(),
            view.slideshow_records().len(),
            view.slideshow_source(),
        ),
    }
}
