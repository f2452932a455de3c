//! グリッドのページ分割

/// 1ページあたりの件数でレコード列を区切る
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPager {
    page_size: usize,
}

impl GridPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 総ページ数（0件でも1ページとして扱う）
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// 指定ページ（0始まり）を切り出す。範囲外は最終ページに丸める
    pub fn page<'a, T>(&self, records: &'a [T], page: usize) -> &'a [T] {
        let page = page.min(self.page_count(records.len()) - 1);
        let start = (page * self.page_size).min(records.len());
        let end = (start + self.page_size).min(records.len());
        &records[start..end]
    }

    /// 何番目のレコードがどのページにあるか
    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size
    }
}

impl Default for GridPager {
    fn default() -> Self {
        Self::new(12)
    }
}
