/// Returns page `page` (1-based) of `records`. Pages past the end, page 0 and
/// a page size of 0 all give an empty page.
pub fn paginate<R: Clone>(records: &[R], page: usize, page_size: usize) -> Vec<R> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return Vec::new();
    };
    records.iter().skip(start).take(page_size).cloned().collect()
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Current page of a list view, kept within `1..=page_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    len: usize,
}

impl Pager {
    pub fn new(page_size: usize, len: usize) -> Self {
        Self {
            page: 1,
            page_size,
            len,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.len, self.page_size)
    }

    /// Jumps to `page`, clamped into the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    /// Updates the number of records, e.g. after a filter changed.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.go_to(self.page);
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }
}
